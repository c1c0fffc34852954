use crate::{
    db::{DbPool, competence_store::CompetenceStore, user_store::UserStore},
    services::{AuthService, CompetenceService},
    session::SessionKeys,
};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub user_store: UserStore,
    pub auth: AuthService,
    pub competences: CompetenceService,
    pub sessions: SessionKeys,
}

impl AppState {
    pub fn new(pool: DbPool, sessions: SessionKeys) -> Self {
        let user_store = UserStore::new(pool.clone());

        Self {
            auth: AuthService::new(user_store.clone()),
            competences: CompetenceService::new(CompetenceStore::new(pool)),
            user_store,
            sessions,
        }
    }
}
