use std::sync::Arc;

use axum::{
    extract::{Form, State},
    response::{Redirect, Response},
};

use crate::{
    error::Result,
    handlers::{
        extract::{CompetenceId, CurrentUser, PendingFlash, RequireUser},
        redirect_with, render_page,
    },
    models::competence::CompetenceForm,
    routes::DASHBOARD,
    state::AppState,
    views,
};

pub async fn home() -> Redirect {
    Redirect::to(DASHBOARD)
}

/// Public list of every competence
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    pending: PendingFlash,
) -> Result<Response> {
    let competences = state.competences.list().await?;
    let html = views::dashboard_page(pending.flash.as_ref(), user.as_ref(), &competences);
    Ok(render_page(&state.sessions, &pending, html))
}

pub async fn add_competence(
    State(state): State<Arc<AppState>>,
    RequireUser(user): RequireUser,
    Form(form): Form<CompetenceForm>,
) -> Response {
    tracing::debug!(user_id = user.id, "Adding competence");
    let outcome = state.competences.add(form).await;
    redirect_with(&state.sessions, outcome, Vec::new())
}

/// Delete by id. A malformed id is rejected before the session check.
pub async fn delete_competence(
    State(state): State<Arc<AppState>>,
    CompetenceId(id): CompetenceId,
    RequireUser(user): RequireUser,
) -> Result<Response> {
    tracing::debug!(user_id = user.id, competence_id = id, "Deleting competence");
    let outcome = state.competences.delete(id).await?;
    Ok(redirect_with(&state.sessions, outcome, Vec::new()))
}
