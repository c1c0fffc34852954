// HTTP routes configuration

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

pub const HOME: &str = "/";
pub const DASHBOARD: &str = "/dashboard";
pub const DASHBOARD_SERVICES: &str = "/dashboard#services";
pub const REGISTER: &str = "/register";
pub const LOGIN: &str = "/login";
pub const LOGOUT: &str = "/logout";
pub const ADD_COMPETENCE: &str = "/ajouter_competence";
pub const DELETE_COMPETENCE: &str = "/supprimer_competence/{id}";

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(HOME, get(handlers::competence::home))
        .route(
            REGISTER,
            get(handlers::auth::register_page).post(handlers::auth::register),
        )
        .route(
            LOGIN,
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route(LOGOUT, get(handlers::auth::logout))
        .route(DASHBOARD, get(handlers::competence::dashboard))
        .route(ADD_COMPETENCE, post(handlers::competence::add_competence))
        .route(DELETE_COMPETENCE, get(handlers::competence::delete_competence))
        .fallback(handlers::not_found)
        .with_state(state)
}
