use std::sync::Arc;

use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    error::Result,
    handlers::{
        extract::{CurrentUser, PendingFlash},
        redirect_with, render_page,
    },
    models::user::{LoginForm, RegisterForm},
    routes::DASHBOARD_SERVICES,
    state::AppState,
    views,
};

/// Registration form
pub async fn register_page(State(state): State<Arc<AppState>>, pending: PendingFlash) -> Response {
    render_page(&state.sessions, &pending, views::register_page(pending.flash.as_ref()))
}

/// Account creation
pub async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Response {
    let outcome = state.auth.register(form).await;
    redirect_with(&state.sessions, outcome, Vec::new())
}

/// Login form. Authenticated users go straight to the dashboard.
pub async fn login_page(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    pending: PendingFlash,
) -> Response {
    if user.is_some() {
        return Redirect::to(DASHBOARD_SERVICES).into_response();
    }
    render_page(&state.sessions, &pending, views::login_page(pending.flash.as_ref()))
}

/// Credential check; on success a session cookie is issued
pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let result = state.auth.login(form).await;

    let cookies = match result.user {
        Some(user) => vec![state.sessions.session_cookie(&state.sessions.issue(user.id)?)],
        None => Vec::new(),
    };

    Ok(redirect_with(&state.sessions, result.outcome, cookies))
}

/// Session termination, whether or not a session exists
pub async fn logout(State(state): State<Arc<AppState>>) -> Response {
    tracing::info!("Session cleared");
    let cookies = vec![state.sessions.clear_session_cookie()];
    redirect_with(&state.sessions, state.auth.logout(), cookies)
}
