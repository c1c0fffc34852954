use axum::{
    http::header::SET_COOKIE,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};

use crate::{error::AppError, models::flash::Outcome, session::SessionKeys};

pub mod auth;
pub mod competence;
pub mod extract;

use extract::PendingFlash;

/// Turn a handler outcome into a redirect carrying its flash message.
/// `cookies` are extra `Set-Cookie` values, such as a session change.
pub fn redirect_with(
    sessions: &SessionKeys,
    outcome: Outcome,
    mut cookies: Vec<String>,
) -> Response {
    match sessions.encode_flash(&outcome.flash) {
        Ok(token) => cookies.push(sessions.flash_cookie(&token)),
        Err(e) => tracing::error!(error = %e, "Could not encode flash message"),
    }

    let headers: Vec<_> = cookies.into_iter().map(|cookie| (SET_COOKIE, cookie)).collect();
    (AppendHeaders(headers), Redirect::to(outcome.location)).into_response()
}

/// Render a page, consuming the pending flash message.
pub fn render_page(sessions: &SessionKeys, pending: &PendingFlash, html: String) -> Response {
    if pending.present {
        ([(SET_COOKIE, sessions.clear_flash_cookie())], Html(html)).into_response()
    } else {
        Html(html).into_response()
    }
}

pub async fn not_found() -> AppError {
    AppError::NotFound("page".into())
}
