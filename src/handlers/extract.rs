use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::Response,
};

use crate::{
    db::user_store::UserLoader,
    error::AppError,
    handlers::redirect_with,
    models::{
        flash::{Flash, Outcome},
        user::User,
    },
    routes::LOGIN,
    session::{FLASH_COOKIE, SESSION_COOKIE, SessionData, SessionIdentity, read_cookie},
    state::AppState,
};

const LOGIN_REQUIRED: &str = "Veuillez vous connecter pour accéder à cette page.";

/// The verified session cookie of the request, if any
#[derive(Debug, Clone)]
pub struct Session(pub Option<SessionData>);

impl SessionIdentity for Session {
    fn session_id(&self) -> Option<i64> {
        self.0.session_id()
    }
}

impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let data = read_cookie(&parts.headers, SESSION_COOKIE)
            .and_then(|token| state.sessions.decode_session(token));
        Ok(Session(data))
    }
}

/// Load the user behind a session. Anything short of a matching row,
/// including a storage failure, leaves the request anonymous.
pub async fn resolve_identity(
    loader: &dyn UserLoader,
    session: &(impl SessionIdentity + Sync),
) -> Option<User> {
    let id = session.session_id()?;

    match loader.load_user(id).await {
        Ok(user) => {
            if user.is_none() {
                tracing::debug!(user_id = id, "Session refers to an unknown user");
            }
            user
        }
        Err(e) => {
            tracing::error!(error = %e, user_id = id, "Could not load session user");
            None
        }
    }
}

/// The logged-in user, or `None` for anonymous requests
pub struct CurrentUser(pub Option<User>);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        Ok(CurrentUser(resolve_identity(&state.user_store, &session).await))
    }
}

/// The logged-in user. Anonymous requests are sent to the login form.
pub struct RequireUser(pub User);

impl FromRequestParts<Arc<AppState>> for RequireUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = match CurrentUser::from_request_parts(parts, state).await {
            Ok(user) => user,
            Err(never) => match never {},
        };

        user.map(RequireUser).ok_or_else(|| {
            tracing::info!(path = %parts.uri.path(), "Anonymous request to a protected route");
            redirect_with(
                &state.sessions,
                Outcome::new(Flash::warning(LOGIN_REQUIRED), LOGIN),
                Vec::new(),
            )
        })
    }
}

/// Competence id taken from the path. Only plain decimal digits are
/// accepted; anything else is an unknown page, whatever the session.
#[derive(Debug)]
pub struct CompetenceId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for CompetenceId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("competence".into()))?;

        parse_id(&raw)
            .map(CompetenceId)
            .ok_or_else(|| AppError::NotFound(format!("competence {raw}")))
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Flash message left by the previous redirect
pub struct PendingFlash {
    pub flash: Option<Flash>,
    /// A flash cookie was sent, valid or not, and must be cleared.
    pub present: bool,
}

impl FromRequestParts<Arc<AppState>> for PendingFlash {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = read_cookie(&parts.headers, FLASH_COOKIE);
        Ok(PendingFlash {
            flash: token.and_then(|token| state.sessions.decode_flash(token)),
            present: token.is_some(),
        })
    }
}
