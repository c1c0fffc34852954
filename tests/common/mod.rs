#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
};
use portfolio_server::{
    db::{DbPool, init_memory_pool},
    models::flash::Flash,
    routes::build_router,
    session::{FLASH_COOKIE, SESSION_COOKIE, SessionKeys},
    state::AppState,
};
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

/// An in-process browser: keeps cookies between requests to one router.
pub struct TestClient {
    pub app: Router,
    pub state: Arc<AppState>,
    pub pool: DbPool,
    pub cookies: HashMap<String, String>,
}

pub async fn build_client() -> TestClient {
    let pool = init_memory_pool().await.expect("in-memory pool should open");
    let sessions = SessionKeys::new(b"test-secret", 24, false);
    let state = Arc::new(AppState::new(pool.clone(), sessions));

    TestClient {
        app: build_router(state.clone()),
        state,
        pool,
        cookies: HashMap::new(),
    }
}

impl TestClient {
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::builder().method("GET").uri(uri);
        self.send(request, Body::empty()).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request, Body::from(body)).await
    }

    async fn send(
        &mut self,
        mut builder: axum::http::request::Builder,
        body: Body,
    ) -> TestResponse {
        if !self.cookies.is_empty() {
            let header = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(COOKIE, header);
        }

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).expect("request should build"))
            .await
            .expect("request should be handled");

        for value in response.headers().get_all(SET_COOKIE) {
            let value = value.to_str().expect("cookie should be ascii");
            let pair = value.split(';').next().unwrap_or_default();
            let (name, token) = pair.split_once('=').expect("cookie should have a value");
            if token.is_empty() || value.contains("Max-Age=0") {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), token.to_string());
            }
        }

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|h| h.to_str().ok())
            .map(String::from);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).to_string(),
        }
    }

    pub fn has_session(&self) -> bool {
        self.cookies.contains_key(SESSION_COOKIE)
    }

    /// The flash message waiting for the next page, if any
    pub fn pending_flash(&self) -> Option<Flash> {
        self.cookies
            .get(FLASH_COOKIE)
            .and_then(|token| self.state.sessions.decode_flash(token))
    }

    pub async fn register(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form("/register", &[("username", username), ("password", password)])
            .await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form("/login", &[("username", username), ("password", password)])
            .await
    }

    pub async fn add_competence(
        &mut self,
        nom: &str,
        niveau: &str,
        semestre: &str,
    ) -> TestResponse {
        self.post_form(
            "/ajouter_competence",
            &[("nom", nom), ("niveau", niveau), ("semestre", semestre)],
        )
        .await
    }

    pub async fn user_count(&self) -> i64 {
        self.state.user_store.count().await.expect("count should succeed")
    }

    pub async fn competence_ids(&self) -> Vec<i64> {
        self.state
            .competences
            .list()
            .await
            .expect("list should succeed")
            .into_iter()
            .map(|c| c.id)
            .collect()
    }
}
