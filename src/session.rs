use axum::http::{HeaderMap, header::COOKIE};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::Result,
    models::flash::{Flash, FlashLevel},
};

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

/// A flash message only has to survive one redirect.
const FLASH_LIFETIME_SECS: i64 = 300;

/// Authentication state carried by the session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// What a request knows about who is calling, independent of how the
/// session is stored.
pub trait SessionIdentity {
    fn is_authenticated(&self) -> bool {
        self.session_id().is_some()
    }

    fn session_id(&self) -> Option<i64>;
}

impl SessionIdentity for Option<SessionData> {
    fn session_id(&self) -> Option<i64> {
        self.as_ref().map(|data| data.user_id)
    }
}

#[derive(Serialize, Deserialize)]
struct FlashClaims {
    level: FlashLevel,
    message: String,
    exp: i64,
}

/// Signs and verifies the session and flash cookies.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
    secure: bool,
}

impl SessionKeys {
    pub fn new(secret: &[u8], lifetime_hours: i64, secure: bool) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            lifetime: Duration::hours(lifetime_hours),
            secure,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match &config.session_secret {
            Some(secret) => Self::new(
                secret.as_bytes(),
                config.session_expiration_hours,
                config.cookie_secure,
            ),
            None => {
                tracing::warn!("SESSION_SECRET is not set, sessions will not survive a restart");
                let mut secret = [0u8; 32];
                rand::rng().fill(&mut secret);
                Self::new(&secret, config.session_expiration_hours, config.cookie_secure)
            }
        }
    }

    /// Start a session for `user_id`
    pub fn issue(&self, user_id: i64) -> Result<String> {
        let now = Utc::now();
        self.encode_session(&SessionData {
            user_id,
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        })
    }

    pub fn encode_session(&self, data: &SessionData) -> Result<String> {
        Ok(encode(&Header::default(), data, &self.encoding)?)
    }

    /// Verify a session token. Bad signatures and expired tokens yield `None`.
    pub fn decode_session(&self, token: &str) -> Option<SessionData> {
        match decode::<SessionData>(token, &self.decoding, &Validation::default()) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                None
            }
        }
    }

    pub fn encode_flash(&self, flash: &Flash) -> Result<String> {
        let claims = FlashClaims {
            level: flash.level,
            message: flash.message.clone(),
            exp: Utc::now().timestamp() + FLASH_LIFETIME_SECS,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    pub fn decode_flash(&self, token: &str) -> Option<Flash> {
        decode::<FlashClaims>(token, &self.decoding, &Validation::default())
            .ok()
            .map(|data| Flash::new(data.claims.level, data.claims.message))
    }

    pub fn session_cookie(&self, token: &str) -> String {
        self.cookie(SESSION_COOKIE, token, self.lifetime.num_seconds())
    }

    pub fn clear_session_cookie(&self) -> String {
        self.cookie(SESSION_COOKIE, "", 0)
    }

    pub fn flash_cookie(&self, token: &str) -> String {
        self.cookie(FLASH_COOKIE, token, FLASH_LIFETIME_SECS)
    }

    pub fn clear_flash_cookie(&self) -> String {
        self.cookie(FLASH_COOKIE, "", 0)
    }

    fn cookie(&self, name: &str, value: &str, max_age: i64) -> String {
        let mut cookie =
            format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Find a cookie value in the request headers
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
