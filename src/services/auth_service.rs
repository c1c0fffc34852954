use crate::{
    db::user_store::UserStore,
    error::AppError,
    models::{
        flash::{Flash, Outcome},
        user::{LoginForm, RegisterForm, User},
    },
    routes::{DASHBOARD_SERVICES, LOGIN, REGISTER},
    services::password::{hash_password, verify_password},
};

pub const MAX_USERNAME_LEN: usize = 150;

const MISSING_FIELDS: &str = "Tous les champs sont requis.";
const USERNAME_TAKEN: &str = "Ce nom d'utilisateur existe déjà.";
const REGISTERED: &str = "Inscription réussie. Connectez-vous.";
const REGISTER_FAILED: &str = "Erreur lors de l'enregistrement.";
const LOGGED_IN: &str = "Connexion réussie.";
const INVALID_CREDENTIALS: &str = "Identifiants invalides.";
const LOGGED_OUT: &str = "Déconnecté avec succès.";

/// Result of a login attempt. `user` is set only when the credentials matched.
#[derive(Debug)]
pub struct LoginOutcome {
    pub outcome: Outcome,
    pub user: Option<User>,
}

#[derive(Clone)]
pub struct AuthService {
    user_store: UserStore,
}

impl AuthService {
    pub fn new(user_store: UserStore) -> Self {
        Self { user_store }
    }

    pub async fn register(&self, form: RegisterForm) -> Outcome {
        let retry = |flash| Outcome::new(flash, REGISTER);

        if form.username.is_empty() || form.password.is_empty() {
            return retry(Flash::warning(MISSING_FIELDS));
        }
        if form.username.chars().count() > MAX_USERNAME_LEN {
            return retry(Flash::warning(format!(
                "Le nom d'utilisateur ne doit pas dépasser {MAX_USERNAME_LEN} caractères."
            )));
        }

        match self.user_store.get_user_by_username(&form.username).await {
            Ok(Some(_)) => {
                tracing::info!(username = %form.username, "Registration refused, username taken");
                return retry(Flash::warning(USERNAME_TAKEN));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!(error = %e, "Registration lookup failed");
                return retry(Flash::danger(REGISTER_FAILED));
            }
        }

        let password_hash = match hash_password(&form.password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::error!(error = %e, "Password hashing failed");
                return retry(Flash::danger(REGISTER_FAILED));
            }
        };

        match self.user_store.create_user(&form.username, &password_hash).await {
            Ok(id) => {
                tracing::info!(user_id = id, username = %form.username, "User registered");
                Outcome::new(Flash::success(REGISTERED), LOGIN)
            }
            Err(AppError::Validation(_)) => {
                tracing::info!(username = %form.username, "Registration lost a race on username");
                retry(Flash::warning(USERNAME_TAKEN))
            }
            Err(e) => {
                tracing::error!(error = %e, "Error while saving user");
                retry(Flash::danger(REGISTER_FAILED))
            }
        }
    }

    pub async fn login(&self, form: LoginForm) -> LoginOutcome {
        let user = match self.user_store.get_user_by_username(&form.username).await {
            Ok(user) => user.filter(|user| verify_password(&form.password, &user.password)),
            Err(e) => {
                tracing::error!(error = %e, "Login lookup failed");
                None
            }
        };

        match user {
            Some(user) => {
                tracing::info!(user_id = user.id, username = %user.username, "User logged in");
                LoginOutcome {
                    outcome: Outcome::new(Flash::success(LOGGED_IN), DASHBOARD_SERVICES),
                    user: Some(user),
                }
            }
            None => {
                tracing::warn!(username = %form.username, "Invalid login attempt");
                LoginOutcome {
                    outcome: Outcome::new(Flash::danger(INVALID_CREDENTIALS), LOGIN),
                    user: None,
                }
            }
        }
    }

    pub fn logout(&self) -> Outcome {
        Outcome::new(Flash::info(LOGGED_OUT), DASHBOARD_SERVICES)
    }
}
