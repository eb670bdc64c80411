pub mod auth;
pub mod config;
pub mod error;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use actix_web::HttpResponse;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::handlers::ProtectedResource;
pub use auth::{AuthMiddleware, AuthService, Claims, PasswordHasher, ProtectedHandler, TokenService};
pub use store::{CredentialStore, MemoryCredentialStore, PgCredentialStore, User};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all components
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub auth: Arc<AuthService>,
    pub gate: Arc<AuthMiddleware<ProtectedResource>>,
}

impl AppState {
    /// Connect to Postgres, run migrations, and assemble the service stack.
    pub async fn new(config: Settings) -> Result<Self> {
        let store = PgCredentialStore::connect(
            &config.database.url,
            config.database.max_connections,
            Duration::from_secs(5),
        )
        .await?;

        store.run_migrations().await?;

        Ok(Self::assemble(config, Arc::new(store)))
    }

    /// Assemble the service stack over any credential store. Used by tests
    /// and local runs that do not want a database.
    pub fn with_store(config: Settings, store: Arc<dyn CredentialStore>) -> Self {
        Self::assemble(config, store)
    }

    fn assemble(config: Settings, store: Arc<dyn CredentialStore>) -> Self {
        let tokens = Arc::new(TokenService::new(
            &config.auth.jwt_secret,
            config.auth.token_expiry_hours,
        ));
        let hasher = PasswordHasher::new(config.auth.bcrypt_cost);
        let auth = Arc::new(AuthService::new(store, hasher, tokens.clone()));
        let gate = Arc::new(AuthMiddleware::new(tokens, ProtectedResource));

        Self {
            config: Arc::new(config),
            auth,
            gate,
        }
    }
}
