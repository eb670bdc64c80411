use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::password::PasswordHasher;
use crate::auth::token::TokenService;
use crate::error::{AuthError, StoreError};
use crate::store::{CredentialStore, User};

/// Registration and login over a credential store.
///
/// The service owns the policy decisions: input validation, the collapse of
/// unknown-username and wrong-password into one login failure, and treating
/// the store's duplicate signal as the authority on registration conflicts.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Register a new account.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use authgate_server::auth::{AuthService, PasswordHasher, TokenService};
    /// use authgate_server::store::MemoryCredentialStore;
    ///
    /// let service = AuthService::new(
    ///     Arc::new(MemoryCredentialStore::new()),
    ///     PasswordHasher::new(4),
    ///     Arc::new(TokenService::new("doc_secret", 1)),
    /// );
    /// tokio_test::block_on(service.register("alice", "secret123")).unwrap();
    /// ```
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "username and password must not be empty".to_string(),
            ));
        }

        // Fast path for the common case; the conditional insert below is
        // what settles a race between two registrations.
        if self.store.exists(username).await? {
            debug!("Registration rejected, username taken: {}", username);
            return Err(AuthError::AlreadyRegistered);
        }

        let password_hash = self.hasher.hash(password)?;
        let user = User::new(username.to_string(), password_hash);

        match self.store.insert(&user).await {
            Ok(()) => {
                info!("User registered: {}", username);
                Ok(())
            }
            Err(StoreError::Duplicate) => {
                debug!("Registration lost the race for username: {}", username);
                Err(AuthError::AlreadyRegistered)
            }
            Err(e) => Err(AuthError::Store(e)),
        }
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use authgate_server::auth::{AuthService, PasswordHasher, TokenService};
    /// use authgate_server::store::MemoryCredentialStore;
    ///
    /// let service = AuthService::new(
    ///     Arc::new(MemoryCredentialStore::new()),
    ///     PasswordHasher::new(4),
    ///     Arc::new(TokenService::new("doc_secret", 1)),
    /// );
    /// let token = tokio_test::block_on(async {
    ///     service.register("alice", "secret123").await?;
    ///     service.login("alice", "secret123").await
    /// }).unwrap();
    /// assert!(!token.is_empty());
    /// ```
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = match self.store.get(username).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => {
                // Indistinguishable from a wrong password at the boundary.
                debug!("Login attempt for unknown username: {}", username);
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(AuthError::Store(e)),
        };

        if !self.hasher.verify(&user.password_hash, password) {
            debug!("Login attempt with wrong password for: {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(username)?;
        info!("Login successful for: {}", username);
        Ok(token)
    }
}
