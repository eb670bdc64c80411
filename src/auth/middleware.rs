use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::auth::token::TokenService;
use crate::error::{AuthError, TokenError};

/// A downstream operation guarded by [`AuthMiddleware`].
#[async_trait]
pub trait ProtectedHandler: Send + Sync {
    type Request: Send + 'static;
    type Response: Send + 'static;

    async fn call(&self, request: Self::Request) -> Self::Response;
}

/// Gates a protected operation behind bearer-token validation.
///
/// The wrapped handler only runs once the token has been extracted and
/// validated; every failure mode collapses to `AuthError::Unauthorized` at
/// the boundary, with the specific reason kept to the logs.
pub struct AuthMiddleware<H> {
    tokens: Arc<TokenService>,
    inner: H,
}

impl<H: ProtectedHandler> AuthMiddleware<H> {
    pub fn new(tokens: Arc<TokenService>, inner: H) -> Self {
        Self { tokens, inner }
    }

    /// Single entry point: validate the credential header, then delegate.
    ///
    /// `authorization` is the raw credential header value, if the request
    /// carried one. On success the request reaches the wrapped handler
    /// unchanged and its response comes back unchanged.
    pub async fn handle(
        &self,
        authorization: Option<&str>,
        request: H::Request,
    ) -> Result<H::Response, AuthError> {
        let token = match extract_bearer_token(authorization) {
            Ok(token) => token,
            Err(e) => {
                warn!("Rejected protected request: {}", e);
                return Err(AuthError::Unauthorized);
            }
        };

        match self.tokens.validate(token) {
            Ok(claims) => {
                debug!("Authenticated protected request for: {}", claims.sub);
                Ok(self.inner.call(request).await)
            }
            Err(e) => {
                warn!("Rejected protected request: {}", e);
                Err(AuthError::Unauthorized)
            }
        }
    }
}

/// Accepts exactly `Bearer <token>`: the scheme, one space, a non-empty
/// token. Anything else counts as a missing token.
fn extract_bearer_token(authorization: Option<&str>) -> Result<&str, TokenError> {
    let header = authorization.ok_or(TokenError::Missing)?;
    let token = header.strip_prefix("Bearer ").ok_or(TokenError::Missing)?;
    if token.is_empty() || token.starts_with(' ') {
        return Err(TokenError::Missing);
    }
    Ok(token)
}
