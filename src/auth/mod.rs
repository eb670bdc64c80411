//! Authentication module for the account service.
//!
//! This module handles password hashing, token issuance and validation,
//! the registration/login flows, and the middleware that gates protected
//! operations behind a bearer token.

pub mod handlers;
pub mod middleware;
mod password;
mod service;
mod token;

pub use middleware::{AuthMiddleware, ProtectedHandler};
pub use password::PasswordHasher;
pub use service::AuthService;
pub use token::{Claims, TokenService};
