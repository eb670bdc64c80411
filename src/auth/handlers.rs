use actix_web::{web, HttpRequest, HttpResponse};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::middleware::ProtectedHandler;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received registration request for username: {}", req.username);
    match state.auth.register(&req.username, &req.password).await {
        Ok(()) => {
            info!("Registration successful for username: {}", req.username);
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "message": "User registered"
            })))
        }
        Err(e) => {
            warn!("Registration failed for username: {}: {}", req.username, e);
            Err(e.into())
        }
    }
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for username: {}", req.username);
    match state.auth.login(&req.username, &req.password).await {
        Ok(token) => Ok(HttpResponse::Ok().json(TokenResponse {
            access_token: token,
        })),
        Err(e) => {
            warn!("Login failed for username: {}: {}", req.username, e);
            Err(e.into())
        }
    }
}

pub async fn protected(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let authorization = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    let message = state.gate.handle(authorization, ()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": message })))
}

/// The operation behind the token gate, standing in for whatever resource
/// a deployment actually protects.
pub struct ProtectedResource;

#[async_trait]
impl ProtectedHandler for ProtectedResource {
    type Request = ();
    type Response = String;

    async fn call(&self, _request: ()) -> String {
        "This is protected path".to_string()
    }
}
