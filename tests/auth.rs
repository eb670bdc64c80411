use std::sync::Arc;

use authgate_server::auth::{AuthService, PasswordHasher, TokenService};
use authgate_server::error::{AuthError, TokenError};
use authgate_server::store::MemoryCredentialStore;

fn service_with_tokens(tokens: Arc<TokenService>) -> AuthService {
    AuthService::new(
        Arc::new(MemoryCredentialStore::new()),
        PasswordHasher::new(4),
        tokens,
    )
}

fn test_service() -> AuthService {
    service_with_tokens(Arc::new(TokenService::new("test_secret", 1)))
}

#[test_log::test(tokio::test)]
async fn test_register_then_login_round_trip() {
    let tokens = Arc::new(TokenService::new("test_secret", 1));
    let service = service_with_tokens(tokens.clone());

    service.register("alice", "secret123").await.unwrap();
    let token = service.login("alice", "secret123").await.unwrap();
    assert!(!token.is_empty());

    let claims = tokens.validate(&token).unwrap();
    assert_eq!(claims.sub, "alice");
}

#[tokio::test]
async fn test_double_registration_conflict() {
    let service = test_service();

    service.register("alice", "secret123").await.unwrap();
    let result = service.register("alice", "other-password").await;
    assert!(matches!(result, Err(AuthError::AlreadyRegistered)));
}

#[tokio::test]
async fn test_empty_fields_rejected() {
    let service = test_service();

    let result = service.register("", "secret123").await;
    assert!(matches!(result, Err(AuthError::Validation(_))));

    let result = service.register("alice", "").await;
    assert!(matches!(result, Err(AuthError::Validation(_))));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let service = test_service();
    service.register("alice", "secret123").await.unwrap();

    let wrong_password = service.login("alice", "not-the-password").await;
    let unknown_user = service.login("ghost", "secret123").await;

    let wrong_password = match wrong_password {
        Err(e @ AuthError::InvalidCredentials) => e.to_string(),
        other => panic!("expected InvalidCredentials, got {:?}", other),
    };
    let unknown_user = match unknown_user {
        Err(e @ AuthError::InvalidCredentials) => e.to_string(),
        other => panic!("expected InvalidCredentials, got {:?}", other),
    };

    // Same variant, same message: nothing distinguishes the two outcomes.
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_issued_token_expires_with_its_window() {
    let stale_tokens = Arc::new(TokenService::new("test_secret", 0));
    let service = service_with_tokens(stale_tokens.clone());

    service.register("alice", "secret123").await.unwrap();
    let token = service.login("alice", "secret123").await.unwrap();

    // A zero-length validity window puts exp at issuance time, and a token
    // is rejected from the instant it expires.
    assert!(matches!(
        stale_tokens.validate(&token),
        Err(TokenError::Expired)
    ));
}

#[test_log::test(tokio::test)]
async fn test_concurrent_registration_single_winner() {
    let service = Arc::new(test_service());

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.register("race", &format!("password-{}", i)).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => successes += 1,
            Err(AuthError::AlreadyRegistered) => {}
            Err(e) => panic!("unexpected registration error: {:?}", e),
        }
    }
    assert_eq!(successes, 1);
}
