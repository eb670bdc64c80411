use bcrypt::{hash, verify};
use tracing::warn;

use crate::error::AuthError;

/// One-way password hashing and verification.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password. Output is salted, so hashing the same
    /// input twice yields different strings that both verify.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        hash(password, self.cost).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// Never errors: a stored hash that cannot be parsed counts as a
    /// mismatch, so callers cannot tell a corrupt record from a wrong
    /// password.
    pub fn verify(&self, stored_hash: &str, password: &str) -> bool {
        match verify(password, stored_hash) {
            Ok(matched) => matched,
            Err(e) => {
                warn!("Password verification against unparseable hash: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the tests fast.
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("secret123").unwrap();

        assert_ne!(hash, "secret123");
        assert!(hasher.verify(&hash, "secret123"));
        assert!(!hasher.verify(&hash, "secret124"));
    }

    #[test]
    fn test_hashing_is_salted() {
        let hasher = hasher();
        let first = hasher.hash("secret123").unwrap();
        let second = hasher.hash("secret123").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify(&first, "secret123"));
        assert!(hasher.verify(&second, "secret123"));
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        let hasher = hasher();
        assert!(!hasher.verify("not-a-bcrypt-hash", "secret123"));
        assert!(!hasher.verify("", "secret123"));
    }
}
