//! Officer authentication and the in-memory officer registry.
//!
//! Officers are provisioned out of band (bootstrap at startup, registry
//! calls in tests); the claim core trusts the identity resolved here for
//! every jurisdiction and transition-legality check. Token-based auth with
//! `Basic` and `Bearer` header support.

#![allow(dead_code)] // Registry management methods are part of the provisioning surface

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::claims::store::Actor;
use crate::error::{Result, ServerError};
use crate::jurisdiction::{Role, Scope};

/// A provisioned officer account.
#[derive(Clone, Debug)]
pub struct Officer {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub scope: Scope,
}

impl Officer {
    pub fn new(id: &str, username: &str, password: &str, role: Role, scope: Scope) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
            password_hash: hash_password(password),
            role,
            scope,
        }
    }

    pub fn verify_password(&self, password: &str) -> bool {
        hash_password(password) == self.password_hash
    }

    /// The identity the claim store acts as.
    pub fn actor(&self) -> Actor {
        Actor {
            officer_id: self.id.clone(),
            role: self.role,
            scope: self.scope.clone(),
        }
    }
}

/// Hash a password with salt
fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"fra-claims-server-salt:");
    hasher.update(password.as_bytes());
    let result = hasher.finalize();
    result.iter().map(|b| format!("{:02x}", b)).collect()
}

/// An issued access token
#[derive(Clone, Debug)]
pub struct Token {
    pub token: String,
    pub username: String,
    pub expires_at: SystemTime,
}

impl Token {
    pub fn new(username: String, duration: Duration) -> Self {
        Self {
            token: generate_token(),
            username,
            expires_at: SystemTime::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        SystemTime::now() > self.expires_at
    }
}

/// Generate a secure random token
fn generate_token() -> String {
    let mut hasher = Sha256::new();

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    hasher.update(timestamp.to_le_bytes());

    let thread_id = std::thread::current().id();
    hasher.update(format!("{:?}", thread_id).as_bytes());

    let stack_addr = &timestamp as *const _ as usize;
    hasher.update(stack_addr.to_le_bytes());

    let result = hasher.finalize();
    BASE64.encode(&result[..24])
}

/// Officer registry and token store
pub struct AuthManager {
    officers: RwLock<HashMap<String, Officer>>,
    tokens: RwLock<HashMap<String, Token>>,
    token_duration: Duration,
}

impl AuthManager {
    pub fn new() -> Self {
        Self {
            officers: RwLock::new(HashMap::new()),
            tokens: RwLock::new(HashMap::new()),
            token_duration: Duration::from_secs(24 * 60 * 60),
        }
    }

    /// Register an officer account
    pub fn add_officer(&self, officer: Officer) {
        let mut officers = self.officers.write();
        officers.insert(officer.username.clone(), officer);
    }

    /// Create the bootstrap super-admin account unless it already exists
    pub fn ensure_admin(&self, username: &str, password: &str) {
        let mut officers = self.officers.write();
        if !officers.contains_key(username) {
            officers.insert(
                username.to_string(),
                Officer::new("admin", username, password, Role::Admin, Scope::All),
            );
            tracing::info!(username, "bootstrap admin account created");
        }
    }

    /// Authenticate with username/password, returns a token
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Token> {
        let officers = self.officers.read();
        let officer = officers.get(username).ok_or(ServerError::AuthFailed)?;

        if !officer.verify_password(password) {
            return Err(ServerError::AuthFailed);
        }

        let token = Token::new(username.to_string(), self.token_duration);

        drop(officers);

        let mut tokens = self.tokens.write();
        tokens.insert(token.token.clone(), token.clone());

        Ok(token)
    }

    /// Validate a token and resolve the officer it belongs to
    pub fn validate_token(&self, token_str: &str) -> Result<Officer> {
        let tokens = self.tokens.read();
        let token = tokens.get(token_str).ok_or(ServerError::AuthFailed)?;

        if token.is_expired() {
            return Err(ServerError::AuthFailed);
        }

        let username = token.username.clone();
        drop(tokens);

        self.get_officer(&username).ok_or(ServerError::AuthFailed)
    }

    /// Parse Basic auth header and authenticate
    pub fn authenticate_basic(&self, auth_header: &str) -> Result<Officer> {
        if !auth_header.starts_with("Basic ") {
            return Err(ServerError::AuthFailed);
        }

        let encoded = &auth_header[6..];
        let decoded = BASE64
            .decode(encoded)
            .map_err(|_| ServerError::AuthFailed)?;
        let credentials = String::from_utf8(decoded).map_err(|_| ServerError::AuthFailed)?;

        let parts: Vec<&str> = credentials.splitn(2, ':').collect();
        if parts.len() != 2 {
            return Err(ServerError::AuthFailed);
        }

        let token = self.authenticate(parts[0], parts[1])?;
        self.validate_token(&token.token)
    }

    /// Parse Bearer token header and resolve the officer
    pub fn validate_bearer(&self, auth_header: &str) -> Result<Officer> {
        if !auth_header.starts_with("Bearer ") {
            return Err(ServerError::AuthFailed);
        }

        self.validate_token(&auth_header[7..])
    }

    /// Get officer by username
    pub fn get_officer(&self, username: &str) -> Option<Officer> {
        let officers = self.officers.read();
        officers.get(username).cloned()
    }

    /// Revoke a token
    pub fn revoke_token(&self, token_str: &str) {
        let mut tokens = self.tokens.write();
        tokens.remove(token_str);
    }

    /// Cleanup expired tokens
    pub fn cleanup_expired_tokens(&self) {
        let mut tokens = self.tokens.write();
        tokens.retain(|_, t| !t.is_expired());
    }
}

impl Default for AuthManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gs_officer() -> Officer {
        Officer::new(
            "off-gs-1",
            "gs_amoni",
            "secret123",
            Role::GramSabha,
            Scope::GpCode {
                gp_code: "GS-PHN-134363".to_string(),
            },
        )
    }

    #[test]
    fn test_password_hash() {
        let hash1 = hash_password("test123");
        let hash2 = hash_password("test123");
        let hash3 = hash_password("different");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
    }

    #[test]
    fn test_officer_authentication() {
        let officer = gs_officer();
        assert!(officer.verify_password("secret123"));
        assert!(!officer.verify_password("wrongpassword"));
    }

    #[test]
    fn test_auth_manager() {
        let auth = AuthManager::new();
        auth.add_officer(gs_officer());

        // Successful auth
        let token = auth.authenticate("gs_amoni", "secret123").unwrap();
        assert!(!token.is_expired());

        // Token resolves back to the officer and their scope
        let officer = auth.validate_token(&token.token).unwrap();
        assert_eq!(officer.id, "off-gs-1");
        assert_eq!(officer.role, Role::GramSabha);
        assert_eq!(
            officer.scope,
            Scope::GpCode {
                gp_code: "GS-PHN-134363".to_string()
            }
        );

        // Failed auth
        assert!(auth.authenticate("gs_amoni", "wrong").is_err());
        assert!(auth.authenticate("nonexistent", "pass").is_err());

        // Revoked tokens stop resolving
        auth.revoke_token(&token.token);
        assert!(auth.validate_token(&token.token).is_err());
    }

    #[test]
    fn test_basic_auth() {
        let auth = AuthManager::new();
        auth.add_officer(gs_officer());

        let header = format!("Basic {}", BASE64.encode(b"gs_amoni:secret123"));
        let officer = auth.authenticate_basic(&header).unwrap();
        assert_eq!(officer.username, "gs_amoni");

        let bad_header = format!("Basic {}", BASE64.encode(b"gs_amoni:wrong"));
        assert!(auth.authenticate_basic(&bad_header).is_err());
    }

    #[test]
    fn test_ensure_admin_idempotent() {
        let auth = AuthManager::new();
        auth.ensure_admin("admin", "admin");
        let first = auth.get_officer("admin").unwrap();

        auth.ensure_admin("admin", "changed");
        let second = auth.get_officer("admin").unwrap();
        assert_eq!(first.password_hash, second.password_hash);
        assert_eq!(second.role, Role::Admin);
    }
}
