//! Authentication provider

use std::collections::HashMap;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    config::{AccountConfig, AuthConfig},
    error::{AppError, AppResult},
    models::enums::UserRole,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account email
    pub sub: String,
    pub name: String,
    pub role: UserRole,
    /// Session id, revoked on sign-out
    pub sid: String,
    pub exp: i64,
    pub iat: i64,
}

/// Opaque handle returned by a successful sign-in
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub claims: SessionClaims,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session>;

    /// Invalidate a session; signing out twice is harmless
    async fn sign_out(&self, session_id: &str) -> AppResult<()>;

    /// Resolve a token to its claims if the session is still live
    async fn validate(&self, token: &str) -> AppResult<SessionClaims>;
}

/// Hash a password into an argon2 PHC string
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Provider backed by configured accounts and signed session tokens
pub struct LocalAuthProvider {
    accounts: Vec<AccountConfig>,
    jwt_secret: String,
    expiration_hours: u64,
    /// Live session ids and their expiry, pruned on sign-in and validation
    live_sessions: RwLock<HashMap<String, i64>>,
}

impl LocalAuthProvider {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            accounts: config.accounts.clone(),
            jwt_secret: config.jwt_secret.clone(),
            expiration_hours: config.jwt_expiration_hours,
            live_sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register an account from a clear-text password
    pub fn with_account(mut self, email: &str, name: &str, role: UserRole, password: &str) -> AppResult<Self> {
        self.accounts.push(AccountConfig {
            email: email.to_string(),
            name: name.to_string(),
            role,
            password_hash: hash_password(password)?,
        });
        Ok(self)
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    fn find_account(&self, email: &str) -> Option<&AccountConfig> {
        let email = email.trim();
        self.accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
    }

    fn verify_password(account: &AccountConfig, password: &str) -> bool {
        match PasswordHash::new(&account.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Unreadable password hash for {}: {}", account.email, e);
                false
            }
        }
    }

    fn prune_expired(sessions: &mut HashMap<String, i64>, now: i64) {
        sessions.retain(|_, exp| *exp > now);
    }

    fn new_session_id() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect()
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let account = self
            .find_account(email)
            .ok_or_else(|| AppError::Authentication(INVALID_CREDENTIALS.to_string()))?;

        if !Self::verify_password(account, password) {
            return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: account.email.clone(),
            name: account.name.clone(),
            role: account.role,
            sid: Self::new_session_id(),
            exp: now + (self.expiration_hours as i64 * 3600),
            iat: now,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        let mut sessions = self.live_sessions.write().await;
        Self::prune_expired(&mut sessions, now);
        sessions.insert(claims.sid.clone(), claims.exp);
        drop(sessions);
        tracing::info!("Signed in {}", claims.sub);

        Ok(Session { token, claims })
    }

    async fn sign_out(&self, session_id: &str) -> AppResult<()> {
        self.live_sessions.write().await.remove(session_id);
        Ok(())
    }

    async fn validate(&self, token: &str) -> AppResult<SessionClaims> {
        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AppError::Authentication(e.to_string()))?;

        let mut sessions = self.live_sessions.write().await;
        Self::prune_expired(&mut sessions, Utc::now().timestamp());
        if !sessions.contains_key(&data.claims.sid) {
            return Err(AppError::Authentication("Session has ended".to_string()));
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> LocalAuthProvider {
        LocalAuthProvider::new(&AuthConfig::default())
            .with_account("admin@nti.ba.gov.br", "Admin", UserRole::Admin, "s3nha")
            .unwrap()
    }

    #[tokio::test]
    async fn test_sign_in_and_validate() {
        let auth = provider();
        let session = auth.sign_in("ADMIN@nti.ba.gov.br", "s3nha").await.unwrap();
        assert_eq!(session.claims.role, UserRole::Admin);
        let claims = auth.validate(&session.token).await.unwrap();
        assert_eq!(claims.sub, "admin@nti.ba.gov.br");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let auth = provider();
        let wrong = auth.sign_in("admin@nti.ba.gov.br", "x").await.unwrap_err();
        let unknown = auth.sign_in("ghost@nti.ba.gov.br", "s3nha").await.unwrap_err();
        assert_eq!(wrong.to_string(), unknown.to_string());
        assert!(matches!(wrong, AppError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_sign_out_invalidates_token() {
        let auth = provider();
        let session = auth.sign_in("admin@nti.ba.gov.br", "s3nha").await.unwrap();
        auth.sign_out(&session.claims.sid).await.unwrap();
        assert!(auth.validate(&session.token).await.is_err());
        auth.sign_out(&session.claims.sid).await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_sessions_are_pruned() {
        let config = AuthConfig {
            jwt_expiration_hours: 0,
            ..AuthConfig::default()
        };
        let auth = LocalAuthProvider::new(&config)
            .with_account("admin@nti.ba.gov.br", "Admin", UserRole::Admin, "s3nha")
            .unwrap();
        for _ in 0..3 {
            auth.sign_in("admin@nti.ba.gov.br", "s3nha").await.unwrap();
        }
        // Every earlier session had already expired at the latest sign-in
        assert_eq!(auth.live_sessions.read().await.len(), 1);

        let live = provider();
        let session = live.sign_in("admin@nti.ba.gov.br", "s3nha").await.unwrap();
        live.sign_in("admin@nti.ba.gov.br", "s3nha").await.unwrap();
        assert_eq!(live.live_sessions.read().await.len(), 2);
        assert!(live.validate(&session.token).await.is_ok());
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let auth = provider();
        assert!(matches!(
            auth.validate("not-a-token").await,
            Err(AppError::Authentication(_))
        ));
    }
}
