//! Authentication service

use std::sync::Arc;

use crate::{
    backend::auth::{AuthProvider, Session, SessionClaims},
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
}

impl AuthService {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }

    /// Sign in with email and password
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ));
        }
        self.provider.sign_in(email, password).await
    }

    pub async fn logout(&self, claims: &SessionClaims) -> AppResult<()> {
        self.provider.sign_out(&claims.sid).await?;
        tracing::info!("Signed out {}", claims.sub);
        Ok(())
    }

    pub async fn validate(&self, token: &str) -> AppResult<SessionClaims> {
        self.provider.validate(token).await
    }
}
