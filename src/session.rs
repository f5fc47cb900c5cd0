//! Session context shared by screens and navigation
//!
//! The context starts in [`SessionState::Initializing`] until a persisted
//! token has been checked, so callers can tell "not ready yet" apart from
//! "signed out".

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::{
    backend::auth::{Session, SessionClaims},
    error::{AppError, AppResult},
    services::auth::AuthService,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Initializing,
    SignedOut,
    SignedIn(Session),
}

/// Top-level destinations chosen from the session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Splash,
    Login,
    Dashboard,
}

pub fn landing_route(state: &SessionState) -> Route {
    match state {
        SessionState::Initializing => Route::Splash,
        SessionState::SignedOut => Route::Login,
        SessionState::SignedIn(_) => Route::Dashboard,
    }
}

pub struct SessionContext {
    auth: AuthService,
    state: watch::Sender<SessionState>,
}

impl SessionContext {
    pub fn new(auth: AuthService) -> Self {
        let (state, _) = watch::channel(SessionState::Initializing);
        Self { auth, state }
    }

    /// Resolve the start-up state from a token persisted by a previous run
    pub async fn initialize(&self, restored_token: Option<&str>) -> SessionState {
        let next = match restored_token {
            Some(token) => match self.auth.validate(token).await {
                Ok(claims) => SessionState::SignedIn(Session {
                    token: token.to_string(),
                    claims,
                }),
                Err(e) => {
                    tracing::debug!("Discarding restored session: {}", e);
                    SessionState::SignedOut
                }
            },
            None => SessionState::SignedOut,
        };
        self.state.send_replace(next.clone());
        next
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let session = self.auth.login(email, password).await?;
        self.state.send_replace(SessionState::SignedIn(session.clone()));
        Ok(session)
    }

    pub async fn sign_out(&self) -> AppResult<()> {
        let current = self.current();
        if let SessionState::SignedIn(session) = current {
            self.auth.logout(&session.claims).await?;
        }
        self.state.send_replace(SessionState::SignedOut);
        Ok(())
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Claims of the signed-in user, or the reason there are none
    pub fn require_session(&self) -> AppResult<SessionClaims> {
        match &*self.state.borrow() {
            SessionState::Initializing => Err(AppError::NotReady),
            SessionState::SignedOut => Err(AppError::Authentication("Not signed in".to_string())),
            SessionState::SignedIn(session) => Ok(session.claims.clone()),
        }
    }

    /// Stream of states, starting with the current one
    pub fn changes(&self) -> WatchStream<SessionState> {
        WatchStream::new(self.state.subscribe())
    }
}
