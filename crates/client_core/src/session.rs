//! Session manager: resume on startup, credential login, unconditional logout.

use shared::domain::User;
use tracing::{debug, info, warn};

use crate::{
    backend::Backend,
    error::{AuthFailure, BackendError, NoSession},
};

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";

/// Demo account offered on the landing screen.
pub const DEMO_IDENTIFIER: &str = "chef@example.com";
pub const DEMO_SECRET: &str = "password";

/// The single authenticated identity, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Replaces whatever session was active before.
    pub(crate) fn establish(&mut self, user: User) {
        self.user = Some(user);
    }

    pub(crate) fn clear(&mut self) {
        self.user = None;
    }
}

pub async fn resume(backend: &dyn Backend) -> Result<User, NoSession> {
    match backend.me().await {
        Ok(user) => {
            info!(user_id = %user.id, "resumed existing session");
            Ok(user)
        }
        Err(err) => {
            debug!(reason = %err, "no active session found");
            Err(NoSession)
        }
    }
}

pub async fn login(
    backend: &dyn Backend,
    identifier: &str,
    secret: &str,
) -> Result<User, AuthFailure> {
    if let Err(source) = backend.login(identifier, secret).await {
        warn!(error = %source, "login failed");
        return Err(auth_failure(source, false));
    }

    match backend.me().await {
        Ok(user) => {
            info!(user_id = %user.id, role = user.role.as_str(), "logged in");
            Ok(user)
        }
        Err(source) => {
            warn!(error = %source, "login accepted but profile fetch failed");
            // The new credential replaced any earlier one, so nothing valid remains.
            if let Err(err) = backend.logout().await {
                warn!(error = %err, "failed to discard credential after profile fetch failure");
            }
            Err(auth_failure(source, true))
        }
    }
}

pub async fn logout(backend: &dyn Backend) {
    if let Err(err) = backend.logout().await {
        warn!(error = %err, "backend logout failed; local session cleared anyway");
    }
}

fn auth_failure(source: BackendError, credential_dropped: bool) -> AuthFailure {
    AuthFailure {
        message: LOGIN_FAILED_MESSAGE.to_string(),
        credential_dropped,
        source,
    }
}
