use std::fmt;

use super::App;
use crate::domain::{
    repositories::{auth::AuthRepository, catalogue::CatalogueRepository, state::StateRepository},
    services::auth::AuthError,
};

/// Outcome of a session command, printed as a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    LoggedIn(String),
    Refreshed,
    LoggedOut,
    Failed(String),
}

impl SessionView {
    pub fn is_failure(&self) -> bool {
        matches!(self, SessionView::Failed(_))
    }
}

impl<C, A, S> App<C, A, S>
where
    C: CatalogueRepository,
    A: AuthRepository,
    S: StateRepository + Clone,
{
    pub async fn login(&self, username: &str, password: &str) -> SessionView {
        match self.auth.login(username, password).await {
            Ok(_) => SessionView::LoggedIn(username.to_string()),
            Err(e) => {
                error!("login failed: {e}");
                SessionView::Failed("Login failed, check your account.".to_string())
            }
        }
    }

    pub async fn refresh(&self) -> SessionView {
        match self.auth.refresh().await {
            Ok(_) => SessionView::Refreshed,
            Err(AuthError::NotLoggedIn) => SessionView::Failed("Not logged in.".to_string()),
            Err(e) => {
                error!("refresh failed: {e}");
                SessionView::Failed("Session expired, log in again.".to_string())
            }
        }
    }

    pub async fn logout(&self) -> SessionView {
        match self.auth.logout().await {
            Ok(_) => SessionView::LoggedOut,
            Err(e) => {
                error!("logout failed: {e}");
                SessionView::Failed("Failed to log out.".to_string())
            }
        }
    }
}

impl fmt::Display for SessionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionView::LoggedIn(username) => write!(f, "Logged in as {username}"),
            SessionView::Refreshed => f.write_str("Session refreshed"),
            SessionView::LoggedOut => f.write_str("Logged out"),
            SessionView::Failed(message) => f.write_str(message),
        }
    }
}
