use chrono::Utc;
use thiserror::Error;

use crate::domain::{
    entities::session::Session,
    repositories::{
        auth::{AuthRepository, AuthRepositoryError},
        state::{StateRepository, StateRepositoryError},
    },
};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("auth error: {0}")]
    AuthRepositoryError(#[from] AuthRepositoryError),
    #[error("state error: {0}")]
    StateRepositoryError(#[from] StateRepositoryError),
    #[error("not logged in")]
    NotLoggedIn,
}

pub struct AuthService<A, S>
where
    A: AuthRepository,
    S: StateRepository,
{
    auth: A,
    state: S,
}

impl<A, S> AuthService<A, S>
where
    A: AuthRepository,
    S: StateRepository,
{
    pub fn new(auth: A, state: S) -> Self {
        Self { auth, state }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let token = self.auth.password_grant(username, password).await?;
        let session = Session::from_token(token, Utc::now());
        self.state.write_session(Some(&session)).await?;
        info!("logged in as {username}");

        Ok(session)
    }

    pub async fn refresh(&self) -> Result<Session, AuthError> {
        let current = self.state.read_session().await?.ok_or(AuthError::NotLoggedIn)?;

        let token = match self.auth.refresh_grant(&current.refresh_token).await {
            Ok(token) => token,
            Err(e) => {
                error!("failed to refresh session: {e}");
                self.state.write_session(None).await?;
                return Err(e.into());
            }
        };

        let session = Session::from_token(token, Utc::now());
        self.state.write_session(Some(&session)).await?;

        Ok(session)
    }

    pub async fn logout(&self) -> Result<(), AuthError> {
        self.state.write_session(None).await?;

        Ok(())
    }

    pub async fn session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.state.read_session().await?)
    }

    /// Stored access token, refreshed first when it has expired
    pub async fn access_token(&self) -> Result<String, AuthError> {
        let session = self.state.read_session().await?.ok_or(AuthError::NotLoggedIn)?;
        if !session.is_expired(Utc::now()) {
            return Ok(session.access_token);
        }

        match session.expires_at() {
            Some(expires_at) => debug!("access token expired at {expires_at}"),
            None => warn!("access token has an invalid lifetime of {}s", session.expires_in),
        }
        Ok(self.refresh().await?.access_token)
    }
}
