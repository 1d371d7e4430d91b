use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::session::Token;

#[derive(Debug, Error)]
pub enum AuthRepositoryError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("identity service rejected the request: {0}")]
    Rejected(String),
    #[error("client credentials are not configured")]
    MissingClient,
}

/// Token exchange against the catalogue's identity service
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn password_grant(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Token, AuthRepositoryError>;

    async fn refresh_grant(&self, refresh_token: &str) -> Result<Token, AuthRepositoryError>;
}
