use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{
    entities::session::Token,
    repositories::auth::{AuthRepository, AuthRepositoryError},
};

const TOKEN_PATH: &str = "/realms/mangadex/protocol/openid-connect/token";

#[derive(Debug, Deserialize)]
struct TokenError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Clone)]
pub struct AuthRepositoryImpl {
    client: reqwest::Client,
    token_url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl AuthRepositoryImpl {
    pub fn new(
        client: reqwest::Client,
        auth_url: &str,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Self {
        Self {
            client,
            token_url: format!("{}{TOKEN_PATH}", auth_url.trim_end_matches('/')),
            client_id,
            client_secret,
        }
    }

    async fn grant(&self, params: &[(&str, &str)]) -> Result<Token, AuthRepositoryError> {
        let (client_id, client_secret) = match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) if !id.is_empty() => (id.as_str(), secret.as_str()),
            _ => return Err(AuthRepositoryError::MissingClient),
        };

        let mut form = params.to_vec();
        form.push(("client_id", client_id));
        form.push(("client_secret", client_secret));

        let res = self.client.post(&self.token_url).form(&form).send().await?;

        if !res.status().is_success() {
            let status = res.status();
            let reason = match res.json::<TokenError>().await {
                Ok(TokenError {
                    error_description: Some(description),
                    ..
                }) => description,
                Ok(TokenError { error, .. }) => error,
                Err(_) => status.to_string(),
            };
            return Err(AuthRepositoryError::Rejected(reason));
        }

        Ok(res.json().await?)
    }
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn password_grant(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Token, AuthRepositoryError> {
        self.grant(&[
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
        ])
        .await
    }

    async fn refresh_grant(&self, refresh_token: &str) -> Result<Token, AuthRepositoryError> {
        self.grant(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }
}
