use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Token pair returned by the identity service
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    pub access_token: String,
    pub refresh_token: String,
}

/// Token pair as kept in local state
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub obtained_at: DateTime<Utc>,
}

impl Session {
    pub fn from_token(token: Token, obtained_at: DateTime<Utc>) -> Self {
        Self {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_in: token.expires_in,
            obtained_at,
        }
    }

    /// `None` when `expires_in` is too large to be represented as a time
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Duration::try_seconds(self.expires_in)
            .and_then(|lifetime| self.obtained_at.checked_add_signed(lifetime))
    }

    /// An expiry that cannot be computed counts as expired
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expires_at) => now >= expires_at,
            None => true,
        }
    }
}
