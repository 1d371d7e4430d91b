use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;
use yomu_lib::prelude::MangaInfo;

use crate::domain::entities::{history::HistoryEntry, session::Session};

#[derive(Debug, Error)]
pub enum StateRepositoryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed state: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reading history keyed by manga id
pub type History = BTreeMap<String, HistoryEntry>;

/// The only access path to persisted client state
///
/// Each blob is read and written whole. There is no transaction: a write
/// replaces whatever another process stored in between.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Empty when nothing has been stored yet
    async fn read_favorites(&self) -> Result<Vec<MangaInfo>, StateRepositoryError>;

    async fn write_favorites(&self, favorites: &[MangaInfo]) -> Result<(), StateRepositoryError>;

    async fn read_history(&self) -> Result<History, StateRepositoryError>;

    async fn write_history(&self, history: &History) -> Result<(), StateRepositoryError>;

    async fn read_session(&self) -> Result<Option<Session>, StateRepositoryError>;

    /// `None` forgets the stored session
    async fn write_session(&self, session: Option<&Session>)
        -> Result<(), StateRepositoryError>;
}
