use std::fmt;

use super::{App, ViewError};
use crate::domain::{
    entities::history::HistoryEntry,
    repositories::{auth::AuthRepository, catalogue::CatalogueRepository, state::StateRepository},
};

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryView {
    pub entries: Vec<HistoryEntry>,
    pub error: Option<ViewError>,
}

impl<C, A, S> App<C, A, S>
where
    C: CatalogueRepository,
    A: AuthRepository,
    S: StateRepository + Clone,
{
    pub async fn history(&self) -> HistoryView {
        match self.history.get_history().await {
            Ok(entries) => HistoryView {
                entries,
                error: None,
            },
            Err(e) => {
                error!("failed to read history: {e}");
                HistoryView {
                    entries: vec![],
                    error: Some(ViewError::Load("history")),
                }
            }
        }
    }
}

impl fmt::Display for HistoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "History")?;
        if let Some(error) = &self.error {
            return writeln!(f, "  {error}");
        }
        if self.entries.is_empty() {
            return writeln!(f, "  Nothing read yet");
        }
        for entry in &self.entries {
            writeln!(
                f,
                "  {}  {}  Chapter {} ({})  {}",
                entry.read_at.format("%Y-%m-%d %H:%M"),
                entry.manga_title,
                entry.chapter_number.as_deref().unwrap_or("?"),
                entry.language,
                entry.chapter_id
            )?;
        }
        Ok(())
    }
}
