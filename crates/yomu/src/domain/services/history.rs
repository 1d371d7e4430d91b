use chrono::{DateTime, Utc};
use thiserror::Error;
use yomu_lib::prelude::ChapterInfo;

use crate::domain::{
    entities::history::HistoryEntry,
    repositories::state::{StateRepository, StateRepositoryError},
};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("repository error: {0}")]
    RepositoryError(#[from] StateRepositoryError),
}

pub struct HistoryService<S>
where
    S: StateRepository,
{
    repo: S,
    limit: Option<usize>,
}

impl<S> HistoryService<S>
where
    S: StateRepository,
{
    /// `limit` caps the number of manga kept, `None` keeps everything
    pub fn new(repo: S, limit: Option<usize>) -> Self {
        Self { repo, limit }
    }

    pub fn with_limit(self, limit: Option<usize>) -> Self {
        Self { limit, ..self }
    }

    /// Most recently read first
    pub async fn get_history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = self
            .repo
            .read_history()
            .await?
            .into_values()
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| b.read_at.cmp(&a.read_at));

        Ok(entries)
    }

    pub async fn get_manga_history(
        &self,
        manga_id: &str,
    ) -> Result<Option<HistoryEntry>, HistoryError> {
        Ok(self.repo.read_history().await?.remove(manga_id))
    }

    pub async fn record_chapter(
        &self,
        manga_id: &str,
        manga_title: &str,
        chapter: &ChapterInfo,
    ) -> Result<HistoryEntry, HistoryError> {
        self.record_chapter_at(manga_id, manga_title, chapter, Utc::now())
            .await
    }

    /// Overwrites the entry for `manga_id`
    pub async fn record_chapter_at(
        &self,
        manga_id: &str,
        manga_title: &str,
        chapter: &ChapterInfo,
        read_at: DateTime<Utc>,
    ) -> Result<HistoryEntry, HistoryError> {
        let mut history = self.repo.read_history().await?;

        let entry = HistoryEntry {
            manga_id: manga_id.to_string(),
            manga_title: manga_title.to_string(),
            chapter_id: chapter.id.clone(),
            chapter_number: chapter.attributes.chapter.clone(),
            language: chapter.language().to_string(),
            read_at,
        };
        history.insert(manga_id.to_string(), entry.clone());

        if let Some(limit) = self.limit {
            while history.len() > limit {
                let oldest = history
                    .values()
                    .min_by_key(|e| e.read_at)
                    .map(|e| e.manga_id.clone());
                match oldest {
                    Some(manga_id) => {
                        debug!("dropping {manga_id} from history");
                        history.remove(&manga_id);
                    }
                    None => break,
                }
            }
        }

        self.repo.write_history(&history).await?;

        Ok(entry)
    }
}
