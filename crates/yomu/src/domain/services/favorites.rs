use thiserror::Error;
use yomu_lib::prelude::MangaInfo;

use crate::domain::repositories::state::{StateRepository, StateRepositoryError};

#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("repository error: {0}")]
    RepositoryError(#[from] StateRepositoryError),
}

pub struct FavoriteService<S>
where
    S: StateRepository,
{
    repo: S,
}

impl<S> FavoriteService<S>
where
    S: StateRepository,
{
    pub fn new(repo: S) -> Self {
        Self { repo }
    }

    pub async fn get_favorites(&self) -> Result<Vec<MangaInfo>, FavoriteError> {
        Ok(self.repo.read_favorites().await?)
    }

    pub async fn is_favorite(&self, manga_id: &str) -> Result<bool, FavoriteError> {
        let favorites = self.repo.read_favorites().await?;

        Ok(favorites.iter().any(|m| m.id == manga_id))
    }

    /// Removes the manga when it is a favorite, appends it otherwise.
    /// Returns whether the manga is a favorite afterwards.
    pub async fn toggle_favorite(&self, manga: &MangaInfo) -> Result<bool, FavoriteError> {
        let mut favorites = self.repo.read_favorites().await?;

        let is_favorite = if favorites.iter().any(|m| m.id == manga.id) {
            favorites.retain(|m| m.id != manga.id);
            false
        } else {
            favorites.push(manga.clone());
            true
        };

        self.repo.write_favorites(&favorites).await?;
        info!(
            "{} {} favorites",
            manga.id,
            if is_favorite { "added to" } else { "removed from" }
        );

        Ok(is_favorite)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        domain::services::catalogue::test::manga,
        infrastructure::domain::repositories::state::MemoryStateRepository,
    };

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let repo = MemoryStateRepository::default();
        let svc = FavoriteService::new(repo);

        assert!(svc.toggle_favorite(&manga("a", "Berserk")).await.unwrap());
        assert!(svc.is_favorite("a").await.unwrap());
        assert!(!svc.toggle_favorite(&manga("a", "Berserk")).await.unwrap());
        assert!(!svc.is_favorite("a").await.unwrap());
    }

    #[tokio::test]
    async fn test_double_toggle_restores_favorites() {
        let repo = MemoryStateRepository::default();
        let svc = FavoriteService::new(repo);
        svc.toggle_favorite(&manga("a", "Berserk")).await.unwrap();
        svc.toggle_favorite(&manga("b", "Vagabond")).await.unwrap();
        svc.toggle_favorite(&manga("c", "Monster")).await.unwrap();
        let before = svc.get_favorites().await.unwrap();

        svc.toggle_favorite(&manga("b", "Vagabond")).await.unwrap();
        svc.toggle_favorite(&manga("b", "Vagabond")).await.unwrap();
        let after = svc.get_favorites().await.unwrap();

        assert_eq!(before.len(), after.len());
        let ids = |list: &[MangaInfo]| {
            let mut ids = list.iter().map(|m| m.id.clone()).collect::<Vec<_>>();
            ids.sort();
            ids
        };
        assert_eq!(ids(&before), ids(&after));

        svc.toggle_favorite(&manga("d", "Pluto")).await.unwrap();
        svc.toggle_favorite(&manga("d", "Pluto")).await.unwrap();
        assert_eq!(svc.get_favorites().await.unwrap(), after);
    }

    #[tokio::test]
    async fn test_favorites_unique_by_id() {
        let repo = MemoryStateRepository::default();
        let svc = FavoriteService::new(repo);

        svc.toggle_favorite(&manga("a", "Berserk")).await.unwrap();
        svc.toggle_favorite(&manga("b", "Vagabond")).await.unwrap();

        let favorites = svc.get_favorites().await.unwrap();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].title(), "Berserk");
    }
}
