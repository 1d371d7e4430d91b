use std::{collections::HashSet, fmt};

use super::{
    App, ViewError,
    common::{MangaCard, write_cards},
};
use crate::domain::{
    repositories::{
        auth::AuthRepository,
        catalogue::{CatalogueRepository, CatalogueRepositoryError},
        state::StateRepository,
    },
    services::catalogue::CatalogueError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct FavoritesView {
    pub cards: Vec<MangaCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleView {
    pub title: String,
    pub is_favorite: bool,
}

impl<C, A, S> App<C, A, S>
where
    C: CatalogueRepository,
    A: AuthRepository,
    S: StateRepository + Clone,
{
    /// In the order they were added
    pub async fn favorites(&self) -> FavoritesView {
        let favorites = self.favorites.get_favorites().await.unwrap_or_else(|e| {
            error!("failed to read favorites: {e}");
            vec![]
        });
        let ids = favorites.iter().map(|m| m.id.clone()).collect::<HashSet<_>>();

        FavoritesView {
            cards: MangaCard::list(&favorites, &self.uploads_url, self.placeholder_url(), &ids),
        }
    }

    /// A stored favorite is removed without asking the catalogue, any other
    /// manga is fetched first so its record can be kept
    pub async fn toggle_favorite(&self, manga_id: &str) -> Result<ToggleView, ViewError> {
        let stored = self
            .favorites
            .get_favorites()
            .await
            .map_err(|e| {
                error!("failed to read favorites: {e}");
                ViewError::Load("favorites")
            })?
            .into_iter()
            .find(|m| m.id == manga_id);

        let manga = match stored {
            Some(manga) => manga,
            None => match self.catalogue.manga_detail(manga_id).await {
                Ok(manga) => manga,
                Err(CatalogueError::RepositoryError(CatalogueRepositoryError::Status(404))) => {
                    error!("manga {manga_id} does not exist");
                    return Err(ViewError::NotFound);
                }
                Err(e) => {
                    error!("failed to load manga {manga_id}: {e}");
                    return Err(ViewError::Load("manga"));
                }
            },
        };

        let is_favorite = self.favorites.toggle_favorite(&manga).await.map_err(|e| {
            error!("failed to update favorites: {e}");
            ViewError::Load("favorites")
        })?;

        Ok(ToggleView {
            title: manga.title().to_string(),
            is_favorite,
        })
    }
}

impl fmt::Display for FavoritesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Favorites")?;
        write_cards(f, &self.cards, "No favorites yet")
    }
}

impl fmt::Display for ToggleView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_favorite {
            write!(f, "Added {} to favorites", self.title)
        } else {
            write!(f, "Removed {} from favorites", self.title)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        domain::services::catalogue::test::{FakeCatalogue, manga},
        presentation::test::app,
    };

    #[tokio::test]
    async fn test_toggle_twice_restores_favorites() {
        let (app, state) = app(FakeCatalogue {
            manga: vec![manga("a", "Berserk"), manga("b", "Vagabond")],
            ..Default::default()
        });
        state.write_favorites(&[manga("b", "Vagabond")]).await.unwrap();
        let before = state.read_favorites().await.unwrap();

        let added = app.toggle_favorite("a").await.unwrap();
        assert!(added.is_favorite);
        assert_eq!(added.to_string(), "Added Berserk to favorites");
        assert_eq!(app.favorites().await.cards.len(), 2);

        let removed = app.toggle_favorite("a").await.unwrap();
        assert!(!removed.is_favorite);
        assert_eq!(state.read_favorites().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_stored_favorite_removed_offline() {
        let (app, state) = app(FakeCatalogue {
            fail: true,
            ..Default::default()
        });
        state.write_favorites(&[manga("gone", "Gone")]).await.unwrap();

        let view = app.toggle_favorite("gone").await.unwrap();

        assert!(!view.is_favorite);
        assert!(app.favorites().await.cards.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_manga_cannot_be_added() {
        let (app, _) = app(FakeCatalogue::default());

        assert_eq!(app.toggle_favorite("missing").await, Err(ViewError::NotFound));
    }

    #[tokio::test]
    async fn test_add_fails_when_catalogue_unreachable() {
        let (app, state) = app(FakeCatalogue {
            manga: vec![manga("a", "Berserk")],
            fail: true,
            ..Default::default()
        });

        assert_eq!(app.toggle_favorite("a").await, Err(ViewError::Load("manga")));
        assert!(state.read_favorites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_favorites() {
        let (app, _) = app(FakeCatalogue::default());

        assert!(app.favorites().await.to_string().contains("No favorites yet"));
    }
}
