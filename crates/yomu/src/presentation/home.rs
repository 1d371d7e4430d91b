use std::fmt;

use yomu_lib::prelude::Tag;

use super::{
    App,
    common::{MangaCard, write_cards},
};
use crate::domain::{
    repositories::{auth::AuthRepository, catalogue::CatalogueRepository, state::StateRepository},
    services::catalogue::SHELF_LIMIT,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeView {
    pub genres: Vec<Tag>,
    pub active_genre: Option<Tag>,
    pub genre_manga: Vec<MangaCard>,
    pub recently_updated: Vec<MangaCard>,
}

impl<C, A, S> App<C, A, S>
where
    C: CatalogueRepository,
    A: AuthRepository,
    S: StateRepository + Clone,
{
    /// Genres and recent updates load side by side, a failure empties only
    /// its own section
    pub async fn home(&self) -> HomeView {
        let (genres, recent) = tokio::join!(
            self.catalogue.genres(),
            self.catalogue.recently_updated(SHELF_LIMIT)
        );
        let favorites = self.favorite_ids().await;

        let genres = genres.unwrap_or_else(|e| {
            error!("failed to load genres: {e}");
            vec![]
        });
        let recent = recent.unwrap_or_else(|e| {
            error!("failed to load recent updates: {e}");
            vec![]
        });

        let active_genre = genres.first().cloned();
        let genre_manga = match &active_genre {
            Some(genre) => self
                .catalogue
                .manga_by_tag(&genre.id, SHELF_LIMIT)
                .await
                .unwrap_or_else(|e| {
                    error!("failed to load manga for genre {}: {e}", genre.id);
                    vec![]
                }),
            None => vec![],
        };

        HomeView {
            genre_manga: MangaCard::list(
                &genre_manga,
                &self.uploads_url,
                self.placeholder_url(),
                &favorites,
            ),
            recently_updated: MangaCard::list(
                &recent,
                &self.uploads_url,
                self.placeholder_url(),
                &favorites,
            ),
            genres,
            active_genre,
        }
    }
}

impl fmt::Display for HomeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Genres")?;
        if self.genres.is_empty() {
            writeln!(f, "  No genres")?;
        }
        for genre in &self.genres {
            let active = self.active_genre.as_ref().map(|g| g.id == genre.id) == Some(true);
            writeln!(
                f,
                "  {} {}  {}",
                if active { '*' } else { ' ' },
                genre.name(),
                genre.id
            )?;
        }

        if let Some(genre) = &self.active_genre {
            writeln!(f)?;
            writeln!(f, "{}", genre.name())?;
            write_cards(f, &self.genre_manga, "No manga")?;
        }

        writeln!(f)?;
        writeln!(f, "Latest Updates")?;
        write_cards(f, &self.recently_updated, "No manga")
    }
}
