use std::fmt;

use super::{
    App, ViewError,
    common::{MangaCard, write_cards},
};
use crate::domain::repositories::{
    auth::AuthRepository, catalogue::CatalogueRepository, state::StateRepository,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchBy {
    Title(String),
    Tag(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub by: SearchBy,
    pub cards: Vec<MangaCard>,
    pub error: Option<ViewError>,
}

impl<C, A, S> App<C, A, S>
where
    C: CatalogueRepository,
    A: AuthRepository,
    S: StateRepository + Clone,
{
    /// A blank title searches nothing
    pub async fn search(&self, by: SearchBy) -> SearchView {
        let result = match &by {
            SearchBy::Title(title) if title.trim().is_empty() => Ok(vec![]),
            SearchBy::Title(title) => self.catalogue.search_by_title(title.trim()).await,
            SearchBy::Tag(tag_id) => self.catalogue.search_by_tag(tag_id).await,
        };

        match result {
            Ok(manga) => {
                let favorites = self.favorite_ids().await;
                SearchView {
                    cards: MangaCard::list(
                        &manga,
                        &self.uploads_url,
                        self.placeholder_url(),
                        &favorites,
                    ),
                    by,
                    error: None,
                }
            }
            Err(e) => {
                error!("search {by:?} failed: {e}");
                SearchView {
                    by,
                    cards: vec![],
                    error: Some(ViewError::Load("search results")),
                }
            }
        }
    }
}

impl fmt::Display for SearchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.by {
            SearchBy::Title(title) => writeln!(f, "Results for \"{title}\"")?,
            SearchBy::Tag(tag_id) => writeln!(f, "Manga tagged {tag_id}")?,
        }
        match &self.error {
            Some(error) => writeln!(f, "  {error}"),
            None => write_cards(f, &self.cards, "No results"),
        }
    }
}
