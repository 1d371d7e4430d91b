use std::fmt;

use super::{
    App, ViewError,
    common::{MangaCard, Pager, write_cards},
};
use crate::domain::repositories::{
    auth::AuthRepository, catalogue::CatalogueRepository, state::StateRepository,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LatestView {
    pub page: i64,
    pub cards: Vec<MangaCard>,
    pub pager: Option<Pager>,
    pub error: Option<ViewError>,
}

impl<C, A, S> App<C, A, S>
where
    C: CatalogueRepository,
    A: AuthRepository,
    S: StateRepository + Clone,
{
    pub async fn latest(&self, page: i64) -> LatestView {
        let listing = match self.catalogue.latest(page).await {
            Ok(listing) => listing,
            Err(e) => {
                error!("failed to load latest page {page}: {e}");
                return LatestView {
                    page,
                    cards: vec![],
                    pager: None,
                    error: Some(ViewError::Load("latest updates")),
                };
            }
        };

        let favorites = self.favorite_ids().await;

        LatestView {
            page,
            cards: MangaCard::list(
                &listing.data,
                &self.uploads_url,
                self.placeholder_url(),
                &favorites,
            ),
            pager: Pager::new(page, listing.page_count()),
            error: None,
        }
    }
}

impl fmt::Display for LatestView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Latest Updates")?;
        if let Some(error) = &self.error {
            return writeln!(f, "  {error}");
        }
        write_cards(f, &self.cards, "No manga")?;
        if let Some(pager) = &self.pager {
            writeln!(f)?;
            writeln!(f, "{pager}")?;
        }
        Ok(())
    }
}
