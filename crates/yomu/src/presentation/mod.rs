//! Screens as view models
//!
//! Each screen is built by one `App` method and rendered through `Display`.
//! Failures are logged where they happen; the view carries either a generic
//! message or an empty section in their place.

pub mod common;
pub mod detail;
pub mod favorites;
pub mod history;
pub mod home;
pub mod latest;
pub mod login;
pub mod reader;
pub mod search;

use std::collections::HashSet;

use thiserror::Error;

use crate::domain::{
    repositories::{auth::AuthRepository, catalogue::CatalogueRepository, state::StateRepository},
    services::{
        auth::AuthService,
        catalogue::{CatalogueService, CatalogueSettings},
        favorites::FavoriteService,
        history::HistoryService,
    },
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("Failed to load {0}.")]
    Load(&'static str),
    #[error("Manga not found.")]
    NotFound,
    #[error(transparent)]
    Reader(#[from] yomu_lib::error::Error),
}

pub struct App<C, A, S>
where
    C: CatalogueRepository,
    A: AuthRepository,
    S: StateRepository + Clone,
{
    catalogue: CatalogueService<C>,
    favorites: FavoriteService<S>,
    history: HistoryService<S>,
    auth: AuthService<A, S>,
    uploads_url: String,
    preferred_language: String,
}

impl<C, A, S> App<C, A, S>
where
    C: CatalogueRepository,
    A: AuthRepository,
    S: StateRepository + Clone,
{
    pub fn new(catalogue: C, auth: A, state: S, settings: CatalogueSettings) -> Self {
        Self {
            catalogue: CatalogueService::new(catalogue, settings),
            favorites: FavoriteService::new(state.clone()),
            history: HistoryService::new(state.clone(), None),
            auth: AuthService::new(auth, state),
            uploads_url: "https://uploads.mangadex.org".to_string(),
            preferred_language: "en".to_string(),
        }
    }

    pub fn with_uploads_url(self, uploads_url: &str) -> Self {
        Self {
            uploads_url: uploads_url.trim_end_matches('/').to_string(),
            ..self
        }
    }

    pub fn with_preferred_language(self, preferred_language: &str) -> Self {
        Self {
            preferred_language: preferred_language.to_string(),
            ..self
        }
    }

    pub fn with_history_limit(self, limit: Option<usize>) -> Self {
        Self {
            history: self.history.with_limit(limit),
            ..self
        }
    }

    fn placeholder_url(&self) -> &str {
        &self.catalogue.settings().placeholder_url
    }

    /// Ids of the current favorites, empty when they cannot be read
    async fn favorite_ids(&self) -> HashSet<String> {
        match self.favorites.get_favorites().await {
            Ok(favorites) => favorites.into_iter().map(|m| m.id).collect(),
            Err(e) => {
                error!("failed to read favorites: {e}");
                HashSet::new()
            }
        }
    }
}
