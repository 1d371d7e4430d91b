use async_trait::async_trait;
use thiserror::Error;
use yomu_lib::prelude::{ChapterInfo, Collection, MangaInfo, PageServer, Query, Tag};

#[derive(Debug, Error)]
pub enum CatalogueRepositoryError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("catalogue responded with status {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read access to the external catalogue
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// `query` is merged over the listing defaults, its keys win
    async fn search_manga(
        &self,
        query: Query,
    ) -> Result<Collection<MangaInfo>, CatalogueRepositoryError>;

    async fn get_manga(&self, manga_id: &str) -> Result<MangaInfo, CatalogueRepositoryError>;

    async fn get_tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError>;

    async fn get_manga_feed(
        &self,
        manga_id: &str,
        offset: i64,
    ) -> Result<Collection<ChapterInfo>, CatalogueRepositoryError>;

    async fn get_chapter(&self, chapter_id: &str)
        -> Result<ChapterInfo, CatalogueRepositoryError>;

    async fn get_page_server(
        &self,
        chapter_id: &str,
    ) -> Result<PageServer, CatalogueRepositoryError>;

    /// Succeeds when the image at `url` can be loaded
    async fn probe_image(&self, url: &str) -> Result<(), CatalogueRepositoryError>;
}
