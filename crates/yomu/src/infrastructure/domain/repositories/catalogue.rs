use async_trait::async_trait;
use serde::{Deserialize, de::DeserializeOwned};
use yomu_lib::prelude::{ChapterInfo, Collection, MangaInfo, PageServer, Query, Tag};

use crate::domain::repositories::catalogue::{CatalogueRepository, CatalogueRepositoryError};

pub const FEED_LIMIT: i64 = 96;
pub const DEFAULT_LIMIT: i64 = 15;

/// Every rating, the feed is filtered by the manga not by its chapters
const FEED_CONTENT_RATING: [&str; 4] = ["safe", "suggestive", "erotica", "pornographic"];

/// Single-record envelope
#[derive(Debug, Deserialize)]
struct Entity<T> {
    data: T,
}

#[derive(Clone)]
pub struct CatalogueRepositoryImpl {
    client: reqwest::Client,
    api_url: String,
    languages: Vec<String>,
    content_rating: Vec<String>,
}

impl CatalogueRepositoryImpl {
    pub fn new(
        client: reqwest::Client,
        api_url: &str,
        languages: Vec<String>,
        content_rating: Vec<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            languages,
            content_rating,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
    ) -> Result<T, CatalogueRepositoryError> {
        let url = format!("{}{path}", self.api_url);
        debug!("GET {url}?{query}");

        let res = self
            .client
            .get(&url)
            .query(&query.to_pairs())
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            error!("GET {url} responded with {status}");
            return Err(CatalogueRepositoryError::Status(status.as_u16()));
        }

        let body = res.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Caller parameters over the listing defaults; newest uploads first unless
/// the caller chose an order
pub fn listing_query(content_rating: &[String], query: Query) -> Query {
    let query = Query::new()
        .scalar("limit", DEFAULT_LIMIT)
        .scalar("offset", 0)
        .array("includes", ["cover_art", "author", "artist"])
        .array("contentRating", content_rating)
        .merge(query);

    if query.contains("order") {
        query
    } else {
        query.object("order", [("latestUploadedChapter", "desc")])
    }
}

/// An empty `languages` leaves the feed unfiltered
pub fn feed_query(languages: &[String], offset: i64) -> Query {
    let query = Query::new()
        .scalar("limit", FEED_LIMIT)
        .scalar("offset", offset)
        .array("includes", ["scanlation_group", "user"])
        .object("order", [("volume", "desc"), ("chapter", "desc")])
        .array("contentRating", FEED_CONTENT_RATING)
        .scalar("includeUnavailable", 0);

    if languages.is_empty() {
        query
    } else {
        query.array("translatedLanguage", languages)
    }
}

#[async_trait]
impl CatalogueRepository for CatalogueRepositoryImpl {
    async fn search_manga(
        &self,
        query: Query,
    ) -> Result<Collection<MangaInfo>, CatalogueRepositoryError> {
        self.get("/manga", &listing_query(&self.content_rating, query))
            .await
    }

    async fn get_manga(&self, manga_id: &str) -> Result<MangaInfo, CatalogueRepositoryError> {
        let query = Query::new().array("includes", ["artist", "author", "cover_art"]);
        let entity: Entity<MangaInfo> = self.get(&format!("/manga/{manga_id}"), &query).await?;

        Ok(entity.data)
    }

    async fn get_tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError> {
        let tags: Collection<Tag> = self.get("/manga/tag", &Query::new()).await?;

        Ok(tags.data)
    }

    async fn get_manga_feed(
        &self,
        manga_id: &str,
        offset: i64,
    ) -> Result<Collection<ChapterInfo>, CatalogueRepositoryError> {
        self.get(
            &format!("/manga/{manga_id}/feed"),
            &feed_query(&self.languages, offset),
        )
        .await
    }

    async fn get_chapter(
        &self,
        chapter_id: &str,
    ) -> Result<ChapterInfo, CatalogueRepositoryError> {
        let query = Query::new().array("includes", ["manga"]);
        let entity: Entity<ChapterInfo> =
            self.get(&format!("/chapter/{chapter_id}"), &query).await?;

        Ok(entity.data)
    }

    async fn get_page_server(
        &self,
        chapter_id: &str,
    ) -> Result<PageServer, CatalogueRepositoryError> {
        self.get(&format!("/at-home/server/{chapter_id}"), &Query::new())
            .await
    }

    async fn probe_image(&self, url: &str) -> Result<(), CatalogueRepositoryError> {
        let status = self.client.head(url).send().await?.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(CatalogueRepositoryError::Status(status.as_u16()))
        }
    }
}
