use futures::future::join_all;
use thiserror::Error;
use yomu_lib::prelude::{ChapterInfo, Collection, MangaInfo, Query, Tag};

use crate::domain::repositories::catalogue::{CatalogueRepository, CatalogueRepositoryError};

pub const SEARCH_LIMIT: i64 = 24;
pub const SHELF_LIMIT: i64 = 12;

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("repository error: {0}")]
    RepositoryError(#[from] CatalogueRepositoryError),
    #[error("page must be 1 or greater, got {0}")]
    InvalidPage(i64),
}

#[derive(Debug, Clone)]
pub struct CatalogueSettings {
    pub page_size: i64,
    pub data_saver: bool,
    pub max_feed_pages: usize,
    pub placeholder_url: String,
}

impl Default for CatalogueSettings {
    fn default() -> Self {
        Self {
            page_size: SHELF_LIMIT,
            data_saver: true,
            max_feed_pages: 10,
            placeholder_url: "https://placehold.co/256x360?text=No+Cover".to_string(),
        }
    }
}

pub struct CatalogueService<R>
where
    R: CatalogueRepository,
{
    repo: R,
    settings: CatalogueSettings,
}

impl<R> CatalogueService<R>
where
    R: CatalogueRepository,
{
    pub fn new(repo: R, settings: CatalogueSettings) -> Self {
        Self { repo, settings }
    }

    pub fn settings(&self) -> &CatalogueSettings {
        &self.settings
    }

    #[cfg(test)]
    pub(crate) fn repo(&self) -> &R {
        &self.repo
    }

    pub async fn search_by_title(&self, title: &str) -> Result<Vec<MangaInfo>, CatalogueError> {
        let query = Query::new()
            .scalar("title", title)
            .scalar("limit", SEARCH_LIMIT)
            .array("includes", ["cover_art"]);

        Ok(self.repo.search_manga(query).await?.data)
    }

    pub async fn search_by_tag(&self, tag_id: &str) -> Result<Vec<MangaInfo>, CatalogueError> {
        self.manga_by_tag(tag_id, SEARCH_LIMIT).await
    }

    pub async fn manga_by_tag(
        &self,
        tag_id: &str,
        limit: i64,
    ) -> Result<Vec<MangaInfo>, CatalogueError> {
        let query = Query::new()
            .array("includedTags", [tag_id])
            .scalar("limit", limit);

        Ok(self.repo.search_manga(query).await?.data)
    }

    /// Recently updated manga for the landing shelf
    pub async fn recently_updated(&self, limit: i64) -> Result<Vec<MangaInfo>, CatalogueError> {
        let query = Query::new()
            .object("order", [("updatedAt", "desc")])
            .scalar("limit", limit);

        Ok(self.repo.search_manga(query).await?.data)
    }

    /// 1-based page of the latest-uploads gallery
    pub async fn latest(&self, page: i64) -> Result<Collection<MangaInfo>, CatalogueError> {
        if page < 1 {
            return Err(CatalogueError::InvalidPage(page));
        }

        let limit = self.settings.page_size;
        let query = Query::new()
            .scalar("limit", limit)
            .scalar("offset", (page - 1) * limit)
            .object("order", [("latestUploadedChapter", "desc")]);

        Ok(self.repo.search_manga(query).await?)
    }

    pub async fn genres(&self) -> Result<Vec<Tag>, CatalogueError> {
        let tags = self.repo.get_tags().await?;

        Ok(tags.into_iter().filter(|tag| tag.is_genre()).collect())
    }

    pub async fn manga_detail(&self, manga_id: &str) -> Result<MangaInfo, CatalogueError> {
        Ok(self.repo.get_manga(manga_id).await?)
    }

    /// Whole chapter feed, following offsets until `total` or the page cap
    pub async fn chapters(&self, manga_id: &str) -> Result<Vec<ChapterInfo>, CatalogueError> {
        let mut chapters = vec![];
        let mut offset = 0;

        for _ in 0..self.settings.max_feed_pages.max(1) {
            let feed = self.repo.get_manga_feed(manga_id, offset).await?;
            let has_more = feed.has_more() && !feed.data.is_empty();
            offset = feed.offset + feed.data.len() as i64;
            chapters.extend(feed.data);

            if !has_more {
                break;
            }
        }

        debug!("fetched {} chapters for manga {manga_id}", chapters.len());

        Ok(chapters)
    }

    pub async fn chapter(&self, chapter_id: &str) -> Result<ChapterInfo, CatalogueError> {
        Ok(self.repo.get_chapter(chapter_id).await?)
    }

    pub async fn pages(&self, chapter_id: &str) -> Result<Vec<String>, CatalogueError> {
        let server = self.repo.get_page_server(chapter_id).await?;

        Ok(server.page_urls(self.settings.data_saver))
    }

    /// Replaces pages that fail to load with the placeholder image
    pub async fn probe_pages(&self, pages: Vec<String>) -> Vec<String> {
        let probes = pages.iter().map(|url| self.repo.probe_image(url));
        let results = join_all(probes).await;

        pages
            .into_iter()
            .zip(results)
            .map(|(url, result)| match result {
                Ok(_) => url,
                Err(e) => {
                    warn!("page {url} failed to load: {e}");
                    self.settings.placeholder_url.clone()
                }
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use yomu_lib::prelude::{ChapterAttributes, PageServer, PageServerChapter, TagAttributes};
    use yomu_lib::{models::LocalizedString, query::Value};

    use super::*;

    /// Catalogue answering from memory and remembering the queries it saw
    #[derive(Default)]
    pub struct FakeCatalogue {
        pub manga: Vec<MangaInfo>,
        pub tags: Vec<Tag>,
        pub chapters: Vec<ChapterInfo>,
        pub feed_page_size: usize,
        pub broken_images: Vec<String>,
        pub fail: bool,
        pub queries: Mutex<Vec<Query>>,
    }

    pub fn manga(id: &str, title: &str) -> MangaInfo {
        let mut manga = MangaInfo {
            id: id.to_string(),
            ..Default::default()
        };
        manga.attributes.title = LocalizedString::new().with("en", title);
        manga
    }

    pub fn chapter(id: &str, lang: &str, volume: Option<&str>, number: &str) -> ChapterInfo {
        ChapterInfo {
            id: id.to_string(),
            attributes: ChapterAttributes {
                volume: volume.map(str::to_string),
                chapter: Some(number.to_string()),
                translated_language: lang.to_string(),
                ..Default::default()
            },
            relationships: vec![],
        }
    }

    pub fn tag(id: &str, name: &str, group: &str) -> Tag {
        Tag {
            id: id.to_string(),
            attributes: TagAttributes {
                name: LocalizedString::new().with("en", name),
                group: group.to_string(),
            },
        }
    }

    fn failure() -> CatalogueRepositoryError {
        CatalogueRepositoryError::Status(503)
    }

    #[async_trait]
    impl CatalogueRepository for FakeCatalogue {
        async fn search_manga(
            &self,
            query: Query,
        ) -> Result<Collection<MangaInfo>, CatalogueRepositoryError> {
            if self.fail {
                return Err(failure());
            }
            let limit: i64 = match query.get("limit") {
                Some(Value::Scalar(limit)) => limit.parse().unwrap_or(15),
                _ => 15,
            };
            let offset: i64 = match query.get("offset") {
                Some(Value::Scalar(offset)) => offset.parse().unwrap_or(0),
                _ => 0,
            };
            self.queries.lock().unwrap().push(query);

            Ok(Collection {
                data: self
                    .manga
                    .iter()
                    .skip(offset as usize)
                    .take(limit as usize)
                    .cloned()
                    .collect(),
                limit,
                offset,
                total: self.manga.len() as i64,
            })
        }

        async fn get_manga(&self, manga_id: &str) -> Result<MangaInfo, CatalogueRepositoryError> {
            if self.fail {
                return Err(failure());
            }
            self.manga
                .iter()
                .find(|m| m.id == manga_id)
                .cloned()
                .ok_or(CatalogueRepositoryError::Status(404))
        }

        async fn get_tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError> {
            if self.fail {
                return Err(failure());
            }
            Ok(self.tags.clone())
        }

        async fn get_manga_feed(
            &self,
            _manga_id: &str,
            offset: i64,
        ) -> Result<Collection<ChapterInfo>, CatalogueRepositoryError> {
            if self.fail {
                return Err(failure());
            }
            let limit = if self.feed_page_size == 0 {
                96
            } else {
                self.feed_page_size
            };
            Ok(Collection {
                data: self
                    .chapters
                    .iter()
                    .skip(offset as usize)
                    .take(limit)
                    .cloned()
                    .collect(),
                limit: limit as i64,
                offset,
                total: self.chapters.len() as i64,
            })
        }

        async fn get_chapter(
            &self,
            chapter_id: &str,
        ) -> Result<ChapterInfo, CatalogueRepositoryError> {
            self.chapters
                .iter()
                .find(|c| c.id == chapter_id)
                .cloned()
                .ok_or(CatalogueRepositoryError::Status(404))
        }

        async fn get_page_server(
            &self,
            chapter_id: &str,
        ) -> Result<PageServer, CatalogueRepositoryError> {
            if self.fail {
                return Err(failure());
            }
            Ok(PageServer {
                base_url: "https://H".to_string(),
                chapter: PageServerChapter {
                    hash: chapter_id.to_string(),
                    data: vec!["a.png".to_string(), "b.png".to_string()],
                    data_saver: vec!["a.jpg".to_string(), "b.jpg".to_string()],
                },
            })
        }

        async fn probe_image(&self, url: &str) -> Result<(), CatalogueRepositoryError> {
            if self.broken_images.iter().any(|u| u == url) {
                Err(CatalogueRepositoryError::Status(404))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_latest_page_offset() {
        let repo = FakeCatalogue {
            manga: (0..30).map(|i| manga(&i.to_string(), "m")).collect(),
            ..Default::default()
        };
        let svc = CatalogueService::new(repo, CatalogueSettings::default());

        let page = svc.latest(3).await.unwrap();

        assert_eq!(page.offset, 24);
        assert_eq!(page.data.len(), 6);
        assert_eq!(page.page_count(), 3);
        assert_eq!(page.page(), 3);

        let queries = svc.repo.queries.lock().unwrap();
        assert_eq!(
            queries[0].get("order"),
            Some(&Value::Object(vec![(
                "latestUploadedChapter".to_string(),
                "desc".to_string()
            )]))
        );
    }

    #[tokio::test]
    async fn test_latest_rejects_page_zero() {
        let svc = CatalogueService::new(FakeCatalogue::default(), CatalogueSettings::default());

        assert!(matches!(
            svc.latest(0).await,
            Err(CatalogueError::InvalidPage(0))
        ));
    }

    #[tokio::test]
    async fn test_genres_only() {
        let repo = FakeCatalogue {
            tags: vec![
                tag("t1", "Action", "genre"),
                tag("t2", "Zombies", "theme"),
                tag("t3", "Romance", "genre"),
            ],
            ..Default::default()
        };
        let svc = CatalogueService::new(repo, CatalogueSettings::default());

        let genres = svc.genres().await.unwrap();

        assert_eq!(
            genres.iter().map(|t| t.name()).collect::<Vec<_>>(),
            vec!["Action", "Romance"]
        );
    }

    #[tokio::test]
    async fn test_chapters_follow_feed_offsets() {
        let repo = FakeCatalogue {
            chapters: (0..7)
                .map(|i| chapter(&format!("c{i}"), "en", None, &i.to_string()))
                .collect(),
            feed_page_size: 3,
            ..Default::default()
        };
        let svc = CatalogueService::new(repo, CatalogueSettings::default());

        let chapters = svc.chapters("m").await.unwrap();

        assert_eq!(chapters.len(), 7);
    }

    #[tokio::test]
    async fn test_chapters_stop_at_page_cap() {
        let repo = FakeCatalogue {
            chapters: (0..7)
                .map(|i| chapter(&format!("c{i}"), "en", None, &i.to_string()))
                .collect(),
            feed_page_size: 3,
            ..Default::default()
        };
        let settings = CatalogueSettings {
            max_feed_pages: 2,
            ..Default::default()
        };
        let svc = CatalogueService::new(repo, settings);

        assert_eq!(svc.chapters("m").await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_pages_use_data_saver() {
        let svc = CatalogueService::new(FakeCatalogue::default(), CatalogueSettings::default());

        assert_eq!(
            svc.pages("X").await.unwrap(),
            vec!["https://H/data-saver/X/a.jpg", "https://H/data-saver/X/b.jpg"]
        );
    }

    #[tokio::test]
    async fn test_broken_pages_become_placeholder() {
        let repo = FakeCatalogue {
            broken_images: vec!["https://H/data-saver/X/b.jpg".to_string()],
            ..Default::default()
        };
        let svc = CatalogueService::new(repo, CatalogueSettings::default());

        let pages = svc.pages("X").await.unwrap();
        let pages = svc.probe_pages(pages).await;

        assert_eq!(
            pages,
            vec![
                "https://H/data-saver/X/a.jpg".to_string(),
                CatalogueSettings::default().placeholder_url,
            ]
        );
    }
}
