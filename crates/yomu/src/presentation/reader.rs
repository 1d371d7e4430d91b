use std::fmt;

use yomu_lib::{
    aggregation,
    error::Error,
    prelude::{ChapterInfo, UNKNOWN_TITLE},
};

use super::{App, ViewError};
use crate::domain::repositories::{
    auth::AuthRepository, catalogue::CatalogueRepository, state::StateRepository,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderMode {
    /// One page at a time, 1-based
    Paged(usize),
    Continuous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterLink {
    pub id: String,
    pub title: String,
}

impl From<&ChapterInfo> for ChapterLink {
    fn from(chapter: &ChapterInfo) -> Self {
        Self {
            id: chapter.id.clone(),
            title: chapter.display_title(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReaderView {
    pub chapter: ChapterLink,
    pub manga_id: Option<String>,
    pub manga_title: String,
    pub mode: ReaderMode,
    pub pages: Vec<String>,
    pub prev: Option<ChapterLink>,
    pub next: Option<ChapterLink>,
}

impl ReaderView {
    /// Pages shown in the current mode
    pub fn visible_pages(&self) -> &[String] {
        match self.mode {
            ReaderMode::Paged(page) => page
                .checked_sub(1)
                .and_then(|start| self.pages.get(start..page))
                .unwrap_or(&[]),
            ReaderMode::Continuous => &self.pages,
        }
    }
}

impl<C, A, S> App<C, A, S>
where
    C: CatalogueRepository,
    A: AuthRepository,
    S: StateRepository + Clone,
{
    /// Opens a chapter and records it as the last read chapter of its manga
    ///
    /// With `probe` every page is checked first and pages that fail to load
    /// are replaced by the placeholder image.
    pub async fn read(
        &self,
        chapter_id: &str,
        mode: ReaderMode,
        probe: bool,
    ) -> Result<ReaderView, ViewError> {
        let chapter = self.catalogue.chapter(chapter_id).await.map_err(|e| {
            error!("failed to load chapter {chapter_id}: {e}");
            ViewError::Load("chapter")
        })?;

        if let Some(url) = &chapter.attributes.external_url {
            return Err(Error::ExternalChapter(chapter.id.clone(), url.clone()).into());
        }

        let mut pages = self.catalogue.pages(chapter_id).await.map_err(|e| {
            error!("failed to load pages of {chapter_id}: {e}");
            ViewError::Load("pages")
        })?;
        if probe {
            pages = self.catalogue.probe_pages(pages).await;
        }

        if let ReaderMode::Paged(page) = mode {
            if page == 0 || page > pages.len() {
                return Err(Error::PageOutOfRange(page, pages.len()).into());
            }
        }

        let manga_id = chapter.manga_id().map(str::to_string);
        let (manga_title, prev, next) = match &manga_id {
            Some(manga_id) => self.navigation(manga_id, &chapter).await,
            None => {
                warn!("chapter {chapter_id} has no manga relationship");
                (UNKNOWN_TITLE.to_string(), None, None)
            }
        };

        if let Some(manga_id) = &manga_id {
            if let Err(e) = self
                .history
                .record_chapter(manga_id, &manga_title, &chapter)
                .await
            {
                error!("failed to record history: {e}");
            }
        }

        Ok(ReaderView {
            chapter: ChapterLink::from(&chapter),
            manga_id,
            manga_title,
            mode,
            pages,
            prev,
            next,
        })
    }

    /// Manga title and the chapters around `chapter` in its language's list
    async fn navigation(
        &self,
        manga_id: &str,
        chapter: &ChapterInfo,
    ) -> (String, Option<ChapterLink>, Option<ChapterLink>) {
        let (manga, chapters) = tokio::join!(
            self.catalogue.manga_detail(manga_id),
            self.catalogue.chapters(manga_id)
        );

        let manga_title = match manga {
            Ok(manga) => manga.title().to_string(),
            Err(e) => {
                error!("failed to load manga {manga_id}: {e}");
                UNKNOWN_TITLE.to_string()
            }
        };

        let chapters = match chapters {
            Ok(chapters) => chapters,
            Err(e) => {
                error!("failed to load chapters of {manga_id}: {e}");
                return (manga_title, None, None);
            }
        };

        let sequence = aggregation::flatten(&aggregation::aggregate(&chapters, chapter.language()));
        if !sequence.iter().any(|c| c.id == chapter.id) {
            warn!("{}", Error::ChapterNotListed(chapter.id.clone()));
        }
        let neighbours = aggregation::neighbours(&sequence, &chapter.id);

        (
            manga_title,
            neighbours.prev.map(ChapterLink::from),
            neighbours.next.map(ChapterLink::from),
        )
    }
}

impl fmt::Display for ReaderView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} / {}", self.manga_title, self.chapter.title)?;

        match self.mode {
            ReaderMode::Paged(page) => {
                writeln!(f, "Page {page} of {}", self.pages.len())?;
                for url in self.visible_pages() {
                    writeln!(f, "  {url}")?;
                }
            }
            ReaderMode::Continuous => {
                for (i, url) in self.pages.iter().enumerate() {
                    writeln!(f, "  {:>3}  {url}", i + 1)?;
                }
            }
        }

        writeln!(f)?;
        match &self.prev {
            Some(prev) => writeln!(f, "Previous: {}  {}", prev.title, prev.id)?,
            None => writeln!(f, "Previous: none")?,
        }
        match &self.next {
            Some(next) => writeln!(f, "Next: {}  {}", next.title, next.id),
            None => writeln!(f, "Next: none"),
        }
    }
}
