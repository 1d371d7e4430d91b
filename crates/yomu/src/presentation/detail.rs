use std::fmt;

use yomu_lib::{
    aggregation,
    prelude::{ChapterInfo, Tag, VolumeGroup},
};

use super::{App, ViewError, common::MangaCard};
use crate::domain::{
    entities::history::HistoryEntry,
    repositories::{
        auth::AuthRepository,
        catalogue::{CatalogueRepository, CatalogueRepositoryError},
        state::StateRepository,
    },
    services::catalogue::CatalogueError,
};

/// Chapters of one manga in a single language, grouped by volume
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChapterListView {
    pub languages: Vec<String>,
    pub language: Option<String>,
    pub volumes: Vec<VolumeGroup>,
    pub error: Option<ViewError>,
}

impl ChapterListView {
    pub fn new(chapters: &[ChapterInfo], requested: Option<&str>, preferred: &str) -> Self {
        let languages = aggregation::languages(chapters);
        let language = match requested {
            Some(lang) => Some(lang.to_string()),
            None => aggregation::default_language(&languages, preferred),
        };
        let volumes = match &language {
            Some(lang) => aggregation::aggregate(chapters, lang),
            None => vec![],
        };

        Self {
            languages,
            language,
            volumes,
            error: None,
        }
    }

    pub fn chapter_count(&self) -> usize {
        self.volumes.iter().map(|v| v.chapters.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub card: MangaCard,
    pub full_cover_url: Option<String>,
    pub author: String,
    pub artist: Option<String>,
    pub description: String,
    pub tags: Vec<Tag>,
    pub last_read: Option<HistoryEntry>,
    pub chapters: ChapterListView,
}

impl<C, A, S> App<C, A, S>
where
    C: CatalogueRepository,
    A: AuthRepository,
    S: StateRepository + Clone,
{
    pub async fn detail(&self, manga_id: &str, lang: Option<&str>) -> Result<DetailView, ViewError> {
        let manga = match self.catalogue.manga_detail(manga_id).await {
            Ok(manga) => manga,
            Err(CatalogueError::RepositoryError(CatalogueRepositoryError::Status(404))) => {
                error!("manga {manga_id} does not exist");
                return Err(ViewError::NotFound);
            }
            Err(e) => {
                error!("failed to load manga {manga_id}: {e}");
                return Err(ViewError::Load("manga"));
            }
        };

        let chapters = match self.catalogue.chapters(manga_id).await {
            Ok(chapters) => ChapterListView::new(&chapters, lang, &self.preferred_language),
            Err(e) => {
                error!("failed to load chapters of {manga_id}: {e}");
                ChapterListView {
                    error: Some(ViewError::Load("chapters")),
                    ..Default::default()
                }
            }
        };

        let is_favorite = self.favorite_ids().await.contains(manga_id);
        let last_read = self
            .history
            .get_manga_history(manga_id)
            .await
            .unwrap_or_else(|e| {
                error!("failed to read history: {e}");
                None
            });

        Ok(DetailView {
            card: MangaCard::new(&manga, &self.uploads_url, self.placeholder_url(), is_favorite),
            full_cover_url: manga.full_cover_url(&self.uploads_url),
            author: manga.author().to_string(),
            artist: manga.artist().map(str::to_string),
            description: manga.description().to_string(),
            tags: manga.attributes.tags.clone(),
            last_read,
            chapters,
        })
    }
}

fn write_chapter(
    f: &mut fmt::Formatter<'_>,
    chapter: &ChapterInfo,
    last_read: Option<&str>,
) -> fmt::Result {
    let mark = if last_read == Some(chapter.id.as_str()) {
        '>'
    } else {
        ' '
    };
    write!(
        f,
        "  {mark} {}  [{}]  {}",
        chapter.display_title(),
        chapter.scanlation_group(),
        chapter.id
    )?;
    if let Some(url) = &chapter.attributes.external_url {
        write!(f, "  external: {url}")?;
    }
    writeln!(f)
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}{}",
            self.card.title,
            if self.card.is_favorite { " ♥" } else { "" }
        )?;
        writeln!(f, "Status: {}", self.card.status)?;
        write!(f, "Author: {}", self.author)?;
        match &self.artist {
            Some(artist) if *artist != self.author => writeln!(f, ", Artist: {artist}")?,
            _ => writeln!(f)?,
        }
        writeln!(f, "Cover: {}", self.card.cover_url)?;
        if let Some(full_cover_url) = &self.full_cover_url {
            writeln!(f, "Full cover: {full_cover_url}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;

        if !self.tags.is_empty() {
            writeln!(f)?;
            let tags = self
                .tags
                .iter()
                .map(|t| format!("{} ({})", t.name(), t.id))
                .collect::<Vec<_>>();
            writeln!(f, "Tags: {}", tags.join(", "))?;
        }

        if let Some(entry) = &self.last_read {
            writeln!(
                f,
                "Last read: Chapter {}  {}",
                entry.chapter_number.as_deref().unwrap_or("?"),
                entry.chapter_id
            )?;
        }

        writeln!(f)?;
        let last_read = self.last_read.as_ref().map(|e| e.chapter_id.as_str());
        write!(f, "{}", ChapterListDisplay(&self.chapters, last_read))
    }
}

struct ChapterListDisplay<'a>(&'a ChapterListView, Option<&'a str>);

impl fmt::Display for ChapterListDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ChapterListDisplay(list, last_read) = self;

        writeln!(f, "Chapters")?;
        if let Some(error) = &list.error {
            return writeln!(f, "  {error}");
        }
        if !list.languages.is_empty() {
            let languages = list
                .languages
                .iter()
                .map(|l| {
                    if list.language.as_ref() == Some(l) {
                        format!("[{l}]")
                    } else {
                        l.clone()
                    }
                })
                .collect::<Vec<_>>();
            writeln!(f, "Languages: {}", languages.join(" "))?;
        }
        if list.volumes.is_empty() {
            return writeln!(f, "  No chapters");
        }
        for group in &list.volumes {
            writeln!(f, "{}", group.volume)?;
            for chapter in &group.chapters {
                write_chapter(f, chapter, *last_read)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ChapterListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ChapterListDisplay(self, None))
    }
}
