use std::{collections::HashSet, fmt};

use yomu_lib::prelude::MangaInfo;

/// Page numbers shown at once by the pager
const PAGER_WINDOW: i64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct MangaCard {
    pub id: String,
    pub title: String,
    pub cover_url: String,
    pub status: String,
    pub year: Option<i64>,
    pub is_favorite: bool,
}

impl MangaCard {
    pub fn new(manga: &MangaInfo, uploads_url: &str, placeholder_url: &str, is_favorite: bool) -> Self {
        Self {
            id: manga.id.clone(),
            title: manga.title().to_string(),
            cover_url: manga
                .cover_url(uploads_url)
                .unwrap_or_else(|| placeholder_url.to_string()),
            status: manga.status().to_string(),
            year: manga.attributes.year,
            is_favorite,
        }
    }

    pub fn list(
        manga: &[MangaInfo],
        uploads_url: &str,
        placeholder_url: &str,
        favorites: &HashSet<String>,
    ) -> Vec<Self> {
        manga
            .iter()
            .map(|m| Self::new(m, uploads_url, placeholder_url, favorites.contains(&m.id)))
            .collect()
    }
}

impl fmt::Display for MangaCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_favorite { '♥' } else { ' ' };
        write!(f, "{mark} {}  [{}", self.title, self.status)?;
        if let Some(year) = self.year {
            write!(f, ", {year}")?;
        }
        write!(f, "]  {}", self.id)
    }
}

/// Writes one card per line, or `empty` when there is none
pub fn write_cards(f: &mut fmt::Formatter<'_>, cards: &[MangaCard], empty: &str) -> fmt::Result {
    if cards.is_empty() {
        return writeln!(f, "  {empty}");
    }
    for card in cards {
        writeln!(f, "  {card}")?;
    }
    Ok(())
}

/// Navigation for a paginated gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    pub current: i64,
    pub pages: i64,
    /// Page numbers around `current`, at most five
    pub window: Vec<i64>,
    pub prev: Option<i64>,
    pub next: Option<i64>,
}

impl Pager {
    /// `None` when there is at most one page
    pub fn new(current: i64, pages: i64) -> Option<Self> {
        if pages <= 1 {
            return None;
        }

        let start = if current <= 3 { 1 } else { current - 2 };
        let window = (0..PAGER_WINDOW.min(pages))
            .map(|i| start + i)
            .filter(|page| *page <= pages)
            .collect();

        Some(Self {
            current,
            pages,
            window,
            prev: (current > 1).then(|| current - 1),
            next: (current < pages).then(|| current + 1),
        })
    }
}

impl fmt::Display for Pager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.prev.is_some() { "«" } else { " " })?;
        for page in &self.window {
            if *page == self.current {
                write!(f, " [{page}]")?;
            } else {
                write!(f, " {page}")?;
            }
        }
        write!(f, " {}", if self.next.is_some() { "»" } else { " " })?;
        write!(f, "  page {} of {}", self.current, self.pages)
    }
}
