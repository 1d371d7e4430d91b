//! Chapter list shaping: language filter, per-number dedup, volume grouping and
//! reader navigation.
//!
//! Navigation is derived from the ordering produced here, so changing how
//! chapters are sorted or grouped changes what "next" and "previous" mean in
//! the reader.

use std::{cmp::Ordering, collections::HashSet, fmt};

use crate::models::{ChapterInfo, parse_label};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Volume {
    Labeled(String),
    /// Chapters without a volume, always listed last
    Unlabeled,
}

impl Volume {
    fn of(chapter: &ChapterInfo) -> Self {
        match chapter.volume() {
            Some(label) => Volume::Labeled(label.to_string()),
            None => Volume::Unlabeled,
        }
    }

    pub fn number(&self) -> f64 {
        match self {
            Volume::Labeled(label) => parse_label(Some(label)),
            Volume::Unlabeled => f64::NAN,
        }
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Volume::Labeled(label) => write!(f, "Volume {label}"),
            Volume::Unlabeled => f.write_str("No Volume"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeGroup {
    pub volume: Volume,
    pub chapters: Vec<ChapterInfo>,
}

/// Descending by value; non-numeric labels go after every numeric one and
/// compare equal among themselves, so a stable sort keeps their input order.
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
}

fn volume_order(a: &Volume, b: &Volume) -> Ordering {
    match (a, b) {
        (Volume::Unlabeled, Volume::Unlabeled) => Ordering::Equal,
        (Volume::Unlabeled, _) => Ordering::Greater,
        (_, Volume::Unlabeled) => Ordering::Less,
        _ => descending(a.number(), b.number()),
    }
}

/// Distinct language codes, sorted
pub fn languages(chapters: &[ChapterInfo]) -> Vec<String> {
    let mut languages = chapters
        .iter()
        .map(|c| c.language().to_string())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();
    languages.sort();
    languages
}

/// `preferred` when the manga has it, otherwise the first available language
pub fn default_language(languages: &[String], preferred: &str) -> Option<String> {
    if languages.iter().any(|l| l == preferred) {
        Some(preferred.to_string())
    } else {
        languages.first().cloned()
    }
}

pub fn filter_language(chapters: &[ChapterInfo], lang: &str) -> Vec<ChapterInfo> {
    chapters
        .iter()
        .filter(|c| c.language() == lang)
        .cloned()
        .collect()
}

/// Keeps the first chapter seen for each chapter number
///
/// Several scanlation groups often release the same chapter; later releases
/// are dropped without further comparison.
pub fn dedup_by_number(chapters: Vec<ChapterInfo>) -> Vec<ChapterInfo> {
    let mut seen = HashSet::new();
    chapters
        .into_iter()
        .filter(|c| seen.insert(c.attributes.chapter.clone()))
        .collect()
}

/// Groups by volume; volumes descending with the unlabeled bucket last,
/// chapters descending inside each volume.
pub fn group_by_volume(chapters: Vec<ChapterInfo>) -> Vec<VolumeGroup> {
    let mut groups: Vec<VolumeGroup> = vec![];
    for chapter in chapters {
        let volume = Volume::of(&chapter);
        match groups.iter_mut().find(|g| g.volume == volume) {
            Some(group) => group.chapters.push(chapter),
            None => groups.push(VolumeGroup {
                volume,
                chapters: vec![chapter],
            }),
        }
    }

    for group in groups.iter_mut() {
        group
            .chapters
            .sort_by(|a, b| descending(a.number(), b.number()));
    }
    groups.sort_by(|a, b| volume_order(&a.volume, &b.volume));

    groups
}

/// Filter to one language, dedup, then group
pub fn aggregate(chapters: &[ChapterInfo], lang: &str) -> Vec<VolumeGroup> {
    group_by_volume(dedup_by_number(filter_language(chapters, lang)))
}

/// Reading sequence of grouped chapters
pub fn flatten(groups: &[VolumeGroup]) -> Vec<ChapterInfo> {
    groups
        .iter()
        .flat_map(|g| g.chapters.iter().cloned())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Neighbours<'a> {
    pub prev: Option<&'a ChapterInfo>,
    pub next: Option<&'a ChapterInfo>,
}

/// Chapters before and after `chapter_id` in `sequence`
///
/// `next` is the following entry of the descending list, so from the newest
/// chapter "next" steps towards older chapters.
pub fn neighbours<'a>(sequence: &'a [ChapterInfo], chapter_id: &str) -> Neighbours<'a> {
    match sequence.iter().position(|c| c.id == chapter_id) {
        Some(index) => Neighbours {
            prev: index.checked_sub(1).and_then(|i| sequence.get(i)),
            next: sequence.get(index + 1),
        },
        None => Neighbours::default(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::ChapterAttributes;

    fn chapter(id: &str, lang: &str, volume: Option<&str>, number: Option<&str>) -> ChapterInfo {
        ChapterInfo {
            id: id.to_string(),
            attributes: ChapterAttributes {
                volume: volume.map(str::to_string),
                chapter: number.map(str::to_string),
                translated_language: lang.to_string(),
                ..Default::default()
            },
            relationships: vec![],
        }
    }

    fn ids(chapters: &[ChapterInfo]) -> Vec<&str> {
        chapters.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_languages_sorted_and_distinct() {
        let chapters = vec![
            chapter("1", "id", None, Some("1")),
            chapter("2", "en", None, Some("1")),
            chapter("3", "id", None, Some("2")),
            chapter("4", "es-la", None, Some("1")),
        ];

        assert_eq!(languages(&chapters), vec!["en", "es-la", "id"]);
    }

    #[test]
    fn test_default_language() {
        let langs = vec!["es-la".to_string(), "id".to_string()];

        assert_eq!(default_language(&langs, "en"), Some("es-la".to_string()));
        assert_eq!(default_language(&langs, "id"), Some("id".to_string()));
        assert_eq!(default_language(&[], "en"), None);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let chapters = vec![
            chapter("a", "en", Some("1"), Some("1")),
            chapter("b", "en", Some("1"), Some("2")),
            chapter("c", "en", Some("1"), Some("1")),
            chapter("d", "id", Some("1"), Some("1")),
            chapter("e", "en", Some("1"), Some("2")),
        ];

        let groups = aggregate(&chapters, "en");
        let sequence = flatten(&groups);

        assert_eq!(ids(&sequence), vec!["b", "a"]);
    }

    #[test]
    fn test_unnumbered_chapters_share_one_key() {
        let chapters = vec![
            chapter("a", "en", None, None),
            chapter("b", "en", None, None),
            chapter("c", "en", None, Some("1")),
        ];

        assert_eq!(ids(&dedup_by_number(chapters)), vec!["a", "c"]);
    }

    #[test]
    fn test_group_by_volume_descending() {
        let chapters = vec![
            chapter("c10", "en", Some("2"), Some("10")),
            chapter("c9", "en", Some("2"), Some("9")),
            chapter("c5", "en", Some("1"), Some("5")),
        ];

        let groups = group_by_volume(chapters);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].volume, Volume::Labeled("2".to_string()));
        assert_eq!(ids(&groups[0].chapters), vec!["c10", "c9"]);
        assert_eq!(groups[1].volume, Volume::Labeled("1".to_string()));
        assert_eq!(ids(&groups[1].chapters), vec!["c5"]);
        assert_eq!(groups[0].volume.to_string(), "Volume 2");
    }

    #[test]
    fn test_unlabeled_volume_always_last() {
        let chapters = vec![
            chapter("u1", "en", None, Some("100")),
            chapter("v1", "en", Some("1"), Some("1")),
            chapter("u2", "en", Some(""), Some("101")),
            chapter("v99", "en", Some("99"), Some("50")),
            chapter("vs", "en", Some("Special"), Some("0.5")),
        ];

        let groups = group_by_volume(chapters);
        let volumes = groups.iter().map(|g| g.volume.clone()).collect::<Vec<_>>();

        assert_eq!(
            volumes,
            vec![
                Volume::Labeled("99".to_string()),
                Volume::Labeled("1".to_string()),
                Volume::Labeled("Special".to_string()),
                Volume::Unlabeled,
            ]
        );
        assert_eq!(ids(&groups[3].chapters), vec!["u2", "u1"]);
        assert_eq!(groups[3].volume.to_string(), "No Volume");
    }

    #[test]
    fn test_non_numeric_chapters_after_numeric_in_input_order() {
        let chapters = vec![
            chapter("extra", "en", Some("1"), Some("Extra")),
            chapter("c1", "en", Some("1"), Some("1")),
            chapter("omake", "en", Some("1"), Some("Omake")),
            chapter("c2", "en", Some("1"), Some("2")),
        ];

        let groups = group_by_volume(chapters);

        assert_eq!(ids(&groups[0].chapters), vec!["c2", "c1", "extra", "omake"]);
    }

    #[test]
    fn test_neighbours() {
        let chapters = vec![
            chapter("c10", "en", Some("2"), Some("10")),
            chapter("c9", "en", Some("2"), Some("9")),
            chapter("c5", "en", Some("1"), Some("5")),
        ];
        let sequence = flatten(&group_by_volume(chapters));

        let first = neighbours(&sequence, "c10");
        assert_eq!(first.prev, None);
        assert_eq!(first.next.map(|c| c.id.as_str()), Some("c9"));

        let middle = neighbours(&sequence, "c9");
        assert_eq!(middle.prev.map(|c| c.id.as_str()), Some("c10"));
        assert_eq!(middle.next.map(|c| c.id.as_str()), Some("c5"));

        let last = neighbours(&sequence, "c5");
        assert_eq!(last.prev.map(|c| c.id.as_str()), Some("c9"));
        assert_eq!(last.next, None);

        assert_eq!(neighbours(&sequence, "missing"), Neighbours::default());
    }
}
