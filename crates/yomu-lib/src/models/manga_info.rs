use serde::{Deserialize, Serialize};

use super::{LocalizedString, Relationship, Tag, relationship};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const NO_DESCRIPTION: &str = "No description available.";

/// A manga record as the catalogue returns it
///
/// Records are never modified locally. A favorite is a verbatim copy of one of
/// these, so the serialized form is the catalogue's own shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MangaInfo {
    pub id: String,
    #[serde(default)]
    pub attributes: MangaAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MangaAttributes {
    pub title: LocalizedString,
    pub description: LocalizedString,
    pub status: Option<String>,
    pub year: Option<i64>,
    pub content_rating: Option<String>,
    pub original_language: Option<String>,
    pub tags: Vec<Tag>,
}

impl MangaInfo {
    pub fn title(&self) -> &str {
        self.attributes.title.preferred().unwrap_or(UNKNOWN_TITLE)
    }

    pub fn description(&self) -> &str {
        self.attributes.description.get("en").unwrap_or(NO_DESCRIPTION)
    }

    pub fn status(&self) -> &str {
        self.attributes.status.as_deref().unwrap_or("unknown")
    }

    pub fn author(&self) -> &str {
        relationship::find_attributes(&self.relationships, relationship::AUTHOR)
            .and_then(|a| a.name.as_deref())
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    pub fn artist(&self) -> Option<&str> {
        relationship::find_attributes(&self.relationships, relationship::ARTIST)
            .and_then(|a| a.name.as_deref())
    }

    fn cover_file_name(&self) -> Option<&str> {
        relationship::find_attributes(&self.relationships, relationship::COVER_ART)
            .and_then(|a| a.file_name.as_deref())
    }

    /// 256px thumbnail of the cover, `None` when the record carries no cover art
    pub fn cover_url(&self, uploads_url: &str) -> Option<String> {
        self.cover_file_name()
            .map(|file_name| format!("{uploads_url}/covers/{}/{file_name}.256.jpg", self.id))
    }

    pub fn full_cover_url(&self, uploads_url: &str) -> Option<String> {
        self.cover_file_name()
            .map(|file_name| format!("{uploads_url}/covers/{}/{file_name}", self.id))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const MANGA: &str = r#"{
        "id": "32d76d19-8a05-4db0-9fc2-e0b0648fe9d0",
        "type": "manga",
        "attributes": {
            "title": {"en": "Solo Leveling"},
            "altTitles": [{"ko": "나 혼자만 레벨업"}],
            "description": {"en": "10 years ago, after the Gate..."},
            "status": "completed",
            "year": 2018,
            "contentRating": "safe",
            "tags": [
                {"id": "391b0423-d847-456f-aff0-8b0cfc03066b", "type": "tag",
                 "attributes": {"name": {"en": "Action"}, "group": "genre"}}
            ]
        },
        "relationships": [
            {"id": "a1", "type": "author", "attributes": {"name": "Chugong"}},
            {"id": "a2", "type": "artist", "attributes": {"name": "DUBU"}},
            {"id": "c1", "type": "cover_art", "attributes": {"fileName": "cover.jpg"}}
        ]
    }"#;

    #[test]
    fn test_manga_accessors() {
        let manga: MangaInfo = serde_json::from_str(MANGA).unwrap();

        assert_eq!(manga.title(), "Solo Leveling");
        assert_eq!(manga.author(), "Chugong");
        assert_eq!(manga.artist(), Some("DUBU"));
        assert_eq!(manga.status(), "completed");
        assert_eq!(manga.attributes.tags[0].name(), "Action");
        assert!(manga.attributes.tags[0].is_genre());
        assert_eq!(
            manga.cover_url("https://uploads.mangadex.org").as_deref(),
            Some("https://uploads.mangadex.org/covers/32d76d19-8a05-4db0-9fc2-e0b0648fe9d0/cover.jpg.256.jpg")
        );
    }

    #[test]
    fn test_full_cover_url() {
        let manga: MangaInfo = serde_json::from_str(MANGA).unwrap();

        assert_eq!(
            manga.full_cover_url("https://uploads.mangadex.org").as_deref(),
            Some("https://uploads.mangadex.org/covers/32d76d19-8a05-4db0-9fc2-e0b0648fe9d0/cover.jpg")
        );
        assert_eq!(
            MangaInfo::default().full_cover_url("https://uploads.mangadex.org"),
            None
        );
    }

    #[test]
    fn test_manga_fallbacks() {
        let manga: MangaInfo = serde_json::from_str(
            r#"{"id": "x", "attributes": {"title": {}, "description": []}, "relationships": [
                {"id": "c1", "type": "cover_art"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(manga.title(), UNKNOWN_TITLE);
        assert_eq!(manga.description(), NO_DESCRIPTION);
        assert_eq!(manga.author(), UNKNOWN_AUTHOR);
        assert_eq!(manga.cover_url("https://uploads.mangadex.org"), None);
    }

    #[test]
    fn test_favorite_copy_keeps_shape() {
        let manga: MangaInfo = serde_json::from_str(MANGA).unwrap();
        let stored = serde_json::to_string(&manga).unwrap();
        let restored: MangaInfo = serde_json::from_str(&stored).unwrap();

        assert_eq!(manga, restored);
    }
}
