use serde::{Deserialize, Serialize};

use super::{Relationship, relationship};

pub const NO_GROUP: &str = "No Group";

/// A chapter record as the catalogue returns it
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ChapterInfo {
    pub id: String,
    #[serde(default)]
    pub attributes: ChapterAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChapterAttributes {
    pub volume: Option<String>,
    pub chapter: Option<String>,
    pub title: Option<String>,
    pub translated_language: String,
    pub external_url: Option<String>,
    pub publish_at: Option<String>,
    pub pages: Option<i64>,
}

impl ChapterInfo {
    /// Chapter label parsed as a number, NaN when missing or not numeric
    pub fn number(&self) -> f64 {
        parse_label(self.attributes.chapter.as_deref())
    }

    /// Volume label, `None` when the chapter is not assigned to a volume
    pub fn volume(&self) -> Option<&str> {
        self.attributes
            .volume
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    pub fn language(&self) -> &str {
        &self.attributes.translated_language
    }

    /// `Chapter 12 - Title`, `Chapter ?` when the chapter is unnumbered
    pub fn display_title(&self) -> String {
        let number = self.attributes.chapter.as_deref().unwrap_or("?");
        match self.attributes.title.as_deref().filter(|t| !t.is_empty()) {
            Some(title) => format!("Chapter {number} - {title}"),
            None => format!("Chapter {number}"),
        }
    }

    pub fn scanlation_group(&self) -> &str {
        relationship::find_attributes(&self.relationships, relationship::SCANLATION_GROUP)
            .and_then(|a| a.name.as_deref())
            .unwrap_or(NO_GROUP)
    }

    pub fn manga_id(&self) -> Option<&str> {
        relationship::find(&self.relationships, relationship::MANGA).map(|r| r.id.as_str())
    }

    /// Chapters hosted by a third party are linked to, never read in place
    pub fn is_external(&self) -> bool {
        self.attributes.external_url.is_some()
    }
}

/// Catalogue labels are loosely typed strings, `"10"`, `"10.5"`, `"Oneshot"`
pub fn parse_label(label: Option<&str>) -> f64 {
    label
        .and_then(|l| l.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(f64::NAN)
}
