use serde::{Deserialize, Serialize};

use super::LocalizedString;

pub const COVER_ART: &str = "cover_art";
pub const AUTHOR: &str = "author";
pub const ARTIST: &str = "artist";
pub const SCANLATION_GROUP: &str = "scanlation_group";
pub const USER: &str = "user";
pub const MANGA: &str = "manga";

/// A link from one catalogue record to another
///
/// `attributes` is only present when the request asked for the related type
/// through `includes[]`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Relationship {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<RelationshipAttributes>,
}

/// Union of the attributes used from expanded relationships
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelationshipAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "LocalizedString::is_empty")]
    pub title: LocalizedString,
}

pub(crate) fn find<'a>(relationships: &'a [Relationship], kind: &str) -> Option<&'a Relationship> {
    relationships.iter().find(|r| r.kind == kind)
}

pub(crate) fn find_attributes<'a>(
    relationships: &'a [Relationship],
    kind: &str,
) -> Option<&'a RelationshipAttributes> {
    find(relationships, kind).and_then(|r| r.attributes.as_ref())
}
