use serde::{Deserialize, Serialize};

use super::LocalizedString;

pub const GENRE_GROUP: &str = "genre";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Tag {
    pub id: String,
    #[serde(default)]
    pub attributes: TagAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TagAttributes {
    pub name: LocalizedString,
    pub group: String,
}

impl Tag {
    pub fn name(&self) -> &str {
        self.attributes.name.preferred().unwrap_or(&self.id)
    }

    pub fn is_genre(&self) -> bool {
        self.attributes.group == GENRE_GROUP
    }
}
