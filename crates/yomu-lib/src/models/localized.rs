use std::{collections::BTreeMap, fmt};

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, MapAccess, SeqAccess, Visitor},
};

/// Text keyed by language code, e.g. `{"en": "...", "ja-ro": "..."}`
///
/// The catalogue sends an empty JSON array instead of an empty object when a
/// record has no text at all, so deserialization accepts both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocalizedString(BTreeMap<String, String>);

impl LocalizedString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, lang: &str, text: &str) -> Self {
        self.0.insert(lang.to_string(), text.to_string());
        self
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    /// `en`, then `ja-ro`, then whatever language sorts first
    pub fn preferred(&self) -> Option<&str> {
        self.get("en")
            .or_else(|| self.get("ja-ro"))
            .or_else(|| self.0.values().next().map(String::as_str))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for LocalizedString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapOrEmptySeq;

        impl<'de> Visitor<'de> for MapOrEmptySeq {
            type Value = LocalizedString;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("map of language code to text, or an empty array")
            }

            fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let map: BTreeMap<String, String> =
                    Deserialize::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(LocalizedString(map))
            }

            fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
            where
                S: SeqAccess<'de>,
            {
                // drain whatever is there, the texts are not addressable by language
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}
                Ok(LocalizedString::default())
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(LocalizedString::default())
            }
        }

        deserializer.deserialize_any(MapOrEmptySeq)
    }
}
