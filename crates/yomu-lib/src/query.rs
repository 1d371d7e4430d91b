//! Query strings in the catalogue's bracketed encoding
//!
//! Arrays are sent as repeated `key[]=value` pairs and nested objects as
//! `key[field]=value` pairs, e.g. `includes[]=cover_art&order[chapter]=desc`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    Array(Vec<String>),
    Object(Vec<(String, String)>),
}

/// Ordered set of parameters, one value per key
///
/// Setting a key that is already present replaces its value in place, which is
/// what lets caller parameters override a set of defaults through
/// [`Query::merge`]. Array keys are stored without their trailing `[]`, every
/// other key is stored as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, Value)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(mut self, key: &str, value: Value) -> Self {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.params.push((key.to_string(), value)),
        }
        self
    }

    pub fn scalar<V: ToString>(self, key: &str, value: V) -> Self {
        self.set(key, Value::Scalar(value.to_string()))
    }

    /// Scalar that is skipped entirely when absent
    pub fn optional<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.scalar(key, value),
            None => self,
        }
    }

    /// `key` may be given with or without its trailing `[]`
    pub fn array<I, V>(self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        self.set(
            key.strip_suffix("[]").unwrap_or(key),
            Value::Array(values.into_iter().map(|v| v.to_string()).collect()),
        )
    }

    pub fn object<I, K, V>(self, key: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToString,
        V: ToString,
    {
        self.set(
            key,
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        )
    }

    /// Matches `key` as given, or an array stored under `key` without `[]`
    fn find(&self, key: &str) -> Option<&Value> {
        let bare = key.strip_suffix("[]");
        self.params
            .iter()
            .find(|(k, v)| {
                k == key || (matches!(v, Value::Array(_)) && bare == Some(k.as_str()))
            })
            .map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.find(key)
    }

    /// Parameters of `other` win over parameters of `self` with the same key
    pub fn merge(self, other: Query) -> Self {
        other
            .params
            .into_iter()
            .fold(self, |query, (key, value)| query.set(&key, value))
    }

    /// Flattened `(name, value)` pairs, ready to be url-encoded
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![];
        for (key, value) in &self.params {
            match value {
                Value::Scalar(value) => pairs.push((key.clone(), value.clone())),
                Value::Array(values) => {
                    for value in values {
                        pairs.push((format!("{key}[]"), value.clone()));
                    }
                }
                Value::Object(entries) => {
                    for (field, value) in entries {
                        pairs.push((format!("{key}[{field}]"), value.clone()));
                    }
                }
            }
        }
        pairs
    }
}

/// Unencoded form, used in logs
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self.to_pairs();
        for (i, (key, value)) in pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn pairs(p: &[(&str, &str)]) -> Vec<(String, String)> {
        p.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_bracketed_encoding() {
        let query = Query::new()
            .scalar("limit", 96)
            .array("includes[]", ["scanlation_group", "user"])
            .array("translatedLanguage", ["en"])
            .object("order", [("volume", "desc"), ("chapter", "desc")])
            .optional::<&str>("title", None);

        assert_eq!(
            query.to_pairs(),
            pairs(&[
                ("limit", "96"),
                ("includes[]", "scanlation_group"),
                ("includes[]", "user"),
                ("translatedLanguage[]", "en"),
                ("order[volume]", "desc"),
                ("order[chapter]", "desc"),
            ])
        );
        assert_eq!(
            query.to_string(),
            "limit=96&includes[]=scanlation_group&includes[]=user&translatedLanguage[]=en&order[volume]=desc&order[chapter]=desc"
        );
    }

    #[test]
    fn test_merge_overrides_defaults_in_place() {
        let defaults = Query::new()
            .scalar("limit", 15)
            .scalar("offset", 0)
            .array("includes[]", ["cover_art", "author", "artist"]);
        let query = defaults.merge(
            Query::new()
                .scalar("limit", 24)
                .array("includes", ["cover_art"])
                .scalar("title", "berserk"),
        );

        assert_eq!(
            query.to_pairs(),
            pairs(&[
                ("limit", "24"),
                ("offset", "0"),
                ("includes[]", "cover_art"),
                ("title", "berserk"),
            ])
        );
    }

    #[test]
    fn test_contains_ignores_brackets() {
        let query = Query::new().array("contentRating[]", ["safe"]);

        assert!(query.contains("contentRating"));
        assert!(query.contains("contentRating[]"));
        assert!(!query.contains("order"));
        assert_eq!(
            query.get("contentRating"),
            Some(&Value::Array(vec!["safe".to_string()]))
        );
    }

    #[test]
    fn test_scalar_key_keeps_brackets() {
        let query = Query::new().scalar("ids[]", "a").array("ids", ["b"]);

        assert_eq!(query.to_string(), "ids[]=a&ids[]=b");
        assert_eq!(query.get("ids[]"), Some(&Value::Scalar("a".to_string())));
        assert_eq!(
            query.get("ids"),
            Some(&Value::Array(vec!["b".to_string()]))
        );
    }

    #[test]
    fn test_empty_array_emits_nothing() {
        let query = Query::new().array("translatedLanguage", Vec::<String>::new());

        assert!(query.to_pairs().is_empty());
    }
}
