use serde::{Deserialize, Serialize};

/// One page of a catalogue listing
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Collection<T> {
    pub data: Vec<T>,
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            data: vec![],
            limit: 0,
            offset: 0,
            total: 0,
        }
    }
}

impl<T> Collection<T> {
    /// Number of pages of `limit` items needed to show `total` items
    pub fn page_count(&self) -> i64 {
        if self.limit <= 0 {
            return 0;
        }
        (self.total + self.limit - 1) / self.limit
    }

    /// 1-based page number of this listing
    pub fn page(&self) -> i64 {
        if self.limit <= 0 {
            return 1;
        }
        self.offset / self.limit + 1
    }

    pub fn has_more(&self) -> bool {
        self.offset + (self.data.len() as i64) < self.total
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_page_count() {
        let collection = Collection::<()> {
            data: vec![],
            limit: 12,
            offset: 24,
            total: 25,
        };

        assert_eq!(collection.page_count(), 3);
        assert_eq!(collection.page(), 3);

        let empty = Collection::<()>::default();
        assert_eq!(empty.page_count(), 0);
        assert_eq!(empty.page(), 1);
    }

    #[test]
    fn test_has_more() {
        let collection = Collection {
            data: vec![1, 2],
            limit: 2,
            offset: 0,
            total: 3,
        };
        assert!(collection.has_more());

        let collection = Collection {
            data: vec![3],
            limit: 2,
            offset: 2,
            total: 3,
        };
        assert!(!collection.has_more());
    }
}
