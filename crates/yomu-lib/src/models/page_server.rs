use serde::{Deserialize, Serialize};

/// Page-server assignment for one chapter
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageServer {
    pub base_url: String,
    pub chapter: PageServerChapter,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageServerChapter {
    pub hash: String,
    pub data: Vec<String>,
    pub data_saver: Vec<String>,
}

impl PageServer {
    /// Image urls in reading order
    ///
    /// The data-saver set is lower resolution and is what the reader asks for
    /// unless configured otherwise.
    pub fn page_urls(&self, data_saver: bool) -> Vec<String> {
        let (quality, files) = if data_saver {
            ("data-saver", &self.chapter.data_saver)
        } else {
            ("data", &self.chapter.data)
        };

        files
            .iter()
            .map(|file| format!("{}/{quality}/{}/{file}", self.base_url, self.chapter.hash))
            .collect()
    }
}
