use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("page {0} is out of range, chapter has {1} pages")]
    PageOutOfRange(usize, usize),
    #[error("chapter {0} is not part of the chapter list")]
    ChapterNotListed(String),
    #[error("chapter {0} is hosted externally at {1}")]
    ExternalChapter(String, String),
}
