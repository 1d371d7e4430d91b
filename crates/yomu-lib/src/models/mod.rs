pub mod localized;
pub use localized::*;

pub mod relationship;
pub use relationship::*;

pub mod tag;
pub use tag::*;

pub mod manga_info;
pub use manga_info::*;

pub mod chapter_info;
pub use chapter_info::*;

pub mod page_server;
pub use page_server::*;

pub mod collection;
pub use collection::*;
