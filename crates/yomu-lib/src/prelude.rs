pub use crate::aggregation::{Neighbours, Volume, VolumeGroup};
pub use crate::error::Error;
pub use crate::models::*;
pub use crate::query::Query;
