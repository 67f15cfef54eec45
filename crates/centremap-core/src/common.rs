// crates/centremap-core/src/common.rs

use serde::{Deserialize, Serialize};

/// Row counts for the three materialized tables.
///
/// Returned by [`crate::search::CentreSearch::stats`]. Rows dropped during
/// the load (missing coordinates, empty names) are not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub centres: usize,
    pub sub_sites: usize,
    pub notifications: usize,
}
