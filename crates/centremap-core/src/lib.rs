// crates/centremap-core/src/lib.rs

pub mod common;
pub mod enrich;
pub mod error;
pub mod geo;
pub mod loader;
pub mod model;
pub mod polygon;
pub mod search;
pub mod text;
pub mod tooltip;
pub mod traits;
// Raw input records as they come off the source files.
#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::common::DbStats;
pub use crate::error::{CentreError, Result};
pub use crate::model::{
    build_centre_db, Centre, CentreDb, DefaultBackend, DefaultCentreDb, GreenBoutique,
    Notification, StandardBackend, SubSite, SubSiteRef,
};
pub use crate::enrich::{NotificationInfo, SubSiteInfo, DEFAULT_OPERATOR, N_A};
pub use crate::geo::{haversine_m, DistanceMeasure};
pub use crate::polygon::{decode_polygon, LonLat};
pub use crate::search::{CentreSearch, FilterMode};
pub use crate::text::{equals_folded, fold_key};
pub use crate::tooltip::{MapView, Marker, MarkerKind};
pub use crate::traits::{MapBackend, NameMatch};

pub mod prelude {
    pub use crate::common::DbStats;
    pub use crate::enrich::{NotificationInfo, SubSiteInfo};
    pub use crate::error::{CentreError, Result};
    pub use crate::geo::{haversine_m, DistanceMeasure};
    pub use crate::model::{
        Centre, CentreDb, DefaultBackend, DefaultCentreDb, StandardBackend,
    };
    pub use crate::polygon::{decode_polygon, LonLat};
    pub use crate::search::{CentreSearch, FilterMode};
    pub use crate::tooltip::{MapView, Marker, MarkerKind};
    pub use crate::traits::{MapBackend, NameMatch};
}
