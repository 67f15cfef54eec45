// src/lib.rs

//! centremap — workspace facade crate.
//!
//! Re-exports `centremap-core` so the demos under `demos/` can depend on a
//! single crate. For real integrations depend on `centremap-core` directly.

pub use centremap_core::*;

pub mod prelude {
    pub use centremap_core::prelude::*;
}
