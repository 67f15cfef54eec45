// crates/centremap-core/src/traits.rs

use crate::text::fold_key;
use serde::{Deserialize, Serialize};

/// Picks the concrete string and float types the catalog holds in memory.
///
/// Accessors always hand out `&str`/`f64` views, so a backend with more
/// compact types can be swapped in without touching callers. The serde
/// bounds are there because a loaded catalog is cached to disk with bincode.
pub trait MapBackend: Clone + Send + Sync + 'static {
    type Str: Clone
        + Send
        + Sync
        + std::fmt::Debug
        + Serialize
        + for<'de> Deserialize<'de>
        + AsRef<str>;
    type Float: Copy + Send + Sync + std::fmt::Debug + Serialize + for<'de> Deserialize<'de>;

    fn str_from(s: &str) -> Self::Str;
    fn float_from(f: f64) -> Self::Float;
    fn str_to_string(v: &Self::Str) -> String {
        v.as_ref().to_string()
    }
    fn float_to_f64(v: Self::Float) -> f64;
}

/// Folded-name matching for types with a canonical display name.
///
/// All comparisons go through [`fold_key`], so they ignore accents and case.
/// Implementors supply [`NameMatch::name_str`] and get equality
/// ([`NameMatch::is_named`]) and substring ([`NameMatch::name_contains`])
/// matching for free.
///
/// # Examples
/// ```rust
/// use centremap_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Évry 2").is_named("evry 2"));
/// assert!(Place("Créteil Soleil").name_contains("creteil"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Accent-insensitive and case-insensitive name comparison.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        fold_key(self.name_str()) == fold_key(q)
    }

    /// Accent-insensitive + case-insensitive substring match.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}
