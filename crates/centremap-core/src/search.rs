// crates/centremap-core/src/search.rs

use crate::common::DbStats;
use crate::model::{Centre, CentreDb};
use crate::text::fold_key;
use crate::traits::{MapBackend, NameMatch};
use std::collections::BTreeSet;

/// The four filter dimensions the dashboard exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    /// A single centre by name.
    Centre,
    /// All centres carrying a tenant brand.
    Brand,
    /// All centres run by a property manager ("foncière").
    Manager,
    /// All centres in an administrative region.
    Region,
}

impl FilterMode {
    /// The sorted, deduplicated option list for this filter dimension.
    pub fn options<B: MapBackend>(&self, db: &CentreDb<B>) -> Vec<String> {
        match self {
            FilterMode::Centre => db.centre_names().into_iter().map(String::from).collect(),
            FilterMode::Brand => db.brands(),
            FilterMode::Manager => db.managers().into_iter().map(String::from).collect(),
            FilterMode::Region => db.regions().into_iter().map(String::from).collect(),
        }
    }

    /// Resolve a user choice to the matching subset of the catalog.
    /// An empty result is an empty vector, never an error.
    pub fn select<'a, B: MapBackend>(
        &self,
        db: &'a CentreDb<B>,
        choice: &str,
    ) -> Vec<&'a Centre<B>> {
        match self {
            FilterMode::Centre => db.find_centre_by_name(choice).into_iter().collect(),
            FilterMode::Brand => db.find_by_brand(choice),
            FilterMode::Manager => db.find_by_manager(choice),
            FilterMode::Region => db.find_by_region(choice),
        }
    }
}

/// The Logic Trait.
/// Defines the query operations available on the catalog.
pub trait CentreSearch<B: MapBackend> {
    fn stats(&self) -> DbStats;

    /// All centres, in load order.
    fn centres(&self) -> &[Centre<B>];

    /// Sorted unique centre names.
    fn centre_names(&self) -> Vec<&str>;
    /// Sorted unique tenant brands (the `" | "`-joined column, exploded).
    fn brands(&self) -> Vec<String>;
    /// Sorted unique property managers.
    fn managers(&self) -> Vec<&str>;
    /// Sorted unique regions.
    fn regions(&self) -> Vec<&str>;

    /// Exact-name lookup, accent- and case-insensitive, first hit wins.
    fn find_centre_by_name(&self, name: &str) -> Option<&Centre<B>>;
    /// Substring match against the brand column (case/accent-insensitive).
    fn find_by_brand(&self, query: &str) -> Vec<&Centre<B>>;
    /// Exact manager match.
    fn find_by_manager(&self, name: &str) -> Vec<&Centre<B>>;
    /// Exact region match.
    fn find_by_region(&self, name: &str) -> Vec<&Centre<B>>;
}

impl<B: MapBackend> CentreSearch<B> for CentreDb<B> {
    fn stats(&self) -> DbStats {
        DbStats {
            centres: self.centres.len(),
            sub_sites: self.sub_sites.len(),
            notifications: self.notifications.len(),
        }
    }

    fn centres(&self) -> &[Centre<B>] {
        &self.centres
    }

    fn centre_names(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.centres.iter().map(|c| c.name()).collect();
        set.into_iter().collect()
    }

    fn brands(&self) -> Vec<String> {
        let mut set = BTreeSet::new();
        for c in &self.centres {
            for brand in c.brand_list() {
                set.insert(brand.to_string());
            }
        }
        set.into_iter().collect()
    }

    fn managers(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .centres
            .iter()
            .map(|c| c.manager())
            .filter(|m| !m.is_empty())
            .collect();
        set.into_iter().collect()
    }

    fn regions(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .centres
            .iter()
            .map(|c| c.region())
            .filter(|r| !r.is_empty())
            .collect();
        set.into_iter().collect()
    }

    fn find_centre_by_name(&self, name: &str) -> Option<&Centre<B>> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.centres.iter().find(|c| c.is_named(name))
    }

    fn find_by_brand(&self, query: &str) -> Vec<&Centre<B>> {
        let q = fold_key(query.trim());
        if q.is_empty() {
            return Vec::new();
        }
        // Linear scan; the catalog is a few hundred rows.
        self.centres
            .iter()
            .filter(|c| fold_key(c.brands_raw()).contains(&q))
            .collect()
    }

    fn find_by_manager(&self, name: &str) -> Vec<&Centre<B>> {
        let name = name.trim();
        if name.is_empty() {
            return Vec::new();
        }
        self.centres
            .iter()
            .filter(|c| c.manager() == name)
            .collect()
    }

    fn find_by_region(&self, name: &str) -> Vec<&Centre<B>> {
        let name = name.trim();
        if name.is_empty() {
            return Vec::new();
        }
        self.centres.iter().filter(|c| c.region() == name).collect()
    }
}
