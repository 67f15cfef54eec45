// crates/centremap-core/src/enrich.rs

//! # Enrichment joins
//!
//! Cross-references between the site catalog and the two secondary tables:
//! sub-site rows keyed by exact id, commune notifications keyed by trimmed
//! lowercase commune name. Lookup misses never fail; every field defaults to
//! the `"N/A"` sentinel so tooltips stay renderable.

use crate::model::CentreDb;
use crate::traits::MapBackend;

/// Sentinel rendered for any field that is missing or failed to join.
pub const N_A: &str = "N/A";

/// Operator assumed for a matched sub-site row without an `OI` value.
pub const DEFAULT_OPERATOR: &str = "Orange";

/// Fully-defaulted view of a sub-site row, ready for tooltip rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubSiteInfo {
    pub id: String,
    pub street: String,
    pub operator: String,
    pub nb_el: String,
}

/// Fully-defaulted view of a commune notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationInfo {
    pub lot: String,
    pub commercial_closure: String,
    pub technical_closure: String,
    pub oi_code: String,
    pub oi_name: String,
}

impl NotificationInfo {
    /// The all-`"N/A"` miss value.
    pub fn not_available() -> Self {
        Self {
            lot: N_A.to_string(),
            commercial_closure: N_A.to_string(),
            technical_closure: N_A.to_string(),
            oi_code: N_A.to_string(),
            oi_name: N_A.to_string(),
        }
    }
}

fn or_na(v: Option<&str>) -> String {
    match v.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => N_A.to_string(),
    }
}

impl<B: MapBackend> CentreDb<B> {
    /// Look up enrichment data for a sub-site by exact id.
    ///
    /// On a hit, empty street/Nb_EL fields default to `"N/A"` and an empty
    /// operator defaults to `"Orange"`. On a miss everything is `"N/A"`.
    pub fn sub_site_info(&self, id: &str) -> SubSiteInfo {
        match self.sub_sites.iter().find(|s| s.id() == id) {
            Some(row) => SubSiteInfo {
                id: id.to_string(),
                street: or_na(row.street.as_ref().map(|s| s.as_ref())),
                operator: match row.operator.as_ref().map(|s| s.as_ref().trim()) {
                    Some(op) if !op.is_empty() => op.to_string(),
                    _ => DEFAULT_OPERATOR.to_string(),
                },
                nb_el: or_na(row.nb_el.as_ref().map(|s| s.as_ref())),
            },
            None => SubSiteInfo {
                id: id.to_string(),
                street: N_A.to_string(),
                operator: N_A.to_string(),
                nb_el: N_A.to_string(),
            },
        }
    }

    /// Look up the network notification for a commune.
    ///
    /// Matching is trimmed, lowercase equality — deliberately *not* the
    /// accent-folding used for names, so communes differing only by accents
    /// do not merge.
    pub fn notification_for_commune(&self, commune: &str) -> NotificationInfo {
        let key = commune.trim().to_lowercase();
        if key.is_empty() {
            return NotificationInfo::not_available();
        }
        match self
            .notifications
            .iter()
            .find(|n| n.commune().trim().to_lowercase() == key)
        {
            Some(row) => NotificationInfo {
                lot: or_na(row.lot.as_ref().map(|s| s.as_ref())),
                commercial_closure: or_na(row.commercial_closure.as_ref().map(|s| s.as_ref())),
                technical_closure: or_na(row.technical_closure.as_ref().map(|s| s.as_ref())),
                oi_code: or_na(row.oi_code.as_ref().map(|s| s.as_ref())),
                oi_name: or_na(row.oi_name.as_ref().map(|s| s.as_ref())),
            },
            None => NotificationInfo::not_available(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{build_centre_db, DefaultBackend, DefaultCentreDb};
    use crate::raw::{NotificationRaw, RawTables, SubSiteRaw};

    fn db() -> DefaultCentreDb {
        build_centre_db::<DefaultBackend>(RawTables {
            centres: vec![],
            sub_sites: vec![
                SubSiteRaw {
                    site_num: "IMB/94028/A/0042".to_string(),
                    street: Some("Avenue de la France Libre".to_string()),
                    operator: Some("SFR FTTH".to_string()),
                    nb_el: Some("12".to_string()),
                },
                SubSiteRaw {
                    site_num: "IMB/94028/A/0043".to_string(),
                    street: None,
                    operator: Some("  ".to_string()),
                    nb_el: None,
                },
            ],
            notifications: vec![NotificationRaw {
                nom_commune: "  Créteil ".to_string(),
                lot: Some("B2".to_string()),
                fermeture_commerciale: Some("2025-06".to_string()),
                fermeture_technique: None,
                code_oi: Some("CRTL".to_string()),
                nom_oi: Some("Orange".to_string()),
            }],
        })
    }

    #[test]
    fn sub_site_hit_with_all_fields() {
        let info = db().sub_site_info("IMB/94028/A/0042");
        assert_eq!(info.street, "Avenue de la France Libre");
        assert_eq!(info.operator, "SFR FTTH");
        assert_eq!(info.nb_el, "12");
    }

    #[test]
    fn sub_site_hit_defaults_operator_to_orange() {
        let info = db().sub_site_info("IMB/94028/A/0043");
        assert_eq!(info.street, N_A);
        assert_eq!(info.operator, DEFAULT_OPERATOR);
        assert_eq!(info.nb_el, N_A);
    }

    #[test]
    fn sub_site_miss_is_all_na() {
        let info = db().sub_site_info("IMB/00000/Z/9999");
        assert_eq!(info.street, N_A);
        assert_eq!(info.operator, N_A);
        assert_eq!(info.nb_el, N_A);
    }

    #[test]
    fn commune_match_is_trimmed_case_insensitive() {
        let info = db().notification_for_commune(" CRÉTEIL ");
        assert_eq!(info.lot, "B2");
        assert_eq!(info.technical_closure, N_A);
    }

    #[test]
    fn commune_match_does_not_fold_accents() {
        // "Creteil" without the accent must miss.
        let info = db().notification_for_commune("Creteil");
        assert_eq!(info, NotificationInfo::not_available());
    }

    #[test]
    fn commune_miss_and_empty_are_all_na() {
        assert_eq!(
            db().notification_for_commune("Lyon"),
            NotificationInfo::not_available()
        );
        assert_eq!(
            db().notification_for_commune("   "),
            NotificationInfo::not_available()
        );
    }
}
