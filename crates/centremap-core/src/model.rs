// crates/centremap-core/src/model.rs

use crate::polygon::{decode_polygon, LonLat};
use crate::raw::{decode_green_boutiques, decode_sub_site_refs, RawTables};
use crate::text::{parse_opt_f64, parse_opt_u32};
use crate::traits::{MapBackend, NameMatch};
use log::warn;
use serde::{Deserialize, Serialize};

/// Default backend: plain `String` + `f64`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultBackend;

impl MapBackend for DefaultBackend {
    type Str = String;
    type Float = f64;

    #[inline]
    fn str_from(s: &str) -> Self::Str {
        s.to_owned()
    }

    #[inline]
    fn float_from(f: f64) -> Self::Float {
        f
    }
    fn float_to_f64(v: Self::Float) -> f64 {
        v
    }
    #[inline]
    fn str_to_string(v: &Self::Str) -> String {
        v.clone()
    }
}

/// A decoded reference from a centre to a fiber sub-site: `(id, lon, lat)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubSiteRef<B: MapBackend> {
    pub id: B::Str,
    pub lon: B::Float,
    pub lat: B::Float,
}

/// A "green boutique" attached to a centre, with its own coordinates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GreenBoutique<B: MapBackend> {
    pub name: B::Str,
    pub lat: B::Float,
    pub lon: B::Float,
}

/// A commercial centre entry in the normalized catalog.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Centre<B: MapBackend> {
    pub name: B::Str,
    pub latitude: B::Float,
    pub longitude: B::Float,

    /// Non-empty address lines, in source order (`adresse1..adresse3`).
    pub address_lines: Vec<B::Str>,
    pub postal_code: Option<B::Str>,
    pub city: Option<B::Str>,
    pub commune: Option<B::Str>,
    pub region: Option<B::Str>,

    pub typology: Option<B::Str>,
    pub manager: Option<B::Str>,
    /// Raw brand list, `" | "`-joined as in the source.
    pub brands: Option<B::Str>,
    pub shop_count: Option<u32>,
    pub years_open: Option<u32>,
    pub surface_gla: Option<B::Float>,

    /// Stored boundary string, decoded on demand by [`Centre::boundary`].
    pub polygon_raw: Option<B::Str>,
    pub sub_sites: Vec<SubSiteRef<B>>,
    pub green_boutiques: Vec<GreenBoutique<B>>,
}

/// A sub-site enrichment entry (secondary fiber table).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubSite<B: MapBackend> {
    pub id: B::Str,
    pub street: Option<B::Str>,
    pub operator: Option<B::Str>,
    pub nb_el: Option<B::Str>,
}

/// A per-commune network-notification entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Notification<B: MapBackend> {
    pub commune: B::Str,
    pub lot: Option<B::Str>,
    pub commercial_closure: Option<B::Str>,
    pub technical_closure: Option<B::Str>,
    pub oi_code: Option<B::Str>,
    pub oi_name: Option<B::Str>,
}

/// Top-level catalog structure: the three tables, loaded once, read-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CentreDb<B: MapBackend> {
    pub centres: Vec<Centre<B>>,
    pub sub_sites: Vec<SubSite<B>>,
    pub notifications: Vec<Notification<B>>,
}

/// Convenient alias for the default backend.
pub type DefaultCentreDb = CentreDb<DefaultBackend>;
/// Convenient alias used in demos.
pub type StandardBackend = DefaultBackend;

/// Convert raw table rows into a `CentreDb` using the given backend.
///
/// Centre rows without a usable name + coordinate pair are skipped with a
/// warning; everything downstream (map centering, marker placement) needs
/// them. The stored `imbs` and `boutiques_vertes` columns are decoded here,
/// once, matching the original load-time normalization.
pub fn build_centre_db<B: MapBackend>(raw: RawTables) -> CentreDb<B> {
    let mut centres = Vec::with_capacity(raw.centres.len());
    for c in raw.centres {
        let (Some(lat), Some(lon)) = (parse_opt_f64(&c.latitude), parse_opt_f64(&c.longitude))
        else {
            warn!("skipping centre without coordinates: {}", c.nom);
            continue;
        };
        if c.nom.trim().is_empty() {
            warn!("skipping centre with empty name");
            continue;
        }

        let address_lines = [&c.adresse1, &c.adresse2, &c.adresse3]
            .into_iter()
            .filter_map(|line| line.as_deref())
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(B::str_from)
            .collect();

        let sub_sites = c
            .imbs
            .as_deref()
            .map(decode_sub_site_refs)
            .unwrap_or_default()
            .into_iter()
            .map(|(id, lon, lat)| SubSiteRef {
                id: B::str_from(&id),
                lon: B::float_from(lon),
                lat: B::float_from(lat),
            })
            .collect();

        let green_boutiques = c
            .boutiques_vertes
            .as_deref()
            .map(decode_green_boutiques)
            .unwrap_or_default()
            .into_iter()
            .map(|(name, lat, lon)| GreenBoutique {
                name: B::str_from(&name),
                lat: B::float_from(lat),
                lon: B::float_from(lon),
            })
            .collect();

        centres.push(Centre {
            name: B::str_from(c.nom.trim()),
            latitude: B::float_from(lat),
            longitude: B::float_from(lon),
            address_lines,
            postal_code: c.code_postal.as_deref().map(B::str_from),
            city: c.nom_ville.as_deref().map(B::str_from),
            commune: c.commune.as_deref().map(B::str_from),
            region: c.region.as_deref().map(B::str_from),
            typology: c.typologie_cc_long.as_deref().map(B::str_from),
            manager: c.gestionnaires.as_deref().map(B::str_from),
            brands: c.enseignes.as_deref().map(B::str_from),
            shop_count: parse_opt_u32(&c.nb_boutiques),
            years_open: parse_opt_u32(&c.nb_annees_ouverture),
            surface_gla: parse_opt_f64(&c.surface_gla).map(B::float_from),
            polygon_raw: c.polygon.as_deref().map(B::str_from),
            sub_sites,
            green_boutiques,
        });
    }

    let sub_sites = raw
        .sub_sites
        .into_iter()
        .map(|s| SubSite {
            id: B::str_from(s.site_num.trim()),
            street: s.street.as_deref().map(B::str_from),
            operator: s.operator.as_deref().map(B::str_from),
            nb_el: s.nb_el.as_deref().map(B::str_from),
        })
        .collect();

    let notifications = raw
        .notifications
        .into_iter()
        .filter(|n| !n.nom_commune.trim().is_empty())
        .map(|n| Notification {
            commune: B::str_from(n.nom_commune.trim()),
            lot: n.lot.as_deref().map(B::str_from),
            commercial_closure: n.fermeture_commerciale.as_deref().map(B::str_from),
            technical_closure: n.fermeture_technique.as_deref().map(B::str_from),
            oi_code: n.code_oi.as_deref().map(B::str_from),
            oi_name: n.nom_oi.as_deref().map(B::str_from),
        })
        .collect();

    CentreDb {
        centres,
        sub_sites,
        notifications,
    }
}

fn opt_str<B: MapBackend>(v: &Option<B::Str>) -> &str {
    v.as_ref().map(|s| s.as_ref()).unwrap_or("")
}

impl<B: MapBackend> Centre<B> {
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn lat(&self) -> f64 {
        B::float_to_f64(self.latitude)
    }

    pub fn lon(&self) -> f64 {
        B::float_to_f64(self.longitude)
    }

    /// `(lat, lon)` in render order.
    pub fn position(&self) -> (f64, f64) {
        (self.lat(), self.lon())
    }

    /// Non-empty address lines joined with `", "`.
    pub fn address(&self) -> String {
        self.address_lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn postal_code(&self) -> &str {
        opt_str::<B>(&self.postal_code)
    }

    pub fn city(&self) -> &str {
        opt_str::<B>(&self.city)
    }

    pub fn commune(&self) -> &str {
        opt_str::<B>(&self.commune)
    }

    pub fn region(&self) -> &str {
        opt_str::<B>(&self.region)
    }

    pub fn typology(&self) -> &str {
        opt_str::<B>(&self.typology)
    }

    pub fn manager(&self) -> &str {
        opt_str::<B>(&self.manager)
    }

    /// The raw `" | "`-joined brand string.
    pub fn brands_raw(&self) -> &str {
        opt_str::<B>(&self.brands)
    }

    /// Individual tenant brands, trimmed, in source order.
    pub fn brand_list(&self) -> Vec<&str> {
        self.brands_raw()
            .split('|')
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .collect()
    }

    pub fn surface_m2(&self) -> Option<f64> {
        self.surface_gla.map(B::float_to_f64)
    }

    /// Decode the stored boundary string, in `(lon, lat)` storage order.
    /// Returns an empty vector when no boundary is stored or nothing parses.
    pub fn boundary(&self) -> Vec<LonLat> {
        self.polygon_raw
            .as_ref()
            .map(|raw| decode_polygon(raw.as_ref()))
            .unwrap_or_default()
    }
}

impl<B: MapBackend> NameMatch for Centre<B> {
    fn name_str(&self) -> &str {
        self.name()
    }
}

impl<B: MapBackend> SubSite<B> {
    pub fn id(&self) -> &str {
        self.id.as_ref()
    }
}

impl<B: MapBackend> Notification<B> {
    pub fn commune(&self) -> &str {
        self.commune.as_ref()
    }
}

impl<B: MapBackend> CentreDb<B> {
    pub fn centre_count(&self) -> usize {
        self.centres.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{CentreRaw, NotificationRaw, RawTables, SubSiteRaw};

    fn centre_raw(name: &str, lat: &str, lon: &str) -> CentreRaw {
        CentreRaw {
            nom: name.to_string(),
            latitude: Some(lat.to_string()),
            longitude: Some(lon.to_string()),
            adresse1: Some("1 rue du Centre".to_string()),
            adresse2: None,
            adresse3: Some("  ".to_string()),
            code_postal: Some("94000".to_string()),
            nom_ville: Some("Créteil".to_string()),
            commune: Some("Créteil".to_string()),
            region: Some("Île-de-France".to_string()),
            typologie_cc_long: Some("Centre régional".to_string()),
            gestionnaires: Some("Klépierre".to_string()),
            enseignes: Some("Fnac | Zara |开心".to_string()),
            nb_boutiques: Some("120.0".to_string()),
            nb_annees_ouverture: Some("32".to_string()),
            surface_gla: Some("91000".to_string()),
            polygon: Some("[[2.45, 48.79], [2.46, 48.79], [2.46, 48.80]]".to_string()),
            imbs: Some("[['IMB/94028/A/0042', 2.4521, 48.7901]]".to_string()),
            boutiques_vertes: Some("Biocoop (48.7905, 2.4510)".to_string()),
        }
    }

    fn build() -> DefaultCentreDb {
        build_centre_db::<DefaultBackend>(RawTables {
            centres: vec![
                centre_raw("Créteil Soleil", "48.79", "2.45"),
                centre_raw("No Coords", "", "2.0"),
            ],
            sub_sites: vec![SubSiteRaw {
                site_num: " IMB/94028/A/0042 ".to_string(),
                street: Some("Avenue de la France Libre".to_string()),
                operator: None,
                nb_el: Some("12".to_string()),
            }],
            notifications: vec![NotificationRaw {
                nom_commune: "Créteil".to_string(),
                lot: Some("B2".to_string()),
                ..Default::default()
            }],
        })
    }

    #[test]
    fn build_skips_rows_without_coordinates() {
        let db = build();
        assert_eq!(db.centre_count(), 1);
        assert_eq!(db.centres[0].name(), "Créteil Soleil");
    }

    #[test]
    fn build_decodes_embedded_lists() {
        let db = build();
        let c = &db.centres[0];
        assert_eq!(c.sub_sites.len(), 1);
        assert_eq!(c.sub_sites[0].id, "IMB/94028/A/0042");
        assert_eq!(c.green_boutiques.len(), 1);
        assert_eq!(c.green_boutiques[0].name, "Biocoop");
        assert_eq!(c.boundary().len(), 3);
    }

    #[test]
    fn address_joins_non_empty_lines() {
        let db = build();
        assert_eq!(db.centres[0].address(), "1 rue du Centre");
    }

    #[test]
    fn brand_list_explodes_and_trims() {
        let db = build();
        assert_eq!(db.centres[0].brand_list(), vec!["Fnac", "Zara", "开心"]);
    }

    #[test]
    fn numeric_fields_parse_through_float_shapes() {
        let db = build();
        assert_eq!(db.centres[0].shop_count, Some(120));
        assert_eq!(db.centres[0].years_open, Some(32));
        assert_eq!(db.centres[0].surface_m2(), Some(91000.0));
    }

    #[test]
    fn sub_site_ids_are_trimmed() {
        let db = build();
        assert_eq!(db.sub_sites[0].id(), "IMB/94028/A/0042");
    }
}
