// crates/centremap-core/src/tooltip.rs

//! # Marker & tooltip builder
//!
//! Turns a filter selection into the data a map frontend renders: markers
//! with HTML tooltips, the decoded site boundary, a center and a zoom level.
//! Tooltip labels stay in French, matching the legacy dashboard verbatim.

use crate::enrich::{NotificationInfo, N_A};
use crate::model::{Centre, CentreDb};
use crate::search::CentreSearch;
use crate::traits::MapBackend;
use serde::Serialize;
use serde_json::json;

/// Zoom used when a single centre is selected.
pub const SINGLE_CENTRE_ZOOM: u8 = 16;
/// Zoom used for multi-centre selections (brand/manager/region).
pub const OVERVIEW_ZOOM: u8 = 6;

/// What a marker represents, carrying the legacy icon style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Centre,
    GreenBoutique,
    SubSite,
}

impl MarkerKind {
    pub fn color(&self) -> &'static str {
        match self {
            MarkerKind::Centre => "red",
            MarkerKind::GreenBoutique => "pink",
            MarkerKind::SubSite => "blue",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            MarkerKind::Centre | MarkerKind::GreenBoutique => "shopping-cart",
            MarkerKind::SubSite => "info-sign",
        }
    }
}

/// A renderable map marker.
#[derive(Clone, Debug, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub tooltip: String,
    pub kind: MarkerKind,
}

/// Everything a map frontend needs for one selection.
#[derive(Clone, Debug, Serialize)]
pub struct MapView {
    /// `(lat, lon)`.
    pub center: (f64, f64),
    pub zoom: u8,
    pub markers: Vec<Marker>,
    /// Boundary in render order (`(lat, lon)` pairs), if the selected centre
    /// stores one.
    pub polygon: Option<Vec<(f64, f64)>>,
}

/// Format a GLA surface as `"91 000 m²"` (truncating, space-grouped),
/// or `"N/A"` when absent.
pub fn format_surface(surface: Option<f64>) -> String {
    match surface {
        Some(v) if v.is_finite() => format!("{} m²", group_thousands(v as i64)),
        _ => N_A.to_string(),
    }
}

/// Format an age as `"32 ans"`, or `"N/A"` when absent.
pub fn format_years(years: Option<u32>) -> String {
    match years {
        Some(y) => format!("{y} ans"),
        None => N_A.to_string(),
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Base tooltip for a centre: name, type, address, owner, shops, age, surface.
pub fn centre_tooltip<B: MapBackend>(centre: &Centre<B>) -> String {
    let owner = if centre.manager().is_empty() {
        N_A.to_string()
    } else {
        centre.manager().to_string()
    };
    let shops = centre
        .shop_count
        .map(|n| n.to_string())
        .unwrap_or_else(|| N_A.to_string());
    format!(
        "<b>{}</b><br>Type : {}<br>Adresse : {} - {} {}<br>Propriétaire : {}<br>Boutiques : {}<br>Ancienneté : {}<br>Superficie : {}",
        centre.name(),
        centre.typology(),
        centre.address(),
        centre.postal_code(),
        centre.city(),
        owner,
        shops,
        format_years(centre.years_open),
        format_surface(centre.surface_m2()),
    )
}

/// Centre tooltip with the commune-notification block appended
/// (single-centre selection only).
pub fn centre_tooltip_with_notification<B: MapBackend>(
    centre: &Centre<B>,
    note: &NotificationInfo,
) -> String {
    format!(
        "{}<br><b>Données Canopée</b><br>Lot : {}<br>Fermeture commerciale : {}<br>Fermeture technique : {}<br>Code OI : {}<br>Nom OI : {}",
        centre_tooltip(centre),
        note.lot,
        note.commercial_closure,
        note.technical_closure,
        note.oi_code,
        note.oi_name,
    )
}

/// Tooltip for an enriched sub-site marker.
pub fn sub_site_tooltip(info: &crate::enrich::SubSiteInfo) -> String {
    format!(
        "<b>{}</b><br>Voie : {}<br>OI : {}<br>Nb_EL : {}",
        info.id, info.street, info.operator, info.nb_el,
    )
}

impl<B: MapBackend> CentreDb<B> {
    /// The detailed view for a single selected centre: centre marker with the
    /// notification block, one marker per green boutique, one enriched marker
    /// per sub-site, and the decoded boundary.
    pub fn single_centre_view(&self, centre: &Centre<B>) -> MapView {
        let note = self.notification_for_commune(centre.commune());
        let mut markers = vec![Marker {
            lat: centre.lat(),
            lon: centre.lon(),
            tooltip: centre_tooltip_with_notification(centre, &note),
            kind: MarkerKind::Centre,
        }];

        for shop in &centre.green_boutiques {
            markers.push(Marker {
                lat: B::float_to_f64(shop.lat),
                lon: B::float_to_f64(shop.lon),
                tooltip: B::str_to_string(&shop.name),
                kind: MarkerKind::GreenBoutique,
            });
        }

        for sub in &centre.sub_sites {
            let info = self.sub_site_info(sub.id.as_ref());
            markers.push(Marker {
                lat: B::float_to_f64(sub.lat),
                lon: B::float_to_f64(sub.lon),
                tooltip: sub_site_tooltip(&info),
                kind: MarkerKind::SubSite,
            });
        }

        let boundary: Vec<(f64, f64)> = centre
            .boundary()
            .into_iter()
            .map(|p| p.to_lat_lon())
            .collect();

        MapView {
            center: centre.position(),
            zoom: SINGLE_CENTRE_ZOOM,
            markers,
            polygon: (!boundary.is_empty()).then_some(boundary),
        }
    }

    /// The overview for a multi-centre selection: one base-tooltip marker per
    /// centre, centered on the first match. `None` for an empty selection.
    pub fn overview(&self, selection: &[&Centre<B>]) -> Option<MapView> {
        let first = selection.first()?;
        let markers = selection
            .iter()
            .map(|c| Marker {
                lat: c.lat(),
                lon: c.lon(),
                tooltip: centre_tooltip(c),
                kind: MarkerKind::Centre,
            })
            .collect();
        Some(MapView {
            center: first.position(),
            zoom: OVERVIEW_ZOOM,
            markers,
            polygon: None,
        })
    }

    /// Resolve a centre by name and build its detailed view.
    pub fn centre_view(&self, name: &str) -> Option<MapView> {
        self.find_centre_by_name(name)
            .map(|c| self.single_centre_view(c))
    }
}

impl MapView {
    /// Render the view as a GeoJSON FeatureCollection (markers as Points,
    /// boundary as a Polygon). Coordinates follow the GeoJSON order, `[lon, lat]`.
    pub fn to_geojson(&self) -> serde_json::Value {
        let mut features: Vec<serde_json::Value> = self
            .markers
            .iter()
            .map(|m| {
                json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": [m.lon, m.lat],
                    },
                    "properties": {
                        "tooltip": m.tooltip,
                        "kind": m.kind,
                        "color": m.kind.color(),
                        "icon": m.kind.icon(),
                    },
                })
            })
            .collect();

        if let Some(polygon) = &self.polygon {
            let ring: Vec<[f64; 2]> = polygon.iter().map(|(lat, lon)| [*lon, *lat]).collect();
            features.push(json!({
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [ring],
                },
                "properties": { "kind": "boundary" },
            }));
        }

        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}
