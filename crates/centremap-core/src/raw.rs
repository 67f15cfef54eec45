// crates/centremap-core/src/raw.rs

use log::warn;
use serde::Deserialize;

/// Raw site-catalog row as it comes from `centres.csv`.
///
/// NOTE: Headers mirror the legacy export verbatim (French column names).
/// We do *not* expose this type from the public API; numeric fields stay
/// `Option<String>` and are parsed during normalization.
#[derive(Debug, Deserialize)]
pub struct CentreRaw {
    pub nom: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    #[serde(default)]
    pub adresse1: Option<String>,
    #[serde(default)]
    pub adresse2: Option<String>,
    #[serde(default)]
    pub adresse3: Option<String>,
    #[serde(default)]
    pub code_postal: Option<String>,
    #[serde(default)]
    pub nom_ville: Option<String>,
    #[serde(default)]
    pub commune: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub typologie_cc_long: Option<String>,
    #[serde(default)]
    pub gestionnaires: Option<String>,
    /// Tenant brands joined by `" | "`.
    #[serde(default)]
    pub enseignes: Option<String>,
    #[serde(default)]
    pub nb_boutiques: Option<String>,
    #[serde(default)]
    pub nb_annees_ouverture: Option<String>,
    #[serde(default)]
    pub surface_gla: Option<String>,
    /// Stored boundary coordinate string; decoded lazily, see [`crate::polygon`].
    #[serde(default)]
    pub polygon: Option<String>,
    /// Stored list of `[sub-site id, lon, lat]` triples.
    #[serde(default)]
    pub imbs: Option<String>,
    /// `"Name (lat, lon)"` entries joined by `;`.
    #[serde(default)]
    pub boutiques_vertes: Option<String>,
}

/// Raw sub-site enrichment row (`sub_sites.csv`).
#[derive(Debug, Deserialize)]
pub struct SubSiteRaw {
    #[serde(rename = "SITE - Num")]
    pub site_num: String,
    #[serde(rename = "SITE - voi", default)]
    pub street: Option<String>,
    #[serde(rename = "OI", default)]
    pub operator: Option<String>,
    #[serde(rename = "Nb_EL", default)]
    pub nb_el: Option<String>,
}

/// Raw commune-notification row.
///
/// Comes from the first sheet of `communes_notifiees.xlsx` (or a CSV with the
/// same headers); the loader builds these by hand for the workbook branch.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationRaw {
    pub nom_commune: String,
    #[serde(default)]
    pub lot: Option<String>,
    #[serde(default)]
    pub fermeture_commerciale: Option<String>,
    #[serde(default)]
    pub fermeture_technique: Option<String>,
    #[serde(default)]
    pub code_oi: Option<String>,
    #[serde(default)]
    pub nom_oi: Option<String>,
}

/// The three source tables, as parsed, before normalization.
#[derive(Debug, Default)]
pub struct RawTables {
    pub centres: Vec<CentreRaw>,
    pub sub_sites: Vec<SubSiteRaw>,
    pub notifications: Vec<NotificationRaw>,
}

/// Decode the stored `imbs` column into `(id, lon, lat)` triples.
///
/// The column historically holds a Python-style list literal
/// (`[['IMB/123/X', 2.35, 48.86], ...]`, single quotes) but well-formed JSON
/// occurs too. Malformed entries are skipped with a warning; entry order is
/// preserved.
pub fn decode_sub_site_refs(raw: &str) -> Vec<(String, f64, f64)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    // Fast path: the value is valid JSON (double quotes), or becomes valid
    // after swapping single quotes. Ids with apostrophes fall through to the
    // manual scanner.
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return refs_from_json(&value);
    }
    let normalized = trimmed.replace('\'', "\"");
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&normalized) {
        return refs_from_json(&value);
    }

    // Manual scanner: depth-2 bracket groups, comma-separated inside.
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in trimmed.char_indices() {
        match c {
            '[' | '(' => {
                depth += 1;
                if depth == 2 {
                    start = i + 1;
                }
            }
            ']' | ')' => {
                if depth == 2 {
                    push_ref_group(&trimmed[start..i], &mut out);
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }
    out
}

fn refs_from_json(value: &serde_json::Value) -> Vec<(String, f64, f64)> {
    let mut out = Vec::new();
    let Some(items) = value.as_array() else {
        warn!("imbs value is not a list, ignoring");
        return out;
    };
    for item in items {
        let Some(parts) = item.as_array() else {
            warn!("skipping non-list imbs entry: {item}");
            continue;
        };
        let id = match parts.first() {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) if other.is_number() => other.to_string(),
            _ => {
                warn!("skipping imbs entry without id: {item}");
                continue;
            }
        };
        match (
            parts.get(1).and_then(|v| v.as_f64()),
            parts.get(2).and_then(|v| v.as_f64()),
        ) {
            (Some(lon), Some(lat)) => out.push((id, lon, lat)),
            _ => warn!("skipping imbs entry with bad coordinates: {item}"),
        }
    }
    out
}

fn push_ref_group(group: &str, out: &mut Vec<(String, f64, f64)>) {
    let mut parts = group.split(',').map(str::trim);
    let id = parts
        .next()
        .map(|p| p.trim_matches(|c| c == '\'' || c == '"').to_string());
    let lon = parts.next().and_then(|p| p.parse::<f64>().ok());
    let lat = parts.next().and_then(|p| p.parse::<f64>().ok());
    match (id, lon, lat) {
        (Some(id), Some(lon), Some(lat)) if !id.is_empty() => out.push((id, lon, lat)),
        _ => warn!("skipping malformed imbs group: {group}"),
    }
}

/// Decode the stored `boutiques_vertes` column into `(name, lat, lon)`.
///
/// Entries look like `"Nature & Co (48.85, 2.35)"` joined by `;`. The name is
/// everything before the *last* opening parenthesis, so shop names containing
/// parentheses survive. Malformed entries are skipped with a warning.
pub fn decode_green_boutiques(raw: &str) -> Vec<(String, f64, f64)> {
    let mut out = Vec::new();
    for entry in raw.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let Some((name, coords)) = entry.rsplit_once('(') else {
            warn!("skipping green boutique without coordinates: {entry}");
            continue;
        };
        let coords = coords.trim_end().trim_end_matches(')');
        let Some((lat_s, lon_s)) = coords.split_once(',') else {
            warn!("skipping green boutique with bad coordinate pair: {entry}");
            continue;
        };
        match (lat_s.trim().parse::<f64>(), lon_s.trim().parse::<f64>()) {
            (Ok(lat), Ok(lon)) => out.push((name.trim().to_string(), lat, lon)),
            _ => warn!("skipping green boutique with unparseable coordinates: {entry}"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_site_refs_json() {
        let refs = decode_sub_site_refs(r#"[["IMB/75056/X/0001", 2.35, 48.86]]"#);
        assert_eq!(refs, vec![("IMB/75056/X/0001".to_string(), 2.35, 48.86)]);
    }

    #[test]
    fn sub_site_refs_python_literal() {
        let refs = decode_sub_site_refs("[['IMB/94028/A/0042', 2.4521, 48.7901], ['IMB/94028/A/0043', 2.4530, 48.7910]]");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].0, "IMB/94028/A/0042");
        assert_eq!(refs[1].1, 2.4530);
    }

    #[test]
    fn sub_site_refs_apostrophe_id_uses_scanner() {
        let refs = decode_sub_site_refs("[['IMB/L'HAY/0001', 2.33, 48.77]]");
        assert_eq!(refs, vec![("IMB/L'HAY/0001".to_string(), 2.33, 48.77)]);
    }

    #[test]
    fn sub_site_refs_skips_malformed_groups() {
        let refs = decode_sub_site_refs("[['OK/1', 1.0, 2.0], ['BAD/2', oops, 3.0]]");
        assert_eq!(refs, vec![("OK/1".to_string(), 1.0, 2.0)]);
    }

    #[test]
    fn sub_site_refs_empty() {
        assert!(decode_sub_site_refs("").is_empty());
        assert!(decode_sub_site_refs("   ").is_empty());
    }

    #[test]
    fn green_boutiques_parse_and_skip() {
        let raw = "Biocoop (48.8471, 2.4392); Nature & Découvertes (48.8462, 2.4401); broken entry";
        let shops = decode_green_boutiques(raw);
        assert_eq!(shops.len(), 2);
        assert_eq!(shops[0].0, "Biocoop");
        assert_eq!(shops[1], ("Nature & Découvertes".to_string(), 48.8462, 2.4401));
    }

    #[test]
    fn green_boutique_name_with_parentheses() {
        let shops = decode_green_boutiques("Le Marché (bio) (48.1, 2.2)");
        assert_eq!(shops, vec![("Le Marché (bio)".to_string(), 48.1, 2.2)]);
    }
}
