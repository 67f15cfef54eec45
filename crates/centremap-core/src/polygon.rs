// crates/centremap-core/src/polygon.rs

//! # Polygon decoder
//!
//! The catalog stores each site boundary as a single text column whose format
//! drifted over the years: JSON-style nested arrays, WKT-style
//! `POLYGON((lon lat, ...))`, and bare delimiter-separated numeric streams all
//! occur. [`decode_polygon`] accepts all of them under one contract:
//!
//! - output is an ordered sequence of `(lon, lat)` pairs, input order kept;
//! - malformed tokens or pairs are skipped with a warning, never abort;
//! - empty/blank input decodes to an empty sequence.
//!
//! Renderers want `(lat, lon)`; flip with [`LonLat::to_lat_lon`].

use log::warn;
use serde::{Deserialize, Serialize};

/// A geographic point in storage order: longitude first.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Flip to render order (latitude first).
    #[inline]
    pub fn to_lat_lon(self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

/// Decode a stored boundary string into ordered `(lon, lat)` pairs.
pub fn decode_polygon(raw: &str) -> Vec<LonLat> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    // Fast path: valid JSON array (nested pairs, rings, or a flat number list).
    if trimmed.starts_with('[') {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
            let mut out = Vec::new();
            walk_json(&value, &mut out);
            return out;
        }
    }

    decode_text(trimmed)
}

/// Recursive JSON walk. An array whose elements are all numbers is a
/// coordinate stream (a `[lon, lat]` pair is just the two-element case);
/// any other array recurses, so rings nest to arbitrary depth.
fn walk_json(value: &serde_json::Value, out: &mut Vec<LonLat>) {
    let Some(items) = value.as_array() else {
        warn!("skipping non-array polygon node: {value}");
        return;
    };
    if !items.is_empty() && items.iter().all(serde_json::Value::is_number) {
        for pair in items.chunks_exact(2) {
            match (pair[0].as_f64(), pair[1].as_f64()) {
                (Some(lon), Some(lat)) => out.push(LonLat::new(lon, lat)),
                _ => warn!("skipping non-finite polygon pair: {pair:?}"),
            }
        }
        if items.len() % 2 == 1 {
            warn!("dangling polygon coordinate ignored");
        }
        return;
    }
    for item in items {
        if item.is_array() {
            walk_json(item, out);
        } else {
            warn!("skipping non-numeric polygon entry: {item}");
        }
    }
}

/// Textual fallback: WKT-ish and bare token streams.
///
/// Parentheses and brackets are treated as whitespace, then the string is
/// split into chunks on `;` (if present) or `,`. A chunk with two or more
/// numeric tokens yields pairs; chunks with a single number are collected and
/// re-paired only when *no* chunk carried a full pair, which keeps one
/// malformed chunk from shifting the pairing of everything after it.
///
/// A malformed digit-bearing token taints the rest of its chunk: pairing
/// across the gap would weld two unrelated numbers into a point that never
/// appeared in the input, so only pairs completed before the bad token
/// survive.
fn decode_text(raw: &str) -> Vec<LonLat> {
    let cleaned: String = raw
        .chars()
        .map(|c| match c {
            '(' | ')' | '[' | ']' => ' ',
            other => other,
        })
        .collect();

    let delim = if cleaned.contains(';') { ';' } else { ',' };

    let mut pairs = Vec::new();
    let mut loose: Vec<f64> = Vec::new();
    for chunk in cleaned.split(delim) {
        let mut nums = Vec::new();
        let mut tainted = false;
        for token in chunk.split_whitespace() {
            match token.parse::<f64>() {
                Ok(v) => nums.push(v),
                // Keywords like "POLYGON" are expected; only digit-bearing
                // tokens count as malformed.
                Err(_) if token.chars().any(|c| c.is_ascii_digit()) => {
                    warn!("skipping malformed coordinate token: {token}");
                    tainted = true;
                    break;
                }
                Err(_) => {}
            }
        }
        if tainted {
            for pair in nums.chunks_exact(2) {
                pairs.push(LonLat::new(pair[0], pair[1]));
            }
            if nums.len() % 2 == 1 {
                warn!("discarding coordinate orphaned by malformed token: {chunk}");
            }
            continue;
        }
        match nums.len() {
            0 => {}
            1 => loose.push(nums[0]),
            n => {
                for pair in nums.chunks_exact(2) {
                    pairs.push(LonLat::new(pair[0], pair[1]));
                }
                if n % 2 == 1 {
                    warn!("dangling coordinate in chunk ignored: {chunk}");
                }
            }
        }
    }

    // Flat comma-separated streams land entirely in `loose`.
    if pairs.is_empty() && !loose.is_empty() {
        for pair in loose.chunks_exact(2) {
            pairs.push(LonLat::new(pair[0], pair[1]));
        }
        if loose.len() % 2 == 1 {
            warn!("dangling polygon coordinate ignored");
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_json_pairs() {
        let pts = decode_polygon("[[2.35, 48.86], [2.36, 48.87], [2.35, 48.88]]");
        assert_eq!(
            pts,
            vec![
                LonLat::new(2.35, 48.86),
                LonLat::new(2.36, 48.87),
                LonLat::new(2.35, 48.88),
            ]
        );
    }

    #[test]
    fn decodes_json_ring_nesting() {
        let pts = decode_polygon("[[[2.1, 48.1], [2.2, 48.2]]]");
        assert_eq!(pts, vec![LonLat::new(2.1, 48.1), LonLat::new(2.2, 48.2)]);
    }

    #[test]
    fn decodes_flat_json_stream() {
        let pts = decode_polygon("[2.1, 48.1, 2.2, 48.2]");
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[1], LonLat::new(2.2, 48.2));
    }

    #[test]
    fn decodes_wkt_polygon() {
        let pts = decode_polygon("POLYGON((2.3508 48.8567, 2.3512 48.8570, 2.3500 48.8572))");
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[0], LonLat::new(2.3508, 48.8567));
        assert_eq!(pts[2], LonLat::new(2.3500, 48.8572));
    }

    #[test]
    fn decodes_bare_space_separated_stream() {
        let pts = decode_polygon("2.1 48.1 2.2 48.2");
        assert_eq!(pts, vec![LonLat::new(2.1, 48.1), LonLat::new(2.2, 48.2)]);
    }

    #[test]
    fn decodes_semicolon_chunks() {
        let pts = decode_polygon("2.1,48.1; 2.2,48.2; 2.3,48.3");
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[1], LonLat::new(2.2, 48.2));
    }

    #[test]
    fn skips_malformed_chunk_without_shifting_pairs() {
        let pts = decode_polygon("POLYGON((2.1 48.1, 2.x2 48.2, 2.3 48.3))");
        // The broken chunk contributes nothing; later pairs stay aligned.
        assert_eq!(pts, vec![LonLat::new(2.1, 48.1), LonLat::new(2.3, 48.3)]);
    }

    #[test]
    fn malformed_token_taints_rest_of_chunk() {
        // A dot-joined latitude leaves numbers on both sides; pairing across
        // the gap would invent the point (4.8550, 4.8590), which never
        // appeared in the input. The whole chunk must yield nothing.
        let pts = decode_polygon("POLYGON((4.8550 45.7600. 4.8590 45.7600))");
        assert!(pts.is_empty());
    }

    #[test]
    fn pairs_before_malformed_token_survive() {
        let pts = decode_polygon("2.1 48.1 2.2 48.2 9.x9 2.3 48.3");
        assert_eq!(pts, vec![LonLat::new(2.1, 48.1), LonLat::new(2.2, 48.2)]);
    }

    #[test]
    fn drops_dangling_token() {
        let pts = decode_polygon("2.1, 48.1, 2.2");
        assert_eq!(pts, vec![LonLat::new(2.1, 48.1)]);
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(decode_polygon("").is_empty());
        assert!(decode_polygon("   ").is_empty());
        assert!(decode_polygon("POLYGON(())").is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let pts = decode_polygon("[[1.0, 10.0], [2.0, 20.0], [0.5, 5.0]]");
        let lons: Vec<f64> = pts.iter().map(|p| p.lon).collect();
        assert_eq!(lons, vec![1.0, 2.0, 0.5]);
    }

    #[test]
    fn flips_to_lat_lon() {
        assert_eq!(LonLat::new(2.35, 48.86).to_lat_lon(), (48.86, 2.35));
    }
}
