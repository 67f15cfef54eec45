// crates/centremap-core/src/text.rs

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Créteil` -> `Creteil`)
/// 2\) Normalize to lowercase
///
/// The implementation uses the `deunicode` crate to perform a best-effort
/// transliteration from Unicode to ASCII.
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Compares two strings for equality after Unicode folding and normalization.
///
/// Enables matching strings that differ only in diacritics or case, which is
/// the norm for user-typed centre and brand names.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Parses an `Option<String>` into an `Option<f64>`.
///
/// \- Trims leading and trailing whitespace before parsing.
/// \- Returns `None` if the input is `None` or if parsing fails.
pub fn parse_opt_f64(s: &Option<String>) -> Option<f64> {
    s.as_ref().and_then(|v| v.trim().parse::<f64>().ok())
}

/// Parses an `Option<String>` into an `Option<u32>`, tolerating float-shaped
/// values (`"12.0"`), which spreadsheet exports routinely produce for counts.
pub fn parse_opt_u32(s: &Option<String>) -> Option<u32> {
    parse_opt_f64(s).filter(|v| *v >= 0.0).map(|v| v as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_key_strips_accents_and_case() {
        assert_eq!(fold_key("Créteil Soleil"), "creteil soleil");
        assert_eq!(fold_key("VÉLIZY 2"), "velizy 2");
    }

    #[test]
    fn equals_folded_matches_accent_variants() {
        assert!(equals_folded("Beaugrenelle", "BEAUGRENELLE"));
        assert!(equals_folded("Évry 2", "evry 2"));
        assert!(!equals_folded("Rosny 2", "Parly 2"));
    }

    #[test]
    fn parse_opt_f64_trims_and_rejects() {
        assert_eq!(parse_opt_f64(&Some(" 12.34 ".to_string())), Some(12.34));
        assert_eq!(parse_opt_f64(&Some("N/A".to_string())), None);
        assert_eq!(parse_opt_f64(&None), None);
    }

    #[test]
    fn parse_opt_u32_accepts_float_shaped_counts() {
        assert_eq!(parse_opt_u32(&Some("120.0".to_string())), Some(120));
        assert_eq!(parse_opt_u32(&Some("-3".to_string())), None);
    }
}
