//! Error handling example for centremap
//!
//! This example demonstrates proper error handling and edge cases

use centremap::prelude::*;

fn main() -> Result<()> {
    println!("=== Centremap Error Handling Example ===\n");

    // Example 1: Handling catalog load errors
    println!("--- Example 1: Loading catalog with error handling ---");
    match CentreDb::<StandardBackend>::load() {
        Ok(db) => {
            println!("✓ Catalog loaded successfully");
            println!("  Centres: {}", db.stats().centres);
        }
        Err(e) => {
            eprintln!("✗ Failed to load catalog: {e}");
            return Err(e);
        }
    }
    println!();

    let db = CentreDb::<StandardBackend>::load()?;

    // Example 2: Handling missing centres
    println!("--- Example 2: Searching for non-existent centres ---");
    let queries = vec!["Nowhere Mall", "Centre Fantôme", ""];
    for q in queries {
        match db.find_centre_by_name(q) {
            Some(centre) => println!("  Found: {}", centre.name()),
            None => println!("  Not found: {q:?}"),
        }
    }
    println!();

    // Example 3: Empty filter selections are empty vectors, not errors
    println!("--- Example 3: Empty selections ---");
    let hits = db.find_by_region("Atlantide");
    println!("  Centres in Atlantide: {}", hits.len());
    assert!(db.overview(&hits).is_none());
    println!("  (no map view for an empty selection)");
    println!();

    // Example 4: Enrichment misses default to N/A
    println!("--- Example 4: Enrichment defaults ---");
    let info = db.sub_site_info("IMB/00000/Z/9999");
    println!("  Street: {}", info.street);
    println!("  OI: {}", info.operator);
    println!("  Nb_EL: {}", info.nb_el);
    let note = db.notification_for_commune("Commune Inconnue");
    println!("  Lot: {}", note.lot);
    println!();

    // Example 5: Malformed stored strings never panic
    println!("--- Example 5: Tolerant decoding ---");
    let pts = decode_polygon("POLYGON((2.1 48.1, garbage, 2.2 48.2))");
    println!("  Decoded {} boundary points from a dirty string", pts.len());

    Ok(())
}
