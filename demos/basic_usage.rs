//! Basic usage example for centremap
//!
//! This example demonstrates how to:
//! - Load the site catalog
//! - List centres, brands, managers and regions
//! - Filter the catalog and build map views
//! - Use the caching mechanism

use centremap::prelude::*;

fn main() -> Result<()> {
    println!("=== Centremap Basic Usage Example ===\n");

    // Load the catalog
    println!("Loading site catalog...");
    let db = CentreDb::<StandardBackend>::load()?;
    println!("✓ Catalog loaded successfully\n");

    // Example 1: Get all centres
    println!("--- Example 1: List all centres ---");
    let names = db.centre_names();
    println!("Total centres: {}", names.len());
    for (i, name) in names.iter().take(5).enumerate() {
        println!("{}. {}", i + 1, name);
    }
    println!();

    // Example 2: Find a specific centre
    println!("--- Example 2: Find a centre by name ---");
    if let Some(first) = names.first().copied() {
        if let Some(centre) = db.find_centre_by_name(first) {
            println!("Found: {}", centre.name());
            println!("Manager: {}", centre.manager());
            println!("Region: {}", centre.region());
            println!("Brands: {}", centre.brand_list().len());
            println!("Sub-sites: {}", centre.sub_sites.len());
        }
    }
    println!();

    // Example 3: Filter by brand
    println!("--- Example 3: Filter by brand ---");
    let brands = db.brands();
    println!("Distinct brands: {}", brands.len());
    if let Some(brand) = brands.first() {
        let hits = db.find_by_brand(brand);
        println!("Centres carrying {brand}: {}", hits.len());
    }
    println!();

    // Example 4: Build the map view for a single centre
    println!("--- Example 4: Single-centre map view ---");
    if let Some(view) = names.first().and_then(|n| db.centre_view(n)) {
        println!("Center: {:.4}, {:.4}", view.center.0, view.center.1);
        println!("Zoom: {}", view.zoom);
        println!("Markers: {}", view.markers.len());
        println!(
            "Boundary vertices: {}",
            view.polygon.as_deref().map(<[_]>::len).unwrap_or(0)
        );
    }
    println!();

    // Example 5: Measure a distance
    println!("--- Example 5: Distance measurement ---");
    let mut measure = DistanceMeasure::new();
    measure.record((48.8566, 2.3522)); // Paris
    measure.record((45.7640, 4.8357)); // Lyon
    if let Some(d) = measure.distance_m() {
        println!("Paris → Lyon: {d:.0} m");
    }
    println!();

    // Example 6: Using the cache
    println!("--- Example 6: Cache usage ---");
    println!("First load (will cache):");
    let start = std::time::Instant::now();
    let _db1 = CentreDb::<StandardBackend>::load()?;
    println!("Time: {:?}", start.elapsed());

    println!("Second load (from cache):");
    let start = std::time::Instant::now();
    let _db2 = CentreDb::<StandardBackend>::load()?;
    println!("Time: {:?}", start.elapsed());
    println!();

    // Example 7: Catalog statistics
    println!("--- Example 7: Catalog statistics ---");
    let stats = db.stats();
    println!("Total centres: {}", stats.centres);
    println!("Total sub-sites: {}", stats.sub_sites);
    println!("Total notifications: {}", stats.notifications);

    println!("\n=== Example completed successfully ===");
    Ok(())
}
