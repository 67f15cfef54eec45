//! centremap-cli — Command-line interface for centremap-core
//!
//! This binary provides a simple way to inspect the commercial-site catalog
//! from your terminal. It supports printing basic statistics, listing and
//! filtering centres by name, tenant brand, property manager or region,
//! rendering the map view for a single centre (optionally as GeoJSON), and a
//! small distance calculator.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ centremap-cli stats
//!
//! - List all centres
//!   $ centremap-cli centres
//!
//! - Show details for one centre (accent- and case-insensitive)
//!   $ centremap-cli centre "creteil soleil"
//!   $ centremap-cli centre "Créteil Soleil" --geojson
//!
//! - Filter by brand / manager / region
//!   $ centremap-cli brand fnac
//!   $ centremap-cli manager "Klépierre"
//!   $ centremap-cli region "Île-de-France"
//!
//! - Measure a distance (meters)
//!   $ centremap-cli distance 48.8566 2.3522 45.7640 4.8357
//!
//! Data source
//! -----------
//!
//! By default, the CLI loads the flat tables bundled with the
//! `centremap-core` crate and automatically caches a binary version next to
//! them for fast subsequent runs. Use `--data-dir <path>` to point to a
//! custom data directory.
mod args;

use crate::args::{CliArgs, Commands};
use centremap_core::{Centre, CentreDb, CentreSearch, DistanceMeasure, StandardBackend};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let CliArgs { data_dir, command } = CliArgs::parse();

    // Opened per command, so the distance tool never touches the catalog.
    let open_db = || -> anyhow::Result<CentreDb<StandardBackend>> {
        Ok(match &data_dir {
            Some(dir) => CentreDb::<StandardBackend>::load_from_dir(dir)?,
            None => CentreDb::<StandardBackend>::load()?,
        })
    };

    match command {
        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => {
            let mut measure = DistanceMeasure::new();
            measure.record((lat1, lon1));
            measure.record((lat2, lon2));
            // Both points recorded, distance is always available.
            let d = measure.distance_m().unwrap_or_default();
            println!("Distance: {d:.2} m");
        }

        Commands::Stats => {
            let db = open_db()?;
            let stats = db.stats();
            println!("Catalog statistics:");
            println!("  Centres: {}", stats.centres);
            println!("  Sub-sites: {}", stats.sub_sites);
            println!("  Commune notifications: {}", stats.notifications);
        }

        Commands::Centres => {
            let db = open_db()?;
            for name in db.centre_names() {
                println!("{name}");
            }
        }

        Commands::Centre { name, geojson } => {
            let db = open_db()?;
            match db.find_centre_by_name(&name) {
                Some(c) => {
                    let view = db.single_centre_view(c);
                    if geojson {
                        println!("{}", serde_json::to_string_pretty(&view.to_geojson())?);
                    } else {
                        println!("Centre: {}", c.name());
                        println!("Type: {}", c.typology());
                        println!("Address: {} - {} {}", c.address(), c.postal_code(), c.city());
                        println!("Region: {}", c.region());
                        println!("Manager: {}", c.manager());
                        println!("Brands: {}", c.brand_list().len());
                        println!("Position: {:.4}, {:.4}", c.lat(), c.lon());
                        println!("Markers: {}", view.markers.len());
                        println!(
                            "Boundary vertices: {}",
                            view.polygon.as_deref().map(<[_]>::len).unwrap_or(0)
                        );
                        println!("---");
                        println!("{}", view.markers[0].tooltip.replace("<br>", "\n"));
                    }
                }
                None => {
                    eprintln!("No centre found for: {name}");
                }
            }
        }

        Commands::Brands => {
            let db = open_db()?;
            for brand in db.brands() {
                println!("{brand}");
            }
        }

        Commands::Brand { query } => {
            let db = open_db()?;
            print_selection(&db.find_by_brand(&query), &format!("brand: {query}"));
        }

        Commands::Managers => {
            let db = open_db()?;
            for manager in db.managers() {
                println!("{manager}");
            }
        }

        Commands::Manager { name } => {
            let db = open_db()?;
            print_selection(&db.find_by_manager(&name), &format!("manager: {name}"));
        }

        Commands::Regions => {
            let db = open_db()?;
            for region in db.regions() {
                println!("{region}");
            }
        }

        Commands::Region { name } => {
            let db = open_db()?;
            print_selection(&db.find_by_region(&name), &format!("region: {name}"));
        }
    }

    Ok(())
}

fn print_selection(selection: &[&Centre<StandardBackend>], label: &str) {
    if selection.is_empty() {
        eprintln!("No centres found for {label}");
        return;
    }
    for c in selection {
        println!("{} — {} ({})", c.name(), c.city(), c.region());
    }
    println!("{} centre(s)", selection.len());
}
