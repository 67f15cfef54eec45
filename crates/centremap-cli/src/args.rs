use clap::{Parser, Subcommand};

/// CLI arguments for centremap-cli
#[derive(Debug, Parser)]
#[command(
    name = "centremap",
    version,
    about = "CLI for querying the centremap-core commercial-site catalog"
)]
pub struct CliArgs {
    /// Path to the data directory holding centres.csv, sub_sites.csv and the
    /// commune-notification table (default: the bundled data/ directory)
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the catalog contents
    Stats,

    /// List all centres
    Centres,

    /// Show details and the map view for a single centre (accent-insensitive)
    Centre {
        /// Centre name (e.g. "Créteil Soleil")
        name: String,

        /// Dump the map view as a GeoJSON FeatureCollection
        #[arg(long)]
        geojson: bool,
    },

    /// List all tenant brands
    Brands,

    /// List centres carrying a tenant brand (substring, case-insensitive)
    Brand {
        /// Brand to search (e.g. "fnac")
        query: String,
    },

    /// List all property managers
    Managers,

    /// List centres run by a property manager (exact name)
    Manager {
        /// Manager name (e.g. "Klépierre")
        name: String,
    },

    /// List all regions
    Regions,

    /// List centres in a region (exact name)
    Region {
        /// Region name (e.g. "Île-de-France")
        name: String,
    },

    /// Measure the distance in meters between two points
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_accepts_negative_coordinates() {
        let args =
            CliArgs::try_parse_from(["centremap", "distance", "-21.11", "55.53", "48.85", "2.35"])
                .unwrap();
        assert!(matches!(args.command, Commands::Distance { lat1, .. } if lat1 == -21.11));
    }

    #[test]
    fn data_dir_is_global() {
        let args =
            CliArgs::try_parse_from(["centremap", "stats", "--data-dir", "/tmp/data"]).unwrap();
        assert_eq!(args.data_dir.as_deref(), Some("/tmp/data"));
    }
}
