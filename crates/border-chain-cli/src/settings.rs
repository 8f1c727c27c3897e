use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
/// Border Chain - inspect region catalogs, adjacency, and challenges
pub struct Settings {
    /// Catalog JSON file: an array of { name, name_en, polygons } entries
    #[clap(value_name = "CATALOG")]
    pub catalog: PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print catalog and adjacency statistics
    Info,
    /// List the regions bordering a region
    Neighbors {
        /// Region name (native, transliterated, or a unique fragment)
        region: String,
    },
    /// Shortest path between two regions
    Path {
        from: String,
        to: String,
        /// Restrict the route to these regions (plus the endpoints)
        #[clap(long, value_delimiter = ',', value_name = "REGIONS")]
        via: Vec<String>,
    },
    /// Pick a start/target challenge pair
    Challenge {
        /// Seed for reproducible selection
        #[clap(long)]
        seed: Option<u64>,
    },
}
