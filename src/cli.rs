use clap::{Parser, Subcommand};
use movielst::report::View;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "movielst")]
#[command(author, version, about = "Index a movie directory and report on its metadata")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a directory and rebuild the movie catalog
    Index {
        /// Directory containing movies
        #[arg(required = true)]
        path: PathBuf,
    },

    /// Show the catalog as a table
    Report {
        /// Columns to show
        #[arg(long, value_enum, default_value_t = View::Default)]
        view: View,

        /// Sort ascending (default for all but rating views)
        #[arg(long, conflicts_with = "descending")]
        ascending: bool,

        /// Sort descending (default for rating views)
        #[arg(long)]
        descending: bool,
    },

    /// Export the catalog to a CSV file
    Export {
        /// Output file
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Write a default configuration file
    InitConfig {
        /// Where to write it (defaults to ~/.config/movielst/config.toml)
        path: Option<PathBuf>,
    },
}
