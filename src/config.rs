use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// CSV file with a header line and nine numeric housing columns
    #[arg(default_value = "data/housing.csv")]
    pub data: PathBuf,

    /// Replace missing values with zero right after loading
    #[arg(long)]
    pub clean: bool,

    /// Rows shown by "Display Dataset - Preview"
    #[arg(long, default_value_t = 10)]
    pub preview_rows: usize,

    /// Print charts as text instead of opening a window
    #[arg(long)]
    pub headless: bool,
}
