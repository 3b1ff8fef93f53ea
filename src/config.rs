use std::path::PathBuf;

use clap::Parser;

/// Upper bound of both salary sliders (IDR).
pub const SALARY_SLIDER_MAX: f64 = 25_000_000.0;
/// Salary slider step (IDR).
pub const SALARY_SLIDER_STEP: f64 = 500_000.0;
/// Entries kept by the company / location rankings.
pub const TOP_N: usize = 10;
pub const HISTOGRAM_BINS: usize = 50;
/// Words kept for the keyword cloud.
pub const MAX_KEYWORDS: usize = 200;

pub const DEFAULT_DATA_FILE: &str = "lowongan_karir_cleaned_with_salary_range.csv";

/// Command line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "karir-dashboard", version, about = "Explore scraped job listings")]
pub struct Args {
    /// Listings file to open (.csv, .json or .parquet)
    #[arg(env = "KARIR_DATA", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,
}
