use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::{SiteSelection, ALL_SITES};
use crate::data::model::{LaunchTable, PayloadRange};
use crate::state::ControlState;

/// Launch sites offered in the dropdown besides "All".
pub const DEFAULT_SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];

/// SpaceX launch records dashboard
///
/// Opens a native desktop window; no HTTP server or port is involved.
/// Use `--dump` to print the chart descriptions as JSON without a window.
#[derive(Debug, Parser)]
#[command(name = "launch-dashboard", version, about, long_about)]
pub struct Cli {
    /// Launch table to load (.csv, .json or .parquet)
    #[arg(
        short,
        long,
        env = "LAUNCH_DASHBOARD_DATA",
        default_value = "spacex_launch_dash.csv"
    )]
    pub data: PathBuf,

    /// Sites listed in the dropdown, comma separated
    #[arg(
        long,
        env = "LAUNCH_DASHBOARD_SITES",
        value_delimiter = ',',
        default_values_t = DEFAULT_SITES.map(String::from)
    )]
    pub sites: Vec<String>,

    /// Initially selected site
    #[arg(long, default_value = ALL_SITES)]
    pub site: String,

    /// Lower end of the initial payload range in kg (defaults to the table minimum)
    #[arg(long, value_parser = parse_payload)]
    pub payload_min: Option<f64>,

    /// Upper end of the initial payload range in kg (defaults to the table maximum)
    #[arg(long, value_parser = parse_payload)]
    pub payload_max: Option<f64>,

    /// Print both chart descriptions as JSON and exit instead of opening a window
    #[arg(long)]
    pub dump: bool,

    /// Initial window width
    #[arg(long, default_value_t = 1200.0)]
    pub width: f32,

    /// Initial window height
    #[arg(long, default_value_t = 900.0)]
    pub height: f32,
}

/// Payload masses must be finite numbers.
fn parse_payload(value: &str) -> Result<f64, String> {
    let mass: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if mass.is_finite() {
        Ok(mass)
    } else {
        Err(format!("'{value}' is not a finite payload mass"))
    }
}

impl Cli {
    /// Starting control values; missing range ends fall back to the table bounds.
    pub fn initial_controls(&self, table: &LaunchTable) -> ControlState {
        let bounds = table.payload_bounds();
        ControlState {
            site: SiteSelection::parse(self.site.trim()),
            payload: PayloadRange::new(
                self.payload_min.unwrap_or(bounds.lo),
                self.payload_max.unwrap_or(bounds.hi),
            )
            .clamp_to(&bounds),
        }
    }

    /// Dropdown sites with blanks and duplicates removed.
    pub fn site_options(&self) -> Vec<String> {
        let mut sites: Vec<String> = Vec::with_capacity(self.sites.len());
        for site in self.sites.iter().map(|s| s.trim()) {
            if !site.is_empty() && site != ALL_SITES && !sites.iter().any(|s| s == site) {
                sites.push(site.to_string());
            }
        }
        sites
    }
}
