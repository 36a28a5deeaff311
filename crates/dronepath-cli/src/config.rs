//! Run configuration from environment and command line.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use dronepath_core::FlightRules;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan and record a day of drone deliveries")]
pub struct Args {
    /// Day of the month
    pub day: u32,

    /// Month (1-12)
    pub month: u32,

    /// Year
    pub year: i32,

    /// Catalog service base URL
    #[arg(long)]
    pub catalog_url: Option<String>,

    /// SQLite database path
    #[arg(long)]
    pub db_path: Option<String>,

    /// Directory for the GeoJSON flight file
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// JSON file overriding the default flight rules
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_url: String,
    pub db_path: String,
    pub output_dir: PathBuf,
    pub rules_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            catalog_url: env::var("DRONEPATH_CATALOG_URL")
                .unwrap_or_else(|_| "http://localhost:9898".to_string()),
            db_path: env::var("DRONEPATH_DB_PATH")
                .unwrap_or_else(|_| "data/dronepath.db".to_string()),
            output_dir: env::var("DRONEPATH_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            rules_path: env::var("DRONEPATH_RULES").ok().map(PathBuf::from),
        }
    }

    /// Command-line flags take precedence over the environment.
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(url) = &args.catalog_url {
            self.catalog_url = url.clone();
        }
        if let Some(path) = &args.db_path {
            self.db_path = path.clone();
        }
        if let Some(dir) = &args.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(rules) = &args.rules {
            self.rules_path = Some(rules.clone());
        }
        self
    }

    /// Flight rules from the configured file, or the defaults.
    pub fn flight_rules(&self) -> Result<FlightRules> {
        let rules = match &self.rules_path {
            Some(path) => load_rules(path)?,
            None => FlightRules::default(),
        };
        rules.validate().context("invalid flight rules")?;
        Ok(rules)
    }
}

impl Args {
    pub fn date(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).with_context(|| {
            format!(
                "{:02}-{:02}-{:04} is not a calendar date",
                self.day, self.month, self.year
            )
        })
    }
}

fn load_rules(path: &Path) -> Result<FlightRules> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("reading flight rules from {}", path.display()))?;
    serde_json::from_str(&body).with_context(|| format!("parsing flight rules in {}", path.display()))
}
