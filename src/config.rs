use std::env;
use std::path::{Path, PathBuf};

use crate::nutrition::DailyLimits;

pub const DEFAULT_BASE_URL: &str = "https://nutriplan-api.vercel.app/api";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the primary proxy API.
    pub base_url: String,
    /// Nutrition-facts credential. Absence is a supported state: product
    /// search and barcode lookup report unavailability, everything else
    /// keeps working.
    pub usda_api_key: Option<String>,
    /// Directory backing the key-value store.
    pub data_dir: PathBuf,
    pub limits: DailyLimits,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("NUTRIPLAN_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            usda_api_key: env::var("USDA_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            data_dir: env::var("NUTRIPLAN_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_data_dir()),
            limits: DailyLimits::from_env(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    match env::var("HOME") {
        Ok(home) => Path::new(&home).join(".nutriplan"),
        Err(_) => PathBuf::from(".nutriplan"),
    }
}
