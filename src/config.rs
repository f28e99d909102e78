//! Configuration management for the batch order builder

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogConfig {
    /// LibraryCloud API root, without the `/v2/items` path
    pub base_url: String,
    pub limit: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BatchConfig {
    /// `recordIdentifier@source` value that marks the HOLLIS number
    pub hollis_source: String,
    pub due_in_days: i64,
    pub output_dir: PathBuf,
    pub toc_export_file: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // MPS_CATALOG__BASE_URL, MPS_BATCH__OUTPUT_DIR, ...
            .add_source(
                Environment::with_prefix("MPS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("catalog.base_url", env::var("LIBRARYCLOUD_URL").ok())?
            .build()?;

        config.try_deserialize()
    }

    pub fn toc_export_path(&self) -> PathBuf {
        self.batch.output_dir.join(&self.batch.toc_export_file)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.lib.harvard.edu".to_string(),
            limit: 20000,
            timeout_secs: 60,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            hollis_source: "MH:ALMA".to_string(),
            due_in_days: 14,
            output_dir: PathBuf::from("."),
            toc_export_file: "table_of_contents_export.csv".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
