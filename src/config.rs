use crate::constants::{self, DEFAULT_LOCALE, DEFAULT_PAGE_SIZE};
use crate::error::{Result, SiteError};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub pdf: PdfConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: "static".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub default_locale: String,
    pub page_size: usize,
    pub data_file: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            data_file: "data/sites.json".to_string(),
        }
    }
}

/// External HTML-to-PDF command. The print view is written to its stdin and
/// the PDF is read back from its stdout, e.g. `["wkhtmltopdf", "-q", "-", "-"]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    pub command: Vec<String>,
}

impl Config {
    /// Loads `config.toml` from the working directory, then applies environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                SiteError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
            })?;
            toml::from_str::<Config>(&content)?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        info!(
            port = config.server.port,
            data_file = %config.site.data_file,
            default_locale = %config.site.default_locale,
            "Configuration loaded"
        );
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| SiteError::Config(format!("PORT is not a valid port: {}", port)))?;
        }
        if let Ok(data_file) = env::var("SITES_DATA_FILE") {
            self.site.data_file = data_file;
        }
        if let Ok(locale) = env::var("DEFAULT_LOCALE") {
            self.site.default_locale = locale;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !constants::is_supported_locale(&self.site.default_locale) {
            return Err(SiteError::Config(format!(
                "Unsupported default locale '{}'",
                self.site.default_locale
            )));
        }
        if self.site.page_size == 0 {
            return Err(SiteError::Config("page_size must be positive".to_string()));
        }
        Ok(())
    }
}
