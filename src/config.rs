use anyhow::Result;
use figment::{providers::{Env, Format, Serialized, Toml}, Figment};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = "config/default.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub grid: GridConfig,
    pub files: FilesConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig { pub name: String }

impl Default for GridConfig {
    fn default() -> Self {
        Self { name: "Energy Grid".to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    pub plants: PathBuf,
    pub demands: PathBuf,
    pub lines: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            plants: PathBuf::from("Plants.txt"),
            demands: PathBuf::from("Demands.txt"),
            lines: PathBuf::from("TransLines.dat"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub format: ReportFormat,
    /// Also write the report here when set
    pub output: Option<PathBuf>,
}

impl Config {
    /// Built-in defaults, then `config/default.toml` (or `$GRID_CONFIG`), then `GRID__*` env vars
    pub fn load() -> Result<Self> {
        let path = std::env::var("GRID_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(path)
    }

    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path: PathBuf = path.into();
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("GRID__").split("__"));
        Ok(figment.extract()?)
    }
}
