use crate::error::{ConfigError, ConfigResult};
use crate::schema::HarnessConfig;
use approval_core::paths::absolutize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Toml,
    Json,
}

impl FileFormat {
    /// Detect file format from extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            Some("toml") => Ok(FileFormat::Toml),
            Some("json") => Ok(FileFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }
}

/// Loads and validates harness configuration files.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file; relative paths inside it resolve
    /// against the file's own directory.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<HarnessConfig> {
        let path = absolutize(path.as_ref())?;
        let format = FileFormat::from_path(&path)?;
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let mut config = self.parse_content(&content, format)?;
        if let Some(dir) = path.parent() {
            config.resolve_paths(dir);
        }
        info!(
            config = %path.display(),
            cases = config.cases.len(),
            "loaded harness configuration"
        );
        Ok(config)
    }

    /// Parse and validate configuration content directly
    pub fn parse_content(&self, content: &str, format: FileFormat) -> ConfigResult<HarnessConfig> {
        debug!(?format, "parsing harness configuration");
        let config: HarnessConfig = match format {
            FileFormat::Yaml => serde_yaml::from_str(content)?,
            FileFormat::Toml => toml::from_str(content)?,
            FileFormat::Json => serde_json::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }
}
