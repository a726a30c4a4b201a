//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::diff::{ContextMargins, RenderOptions};
use crate::error::{ConciseError, Result};
use crate::filter::FileFilter;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ConciseError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConciseError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from a YAML file, or use defaults when the file is missing.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::load(path)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ConciseError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ConciseError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `max_files` must be positive
    /// - `max_size_kb` must be positive
    /// - `elision_marker` must be non-empty
    /// - every `include`/`exclude` glob must compile
    pub fn validate(&self) -> Result<()> {
        if self.max_files == 0 {
            return Err(ConciseError::UserError(
                "config validation failed: max_files must be greater than 0".to_string(),
            ));
        }

        if self.max_size_kb == 0 {
            return Err(ConciseError::UserError(
                "config validation failed: max_size_kb must be greater than 0".to_string(),
            ));
        }

        if self.elision_marker.is_empty() {
            return Err(ConciseError::UserError(
                "config validation failed: elision_marker must be non-empty".to_string(),
            ));
        }

        self.file_filter().map(|_| ())
    }

    /// Margins for the context expander.
    pub fn margins(&self) -> ContextMargins {
        ContextMargins::new(self.before_lines, self.after_lines)
    }

    /// Options for the renderer.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            elision_marker: self.elision_marker.clone(),
        }
    }

    /// Compile the file selection settings.
    pub fn file_filter(&self) -> Result<FileFilter> {
        FileFilter::new(&self.include, &self.exclude, self.max_files, self.max_size_kb)
    }
}
