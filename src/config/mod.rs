//! Filter configuration management for `medial.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── filter     # [filter]
//! │   ├── render     # [render]
//! │   └── site       # [site]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Global config handle
//! └── mod.rs         # MedialConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section    | Purpose                                          |
//! |------------|--------------------------------------------------|
//! | `[site]`   | Site root substituted for launch placeholders    |
//! | `[filter]` | Format allow-list and exclusion zone policy      |
//! | `[render]` | Player dimensions and modal trigger styling      |

pub mod section;
pub mod types;

pub use section::{FilterSectionConfig, RenderConfig, SiteSectionConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config};

use crate::filter::ZoneMode;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing medial.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedialConfig {
    /// Path of the loaded config file, empty when running on defaults
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site context
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Format gate and zone settings
    #[serde(default)]
    pub filter: FilterSectionConfig,

    /// Stock renderer settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub site_root: Option<String>,
    pub formats: Option<String>,
    pub zones: Option<ZoneMode>,
}

impl MedialConfig {
    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist, then apply `overrides` and validate.
    pub fn load(path: &Path, overrides: &ConfigOverrides) -> Result<Self> {
        let mut diag = ConfigDiagnostics::new();

        let mut config = if path.exists() {
            let mut config = Self::from_path(path, &mut diag)?;
            config.config_path = path.to_path_buf();
            config
        } else {
            crate::debug!("config"; "{} not found, using defaults", path.display());
            Self::default()
        };

        config.apply_overrides(overrides);
        config.finalize();
        config.validate_into(&mut diag);

        diag.print_warnings();
        if let Err(e) = diag.into_result() {
            return Err(ConfigError::Diagnostics(e).into());
        }
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path, diag: &mut ConfigDiagnostics) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        for field in ignored {
            diag.unknown_field(field);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Site root without trailing slash.
    #[inline]
    pub fn site_root(&self) -> &str {
        self.site.root()
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-line overrides.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        Self::update_option(&mut self.site.root, overrides.site_root.as_ref());
        Self::update_option(&mut self.filter.formats, overrides.formats.as_ref());
        Self::update_option(&mut self.filter.zones, overrides.zones.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize values after loading.
    fn finalize(&mut self) {
        self.site.normalize();
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting all errors at once.
    fn validate_into(&self, diag: &mut ConfigDiagnostics) {
        self.site.validate(diag);
        self.filter.validate(diag);
        self.render.validate(diag);
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> MedialConfig {
    let (parsed, ignored) = MedialConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
