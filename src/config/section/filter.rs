//! `[filter]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [filter]
//! formats = "0,1,4"    # Original formats the filter applies to
//! zones = "shallow"    # Exclusion zone depth policy: shallow | nested
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::filter::ZoneMode;

/// Filter gate and zone settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSectionConfig {
    /// Comma-separated allow-list of original format identifiers.
    pub formats: String,

    /// How exclusion zones nest.
    pub zones: ZoneMode,
}

impl Default for FilterSectionConfig {
    fn default() -> Self {
        Self {
            formats: "0,1,4".into(),
            zones: ZoneMode::default(),
        }
    }
}

impl FilterSectionConfig {
    pub const FORMATS: FieldPath = FieldPath::new("filter.formats");

    /// Allow-listed formats, trimmed, empty entries skipped.
    pub fn format_list(&self) -> impl Iterator<Item = &str> {
        self.formats
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }

    /// Whether `format` is allow-listed.
    pub fn allows(&self, format: &str) -> bool {
        self.format_list().any(|f| f == format)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.format_list().next().is_none() {
            diag.error_with_hint(
                Self::FORMATS,
                "no formats listed, the filter will never run",
                format!("set {}, e.g.: \"1,4\"", Self::FORMATS),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};
    use crate::filter::ZoneMode;

    #[test]
    fn test_filter_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.filter.formats, "0,1,4");
        assert_eq!(config.filter.zones, ZoneMode::Shallow);
    }

    #[test]
    fn test_filter_config_override() {
        let config = test_parse_config("[filter]\nformats = \"1\"\nzones = \"nested\"");
        assert!(config.filter.allows("1"));
        assert!(!config.filter.allows("4"));
        assert_eq!(config.filter.zones, ZoneMode::Nested);
    }

    #[test]
    fn test_format_list_trims_and_skips_empty() {
        let config = test_parse_config("[filter]\nformats = \" 1, 4,,\"");
        let formats: Vec<_> = config.filter.format_list().collect();
        assert_eq!(formats, vec!["1", "4"]);
        assert!(config.filter.allows("4"));
        assert!(!config.filter.allows(""));
    }

    #[test]
    fn test_empty_formats_rejected() {
        let config = test_parse_config("[filter]\nformats = \" , \"");
        let mut diag = ConfigDiagnostics::new();
        config.filter.validate(&mut diag);
        assert!(diag.has_errors());
    }

    #[test]
    fn test_unknown_zone_mode_rejected() {
        let result: Result<crate::config::MedialConfig, _> =
            toml::from_str("[filter]\nzones = \"deep\"");
        assert!(result.is_err());
    }
}
