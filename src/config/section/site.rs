//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! root = "https://lms.example.edu"   # Site root substituted for launch placeholders
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Site context of the filtered content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Absolute site root URL, without trailing slash.
    pub root: String,
}

impl SiteSectionConfig {
    pub const ROOT: FieldPath = FieldPath::new("site.root");

    /// Site root with any trailing `/` removed.
    pub fn root(&self) -> &str {
        self.root.trim_end_matches('/')
    }

    /// Strip the trailing slash in place.
    pub fn normalize(&mut self) {
        let len = self.root().len();
        self.root.truncate(len);
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `root` must be set
    /// - `root` must be an http(s) URL with a host
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.root.is_empty() {
            diag.error_with_hint(
                Self::ROOT,
                "site root is not configured, site-root launch links will not be recognized",
                format!("set {}, e.g.: \"https://lms.example.edu\"", Self::ROOT),
            );
            return;
        }

        match url::Url::parse(&self.root) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        Self::ROOT,
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://lms.example.edu",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        Self::ROOT,
                        "URL must have a valid host",
                        "use format like https://lms.example.edu",
                    );
                }
                if parsed.query().is_some() || parsed.fragment().is_some() {
                    diag.error(Self::ROOT, "site root must not carry a query or fragment");
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    Self::ROOT,
                    format!("invalid URL: {}", e),
                    "use format like https://lms.example.edu",
                );
            }
        }
    }
}
