//! MEDIAL launch link filter.
//!
//! Rewrites anchors pointing at the MEDIAL launch endpoint into embedded
//! players, modal links or thumbnails.
//!
//! # Architecture
//!
//! ```text
//! text + options
//!      │
//!      ▼
//! ┌─────────────┐  format not allow-listed / unset
//! │ format gate │ ───────────────────────────────▶ text unchanged
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐     ┌──────────────────────────────┐
//! │  tokenize   │ ──▶ │ rewrite (zones, skip, launch)│ ──▶ output
//! └─────────────┘     └──────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - `tokenize`: lossless tag/text fragment split
//! - `zone`: `<script>` / `nolink` exclusion zones
//! - `launch`: launch URL and parameter extraction
//! - `rewrite`: the single-pass rewriter

mod launch;
mod rewrite;
mod tokenize;
mod zone;

pub use launch::{
    EmbedType, LAUNCH_PATH, LaunchMarker, LaunchRef, PLACEHOLDER, PLACEHOLDER_ENCODED, extract,
};
pub use rewrite::{Rewriter, ScanEntry};
pub use tokenize::{Fragment, FragmentKind, Fragments, tokenize};
pub use zone::{ZoneMode, ZoneTracker, is_zone_start};

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::MedialConfig;
use crate::render::{EmbedRenderer, HtmlEmbedRenderer};

/// Per-call options supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Format the text was authored in. `None` means the caller cannot tell,
    /// and the text is returned untouched.
    #[serde(default, rename = "originalformat")]
    pub original_format: Option<String>,
}

impl FilterOptions {
    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            original_format: Some(format.into()),
        }
    }
}

/// Launch link filter bound to a configuration snapshot and a renderer.
#[derive(Debug, Clone)]
pub struct MedialFilter<R = HtmlEmbedRenderer> {
    config: Arc<MedialConfig>,
    renderer: R,
}

impl MedialFilter<HtmlEmbedRenderer> {
    /// Filter using the stock renderer configured from `[render]`.
    pub fn from_config(config: Arc<MedialConfig>) -> Self {
        let renderer = HtmlEmbedRenderer::new(config.render.clone());
        Self { config, renderer }
    }
}

impl<R: EmbedRenderer> MedialFilter<R> {
    pub fn new(config: Arc<MedialConfig>, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &MedialConfig {
        &self.config
    }

    /// Whether text in `options` goes through the rewriter.
    pub fn applies(&self, options: &FilterOptions) -> bool {
        // Without a format we are likely formatting a plain string, where
        // injected markup could be stripped again later.
        options
            .original_format
            .as_deref()
            .is_some_and(|format| self.config.filter.allows(format))
    }

    /// Filter `text`, returning it untouched when the format gate is closed.
    pub fn filter<'a>(&self, text: &'a str, options: &FilterOptions) -> Cow<'a, str> {
        if !self.applies(options) {
            return Cow::Borrowed(text);
        }
        Cow::Owned(self.rewriter().rewrite(text))
    }

    /// Launch references the rewriter would act on, ignoring the format gate.
    pub fn scan<'a>(&self, fragments: &Fragments<'a>) -> Vec<ScanEntry<'a>> {
        self.rewriter().scan(fragments)
    }

    fn rewriter(&self) -> Rewriter<'_, R> {
        Rewriter::new(
            self.config.site_root(),
            self.config.filter.zones,
            &self.renderer,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    const CONFIG: &str = "[site]\nroot = \"https://site.example\"\n[filter]\nformats = \"1,4\"\n";

    fn medial() -> MedialFilter {
        MedialFilter::from_config(Arc::new(test_parse_config(CONFIG)))
    }

    fn launch_anchor(params: &str) -> String {
        format!("<a href=\"https://site.example/mod/helixmedia/launch.php?type=1{params}\">")
    }

    #[test]
    fn test_unset_format_passes_through() {
        let input = format!("{}Watch</a>", launch_anchor("&amp;l=42"));
        let out = medial().filter(&input, &FilterOptions::default());
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, input);
    }

    #[test]
    fn test_format_not_allowed_passes_through() {
        let input = format!("{}Watch</a>", launch_anchor("&amp;l=42"));
        let out = medial().filter(&input, &FilterOptions::with_format("2"));
        assert_eq!(out, input);
    }

    #[test]
    fn test_allowed_format_rewrites() {
        let input = format!(
            "<p>{}Watch</a></p>",
            launch_anchor("&amp;l=42&amp;medialembed=iframe&amp;audioonly=1")
        );
        let out = medial().filter(&input, &FilterOptions::with_format("4"));

        assert!(out.starts_with("<p><iframe "));
        assert!(out.contains("id=\"hmlvid-42\""));
        assert!(out.contains("height:150px;"));
        assert!(!out.contains("Watch"));
        assert!(out.ends_with("</iframe></p>"));
    }

    #[test]
    fn test_placeholder_resolution() {
        let input = "<a href=\"{{{medial_launch_base}}}/mod/helixmedia/launch.php?type=1&amp;l=7\">x</a>";
        let config = test_parse_config(
            "[site]\nroot = \"https://example.org\"\n[filter]\nformats = \"1\"\n",
        );
        let out = MedialFilter::from_config(Arc::new(config))
            .filter(input, &FilterOptions::with_format("1"));

        assert!(out.contains(
            "src=\"https://example.org/mod/helixmedia/launch.php?type=1&amp;l=7\""
        ));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let medial = medial();
        let options = FilterOptions::with_format("1");
        let input = format!(
            "<div>{}A</a> and {}B</a> and {}C</a></div>",
            launch_anchor("&amp;l=1"),
            launch_anchor("&amp;l=2&amp;medialembed=link"),
            launch_anchor("&amp;l=3&amp;medialembed=thumbnail"),
        );

        let once = medial.filter(&input, &options).into_owned();
        let twice = medial.filter(&once, &options);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_custom_renderer() {
        struct Fixed;
        impl EmbedRenderer for Fixed {
            fn render_view(&self, _: &crate::render::ViewDescriptor<'_>) -> String {
                "VIEW".into()
            }
            fn render_modal(&self, _: &crate::render::ModalDescriptor<'_>) -> String {
                "MODAL".into()
            }
        }

        let filter = MedialFilter::new(Arc::new(test_parse_config(CONFIG)), Fixed);
        let input = format!("{}x</a>", launch_anchor("&amp;l=1"));
        assert_eq!(filter.filter(&input, &FilterOptions::with_format("1")), "VIEW");
    }

    #[test]
    fn test_filter_options_deserialize() {
        let options: FilterOptions = serde_json::from_str(r#"{"originalformat":"1"}"#).unwrap();
        assert_eq!(options, FilterOptions::with_format("1"));

        let options: FilterOptions = serde_json::from_str("{}").unwrap();
        assert!(options.original_format.is_none());
    }

    #[test]
    fn test_scan_ignores_gate() {
        let medial = medial();
        let input = format!("{}x</a>", launch_anchor("&amp;l=9"));
        let fragments = tokenize(&input);
        let entries = medial.scan(&fragments);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].launch.launch_id, "9");
        assert_eq!(entries[0].label, "x");
    }
}
