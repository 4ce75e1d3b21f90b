//! `[render]` section configuration.
//!
//! Settings for the stock HTML embed renderer.
//!
//! # Example
//!
//! ```toml
//! [render]
//! width = 680                   # Player width in px
//! height = 570                  # Player height in px
//! audio_height = 150            # Player height for audio-only items
//! background = "#ffffff"        # Player background colour
//! magnifier_label = "Enlarge"   # Tooltip of the thumbnail magnifier
//! modal_class = "medial-modal"  # CSS class prefix for modal triggers
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub audio_height: u32,
    pub background: String,
    pub magnifier_label: String,
    pub modal_class: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 680,
            height: 570,
            audio_height: 150,
            background: "#ffffff".into(),
            magnifier_label: "Enlarge".into(),
            modal_class: "medial-modal".into(),
        }
    }
}

impl RenderConfig {
    pub const WIDTH: FieldPath = FieldPath::new("render.width");
    pub const HEIGHT: FieldPath = FieldPath::new("render.height");
    pub const AUDIO_HEIGHT: FieldPath = FieldPath::new("render.audio_height");
    pub const MODAL_CLASS: FieldPath = FieldPath::new("render.modal_class");

    /// Validate render configuration.
    ///
    /// # Checks
    /// - player dimensions must be non-zero
    /// - `modal_class` must be a single non-empty class name
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, value) in [
            (Self::WIDTH, self.width),
            (Self::HEIGHT, self.height),
            (Self::AUDIO_HEIGHT, self.audio_height),
        ] {
            if value == 0 {
                diag.error(field, "must be greater than 0");
            }
        }

        if self.modal_class.is_empty() || self.modal_class.contains(char::is_whitespace) {
            diag.error_with_hint(
                Self::MODAL_CLASS,
                "must be a single CSS class name",
                "use format like \"medial-modal\"",
            );
        }
    }
}
