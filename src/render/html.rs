//! Stock HTML renderer.
//!
//! ```text
//! view  → <iframe style="..." src="URL" id="hmlvid-ID" allowfullscreen=...></iframe>
//! modal → <a href="#" class="medial-modal ..." data-medial-view="type=view&amp;l=ID">LABEL</a>
//! ```
//!
//! URLs, launch ids and labels come straight out of the source document's
//! attributes and text and are inserted as-is; configured strings are escaped.

use std::fmt::Write;

use super::{EmbedRenderer, ModalDescriptor, ModalIcon, ViewDescriptor};
use crate::config::RenderConfig;
use crate::utils::html::escape_attr;

/// Renders embeds as plain HTML elements styled through [`RenderConfig`].
#[derive(Debug, Clone)]
pub struct HtmlEmbedRenderer {
    config: RenderConfig,
}

impl Default for HtmlEmbedRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl HtmlEmbedRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn iframe_style(&self, audio_only: bool) -> String {
        let height = if audio_only {
            self.config.audio_height
        } else {
            self.config.height
        };
        format!(
            "overflow:hidden;border:0px none;background:{};width:{}px;height:{}px;",
            escape_attr(&self.config.background),
            self.config.width,
            height
        )
    }
}

impl EmbedRenderer for HtmlEmbedRenderer {
    fn render_view(&self, view: &ViewDescriptor<'_>) -> String {
        format!(
            "<iframe style=\"{}\" src=\"{}\" id=\"hmlvid-{}\" allowfullscreen=\"true\" \
             webkitallowfullscreen=\"true\" mozallowfullscreen=\"true\"></iframe>",
            self.iframe_style(view.audio_only),
            view.url,
            view.launch_id
        )
    }

    fn render_modal(&self, modal: &ModalDescriptor<'_>) -> String {
        let class = escape_attr(&self.config.modal_class);
        let variant = if modal.thumbnail.is_some() {
            "thumbnail"
        } else {
            "link"
        };

        let mut out = String::with_capacity(160 + modal.label.len());
        let _ = write!(
            out,
            "<a href=\"#\" class=\"{class} {class}-{variant}\" data-medial-launch=\"{}\" data-medial-view=\"{}\"",
            modal.launch_id,
            modal.view.query()
        );
        if let Some(thumbnail) = &modal.thumbnail {
            let _ = write!(out, " data-medial-thumbnail=\"{}\"", thumbnail.query());
        }
        if modal.audio_only {
            out.push_str(" data-medial-audioonly=\"1\"");
        }
        out.push('>');

        if modal.thumbnail.is_some() {
            let _ = write!(out, "<span class=\"{class}-image\"></span>");
        }
        if let Some(ModalIcon::Magnifier) = modal.icon {
            let label = escape_attr(&self.config.magnifier_label);
            let _ = write!(
                out,
                "<span class=\"{class}-magnifier\" title=\"{label}\" aria-label=\"{label}\"></span>"
            );
        }
        if modal.show_label {
            let _ = write!(out, "<span class=\"{class}-label\">{}</span>", modal.label);
        }

        out.push_str("</a>");
        out
    }
}

// ============================================================================
// Tests
// ============================================================================
