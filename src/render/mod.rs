//! Embed rendering boundary.
//!
//! The rewriter only decides *what* to embed; turning that decision into
//! markup is delegated to an [`EmbedRenderer`]. Two descriptor kinds cross
//! the boundary:
//!
//! | Descriptor         | Used for                 | Produces                    |
//! |--------------------|--------------------------|-----------------------------|
//! | [`ViewDescriptor`]  | `iframe` embeds          | inline player               |
//! | [`ModalDescriptor`] | `link`, `thumbnail`      | element opening a modal     |
//!
//! [`HtmlEmbedRenderer`] is the stock implementation.

mod html;

pub use html::HtmlEmbedRenderer;

use serde::Serialize;

/// Inline player request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewDescriptor<'a> {
    pub url: &'a str,
    pub launch_id: &'a str,
    pub audio_only: bool,
}

/// Launch endpoint action addressed by a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Play the item.
    View,
    /// List the item's thumbnail images.
    Thumbnails,
}

impl ActionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Thumbnails => "thumbnails",
        }
    }
}

/// Parameters for one launch endpoint action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LaunchAction<'a> {
    pub kind: ActionKind,
    pub launch_id: &'a str,
    pub audio_only: bool,
}

impl<'a> LaunchAction<'a> {
    pub const fn view(launch_id: &'a str, audio_only: bool) -> Self {
        Self {
            kind: ActionKind::View,
            launch_id,
            audio_only,
        }
    }

    pub const fn thumbnails(launch_id: &'a str) -> Self {
        Self {
            kind: ActionKind::Thumbnails,
            launch_id,
            audio_only: false,
        }
    }

    /// Query string in attribute-escaped form, e.g. `type=view&amp;l=42`.
    pub fn query(&self) -> String {
        let mut query = format!("type={}&amp;l={}", self.kind.as_str(), self.launch_id);
        if self.audio_only {
            query.push_str("&amp;audioonly=1");
        }
        query
    }
}

/// Decoration shown on a modal trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalIcon {
    Magnifier,
}

/// Modal trigger request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModalDescriptor<'a> {
    pub launch_id: &'a str,
    /// Thumbnail listing to display in the trigger, if any.
    pub thumbnail: Option<LaunchAction<'a>>,
    /// Action opened when the trigger is activated.
    pub view: LaunchAction<'a>,
    pub icon: Option<ModalIcon>,
    /// Inner HTML of the original anchor.
    pub label: &'a str,
    /// Render the label as visible text.
    pub show_label: bool,
    pub audio_only: bool,
}

impl<'a> ModalDescriptor<'a> {
    /// Text link opening the player.
    pub const fn link(launch_id: &'a str, label: &'a str, audio_only: bool) -> Self {
        Self {
            launch_id,
            thumbnail: None,
            view: LaunchAction::view(launch_id, audio_only),
            icon: None,
            label,
            show_label: true,
            audio_only,
        }
    }

    /// Thumbnail with magnifier opening the player.
    pub const fn thumbnail(launch_id: &'a str, label: &'a str, audio_only: bool) -> Self {
        Self {
            launch_id,
            thumbnail: Some(LaunchAction::thumbnails(launch_id)),
            view: LaunchAction::view(launch_id, audio_only),
            icon: Some(ModalIcon::Magnifier),
            label,
            show_label: true,
            audio_only,
        }
    }
}

/// Produces replacement markup for launch links.
pub trait EmbedRenderer {
    fn render_view(&self, view: &ViewDescriptor<'_>) -> String;

    fn render_modal(&self, modal: &ModalDescriptor<'_>) -> String;
}

impl<R: EmbedRenderer + ?Sized> EmbedRenderer for &R {
    fn render_view(&self, view: &ViewDescriptor<'_>) -> String {
        (**self).render_view(view)
    }

    fn render_modal(&self, modal: &ModalDescriptor<'_>) -> String {
        (**self).render_modal(modal)
    }
}

impl<R: EmbedRenderer + ?Sized> EmbedRenderer for Box<R> {
    fn render_view(&self, view: &ViewDescriptor<'_>) -> String {
        (**self).render_view(view)
    }

    fn render_modal(&self, modal: &ModalDescriptor<'_>) -> String {
        (**self).render_modal(modal)
    }
}
