//! Zone-aware link rewriting.
//!
//! One left-to-right pass over the fragment sequence. Each fragment goes
//! through these checks in order:
//!
//! 1. zone tracking: fragments in an exclusion zone are kept verbatim
//! 2. skip: fragments already folded into a replacement are dropped
//! 3. anchors: `<a` fragments with a launch URL are dispatched by embed type
//! 4. everything else is kept
//!
//! ```text
//! <a href=".../launch.php?...&amp;l=42">   Watch   </a>
//! └──────── replaced by embed ─────────┘ └ drop ┘ └drop┘
//! ```

use serde::Serialize;

use super::launch::{EmbedType, LaunchRef, extract};
use super::tokenize::{Fragments, tokenize};
use super::zone::{ZoneMode, ZoneTracker};
use crate::render::{EmbedRenderer, ModalDescriptor, ViewDescriptor};

/// Fragments following a replaced anchor: its label and its `</a>`.
const SUBSUMED_FRAGMENTS: usize = 2;

/// What to do with one fragment.
enum Step<'a> {
    Keep,
    Drop,
    Launch(LaunchRef<'a>),
}

/// Zone and skip state for one pass.
struct Walker<'c> {
    zones: ZoneTracker,
    skip: usize,
    site_root: &'c str,
}

impl<'c> Walker<'c> {
    fn new(zones: ZoneMode, site_root: &'c str) -> Self {
        Self {
            zones: ZoneTracker::new(zones),
            skip: 0,
            site_root,
        }
    }

    fn step<'a>(&mut self, fragment: &'a str) -> Step<'a> {
        if self.zones.visit(fragment) {
            return Step::Keep;
        }

        if self.skip > 0 {
            self.skip -= 1;
            return Step::Drop;
        }

        if !fragment.contains("<a") {
            return Step::Keep;
        }

        match extract(fragment, self.site_root) {
            Some(launch) => {
                if !matches!(launch.embed, EmbedType::Other(_)) {
                    self.skip = SUBSUMED_FRAGMENTS;
                }
                Step::Launch(launch)
            }
            None => {
                crate::debug!("filter"; "anchor without launch marker: {}", fragment);
                Step::Keep
            }
        }
    }
}

/// Whether a rewrite replaces the anchor of `launch`. Unknown embed types
/// are only rewritten when the URL came from a placeholder.
fn is_replaced(launch: &LaunchRef<'_>) -> bool {
    !matches!(launch.embed, EmbedType::Other(_)) || launch.marker.is_placeholder()
}

/// A launch reference found by [`Rewriter::scan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEntry<'a> {
    /// Index of the anchor fragment in the tokenized input.
    pub index: usize,
    #[serde(flatten)]
    pub launch: LaunchRef<'a>,
    /// Inner text of the anchor, if any.
    pub label: &'a str,
}

/// Rewrites launch anchors using an [`EmbedRenderer`].
#[derive(Debug, Clone, Copy)]
pub struct Rewriter<'c, R> {
    site_root: &'c str,
    zones: ZoneMode,
    renderer: &'c R,
}

impl<'c, R: EmbedRenderer> Rewriter<'c, R> {
    /// `site_root` must not end with `/`.
    pub const fn new(site_root: &'c str, zones: ZoneMode, renderer: &'c R) -> Self {
        Self {
            site_root,
            zones,
            renderer,
        }
    }

    /// Tokenize `text` and rewrite it.
    pub fn rewrite(&self, text: &str) -> String {
        self.rewrite_fragments(&tokenize(text))
    }

    /// Rewrite an already tokenized sequence.
    pub fn rewrite_fragments(&self, fragments: &Fragments<'_>) -> String {
        let mut walker = Walker::new(self.zones, self.site_root);
        let mut out = String::with_capacity(fragments.iter().map(|f| f.text.len()).sum());

        for (index, fragment) in fragments.iter().enumerate() {
            match walker.step(fragment.text) {
                Step::Keep => out.push_str(fragment.text),
                Step::Drop => {}
                Step::Launch(launch) => {
                    let label = fragments.get(index + 1).map_or("", |f| f.text);
                    match self.dispatch(&launch, label) {
                        Some(replacement) => out.push_str(&replacement),
                        None => out.push_str(fragment.text),
                    }
                }
            }
        }

        out
    }

    /// List the launch references a rewrite of `fragments` would act on.
    pub fn scan<'a>(&self, fragments: &Fragments<'a>) -> Vec<ScanEntry<'a>> {
        let mut walker = Walker::new(self.zones, self.site_root);

        fragments
            .iter()
            .enumerate()
            .filter_map(|(index, fragment)| match walker.step(fragment.text) {
                Step::Launch(launch) if is_replaced(&launch) => Some(ScanEntry {
                    index,
                    launch,
                    label: fragments.get(index + 1).map_or("", |f| f.text),
                }),
                Step::Launch(_) | Step::Keep | Step::Drop => None,
            })
            .collect()
    }

    /// Replacement markup for `launch`, or `None` to keep the anchor.
    fn dispatch(&self, launch: &LaunchRef<'_>, label: &str) -> Option<String> {
        let markup = match &launch.embed {
            EmbedType::Iframe => self.renderer.render_view(&ViewDescriptor {
                url: &launch.url,
                launch_id: launch.launch_id,
                audio_only: launch.audio_only,
            }),
            EmbedType::Link => self.renderer.render_modal(&ModalDescriptor::link(
                launch.launch_id,
                label,
                launch.audio_only,
            )),
            EmbedType::Thumbnail => self.renderer.render_modal(&ModalDescriptor::thumbnail(
                launch.launch_id,
                label,
                launch.audio_only,
            )),
            EmbedType::Other(kind) => {
                if !is_replaced(launch) {
                    crate::debug!("filter"; "unknown embed type `{}`, keeping anchor", kind);
                    return None;
                }
                format!("<a href='{}' target='_blank'>", launch.url)
            }
        };

        crate::debug!(
            "filter";
            "rewrote launch {} as {}",
            launch.launch_id,
            launch.embed.as_str()
        );
        Some(markup)
    }
}

// ============================================================================
// Tests
// ============================================================================
