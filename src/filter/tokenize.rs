//! Fragment tokenizer.
//!
//! Splits an HTML string into alternating tag and text fragments:
//!
//! ```text
//! <p>Watch <a href="...">this</a></p>
//! ├─┘├────┘├─────────────┘├──┘├──┘├──┘
//! tag text  tag           text tag tag
//! ```
//!
//! The split is lossless: concatenating every fragment in order yields the
//! original input byte for byte. Nothing here understands HTML beyond the
//! `<...>` delimiter, so a `<` without a closing `>` is simply text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Any tag: `<`, a run of non-`>` characters, `>`.
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Kind of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// A `<...>` delimiter (opening, closing, comment, doctype...).
    Tag,
    /// Everything between two tags.
    Text,
}

/// A contiguous, non-empty slice of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fragment<'a> {
    pub kind: FragmentKind,
    pub text: &'a str,
}

impl<'a> Fragment<'a> {
    #[inline]
    pub const fn tag(text: &'a str) -> Self {
        Self {
            kind: FragmentKind::Tag,
            text,
        }
    }

    #[inline]
    pub const fn text(text: &'a str) -> Self {
        Self {
            kind: FragmentKind::Text,
            text,
        }
    }

    #[inline]
    pub const fn is_tag(&self) -> bool {
        matches!(self.kind, FragmentKind::Tag)
    }

    #[inline]
    pub const fn as_str(&self) -> &'a str {
        self.text
    }
}

/// Ordered fragment sequence with bounds-checked lookahead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Fragments<'a> {
    items: Vec<Fragment<'a>>,
}

impl<'a> Fragments<'a> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fragment at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Fragment<'a>> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fragment<'a>> {
        self.items.iter()
    }

    /// Reassemble the original input.
    pub fn concat(&self) -> String {
        let len = self.items.iter().map(|f| f.text.len()).sum();
        let mut out = String::with_capacity(len);
        for fragment in &self.items {
            out.push_str(fragment.text);
        }
        out
    }
}

impl<'s, 'a> IntoIterator for &'s Fragments<'a> {
    type Item = &'s Fragment<'a>;
    type IntoIter = std::slice::Iter<'s, Fragment<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Split `text` into tag and text fragments, dropping empty ones.
pub fn tokenize(text: &str) -> Fragments<'_> {
    let mut items = Vec::new();
    let mut last = 0;

    for m in TAG.find_iter(text) {
        if m.start() > last {
            items.push(Fragment::text(&text[last..m.start()]));
        }
        items.push(Fragment::tag(m.as_str()));
        last = m.end();
    }

    if last < text.len() {
        items.push(Fragment::text(&text[last..]));
    }

    Fragments { items }
}

// ============================================================================
// Tests
// ============================================================================
