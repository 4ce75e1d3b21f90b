//! Launch reference extraction.
//!
//! Recognizes anchors pointing at the MEDIAL launch endpoint in one of three
//! spellings and pulls out the parameters the rewriter needs:
//!
//! ```text
//! <a href="https://lms.example.edu/mod/helixmedia/launch.php?type=1&amp;l=42&amp;medialembed=link">
//!          └──────────── marker ─────────────────┘               └─ id ─┘             └ embed ┘
//! ```
//!
//! | Marker               | Spelling                                          |
//! |----------------------|---------------------------------------------------|
//! | `SiteRoot`           | `<site root>/mod/helixmedia/launch.php`           |
//! | `Placeholder`        | `{{{medial_launch_base}}}/mod/helixmedia/launch.php` |
//! | `EncodedPlaceholder` | `%7B%7B%7Bmedial_launch_base%7D%7D%7D/mod/...`    |

use std::borrow::Cow;

use serde::Serialize;

/// Path of the launch endpoint below the site root.
pub const LAUNCH_PATH: &str = "/mod/helixmedia/launch.php";

/// Base URL placeholder as stored in authored content.
pub const PLACEHOLDER: &str = "{{{medial_launch_base}}}";

/// Percent-encoded form of [`PLACEHOLDER`].
pub const PLACEHOLDER_ENCODED: &str = "%7B%7B%7Bmedial_launch_base%7D%7D%7D";

const LAUNCH_ID_PARAM: &str = "&amp;l=";
const EMBED_PARAM: &str = "medialembed=";
const AUDIO_ONLY_PARAM: &str = "audioonly=";

/// Which spelling of the launch URL was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchMarker {
    SiteRoot,
    Placeholder,
    EncodedPlaceholder,
}

impl LaunchMarker {
    /// Placeholder token to replace with the site root, if any.
    pub const fn token(self) -> Option<&'static str> {
        match self {
            Self::SiteRoot => None,
            Self::Placeholder => Some(PLACEHOLDER),
            Self::EncodedPlaceholder => Some(PLACEHOLDER_ENCODED),
        }
    }

    #[inline]
    pub const fn is_placeholder(self) -> bool {
        !matches!(self, Self::SiteRoot)
    }
}

/// Presentation requested through `medialembed=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EmbedType {
    /// Inline player.
    #[default]
    Iframe,
    /// Text link opening a modal player.
    Link,
    /// Thumbnail opening a modal player.
    Thumbnail,
    /// Anything else, kept verbatim.
    Other(String),
}

impl EmbedType {
    pub fn parse(value: &str) -> Self {
        match value {
            "iframe" => Self::Iframe,
            "link" => Self::Link,
            "thumbnail" => Self::Thumbnail,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Iframe => "iframe",
            Self::Link => "link",
            Self::Thumbnail => "thumbnail",
            Self::Other(value) => value,
        }
    }
}

impl Serialize for EmbedType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Parameters of one recognized launch anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchRef<'a> {
    /// Launch URL with any placeholder resolved to the site root.
    pub url: Cow<'a, str>,
    /// Value of the `l=` parameter up to the next `&` (may be empty).
    pub launch_id: &'a str,
    pub embed: EmbedType,
    pub audio_only: bool,
    pub marker: LaunchMarker,
}

/// Extract a launch reference from an anchor fragment.
///
/// `site_root` must not end with `/`. Returns `None` when no marker is present
/// or the URL attribute is not closed by `"`.
pub fn extract<'a>(fragment: &'a str, site_root: &str) -> Option<LaunchRef<'a>> {
    let (marker, start) = find_marker(fragment, site_root)?;

    let (end, launch_id) = match find_from(fragment, LAUNCH_ID_PARAM, start) {
        Some(lp) => {
            let id_start = lp + LAUNCH_ID_PARAM.len();
            let end = find_from(fragment, "\"", id_start)?;
            let id = &fragment[id_start..end];
            (end, id.split('&').next().unwrap_or(id))
        }
        None => (find_from(fragment, "\"", start)?, ""),
    };

    let raw_url = &fragment[start..end];
    let url = match marker.token() {
        Some(token) => Cow::Owned(raw_url.replacen(token, site_root, 1)),
        None => Cow::Borrowed(raw_url),
    };

    let embed = param_value(fragment, EMBED_PARAM)
        .map(EmbedType::parse)
        .unwrap_or_default();
    let audio_only = param_value(fragment, AUDIO_ONLY_PARAM).is_some_and(is_truthy);

    Some(LaunchRef {
        url,
        launch_id,
        embed,
        audio_only,
        marker,
    })
}

/// Locate the first marker present, in priority order.
fn find_marker(fragment: &str, site_root: &str) -> Option<(LaunchMarker, usize)> {
    let site_marker = format!("{site_root}{LAUNCH_PATH}");
    let placeholder = format!("{PLACEHOLDER}{LAUNCH_PATH}");
    let encoded = format!("{PLACEHOLDER_ENCODED}{LAUNCH_PATH}");

    // An empty site root would match any relative launch path.
    let site_hit = if site_root.is_empty() {
        None
    } else {
        fragment.find(&site_marker)
    };

    site_hit
        .map(|pos| (LaunchMarker::SiteRoot, pos))
        .or_else(|| fragment.find(&placeholder).map(|pos| (LaunchMarker::Placeholder, pos)))
        .or_else(|| {
            fragment
                .find(&encoded)
                .map(|pos| (LaunchMarker::EncodedPlaceholder, pos))
        })
}

#[inline]
fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack.get(from..)?.find(needle).map(|pos| from + pos)
}

/// Value following `key`, clamped at the next parameter or attribute boundary.
fn param_value<'a>(fragment: &'a str, key: &str) -> Option<&'a str> {
    let start = fragment.find(key)? + key.len();
    let rest = &fragment[start..];
    let end = rest
        .find(|c: char| matches!(c, '&' | '"' | '\'' | '>') || c.is_ascii_whitespace())
        .unwrap_or(rest.len());
    let value = &rest[..end];
    (!value.is_empty()).then_some(value)
}

fn is_truthy(value: &str) -> bool {
    ["1", "true", "yes", "on"]
        .iter()
        .any(|t| value.eq_ignore_ascii_case(t))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "https://site.example";

    #[test]
    fn test_extract_site_root_marker() {
        let fragment = "<a href=\"https://site.example/mod/helixmedia/launch.php?type=1&amp;l=42&amp;medialembed=iframe&amp;audioonly=1\">";
        let launch = extract(fragment, ROOT).unwrap();

        assert_eq!(launch.marker, LaunchMarker::SiteRoot);
        assert_eq!(launch.launch_id, "42");
        assert_eq!(launch.embed, EmbedType::Iframe);
        assert!(launch.audio_only);
        assert_eq!(
            launch.url,
            "https://site.example/mod/helixmedia/launch.php?type=1&amp;l=42&amp;medialembed=iframe&amp;audioonly=1"
        );
    }

    #[test]
    fn test_extract_launch_id_when_last_param() {
        let fragment = "<a href=\"https://site.example/mod/helixmedia/launch.php?medialembed=link&amp;l=42\">";
        let launch = extract(fragment, ROOT).unwrap();

        assert_eq!(launch.launch_id, "42");
        assert_eq!(launch.embed, EmbedType::Link);
        assert!(!launch.audio_only);
    }

    #[test]
    fn test_extract_placeholder_marker() {
        let fragment =
            "<a href=\"{{{medial_launch_base}}}/mod/helixmedia/launch.php?type=1&amp;l=7\">";
        let launch = extract(fragment, "https://example.org").unwrap();

        assert_eq!(launch.marker, LaunchMarker::Placeholder);
        assert_eq!(
            launch.url,
            "https://example.org/mod/helixmedia/launch.php?type=1&amp;l=7"
        );
        assert_eq!(launch.launch_id, "7");
    }

    #[test]
    fn test_extract_encoded_placeholder_marker() {
        let fragment = "<a href=\"%7B%7B%7Bmedial_launch_base%7D%7D%7D/mod/helixmedia/launch.php?x=1&amp;l=9\">";
        let launch = extract(fragment, "https://example.org").unwrap();

        assert_eq!(launch.marker, LaunchMarker::EncodedPlaceholder);
        assert_eq!(
            launch.url,
            "https://example.org/mod/helixmedia/launch.php?x=1&amp;l=9"
        );
    }

    #[test]
    fn test_extract_marker_at_position_zero() {
        let fragment = "{{{medial_launch_base}}}/mod/helixmedia/launch.php?&amp;l=5\" <a>";
        let launch = extract(fragment, ROOT).unwrap();

        assert_eq!(launch.marker, LaunchMarker::Placeholder);
        assert_eq!(launch.launch_id, "5");
        assert_eq!(launch.url, "https://site.example/mod/helixmedia/launch.php?&amp;l=5");
    }

    #[test]
    fn test_extract_prefers_site_root_marker() {
        let fragment = "<a data-x=\"{{{medial_launch_base}}}/mod/helixmedia/launch.php\" href=\"https://site.example/mod/helixmedia/launch.php?&amp;l=1\">";
        let launch = extract(fragment, ROOT).unwrap();

        assert_eq!(launch.marker, LaunchMarker::SiteRoot);
        assert_eq!(launch.launch_id, "1");
    }

    #[test]
    fn test_extract_without_launch_id() {
        let fragment = "<a href=\"https://site.example/mod/helixmedia/launch.php?type=1\">";
        let launch = extract(fragment, ROOT).unwrap();

        assert_eq!(launch.launch_id, "");
        assert_eq!(launch.url, "https://site.example/mod/helixmedia/launch.php?type=1");
    }

    #[test]
    fn test_extract_unclosed_attribute_fails() {
        let fragment = "<a href='https://site.example/mod/helixmedia/launch.php?&amp;l=3'>";
        assert!(extract(fragment, ROOT).is_none());
    }

    #[test]
    fn test_extract_no_marker() {
        assert!(extract("<a href=\"https://other.example/page\">", ROOT).is_none());
        assert!(extract("<a href=\"https://site.example/mod/page/view.php\">", ROOT).is_none());
    }

    #[test]
    fn test_extract_empty_root_ignores_relative_path() {
        let fragment = "<a href=\"/mod/helixmedia/launch.php?&amp;l=3\">";
        assert!(extract(fragment, "").is_none());
    }

    #[test]
    fn test_embed_type_parse() {
        assert_eq!(EmbedType::parse("iframe"), EmbedType::Iframe);
        assert_eq!(EmbedType::parse("link"), EmbedType::Link);
        assert_eq!(EmbedType::parse("thumbnail"), EmbedType::Thumbnail);
        assert_eq!(EmbedType::parse("popup"), EmbedType::Other("popup".into()));
        assert_eq!(EmbedType::parse("popup").as_str(), "popup");
    }

    #[test]
    fn test_param_value_clamps() {
        assert_eq!(param_value("x?medialembed=link&amp;", EMBED_PARAM), Some("link"));
        assert_eq!(param_value("x?medialembed=link\">", EMBED_PARAM), Some("link"));
        assert_eq!(param_value("x?medialembed=link", EMBED_PARAM), Some("link"));
        assert_eq!(param_value("x?medialembed=&amp;", EMBED_PARAM), None);
        assert_eq!(param_value("x?other=1", EMBED_PARAM), None);
    }

    #[test]
    fn test_audio_only_values() {
        for (value, expected) in [("1", true), ("TRUE", true), ("0", false), ("no", false)] {
            let fragment = format!(
                "<a href=\"https://site.example/mod/helixmedia/launch.php?audioonly={value}&amp;l=1\">"
            );
            assert_eq!(extract(&fragment, ROOT).unwrap().audio_only, expected, "{value}");
        }
    }

    #[test]
    fn test_marker_tokens() {
        assert_eq!(LaunchMarker::SiteRoot.token(), None);
        assert_eq!(LaunchMarker::Placeholder.token(), Some(PLACEHOLDER));
        assert!(LaunchMarker::EncodedPlaceholder.is_placeholder());
        assert!(!LaunchMarker::SiteRoot.is_placeholder());
    }
}
