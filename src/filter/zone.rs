//! Exclusion zones.
//!
//! Content inside `<script>` blocks and `<span class="nolink">` spans must not
//! be rewritten. [`ZoneTracker`] is fed every fragment in order and reports
//! whether the fragment falls inside a zone.
//!
//! Two depth policies are available (see [`ZoneMode`]):
//!
//! | Mode      | Entering fragment | Following fragments                      |
//! |-----------|-------------------|------------------------------------------|
//! | `Shallow` | excluded          | one more fragment excluded, then normal  |
//! | `Nested`  | excluded          | excluded until the matching close tag    |

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// `<script ...>` opening tag.
static SCRIPT_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^<script").unwrap());

/// `<span ...>` whose class list contains `nolink`.
static NOLINK_SPAN_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^<span[ \t\r\n](?:[^>]*[ \t\r\n])?class[ \t\r\n]*=[ \t\r\n]*"(?:[^"]*[ \t\r\n])?nolink"#,
    )
    .unwrap()
});

/// Any `<span>` or `<script>` opening tag.
static NESTED_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^<(?:span|script)(?:[ \t\r\n/>]|$)").unwrap());

/// Any `</span>` or `</script>` closing tag.
static NESTED_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^</(?:span|script)(?:[ \t\r\n>]|$)").unwrap());

/// Zone depth policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneMode {
    /// Depth drops by one on every fragment seen inside the zone, so only the
    /// opening tag and the fragment right after it are protected.
    #[default]
    Shallow,
    /// Nested `<span`/`<script` tags raise the depth and each closing tag
    /// lowers it; the zone ends when the depth returns to zero.
    Nested,
}

impl std::str::FromStr for ZoneMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shallow" => Ok(Self::Shallow),
            "nested" => Ok(Self::Nested),
            other => Err(format!("unknown zone mode `{other}` (expected shallow or nested)")),
        }
    }
}

/// Whether `fragment` opens an exclusion zone.
pub fn is_zone_start(fragment: &str) -> bool {
    SCRIPT_OPEN.is_match(fragment) || NOLINK_SPAN_OPEN.is_match(fragment)
}

#[inline]
fn opens_nested(fragment: &str) -> bool {
    NESTED_OPEN.is_match(fragment)
}

#[inline]
fn closes_zone(fragment: &str) -> bool {
    NESTED_CLOSE.is_match(fragment)
}

/// Exclusion depth state machine.
#[derive(Debug, Clone, Default)]
pub struct ZoneTracker {
    mode: ZoneMode,
    depth: usize,
}

impl ZoneTracker {
    pub const fn new(mode: ZoneMode) -> Self {
        Self { mode, depth: 0 }
    }

    /// Current exclusion depth.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Feed the next fragment. Returns `true` when it must be emitted verbatim.
    pub fn visit(&mut self, fragment: &str) -> bool {
        if self.depth == 0 {
            if is_zone_start(fragment) {
                self.depth = 1;
                return true;
            }
            return false;
        }

        match self.mode {
            ZoneMode::Shallow => self.depth -= 1,
            ZoneMode::Nested => {
                if closes_zone(fragment) {
                    self.depth -= 1;
                } else if opens_nested(fragment) {
                    self.depth += 1;
                }
            }
        }
        true
    }
}

// ============================================================================
// Tests
// ============================================================================
