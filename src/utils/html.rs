//! HTML escaping for values written into generated markup.

use std::borrow::Cow;

/// Get the HTML entity for a character that is special inside attributes.
#[inline]
const fn attr_entity(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape a value for use inside a quoted HTML attribute.
///
/// Returns the input unchanged, without allocating, when nothing needs
/// escaping.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    let Some(first) = s.find(|c| attr_entity(c).is_some()) else {
        return Cow::Borrowed(s);
    };

    let mut result = String::with_capacity(s.len() + 8);
    result.push_str(&s[..first]);
    for c in s[first..].chars() {
        match attr_entity(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr_plain_is_borrowed() {
        assert!(matches!(escape_attr("medial-modal"), Cow::Borrowed(_)));
        assert_eq!(escape_attr(""), "");
    }

    #[test]
    fn test_escape_attr_special_chars() {
        assert_eq!(escape_attr("<b>"), "&lt;b&gt;");
        assert_eq!(escape_attr("a & b"), "a &amp; b");
        assert_eq!(escape_attr("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escape_attr("it's"), "it&#39;s");
    }

    #[test]
    fn test_escape_attr_keeps_prefix_and_unicode() {
        assert_eq!(escape_attr("Vergrößern <x>"), "Vergrößern &lt;x&gt;");
    }
}
