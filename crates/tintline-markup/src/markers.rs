//! Inline style markers: `*bold*`, `~strike~`, `-italic-`, `_underline_`,
//! `!blink!`, `#reverse#`.
//!
//! Each delimiter is swept once with a non-greedy pattern, in the order
//! listed. A sweep does not re-enter its own delimiter, so `*a*b*c*` pairs
//! the first two and last two stars (`a` and `c` bold, `b` plain) rather
//! than nesting.
//!
//! ```rust
//! use tintline_markup::apply_markers;
//!
//! assert_eq!(apply_markers("*hi* there", true), "hi there");
//! assert_eq!(apply_markers("*hi*", false), "\x1b[1mhi\x1b[0m");
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tintline_palette::sgr;

use crate::kit::FormatKit;

struct Marker {
    pattern: Regex,
    sgr: &'static str,
}

fn marker(pattern: &str, sgr: &'static str) -> Marker {
    Marker {
        pattern: Regex::new(pattern).expect("marker pattern is valid"),
        sgr,
    }
}

static MARKERS: Lazy<[Marker; 6]> = Lazy::new(|| {
    [
        marker(r"(\*)(.*?)\*", sgr::BOLD),
        marker(r"(~)(.*?)~", sgr::STRIKETHROUGH),
        marker(r"(-)(.*?)-", sgr::ITALIC),
        marker(r"(_)(.*?)_", sgr::UNDERLINE),
        marker(r"(!)(.*?)!", sgr::BLINK),
        marker(r"(#)(.*?)#", sgr::REVERSE),
    ]
});

/// Applies every inline marker to `text`.
///
/// With `suppress_color` the delimiters are removed and only the inner text
/// remains; otherwise the inner text is wrapped in the style's SGR code and
/// a reset.
pub fn apply_markers(text: &str, suppress_color: bool) -> String {
    let mut current = text.to_string();
    for marker in MARKERS.iter() {
        if !marker.pattern.is_match(&current) {
            continue;
        }
        current = marker
            .pattern
            .replace_all(&current, |caps: &Captures| {
                let inner = &caps[2];
                if suppress_color {
                    inner.to_string()
                } else {
                    format!("{}{}{}", marker.sgr, inner, sgr::RESET)
                }
            })
            .into_owned();
    }
    current
}

/// The inline marker pass as a [`FormatKit`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineMarkers;

impl FormatKit for InlineMarkers {
    fn apply(&self, suppress_color: bool, text: &str) -> String {
        apply_markers(text, suppress_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Plain (suppressed) mode
    // =========================================================================

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(apply_markers("hello world", true), "hello world");
        assert_eq!(apply_markers("hello world", false), "hello world");
    }

    #[test]
    fn test_each_delimiter_stripped() {
        assert_eq!(apply_markers("*b*", true), "b");
        assert_eq!(apply_markers("~s~", true), "s");
        assert_eq!(apply_markers("-i-", true), "i");
        assert_eq!(apply_markers("_u_", true), "u");
        assert_eq!(apply_markers("!k!", true), "k");
        assert_eq!(apply_markers("#r#", true), "r");
    }

    #[test]
    fn test_unpaired_delimiter_left_alone() {
        assert_eq!(apply_markers("5 * 3", true), "5 * 3");
        assert_eq!(apply_markers("well-known", true), "well-known");
    }

    // =========================================================================
    // Styled mode
    // =========================================================================

    #[test]
    fn test_each_delimiter_styled() {
        assert_eq!(apply_markers("*b*", false), "\x1b[1mb\x1b[0m");
        assert_eq!(apply_markers("~s~", false), "\x1b[9ms\x1b[0m");
        assert_eq!(apply_markers("-i-", false), "\x1b[3mi\x1b[0m");
        assert_eq!(apply_markers("_u_", false), "\x1b[4mu\x1b[0m");
        assert_eq!(apply_markers("!k!", false), "\x1b[5mk\x1b[0m");
        assert_eq!(apply_markers("#r#", false), "\x1b[7mr\x1b[0m");
    }

    #[test]
    fn test_text_around_marker() {
        assert_eq!(
            apply_markers("a *b* c", false),
            "a \x1b[1mb\x1b[0m c"
        );
    }

    #[test]
    fn test_different_delimiters_in_one_string() {
        assert_eq!(apply_markers("*b* and _u_", true), "b and u");
    }

    #[test]
    fn test_different_delimiters_nested() {
        assert_eq!(
            apply_markers("*_x_*", false),
            "\x1b[1m\x1b[4mx\x1b[0m\x1b[0m"
        );
    }

    // =========================================================================
    // Shortest-match semantics
    // =========================================================================

    #[test]
    fn test_non_greedy_pairs_left_to_right() {
        assert_eq!(apply_markers("*a*b*c*", true), "abc");
        assert_eq!(
            apply_markers("*a*b*c*", false),
            "\x1b[1ma\x1b[0mb\x1b[1mc\x1b[0m"
        );
    }

    #[test]
    fn test_odd_delimiter_count_leaves_trailing() {
        assert_eq!(apply_markers("*a*b*", true), "ab*");
    }

    #[test]
    fn test_empty_span() {
        assert_eq!(apply_markers("**", true), "");
        assert_eq!(apply_markers("**", false), "\x1b[1m\x1b[0m");
    }

    #[test]
    fn test_does_not_cross_lines() {
        assert_eq!(apply_markers("*a\nb*", true), "*a\nb*");
    }

    #[test]
    fn test_kit_delegates() {
        assert_eq!(InlineMarkers.apply(true, "*x*"), "x");
    }
}
