//! Legacy color tags: `[content].colorname` and `[content].colorname-b`.
//!
//! Tags nest to any depth:
//!
//! ```rust
//! use tintline_markup::resolve_brackets;
//! use tintline_palette::{sgr, Palette};
//!
//! let palette = Palette::builtin();
//! let plain = resolve_brackets("[[Inner].blue Outer].green", true, &palette, None);
//! assert_eq!(plain, "Inner Outer");
//!
//! let styled = resolve_brackets("[[Inner].blue Outer].green", false, &palette, None);
//! let blue = palette.resolve("blue", false, None);
//! let green = palette.resolve("green", false, None);
//! assert_eq!(
//!     styled,
//!     format!("{green}{blue}Inner{reset}{green} Outer{reset}", reset = sgr::RESET)
//! );
//! ```
//!
//! # How nesting is resolved
//!
//! The tag pattern only accepts content without brackets, so each sweep over
//! the text matches the innermost tags. Every match is rendered into a
//! fragment stored in an arena and replaced in the text by a placeholder
//! token. The placeholder holds no brackets, so the enclosing tag becomes
//! matchable on the next sweep. When nothing matches any more, placeholders
//! are expanded in reverse creation order: outer fragments first, which
//! reintroduces the placeholders of their children for the next expansions.
//!
//! Inside a styled fragment, every child placeholder is followed by the
//! fragment's own opening sequence, so the outer color resumes after the
//! child's reset.
//!
//! Unbalanced brackets never match and pass through literally. A `[` that
//! belongs to an escape sequence never opens a tag, so styled text can be
//! resolved again without change.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tintline_palette::{sgr, Overrides, Palette};

use crate::kit::FormatKit;

static BRACKET_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\[\]]+)\]\.(\w+)(-b)?").expect("bracket tag pattern is valid")
});

/// An arena record: the placeholder standing in for a rendered tag.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fragment {
    placeholder: String,
    rendered: String,
}

/// Resolves every legacy tag in `text`.
///
/// `overrides` replace palette lookups for the names they contain.
pub fn resolve_brackets(
    text: &str,
    suppress_color: bool,
    palette: &Palette,
    overrides: Option<&Overrides>,
) -> String {
    if !BRACKET_TAG.is_match(text) {
        return text.to_string();
    }

    let sentinel = placeholder_sentinel(text);
    let mut arena: Vec<Fragment> = Vec::new();
    let mut working = text.to_string();

    loop {
        let swept = arena.len();
        let next = BRACKET_TAG
            .replace_all(&working, |caps: &Captures| {
                if follows_escape(&working, caps) {
                    return caps[0].to_string();
                }
                let content = &caps[1];
                let rendered = if suppress_color {
                    content.to_string()
                } else {
                    let mut open = palette.resolve(&caps[2], false, overrides);
                    if caps.get(3).is_some() {
                        open.push_str(sgr::BOLD);
                    }
                    let body = resume_after_children(content, sentinel, &open);
                    format!("{}{}{}", open, body, sgr::RESET)
                };
                let placeholder = format!("{sentinel}{}{sentinel}", arena.len());
                arena.push(Fragment {
                    placeholder: placeholder.clone(),
                    rendered,
                });
                placeholder
            })
            .into_owned();
        working = next;
        if arena.len() == swept {
            break;
        }
    }

    tracing::trace!(fragments = arena.len(), "resolved bracket tags");

    for fragment in arena.iter().rev() {
        working = working.replacen(&fragment.placeholder, &fragment.rendered, 1);
    }
    working
}

/// True when the match opens on the `[` of an escape sequence (`ESC [`),
/// which is styling output from an earlier pass rather than a tag.
fn follows_escape(haystack: &str, caps: &Captures) -> bool {
    caps.get(0)
        .and_then(|m| m.start().checked_sub(1))
        .is_some_and(|before| haystack.as_bytes()[before] == 0x1b)
}

/// Picks a private-use character absent from `text`.
///
/// Placeholders are `sentinel + counter + sentinel`; since the input never
/// contains the sentinel, every occurrence in the working text belongs to a
/// placeholder.
fn placeholder_sentinel(text: &str) -> char {
    ('\u{E000}'..='\u{F8FF}')
        .find(|c| !text.contains(*c))
        // A string holding all 6400 private-use characters still leaves the
        // supplementary private-use plane.
        .or_else(|| ('\u{F0000}'..='\u{FFFFD}').find(|c| !text.contains(*c)))
        .unwrap_or('\u{10FFFD}')
}

/// Appends `open` after each child placeholder found in `content`.
fn resume_after_children(content: &str, sentinel: char, open: &str) -> String {
    if !content.contains(sentinel) {
        return content.to_string();
    }
    let mut out = String::with_capacity(content.len() + open.len() * 2);
    // Splitting on the sentinel alternates text, counter, text, counter, ...
    for (i, part) in content.split(sentinel).enumerate() {
        if i % 2 == 0 {
            out.push_str(part);
        } else {
            out.push(sentinel);
            out.push_str(part);
            out.push(sentinel);
            out.push_str(open);
        }
    }
    out
}

/// The legacy tag pass as a [`FormatKit`].
#[derive(Debug, Clone, Copy)]
pub struct LegacyBrackets<'a> {
    palette: &'a Palette,
    overrides: Option<&'a Overrides>,
}

impl<'a> LegacyBrackets<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            overrides: None,
        }
    }

    /// Uses per-call escape overrides for the names they contain.
    pub fn with_overrides(mut self, overrides: &'a Overrides) -> Self {
        self.overrides = Some(overrides);
        self
    }
}

impl FormatKit for LegacyBrackets<'_> {
    fn apply(&self, suppress_color: bool, text: &str) -> String {
        resolve_brackets(text, suppress_color, self.palette, self.overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        Palette::builtin()
    }

    fn esc(name: &str) -> String {
        palette().resolve(name, false, None)
    }

    // =========================================================================
    // Suppressed mode
    // =========================================================================

    mod plain {
        use super::*;

        #[test]
        fn plain_text_unchanged() {
            assert_eq!(resolve_brackets("hello", true, &palette(), None), "hello");
        }

        #[test]
        fn single_tag_stripped() {
            assert_eq!(
                resolve_brackets("[Hello].red", true, &palette(), None),
                "Hello"
            );
        }

        #[test]
        fn bold_suffix_stripped() {
            assert_eq!(
                resolve_brackets("[Hello].red-b!", true, &palette(), None),
                "Hello!"
            );
        }

        #[test]
        fn nested_stripped() {
            assert_eq!(
                resolve_brackets("[a [b [c].red].green].blue", true, &palette(), None),
                "a b c"
            );
        }

        #[test]
        fn siblings_stripped() {
            assert_eq!(
                resolve_brackets("[A].red [B].blue", true, &palette(), None),
                "A B"
            );
        }
    }

    // =========================================================================
    // Styled mode
    // =========================================================================

    mod styled {
        use super::*;

        #[test]
        fn single_tag() {
            assert_eq!(
                resolve_brackets("[Hello].red", false, &palette(), None),
                format!("{}Hello{}", esc("red"), sgr::RESET)
            );
        }

        #[test]
        fn bold_suffix() {
            assert_eq!(
                resolve_brackets("[Hi].red-b", false, &palette(), None),
                format!("{}{}Hi{}", esc("red"), sgr::BOLD, sgr::RESET)
            );
        }

        #[test]
        fn unknown_color_uses_fallback() {
            let p = palette().with_fallback(tintline_palette::ColorSpec::rgb(9, 8, 7));
            assert_eq!(
                resolve_brackets("[x].nosuchcolor", false, &p, None),
                format!("\x1b[38;2;9;8;7mx{}", sgr::RESET)
            );
        }

        #[test]
        fn outer_resumes_after_inner() {
            let out = resolve_brackets("[a [b].blue c].green", false, &palette(), None);
            assert_eq!(
                out,
                format!(
                    "{g}a {b}b{r}{g} c{r}",
                    g = esc("green"),
                    b = esc("blue"),
                    r = sgr::RESET
                )
            );
        }

        #[test]
        fn bold_outer_resumes_bold() {
            let out = resolve_brackets("[[x].blue y].green-b", false, &palette(), None);
            let open = format!("{}{}", esc("green"), sgr::BOLD);
            assert_eq!(
                out,
                format!("{open}{b}x{r}{open} y{r}", b = esc("blue"), r = sgr::RESET)
            );
        }

        #[test]
        fn six_levels() {
            let colors = ["red", "green", "blue", "yellow", "cyan", "magenta"];
            let mut text = "core".to_string();
            for c in colors {
                text = format!("[{} {}].{}", c, text, c);
            }
            let out = resolve_brackets(&text, false, &palette(), None);
            for c in colors {
                assert!(out.contains(&esc(c)), "missing {}", c);
            }
            assert!(out.contains("core"));
            assert!(!out.contains('['));
        }

        #[test]
        fn overrides_take_precedence() {
            let mut overrides = Overrides::new();
            overrides.insert("red".to_string(), "<R>".to_string());
            assert_eq!(
                resolve_brackets("[x].red", false, &palette(), Some(&overrides)),
                format!("<R>x{}", sgr::RESET)
            );
        }
    }

    // =========================================================================
    // Edge cases
    // =========================================================================

    mod edge_cases {
        use super::*;

        #[test]
        fn unbalanced_open_passthrough() {
            let text = "[oops and more";
            assert_eq!(resolve_brackets(text, false, &palette(), None), text);
        }

        #[test]
        fn missing_color_passthrough() {
            let text = "[array] and [x].";
            assert_eq!(resolve_brackets(text, false, &palette(), None), text);
        }

        #[test]
        fn empty_content_not_a_tag() {
            let text = "[].red";
            assert_eq!(resolve_brackets(text, false, &palette(), None), text);
        }

        #[test]
        fn stray_bracket_beside_tag() {
            assert_eq!(
                resolve_brackets("[x [y].red", true, &palette(), None),
                "[x y"
            );
        }

        #[test]
        fn input_containing_private_use_chars() {
            let text = "\u{E000}[a\u{E000}1\u{E000}].red\u{E001}";
            assert_eq!(
                resolve_brackets(text, true, &palette(), None),
                "\u{E000}a\u{E000}1\u{E000}\u{E001}"
            );
        }

        #[test]
        fn escape_sequence_never_opens_a_tag() {
            let text = "\x1b[38;2;255;0;0mx\x1b[0m then y].blue";
            assert_eq!(resolve_brackets(text, false, &palette(), None), text);
            assert_eq!(resolve_brackets(text, true, &palette(), None), text);
        }

        #[test]
        fn styled_output_is_stable() {
            let once = resolve_brackets("[a [b].blue].red-b c].green", false, &palette(), None);
            assert_eq!(resolve_brackets(&once, false, &palette(), None), once);
        }

        #[test]
        fn many_siblings_counter_does_not_collide() {
            let text: String = (0..15).map(|i| format!("[{}].red", i)).collect();
            let expected: String = (0..15).map(|i| i.to_string()).collect();
            assert_eq!(resolve_brackets(&text, true, &palette(), None), expected);
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    #[test]
    fn test_sentinel_avoids_input() {
        assert_eq!(placeholder_sentinel("abc"), '\u{E000}');
        assert_eq!(placeholder_sentinel("\u{E000}"), '\u{E001}');
    }

    #[test]
    fn test_resume_after_children() {
        let s = '\u{E000}';
        let content = format!("a{s}0{s}b{s}1{s}");
        assert_eq!(
            resume_after_children(&content, s, "<o>"),
            format!("a{s}0{s}<o>b{s}1{s}<o>")
        );
    }

    #[test]
    fn test_kit_with_overrides() {
        let p = palette();
        let mut overrides = Overrides::new();
        overrides.insert("blue".to_string(), "<B>".to_string());
        let kit = LegacyBrackets::new(&p).with_overrides(&overrides);
        assert_eq!(kit.apply(false, "[x].blue"), format!("<B>x{}", sgr::RESET));
    }
}
