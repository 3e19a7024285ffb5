//! The [`FormatKit`] seam: one text -> text styling pass.

/// A styling pass over a whole string.
///
/// `suppress_color` asks the kit to strip its markup and emit plain text
/// instead of escape sequences. Kits must be pure: the same input yields the
/// same output.
///
/// Closures implement the trait directly:
///
/// ```rust
/// use tintline_markup::FormatKit;
///
/// let shout = |_suppress: bool, text: &str| text.replace("!!", "!");
/// assert_eq!(shout.apply(false, "hey!!"), "hey!");
/// ```
pub trait FormatKit: Send + Sync {
    fn apply(&self, suppress_color: bool, text: &str) -> String;
}

impl<F> FormatKit for F
where
    F: Fn(bool, &str) -> String + Send + Sync,
{
    fn apply(&self, suppress_color: bool, text: &str) -> String {
        self(suppress_color, text)
    }
}
