//! Splitting text into display units.
//!
//! A display unit is what a gradient colors as one step: a grapheme cluster.
//! Clusters that form an emoji are kept whole and flagged so the gradient can
//! pass them through unstyled.

use unicode_segmentation::UnicodeSegmentation;

/// One rendering atom of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayUnit<'a> {
    /// A regular character, possibly with combining marks.
    Scalar(&'a str),
    /// An emoji, possibly made of several code points.
    Emoji(&'a str),
}

impl<'a> DisplayUnit<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            DisplayUnit::Scalar(s) | DisplayUnit::Emoji(s) => s,
        }
    }

    pub fn is_emoji(&self) -> bool {
        matches!(self, DisplayUnit::Emoji(_))
    }
}

/// Splits `text` into display units.
///
/// ```rust
/// use tintline_markup::{display_units, DisplayUnit};
///
/// let units = display_units("a👍🏽b");
/// assert_eq!(
///     units,
///     vec![
///         DisplayUnit::Scalar("a"),
///         DisplayUnit::Emoji("👍🏽"),
///         DisplayUnit::Scalar("b"),
///     ]
/// );
/// ```
pub fn display_units(text: &str) -> Vec<DisplayUnit<'_>> {
    text.graphemes(true)
        .map(|g| {
            if is_emoji_cluster(g) {
                DisplayUnit::Emoji(g)
            } else {
                DisplayUnit::Scalar(g)
            }
        })
        .collect()
}

fn is_emoji_cluster(cluster: &str) -> bool {
    cluster.chars().any(|c| {
        matches!(
            c as u32,
            // ZWJ, VS16
            0x200D | 0xFE0F
            // regional indicators
            | 0x1F1E6..=0x1F1FF
            // misc technical, symbols, dingbats, arrows/stars
            | 0x2300..=0x23FF
            | 0x2600..=0x27BF
            | 0x2B00..=0x2BFF
            // pictographs, emoticons, transport, supplemental symbols
            | 0x1F000..=0x1FAFF
        )
    })
}
