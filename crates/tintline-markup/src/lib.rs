//! Inline markup for terminal text.
//!
//! This crate provides the three built-in styling passes of `tintline`, each
//! a pure `text -> text` transform:
//!
//! | pass              | syntax                                   |
//! |-------------------|------------------------------------------|
//! | [`LegacyBrackets`] | `[content].color`, `[content].color-b`  |
//! | [`InlineMarkers`]  | `*bold*` `~strike~` `-italic-` `_underline_` `!blink!` `#reverse#` |
//! | [`Gradients`]      | `(text)gd(red,blue)`, `(text)gb(red,blue)` |
//!
//! Every pass honours a `suppress_color` flag: the markup is removed and
//! the bare text kept, for sinks that cannot show escape sequences.
//!
//! # Example
//!
//! ```rust
//! use tintline_markup::{FormatKit, Gradients, InlineMarkers, LegacyBrackets};
//! use tintline_palette::Palette;
//!
//! let palette = Palette::builtin();
//! let kits: [&dyn FormatKit; 3] = [
//!     &LegacyBrackets::new(&palette),
//!     &InlineMarkers,
//!     &Gradients::new(&palette),
//! ];
//!
//! let mut text = "[*ready*].green (go)gd(red,blue)".to_string();
//! for kit in kits {
//!     text = kit.apply(true, &text);
//! }
//! assert_eq!(text, "ready go");
//! ```
//!
//! The passes are independent; composing them until nothing changes is the
//! job of the `tintline` crate's formatter.

mod brackets;
mod gradient;
mod kit;
mod markers;
mod units;

pub use brackets::{resolve_brackets, LegacyBrackets};
pub use gradient::{apply_gradients, parse_stops, render_gradient, Gradients};
pub use kit::FormatKit;
pub use markers::{apply_markers, InlineMarkers};
pub use units::{display_units, DisplayUnit};
