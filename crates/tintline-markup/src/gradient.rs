//! Gradient spans: `(text)gd(red,blue)` and `(text)gb(red,blue)`.
//!
//! `gd` colors the foreground of each character, `gb` the background. The
//! color list is comma separated; each entry is a palette name, shade, or hex
//! code, and unknown entries use the palette fallback. A single color yields
//! a flat span. Since the inline markers run first, write hex without `#`
//! (`ff6b35`) and prefixed names without `_` (`lightblue`) here.
//!
//! Emoji are emitted inline without a color and do not advance the
//! interpolation position. They still count toward the section length, so
//! text mixed with emoji stops short of the last color.
//!
//! ```rust
//! use tintline_markup::apply_gradients;
//! use tintline_palette::Palette;
//!
//! let palette = Palette::builtin();
//! assert_eq!(apply_gradients("(ab)gd(red,blue)", true, &palette), "ab");
//!
//! let out = apply_gradients("(ab)gd(red,blue)", false, &palette);
//! assert!(out.starts_with("\x1b[38;2;255;0;0ma"));
//! assert!(out.ends_with("b\x1b[0m"));
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tintline_palette::{sgr, ColorSpec, Palette};

use crate::kit::FormatKit;
use crate::units::{display_units, DisplayUnit};

static GRADIENT_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(([^()]+)\)g([db])\((.*?)\)").expect("gradient pattern is valid")
});

/// Replaces every gradient span in `text`.
pub fn apply_gradients(text: &str, suppress_color: bool, palette: &Palette) -> String {
    if !GRADIENT_TAG.is_match(text) {
        return text.to_string();
    }
    GRADIENT_TAG
        .replace_all(text, |caps: &Captures| {
            render_gradient(
                suppress_color,
                &caps[0],
                &caps[1],
                &caps[3],
                &caps[2] == "b",
                palette,
            )
        })
        .into_owned()
}

/// Renders one gradient span.
///
/// `whole_match` is returned untouched when `color_list` names no colors at
/// all. With `suppress_color`, `inner_text` is returned unchanged.
pub fn render_gradient(
    suppress_color: bool,
    whole_match: &str,
    inner_text: &str,
    color_list: &str,
    background: bool,
    palette: &Palette,
) -> String {
    let stops = match parse_stops(color_list, palette, background) {
        Some(stops) => stops,
        None => return whole_match.to_string(),
    };
    if suppress_color {
        return inner_text.to_string();
    }

    let units = display_units(inner_text);
    let sections = stops.len() - 1;
    // Emoji widen the sections but never advance the position.
    let section_length = units.len().div_ceil(sections);

    let mut out = String::with_capacity(inner_text.len() * 20);
    let mut position = 0usize;
    for unit in units {
        match unit {
            DisplayUnit::Emoji(emoji) => out.push_str(emoji),
            DisplayUnit::Scalar(ch) => {
                let index = position / section_length;
                let factor = (position - index * section_length) as f64 / section_length as f64;
                let from = stops[index.min(sections)];
                let to = stops[(index + 1).min(sections)];
                out.push_str(&from.lerp(&to, factor).escape());
                out.push_str(ch);
                position += 1;
            }
        }
    }
    out.push_str(sgr::RESET);
    out
}

/// Parses a color list into at least two stops, or `None` if it is empty.
pub fn parse_stops(color_list: &str, palette: &Palette, background: bool) -> Option<Vec<ColorSpec>> {
    let mut stops: Vec<ColorSpec> = color_list
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| palette.parse_or_fallback(entry).on_background(background))
        .collect();
    match stops.len() {
        0 => None,
        1 => {
            stops.push(stops[0]);
            Some(stops)
        }
        _ => Some(stops),
    }
}

/// The gradient pass as a [`FormatKit`].
#[derive(Debug, Clone, Copy)]
pub struct Gradients<'a> {
    palette: &'a Palette,
}

impl<'a> Gradients<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }
}

impl FormatKit for Gradients<'_> {
    fn apply(&self, suppress_color: bool, text: &str) -> String {
        apply_gradients(text, suppress_color, self.palette)
    }
}
