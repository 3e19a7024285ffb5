//! # Tintline Palette - Named 24-bit Colors for Terminal Styling
//!
//! This crate is the color layer of `tintline`: it maps symbolic names to RGB
//! triples and builds the SGR escape sequences the rest of the workspace
//! emits.
//!
//! ## Core Concepts
//!
//! - [`ColorSpec`]: RGB triple plus a foreground/background flag
//! - [`Palette`]: case-insensitive name table with shades and a fallback color
//! - [`Overrides`]: per-call name -> escape replacements
//! - [`sgr`]: the escape sequence constants and builders
//! - Global registry: [`global_palette`] / [`register_color`], copy-on-write
//!
//! ## Quick Start
//!
//! ```rust
//! use tintline_palette::{sgr, Palette};
//!
//! let palette = Palette::builtin();
//! let red = palette.resolve("red", false, None);
//! let line = format!("{}alert{}", red, sgr::RESET);
//! assert_eq!(line, "\x1b[38;2;255;0;0malert\x1b[0m");
//! ```
//!
//! Resolution never fails. Unknown names degrade to the palette's fallback
//! color, so a typo in a message tag never breaks output.

mod color;
mod error;
mod palette;
mod registry;
pub mod sgr;

pub use color::ColorSpec;
pub use error::PaletteError;
pub use palette::{Overrides, Palette, DEFAULT_FALLBACK};
pub use registry::{
    global_palette, register_color, reset_global_palette, set_global_fallback,
    set_global_palette,
};
