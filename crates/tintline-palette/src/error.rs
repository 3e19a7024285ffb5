//! Error types for palette configuration.
//!
//! Resolving a color at render time never fails. Loading a palette from
//! YAML is the one place a bad value is reported to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`Palette`](crate::Palette) from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// The YAML document could not be parsed.
    #[error("failed to parse palette{}: {message}", location(.path))]
    Parse {
        /// Source file, when loaded from disk.
        path: Option<PathBuf>,
        message: String,
    },

    /// A color entry has a value that is not a name, hex code, or RGB tuple.
    #[error("invalid color '{value}' for '{name}': {message}")]
    InvalidColor {
        name: String,
        value: String,
        message: String,
    },

    /// The palette file could not be read.
    #[error("failed to load palette: {message}")]
    Load { message: String },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}
