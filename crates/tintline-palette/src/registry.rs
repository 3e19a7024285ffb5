//! Process-wide palette for callers that want global registration.
//!
//! Rendering code takes a [`Palette`] explicitly; this registry exists for
//! the boundary layer that wants `register_color("brand", ..)` once at
//! startup and a default palette everywhere else.
//!
//! Writers never mutate the palette readers hold: each registration clones
//! the current table, applies the change, and swaps in a new [`Arc`].
//! Readers keep whatever snapshot they took.
//!
//! ```rust
//! use tintline_palette::{global_palette, register_color, reset_global_palette, ColorSpec};
//!
//! let before = global_palette();
//! register_color("brand", ColorSpec::rgb(255, 107, 53));
//! assert!(global_palette().contains("brand"));
//! assert!(!before.contains("brand"));
//! reset_global_palette();
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

use crate::color::ColorSpec;
use crate::palette::Palette;

static GLOBAL_PALETTE: Lazy<RwLock<Arc<Palette>>> =
    Lazy::new(|| RwLock::new(Arc::new(Palette::builtin())));

/// Returns a snapshot of the global palette.
pub fn global_palette() -> Arc<Palette> {
    GLOBAL_PALETTE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Adds or replaces a named color in the global palette.
pub fn register_color(name: &str, color: ColorSpec) {
    update(|palette| palette.insert(name, color));
}

/// Sets the fallback color of the global palette.
pub fn set_global_fallback(color: ColorSpec) {
    update(|palette| *palette = palette.clone().with_fallback(color));
}

/// Replaces the global palette wholesale.
pub fn set_global_palette(palette: Palette) {
    let mut guard = GLOBAL_PALETTE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = Arc::new(palette);
}

/// Restores the built-in palette.
pub fn reset_global_palette() {
    set_global_palette(Palette::builtin());
}

fn update(apply: impl FnOnce(&mut Palette)) {
    let mut guard = GLOBAL_PALETTE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let mut next = Palette::clone(&guard);
    apply(&mut next);
    *guard = Arc::new(next);
}
