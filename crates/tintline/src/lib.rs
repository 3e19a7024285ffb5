//! # tintline - styled console messages
//!
//! `tintline` turns a list of message arguments into a single line of
//! terminal text. Strings may carry lightweight markup, which is resolved
//! into 24-bit color escape sequences, or stripped when the destination can
//! not show color.
//!
//! ## Markup
//!
//! | syntax | effect |
//! |--------|--------|
//! | `[text].red` | foreground color, any palette name, shade or prefix |
//! | `[text].red-b` | color plus bold |
//! | `*bold*` `~strike~` `-italic-` `_underline_` `!blink!` `#reverse#` | inline markers |
//! | `(text)gd(red,blue)` | foreground gradient |
//! | `(text)gb(red,blue)` | background gradient |
//!
//! Tags nest, and markup produced by one pass is picked up by the next:
//! the formatter repeats all passes until the text stops changing.
//!
//! ## Arguments
//!
//! When the first argument is a string followed by more arguments, it is a
//! printf-style template (`%s %d %i %f %j %o %O %%`). Arguments left over,
//! and non-string arguments, are appended as segments; non-strings are
//! shown through [`inspect`].
//!
//! ```rust
//! use tintline::{Formatter, Value};
//!
//! let formatter = Formatter::default();
//! let line = formatter.render(
//!     &[
//!         Value::from("[%s].cyan-b finished in *%d*ms"),
//!         Value::from("deploy"),
//!         Value::from(842),
//!         Value::map([("ok", true)]),
//!     ],
//!     &[],
//!     true,
//! );
//! assert_eq!(line, "deploy finished in 842ms { ok: true }");
//! ```
//!
//! ## Palette
//!
//! Colors come from a [`Palette`]: the built-in table, extended in code or
//! loaded from YAML. [`Formatter::global`] uses the process-wide palette,
//! which [`register_color`] extends at runtime.
//!
//! ## Output
//!
//! Rendering never does I/O. [`Console`] pairs a formatter with a [`Sink`]
//! and an [`OutputMode`] for callers that want both.
//!
//! ## Logging
//!
//! Diagnostics go through `tracing`; no subscriber is installed.

mod format;
mod inspect;
mod output;
mod sprintf;
mod value;

pub use format::{render, Formatter, MAX_ROUNDS};
pub use inspect::{inspect, InspectOptions, CIRCULAR};
pub use output::{BufferSink, Console, OutputMode, Sink, TermSink};
pub use sprintf::{sprintf, sprintf_with, Substitution};
pub use value::{format_number, SharedList, SharedMap, Value};

pub use tintline_markup::{
    apply_gradients, apply_markers, display_units, render_gradient, resolve_brackets,
    DisplayUnit, FormatKit, Gradients, InlineMarkers, LegacyBrackets,
};
pub use tintline_palette::{
    global_palette, register_color, reset_global_palette, set_global_fallback,
    set_global_palette, sgr, ColorSpec, Overrides, Palette, PaletteError,
};
