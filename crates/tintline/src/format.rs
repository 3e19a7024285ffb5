//! The format controller.
//!
//! [`Formatter::render`] turns a list of message arguments into one styled
//! line:
//!
//! 1. If the first argument is a string and more arguments follow, it is a
//!    template: its directives consume arguments, as in `sprintf`.
//! 2. Every remaining argument becomes a segment; strings as they are,
//!    anything else through `inspect`.
//! 3. Each segment is run through the kits (legacy tags, inline markers,
//!    gradients, registered kits, per-call kits) round after round until a
//!    round changes nothing, or [`MAX_ROUNDS`] rounds have run.
//! 4. Segments are joined with single spaces.
//!
//! ```rust
//! use tintline::{Formatter, Palette, Value};
//!
//! let formatter = Formatter::new(Palette::builtin());
//! let line = formatter.render(
//!     &[Value::from("[%s].green took %dms"), Value::from("build"), Value::from(12)],
//!     &[],
//!     true,
//! );
//! assert_eq!(line, "build took 12ms");
//! ```

use std::sync::Arc;

use tintline_markup::{FormatKit, Gradients, InlineMarkers, LegacyBrackets};
use tintline_palette::{global_palette, Overrides, Palette};

use crate::inspect::{inspect, InspectOptions};
use crate::sprintf::sprintf_with;
use crate::value::Value;

/// Upper bound on styling rounds per segment.
pub const MAX_ROUNDS: usize = 10;

/// Renders message arguments into styled text.
///
/// A formatter owns its palette and any extra kits registered on it; it does
/// no I/O and is safe to share across threads.
pub struct Formatter {
    palette: Arc<Palette>,
    kits: Vec<Box<dyn FormatKit>>,
    inspect: InspectOptions,
}

impl Formatter {
    pub fn new(palette: impl Into<Arc<Palette>>) -> Self {
        Self {
            palette: palette.into(),
            kits: Vec::new(),
            inspect: InspectOptions::compact(),
        }
    }

    /// A formatter over the current global palette.
    pub fn global() -> Self {
        Self::new(global_palette())
    }

    /// Registers a kit that runs after the built-in passes on every render.
    pub fn with_kit(mut self, kit: impl FormatKit + 'static) -> Self {
        self.kits.push(Box::new(kit));
        self
    }

    /// Sets how non-string arguments are inspected. Colors follow the
    /// render call's suppress flag regardless of `options.colors`.
    pub fn with_inspect_options(mut self, options: InspectOptions) -> Self {
        self.inspect = options;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Renders `inputs` into one line.
    pub fn render(
        &self,
        inputs: &[Value],
        extra_kits: &[&dyn FormatKit],
        suppress_color: bool,
    ) -> String {
        self.render_inner(inputs, extra_kits, suppress_color, None)
    }

    /// Like [`render`](Self::render), with escape sequences that replace
    /// palette colors by name for this call only.
    pub fn render_with_overrides(
        &self,
        inputs: &[Value],
        extra_kits: &[&dyn FormatKit],
        suppress_color: bool,
        overrides: &Overrides,
    ) -> String {
        self.render_inner(inputs, extra_kits, suppress_color, Some(overrides))
    }

    /// Steps 1 and 2: template substitution and inspection, one string per
    /// segment.
    pub fn segments(&self, inputs: &[Value], suppress_color: bool) -> Vec<String> {
        let mut segments = Vec::with_capacity(inputs.len());
        let mut rest = inputs;

        if let [Value::Str(template), args @ ..] = inputs {
            if !args.is_empty() {
                let sub = sprintf_with(template, args, !suppress_color);
                segments.push(sub.text);
                rest = &args[sub.consumed..];
            }
        }

        let options = self.inspect.colored(!suppress_color);
        for value in rest {
            segments.push(match value {
                Value::Str(s) => s.clone(),
                other => inspect(other, &options),
            });
        }
        segments
    }

    /// Step 3 for a single segment: apply every kit until a round leaves the
    /// text unchanged, at most [`MAX_ROUNDS`] times.
    pub fn style(
        &self,
        text: &str,
        extra_kits: &[&dyn FormatKit],
        suppress_color: bool,
        overrides: Option<&Overrides>,
    ) -> String {
        let mut brackets = LegacyBrackets::new(&self.palette);
        if let Some(overrides) = overrides {
            brackets = brackets.with_overrides(overrides);
        }
        let gradients = Gradients::new(&self.palette);

        let mut kits: Vec<&dyn FormatKit> =
            Vec::with_capacity(3 + self.kits.len() + extra_kits.len());
        kits.push(&brackets);
        kits.push(&InlineMarkers);
        kits.push(&gradients);
        kits.extend(self.kits.iter().map(|k| k.as_ref() as &dyn FormatKit));
        kits.extend_from_slice(extra_kits);

        let mut current = text.to_string();
        for round in 1..=MAX_ROUNDS {
            let next = kits
                .iter()
                .fold(current.clone(), |acc, kit| kit.apply(suppress_color, &acc));
            if next == current {
                return current;
            }
            tracing::trace!(round, "styling round changed segment");
            current = next;
        }
        tracing::debug!(
            rounds = MAX_ROUNDS,
            "styling did not settle, keeping last round"
        );
        current
    }

    fn render_inner(
        &self,
        inputs: &[Value],
        extra_kits: &[&dyn FormatKit],
        suppress_color: bool,
        overrides: Option<&Overrides>,
    ) -> String {
        self.segments(inputs, suppress_color)
            .iter()
            .map(|segment| self.style(segment, extra_kits, suppress_color, overrides))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(Palette::builtin())
    }
}

impl std::fmt::Debug for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formatter")
            .field("colors", &self.palette.len())
            .field("kits", &self.kits.len())
            .field("inspect", &self.inspect)
            .finish()
    }
}

/// Renders with the global palette.
pub fn render(inputs: &[Value], extra_kits: &[&dyn FormatKit], suppress_color: bool) -> String {
    Formatter::global().render(inputs, extra_kits, suppress_color)
}
