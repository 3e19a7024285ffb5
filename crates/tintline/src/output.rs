//! Output modes and sinks.
//!
//! The formatter only produces strings. Where they go is decided here:
//! a [`Sink`] receives finished lines, and an [`OutputMode`] decides whether
//! those lines carry escape sequences.
//!
//! ```rust
//! use tintline::{BufferSink, Console, Formatter, OutputMode, Value};
//!
//! let mut console = Console::new(Formatter::default(), BufferSink::new())
//!     .with_mode(OutputMode::Text);
//! console.log(&[Value::from("[ready].green")]).unwrap();
//! assert_eq!(console.sink().lines(), ["ready"]);
//! ```

use std::io;

use console::Term;

use crate::format::Formatter;
use crate::value::Value;

/// Whether rendered lines carry terminal styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Style when the sink supports it
    #[default]
    Auto,
    /// Always emit escape sequences
    Term,
    /// Never emit escape sequences (plain text)
    Text,
}

impl OutputMode {
    /// Resolves the mode to a concrete decision about whether to use color.
    ///
    /// - `Auto` checks whether stdout is a color-capable terminal
    /// - `Term` always returns `true`
    /// - `Text` always returns `false`
    pub fn should_use_color(&self) -> bool {
        match self {
            OutputMode::Auto => Term::stdout().features().colors_supported(),
            OutputMode::Term => true,
            OutputMode::Text => false,
        }
    }

    /// The `suppress_color` flag handed to the formatter.
    pub fn suppress_color(&self) -> bool {
        !self.should_use_color()
    }
}

/// A destination for rendered lines.
pub trait Sink {
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Whether this sink shows escape sequences as styling.
    fn supports_color(&self) -> bool {
        false
    }
}

/// Writes to a terminal stream.
#[derive(Debug, Clone)]
pub struct TermSink {
    term: Term,
}

impl TermSink {
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    pub fn stderr() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Sink for TermSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.term.write_line(line)
    }

    fn supports_color(&self) -> bool {
        self.term.features().colors_supported()
    }
}

/// Collects lines in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines, newline terminated.
    pub fn contents(&self) -> String {
        self.lines.iter().map(|l| format!("{}\n", l)).collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Sink for BufferSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

/// A formatter bound to a sink.
#[derive(Debug)]
pub struct Console<S: Sink> {
    formatter: Formatter,
    mode: OutputMode,
    sink: S,
}

impl<S: Sink> Console<S> {
    pub fn new(formatter: Formatter, sink: S) -> Self {
        Self {
            formatter,
            mode: OutputMode::Auto,
            sink,
        }
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// The suppress flag for this console. `Auto` defers to the sink.
    pub fn suppress_color(&self) -> bool {
        match self.mode {
            OutputMode::Auto => !self.sink.supports_color(),
            mode => mode.suppress_color(),
        }
    }

    /// Renders `inputs` and writes the line to the sink.
    pub fn log(&mut self, inputs: &[Value]) -> io::Result<()> {
        let line = self.formatter.render(inputs, &[], self.suppress_color());
        self.sink.write_line(&line)
    }

    /// Renders without styling, whatever the mode. For sinks that store
    /// text, such as log files.
    pub fn render_plain(&self, inputs: &[Value]) -> String {
        self.formatter.render(inputs, &[], true)
    }
}
