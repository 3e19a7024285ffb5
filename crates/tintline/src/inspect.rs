//! Human-readable rendering of arbitrary values.
//!
//! Inspection never fails: lists and maps of any depth and length are
//! rendered in full, and a container that reappears inside itself prints as
//! `[Circular]`. A container shared by two branches without forming a cycle
//! prints in both places.
//!
//! ```rust
//! use tintline::{inspect, InspectOptions, Value};
//!
//! let v = Value::map([("name", Value::from("ada")), ("tags", Value::list([1, 2]))]);
//! assert_eq!(
//!     inspect(&v, &InspectOptions::compact()),
//!     "{ name: 'ada', tags: [ 1, 2 ] }"
//! );
//! ```

use std::collections::HashSet;

use tintline_palette::{sgr, ColorSpec};

use crate::value::{format_number, read, Value};

/// Printed in place of a container that contains itself.
pub const CIRCULAR: &str = "[Circular]";

const STRING_COLOR: ColorSpec = ColorSpec::rgb(0, 255, 0);
const NUMBER_COLOR: ColorSpec = ColorSpec::rgb(255, 255, 0);
const EMPTY_COLOR: ColorSpec = ColorSpec::rgb(128, 128, 128);
const SPECIAL_COLOR: ColorSpec = ColorSpec::rgb(0, 255, 255);

const INDENT: &str = "  ";

/// How [`inspect`] lays out its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectOptions {
    /// Style leaves with terminal colors.
    pub colors: bool,
    /// Single line when true, one entry per line otherwise.
    pub compact: bool,
}

impl InspectOptions {
    /// Single line, no colors.
    pub const fn plain() -> Self {
        Self {
            colors: false,
            compact: true,
        }
    }

    /// Single line.
    pub const fn compact() -> Self {
        Self::plain()
    }

    /// One entry per line, indented by two spaces per level.
    pub const fn expanded() -> Self {
        Self {
            colors: false,
            compact: false,
        }
    }

    pub const fn colored(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self::plain()
    }
}

/// Renders `value` for display.
///
/// A top-level string is returned as is; strings inside containers are
/// single-quoted.
pub fn inspect(value: &Value, options: &InspectOptions) -> String {
    if let Value::Str(s) = value {
        return s.clone();
    }
    let mut out = String::new();
    let mut path = HashSet::new();
    let mut steps = vec![Step::Value {
        value: value.clone(),
        depth: 0,
    }];
    while let Some(step) = steps.pop() {
        match step {
            Step::Text(text) => out.push_str(&text),
            Step::Leave(id) => {
                path.remove(&id);
            }
            Step::Value { value, depth } => {
                write_value(&value, options, depth, &mut path, &mut steps, &mut out)
            }
        }
    }
    out
}

/// Pending output, processed from a stack so depth never grows the call
/// stack.
enum Step {
    Value { value: Value, depth: usize },
    Text(String),
    /// A container is finished; it may appear again outside this branch.
    Leave(usize),
}

fn write_value(
    value: &Value,
    options: &InspectOptions,
    depth: usize,
    path: &mut HashSet<usize>,
    steps: &mut Vec<Step>,
    out: &mut String,
) {
    if value.container_id().is_some_and(|id| path.contains(&id)) {
        paint(out, options, SPECIAL_COLOR, CIRCULAR);
        return;
    }
    let (open, close, entries): (&str, &str, Vec<(Option<String>, Value)>) = match value {
        Value::Str(s) => return paint(out, options, STRING_COLOR, &quote(s)),
        Value::Int(n) => return paint(out, options, NUMBER_COLOR, &n.to_string()),
        Value::Float(f) => return paint(out, options, NUMBER_COLOR, &format_number(*f)),
        Value::Bool(b) => return paint(out, options, NUMBER_COLOR, &b.to_string()),
        Value::Null => return paint(out, options, EMPTY_COLOR, "null"),
        Value::Undefined => return paint(out, options, EMPTY_COLOR, "undefined"),
        Value::Opaque(label) => {
            return paint(out, options, SPECIAL_COLOR, &format!("[{}]", label))
        }
        // Entries are snapshotted so no lock is held while descending.
        Value::List(list) => (
            "[",
            "]",
            read(list).iter().map(|v| (None, v.clone())).collect(),
        ),
        Value::Map(map) => (
            "{",
            "}",
            read(map)
                .iter()
                .map(|(k, v)| (Some(k.clone()), v.clone()))
                .collect(),
        ),
    };

    let Some(id) = value.container_id() else {
        return;
    };

    out.push_str(open);
    if entries.is_empty() {
        out.push_str(close);
        return;
    }
    path.insert(id);

    let closing = if options.compact {
        format!(" {}", close)
    } else {
        format!("\n{}{}", INDENT.repeat(depth), close)
    };
    steps.push(Step::Leave(id));
    steps.push(Step::Text(closing));

    // Pushed last-first so they pop in order.
    for (i, (key, item)) in entries.into_iter().enumerate().rev() {
        steps.push(Step::Value {
            value: item,
            depth: depth + 1,
        });
        let mut prefix = String::new();
        if options.compact {
            prefix.push_str(if i == 0 { " " } else { ", " });
        } else {
            if i > 0 {
                prefix.push(',');
            }
            prefix.push('\n');
            prefix.push_str(&INDENT.repeat(depth + 1));
        }
        if let Some(key) = key {
            prefix.push_str(&format_key(&key));
            prefix.push_str(": ");
        }
        steps.push(Step::Text(prefix));
    }
}

fn paint(out: &mut String, options: &InspectOptions, color: ColorSpec, text: &str) {
    if options.colors {
        out.push_str(&color.escape());
        out.push_str(text);
        out.push_str(sgr::RESET);
    } else {
        out.push_str(text);
    }
}

fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');
    for c in s.chars() {
        match c {
            '\'' => quoted.push_str("\\'"),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Identifier-like keys print bare, anything else quoted.
fn format_key(key: &str) -> String {
    let mut chars = key.chars();
    let bare = match chars.next() {
        Some(first) => {
            (first.is_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        None => false,
    };
    if bare {
        key.to_string()
    } else {
        quote(key)
    }
}
