//! printf-style placeholder substitution.
//!
//! | directive | output |
//! |-----------|--------|
//! | `%s` | textual form |
//! | `%d` | number, truncated toward zero |
//! | `%i` | leading integer of the textual form |
//! | `%f` | leading float of the textual form |
//! | `%j` | JSON, or `[Circular]` for cyclic structures |
//! | `%o` | single-line inspection |
//! | `%O` | multi-line inspection |
//! | `%%` | a literal `%` |
//!
//! A directive without a remaining argument, or a numeric directive whose
//! argument has no numeric reading, stays in the text verbatim and consumes
//! nothing. Unknown directives are kept verbatim too.
//!
//! ```rust
//! use tintline::{sprintf, Value};
//!
//! let sub = sprintf("%s has %d items", &[Value::from("cart"), Value::from(3.9)]);
//! assert_eq!(sub.text, "cart has 3 items");
//! assert_eq!(sub.consumed, 2);
//! ```

use std::collections::HashSet;

use crate::inspect::{inspect, InspectOptions, CIRCULAR};
use crate::value::{format_number, read, Value};

/// Result of a substitution: the text and how many arguments were used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub text: String,
    pub consumed: usize,
}

/// Substitutes directives in `template` with uncolored inspection output.
pub fn sprintf(template: &str, args: &[Value]) -> Substitution {
    sprintf_with(template, args, false)
}

/// Substitutes directives in `template`; `colors` styles `%o`/`%O` output.
pub fn sprintf_with(template: &str, args: &[Value], colors: bool) -> Substitution {
    let mut text = String::with_capacity(template.len());
    let mut consumed = 0usize;
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            text.push(c);
            continue;
        }
        let Some(directive) = chars.next() else {
            text.push('%');
            break;
        };
        if directive == '%' {
            text.push('%');
            continue;
        }
        let converted = args
            .get(consumed)
            .and_then(|arg| convert(directive, arg, colors));
        match converted {
            Some(s) => {
                text.push_str(&s);
                consumed += 1;
            }
            None => {
                text.push('%');
                text.push(directive);
            }
        }
    }

    Substitution { text, consumed }
}

/// Renders one argument for a directive, or `None` to leave it verbatim.
fn convert(directive: char, arg: &Value, colors: bool) -> Option<String> {
    match directive {
        's' => Some(textual(arg)),
        'd' => match arg {
            Value::Int(n) => Some(n.to_string()),
            _ => arg.as_number().map(|n| format_number(n.trunc())),
        },
        'i' => leading_integer(&textual(arg)),
        'f' => match arg {
            Value::Int(n) => Some(n.to_string()),
            Value::Float(f) => Some(format_number(*f)),
            Value::Str(s) => leading_float(s).map(format_number),
            _ => None,
        },
        'j' => Some(to_json(arg)),
        'o' => Some(inspect(arg, &InspectOptions::compact().colored(colors))),
        'O' => Some(inspect(arg, &InspectOptions::expanded().colored(colors))),
        _ => None,
    }
}

/// The `%s` form of a value.
fn textual(arg: &Value) -> String {
    match arg {
        Value::Str(s) => s.clone(),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => format_number(*f),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Undefined => "undefined".to_string(),
        other => inspect(other, &InspectOptions::compact()),
    }
}

/// Optional sign followed by digits, after leading whitespace.
fn leading_integer(s: &str) -> Option<String> {
    let s = s.trim_start();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return Some("0".to_string());
    }
    Some(format!("{}{}", sign, trimmed))
}

/// The longest prefix of `s` (after leading whitespace) that reads as a float.
fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    for word in ["Infinity", "+Infinity"] {
        if s.starts_with(word) {
            return Some(f64::INFINITY);
        }
    }
    if s.starts_with("-Infinity") {
        return Some(f64::NEG_INFINITY);
    }

    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok()
}

/// `%j` output. Cycles anywhere in the value replace the whole result.
fn to_json(arg: &Value) -> String {
    if matches!(arg, Value::Undefined) {
        return "undefined".to_string();
    }
    write_json(arg).unwrap_or_else(|| CIRCULAR.to_string())
}

/// Pending JSON output, processed from a stack so depth never grows the
/// call stack.
enum JsonStep {
    Value(Value),
    Text(&'static str),
    Key(String),
    Leave(usize),
}

/// Writes compact JSON, or `None` when a container repeats along the path.
fn write_json(value: &Value) -> Option<String> {
    let mut out = String::new();
    let mut path = HashSet::new();
    let mut steps = vec![JsonStep::Value(value.clone())];

    while let Some(step) = steps.pop() {
        let value = match step {
            JsonStep::Text(text) => {
                out.push_str(text);
                continue;
            }
            JsonStep::Key(key) => {
                push_json_string(&mut out, &key);
                out.push(':');
                continue;
            }
            JsonStep::Leave(id) => {
                path.remove(&id);
                continue;
            }
            JsonStep::Value(value) => value,
        };

        match &value {
            Value::Undefined | Value::Null | Value::Opaque(_) => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Int(n) => out.push_str(&n.to_string()),
            Value::Float(f) => match serde_json::Number::from_f64(*f) {
                Some(n) => out.push_str(&n.to_string()),
                None => out.push_str("null"),
            },
            Value::Str(s) => push_json_string(&mut out, s),
            Value::List(list) => {
                let id = value.container_id()?;
                if !path.insert(id) {
                    return None;
                }
                let items = read(list).clone();
                out.push('[');
                steps.push(JsonStep::Leave(id));
                steps.push(JsonStep::Text("]"));
                for (i, item) in items.into_iter().enumerate().rev() {
                    steps.push(JsonStep::Value(item));
                    if i > 0 {
                        steps.push(JsonStep::Text(","));
                    }
                }
            }
            Value::Map(map) => {
                let id = value.container_id()?;
                if !path.insert(id) {
                    return None;
                }
                let entries: Vec<(String, Value)> = read(map)
                    .iter()
                    .filter(|(_, v)| !matches!(v, Value::Undefined | Value::Opaque(_)))
                    .cloned()
                    .collect();
                out.push('{');
                steps.push(JsonStep::Leave(id));
                steps.push(JsonStep::Text("}"));
                for (i, (key, item)) in entries.into_iter().enumerate().rev() {
                    steps.push(JsonStep::Value(item));
                    steps.push(JsonStep::Key(key));
                    if i > 0 {
                        steps.push(JsonStep::Text(","));
                    }
                }
            }
        }
    }
    Some(out)
}

fn push_json_string(out: &mut String, s: &str) {
    match serde_json::to_string(s) {
        Ok(quoted) => out.push_str(&quoted),
        Err(_) => out.push_str("null"),
    }
}
