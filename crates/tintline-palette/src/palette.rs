//! The name -> color table.
//!
//! A [`Palette`] maps case-insensitive names to [`ColorSpec`]s and turns names
//! into escape sequences. Resolution never fails: anything it cannot make
//! sense of becomes the palette's fallback color.
//!
//! # Name syntax
//!
//! - A table entry: `red`, `teal`, `brand`
//! - A shade of an entry: `red1` (lightest) .. `red5` (itself) .. `red9` (darkest)
//! - `bright_red` / `light_red` (shade 3) and `dark_red` (shade 7); the
//!   underscore is optional (`lightred`, `darkred`)
//! - Hex, via [`Palette::parse`] only: `#ff6b35`, or bare `ff6b35`
//!
//! Inside markup, `_` and `#` are style delimiters, so `lightred` and bare
//! hex are the forms that survive there.
//!
//! # Construction
//!
//! ```rust
//! use tintline_palette::{ColorSpec, Palette};
//!
//! let palette = Palette::builtin()
//!     .with_color("brand", ColorSpec::rgb(255, 107, 53))
//!     .with_fallback(ColorSpec::rgb(128, 128, 128));
//!
//! assert_eq!(palette.resolve("brand", false, None), "\x1b[38;2;255;107;53m");
//! assert_eq!(palette.resolve("BRAND", true, None), "\x1b[48;2;255;107;53m");
//! // Unknown names degrade to the fallback.
//! assert_eq!(palette.resolve("nope", false, None), "\x1b[38;2;128;128;128m");
//! ```
//!
//! # From YAML
//!
//! ```rust
//! use tintline_palette::Palette;
//!
//! let palette = Palette::from_yaml(r##"
//! fallback: gray
//! colors:
//!   brand: "#ff6b35"
//!   accent: [0, 170, 255]
//!   warn: orange
//! "##).unwrap();
//!
//! assert!(palette.contains("accent"));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::color::ColorSpec;
use crate::error::PaletteError;

/// Per-call replacements: name -> pre-built escape string.
///
/// Entries here win over the palette table for the duration of one call.
pub type Overrides = HashMap<String, String>;

const BUILTIN_COLORS: &[(&str, ColorSpec)] = &[
    ("black", ColorSpec::rgb(0, 0, 0)),
    ("white", ColorSpec::rgb(255, 255, 255)),
    ("gray", ColorSpec::rgb(128, 128, 128)),
    ("grey", ColorSpec::rgb(128, 128, 128)),
    ("red", ColorSpec::rgb(255, 0, 0)),
    ("green", ColorSpec::rgb(0, 255, 0)),
    ("blue", ColorSpec::rgb(0, 0, 255)),
    ("yellow", ColorSpec::rgb(255, 255, 0)),
    ("cyan", ColorSpec::rgb(0, 255, 255)),
    ("magenta", ColorSpec::rgb(255, 0, 255)),
    ("orange", ColorSpec::rgb(255, 165, 0)),
    ("purple", ColorSpec::rgb(128, 0, 128)),
    ("pink", ColorSpec::rgb(255, 192, 203)),
    ("brown", ColorSpec::rgb(165, 42, 42)),
    ("teal", ColorSpec::rgb(0, 128, 128)),
    ("lime", ColorSpec::rgb(50, 205, 50)),
    ("navy", ColorSpec::rgb(0, 0, 128)),
    ("violet", ColorSpec::rgb(238, 130, 238)),
    ("gold", ColorSpec::rgb(255, 215, 0)),
    ("silver", ColorSpec::rgb(192, 192, 192)),
];

/// Color used when a name cannot be resolved and none was configured.
pub const DEFAULT_FALLBACK: ColorSpec = ColorSpec::rgb(255, 255, 255);

/// A table of named colors with a fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: HashMap<String, ColorSpec>,
    fallback: ColorSpec,
}

impl Default for Palette {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Palette {
    /// Creates an empty palette. Every lookup resolves to the fallback.
    pub fn empty() -> Self {
        Self {
            colors: HashMap::new(),
            fallback: DEFAULT_FALLBACK,
        }
    }

    /// Creates a palette holding the built-in named colors.
    pub fn builtin() -> Self {
        let colors = BUILTIN_COLORS
            .iter()
            .map(|(name, spec)| (name.to_string(), *spec))
            .collect();
        Self {
            colors,
            fallback: DEFAULT_FALLBACK,
        }
    }

    /// Adds or replaces a named color, returning the palette for chaining.
    pub fn with_color(mut self, name: &str, color: ColorSpec) -> Self {
        self.insert(name, color);
        self
    }

    /// Sets the fallback color, returning the palette for chaining.
    pub fn with_fallback(mut self, color: ColorSpec) -> Self {
        self.fallback = color.on_background(false);
        self
    }

    /// Adds or replaces a named color in place.
    pub fn insert(&mut self, name: &str, color: ColorSpec) {
        self.colors
            .insert(name.to_ascii_lowercase(), color.on_background(false));
    }

    /// Returns `true` if `name` is a table entry (shades not included).
    pub fn contains(&self, name: &str) -> bool {
        self.colors.contains_key(&name.to_ascii_lowercase())
    }

    /// Number of table entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn fallback(&self) -> ColorSpec {
        self.fallback
    }

    /// Looks up a name, including shade forms. Returns `None` when unknown.
    pub fn lookup(&self, name: &str) -> Option<ColorSpec> {
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            return None;
        }
        if let Some(spec) = self.colors.get(&name) {
            return Some(*spec);
        }

        // bright_red, lightred, dark_teal: the underscore is optional
        for (prefix, level) in [("bright", 3), ("light", 3), ("dark", 7)] {
            if let Some(rest) = name.strip_prefix(prefix) {
                let base = rest.strip_prefix('_').unwrap_or(rest);
                if let Some(color) = self.colors.get(base) {
                    return Some(color.shade(level));
                }
            }
        }

        // Trailing single digit: red3, teal9
        let mut chars = name.chars();
        let last = chars.next_back()?;
        let base = chars.as_str();
        match last.to_digit(10) {
            Some(level @ 1..=9) if !base.is_empty() => {
                self.colors.get(base).map(|c| c.shade(level as u8))
            }
            _ => None,
        }
    }

    /// Resolves a name to a color, degrading to the fallback.
    pub fn color(&self, name: &str) -> ColorSpec {
        self.lookup(name).unwrap_or_else(|| {
            tracing::trace!(name, "unknown color name, using fallback");
            self.fallback
        })
    }

    /// Parses free text into a color: a hex code or a palette name.
    ///
    /// Hex may omit the `#` (`ff8800`, `f80`) when the text is not also a
    /// palette name. Unlike [`color`](Self::color), this reports unknown
    /// input.
    pub fn parse(&self, text: &str) -> Result<ColorSpec, String> {
        let text = text.trim();
        if text.starts_with('#') {
            return ColorSpec::parse_hex(text);
        }
        if let Some(color) = self.lookup(text) {
            return Ok(color);
        }
        if matches!(text.len(), 3 | 6) && text.chars().all(|c| c.is_ascii_hexdigit()) {
            return ColorSpec::parse_hex(text);
        }
        Err(format!("Unknown color name: {}", text))
    }

    /// Like [`parse`](Self::parse) but degrading to the fallback.
    pub fn parse_or_fallback(&self, text: &str) -> ColorSpec {
        self.parse(text).unwrap_or_else(|message| {
            tracing::trace!(text, %message, "unparseable color, using fallback");
            self.fallback
        })
    }

    /// Resolves `name` to an escape sequence.
    ///
    /// `overrides` entries take precedence over the table and are returned
    /// verbatim. Unknown names produce the fallback color. Never fails.
    pub fn resolve(&self, name: &str, background: bool, overrides: Option<&Overrides>) -> String {
        if let Some(escape) = overrides.and_then(|o| lookup_override(o, name)) {
            return escape.clone();
        }
        self.color(name).on_background(background).escape()
    }

    /// Builds a palette from YAML content.
    ///
    /// # Format
    ///
    /// ```yaml
    /// builtin: true        # start from the built-in names (default)
    /// fallback: gray       # any color value
    /// colors:
    ///   brand: "#ff6b35"   # hex
    ///   accent: [0, 170, 255]
    ///   warn: orange       # name (built-in, shade, or another entry)
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Parse`] for malformed YAML and
    /// [`PaletteError::InvalidColor`] for entries that cannot be parsed.
    pub fn from_yaml(yaml: &str) -> Result<Self, PaletteError> {
        let config: PaletteConfig =
            serde_yaml::from_str(yaml).map_err(|e| PaletteError::Parse {
                path: None,
                message: e.to_string(),
            })?;
        config.build()
    }

    /// Loads a palette from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Load`] if the file cannot be read, otherwise
    /// the same errors as [`from_yaml`](Self::from_yaml).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PaletteError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PaletteError::Load {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_yaml(&content).map_err(|err| match err {
            PaletteError::Parse { message, .. } => PaletteError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }
}

fn lookup_override<'a>(overrides: &'a Overrides, name: &str) -> Option<&'a String> {
    overrides.get(name).or_else(|| {
        overrides
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, escape)| escape)
    })
}

/// On-disk palette description.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaletteConfig {
    #[serde(default = "default_true")]
    builtin: bool,
    #[serde(default)]
    fallback: Option<serde_yaml::Value>,
    #[serde(default)]
    colors: BTreeMap<String, serde_yaml::Value>,
}

fn default_true() -> bool {
    true
}

impl PaletteConfig {
    fn build(self) -> Result<Palette, PaletteError> {
        let mut palette = if self.builtin {
            Palette::builtin()
        } else {
            Palette::empty()
        };

        // Literal values first so names can refer to them.
        let mut named = Vec::new();
        for (name, value) in self.colors {
            match value {
                serde_yaml::Value::String(ref s) if !s.trim().starts_with('#') => {
                    named.push((name, s.clone()));
                }
                other => {
                    let spec = parse_value(&palette, &other).map_err(|message| {
                        PaletteError::InvalidColor {
                            name: name.clone(),
                            value: describe(&other),
                            message,
                        }
                    })?;
                    palette.insert(&name, spec);
                }
            }
        }

        // Named references, resolved until no further progress is made.
        while !named.is_empty() {
            let before = named.len();
            named.retain(|(name, target)| match palette.lookup(target) {
                Some(spec) => {
                    palette.insert(name, spec);
                    false
                }
                None => true,
            });
            if named.len() == before {
                let (name, target) = named.remove(0);
                return Err(PaletteError::InvalidColor {
                    name,
                    message: format!("Unknown color name: {}", target),
                    value: target,
                });
            }
        }

        if let Some(value) = self.fallback {
            let spec =
                parse_value(&palette, &value).map_err(|message| PaletteError::InvalidColor {
                    name: "fallback".to_string(),
                    value: describe(&value),
                    message,
                })?;
            palette.fallback = spec;
        }

        Ok(palette)
    }
}

fn parse_value(palette: &Palette, value: &serde_yaml::Value) -> Result<ColorSpec, String> {
    match value {
        serde_yaml::Value::String(s) => palette.parse(s),
        serde_yaml::Value::Sequence(seq) => ColorSpec::parse_rgb_tuple(seq),
        _ => Err(format!("Invalid color value: {:?}", value)),
    }
}

fn describe(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Lookup
    // =========================================================================

    #[test]
    fn test_builtin_names() {
        let p = Palette::builtin();
        assert_eq!(p.lookup("red"), Some(ColorSpec::rgb(255, 0, 0)));
        assert_eq!(p.lookup("teal"), Some(ColorSpec::rgb(0, 128, 128)));
        assert_eq!(p.lookup("grey"), p.lookup("gray"));
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let p = Palette::builtin();
        assert_eq!(p.lookup("RED"), p.lookup("red"));
        assert_eq!(p.lookup("  Blue "), p.lookup("blue"));
    }

    #[test]
    fn test_shade_suffix() {
        let p = Palette::builtin();
        let base = ColorSpec::rgb(255, 0, 0);
        assert_eq!(p.lookup("red5"), Some(base));
        assert_eq!(p.lookup("red2"), Some(base.shade(2)));
        assert_eq!(p.lookup("red8"), Some(base.shade(8)));
    }

    #[test]
    fn test_shade_suffix_rejects_zero_and_bare_digit() {
        let p = Palette::builtin();
        assert_eq!(p.lookup("red0"), None);
        assert_eq!(p.lookup("5"), None);
        assert_eq!(p.lookup("red55"), None);
    }

    #[test]
    fn test_bright_light_dark_prefixes() {
        let p = Palette::builtin();
        let base = ColorSpec::rgb(0, 0, 255);
        assert_eq!(p.lookup("bright_blue"), Some(base.shade(3)));
        assert_eq!(p.lookup("light_blue"), Some(base.shade(3)));
        assert_eq!(p.lookup("dark_blue"), Some(base.shade(7)));
        assert_eq!(p.lookup("dark_nothing"), None);
    }

    #[test]
    fn test_prefixes_without_underscore() {
        let p = Palette::builtin();
        let base = ColorSpec::rgb(0, 0, 255);
        assert_eq!(p.lookup("lightblue"), Some(base.shade(3)));
        assert_eq!(p.lookup("BrightBlue"), Some(base.shade(3)));
        assert_eq!(p.lookup("darkblue"), Some(base.shade(7)));
        assert_eq!(p.lookup("darkness"), None);
    }

    #[test]
    fn test_parse_bare_hex() {
        let p = Palette::builtin();
        assert_eq!(p.parse("ff8800").unwrap(), ColorSpec::rgb(255, 136, 0));
        assert_eq!(p.parse("0f0").unwrap(), ColorSpec::rgb(0, 255, 0));
        assert!(p.parse("ff88").is_err());
        assert!(p.parse("zzzzzz").is_err());
    }

    #[test]
    fn test_parse_name_wins_over_bare_hex() {
        let p = Palette::builtin().with_color("bad", ColorSpec::rgb(1, 2, 3));
        assert_eq!(p.parse("bad").unwrap(), ColorSpec::rgb(1, 2, 3));
        assert_eq!(Palette::builtin().parse("bad").unwrap(), ColorSpec::rgb(187, 170, 221));
    }

    #[test]
    fn test_unknown_name_is_none() {
        assert_eq!(Palette::builtin().lookup("chartreuse-ish"), None);
        assert_eq!(Palette::builtin().lookup(""), None);
    }

    // =========================================================================
    // Resolve
    // =========================================================================

    #[test]
    fn test_resolve_foreground_and_background() {
        let p = Palette::builtin();
        assert_eq!(p.resolve("red", false, None), "\x1b[38;2;255;0;0m");
        assert_eq!(p.resolve("red", true, None), "\x1b[48;2;255;0;0m");
    }

    #[test]
    fn test_resolve_unknown_uses_fallback() {
        let p = Palette::builtin().with_fallback(ColorSpec::rgb(1, 2, 3));
        assert_eq!(p.resolve("mauve-ish", false, None), "\x1b[38;2;1;2;3m");
        assert_eq!(p.resolve("mauve-ish", true, None), "\x1b[48;2;1;2;3m");
    }

    #[test]
    fn test_resolve_override_wins() {
        let p = Palette::builtin();
        let mut overrides = Overrides::new();
        overrides.insert("red".to_string(), "<RED>".to_string());
        assert_eq!(p.resolve("red", false, Some(&overrides)), "<RED>");
        assert_eq!(p.resolve("Red", true, Some(&overrides)), "<RED>");
        assert_eq!(
            p.resolve("blue", false, Some(&overrides)),
            "\x1b[38;2;0;0;255m"
        );
    }

    #[test]
    fn test_override_can_name_unknown_color() {
        let p = Palette::empty();
        let mut overrides = Overrides::new();
        overrides.insert("brand".to_string(), "\x1b[38;5;208m".to_string());
        assert_eq!(p.resolve("brand", false, Some(&overrides)), "\x1b[38;5;208m");
    }

    #[test]
    fn test_with_color_ignores_background_flag() {
        let p = Palette::empty().with_color("x", ColorSpec::rgb(9, 9, 9).on_background(true));
        assert_eq!(p.resolve("x", false, None), "\x1b[38;2;9;9;9m");
    }

    // =========================================================================
    // Parse
    // =========================================================================

    #[test]
    fn test_parse_hex_and_names() {
        let p = Palette::builtin();
        assert_eq!(p.parse("#00ff00").unwrap(), ColorSpec::rgb(0, 255, 0));
        assert_eq!(p.parse(" cyan ").unwrap(), ColorSpec::rgb(0, 255, 255));
        assert!(p.parse("nonsense").is_err());
        assert!(p.parse("#12").is_err());
    }

    #[test]
    fn test_parse_or_fallback() {
        let p = Palette::builtin();
        assert_eq!(p.parse_or_fallback("nonsense"), DEFAULT_FALLBACK);
    }

    // =========================================================================
    // YAML
    // =========================================================================

    #[test]
    fn test_from_yaml_all_value_forms() {
        let p = Palette::from_yaml(
            r##"
fallback: "#010203"
colors:
  brand: "#ff6b35"
  accent: [0, 170, 255]
  warn: orange
  alias: brand
"##,
        )
        .unwrap();
        assert_eq!(p.lookup("brand"), Some(ColorSpec::rgb(255, 107, 53)));
        assert_eq!(p.lookup("accent"), Some(ColorSpec::rgb(0, 170, 255)));
        assert_eq!(p.lookup("warn"), Some(ColorSpec::rgb(255, 165, 0)));
        assert_eq!(p.lookup("alias"), p.lookup("brand"));
        assert_eq!(p.fallback(), ColorSpec::rgb(1, 2, 3));
        assert!(p.contains("red"));
    }

    #[test]
    fn test_from_yaml_chained_names() {
        let p = Palette::from_yaml(
            r#"
colors:
  a: b
  b: c
  c: teal
"#,
        )
        .unwrap();
        assert_eq!(p.lookup("a"), Some(ColorSpec::rgb(0, 128, 128)));
    }

    #[test]
    fn test_from_yaml_without_builtin() {
        let p = Palette::from_yaml("builtin: false\ncolors:\n  only: [1, 1, 1]\n").unwrap();
        assert_eq!(p.len(), 1);
        assert!(!p.contains("red"));
    }

    #[test]
    fn test_from_yaml_empty_document_fields() {
        let p = Palette::from_yaml("builtin: true\n").unwrap();
        assert_eq!(p.len(), Palette::builtin().len());
    }

    #[test]
    fn test_from_yaml_unknown_name_errors() {
        let err = Palette::from_yaml("colors:\n  x: not_a_color\n").unwrap_err();
        match err {
            PaletteError::InvalidColor { name, value, .. } => {
                assert_eq!(name, "x");
                assert_eq!(value, "not_a_color");
            }
            other => panic!("Expected InvalidColor, got {:?}", other),
        }
    }

    #[test]
    fn test_from_yaml_name_cycle_errors() {
        let err = Palette::from_yaml("colors:\n  a: b\n  b: a\n").unwrap_err();
        assert!(matches!(err, PaletteError::InvalidColor { .. }));
    }

    #[test]
    fn test_from_yaml_bad_tuple_errors() {
        let err = Palette::from_yaml("colors:\n  x: [1, 2]\n").unwrap_err();
        assert!(matches!(err, PaletteError::InvalidColor { .. }));
    }

    #[test]
    fn test_from_yaml_bad_fallback_errors() {
        let err = Palette::from_yaml("fallback: 12\n").unwrap_err();
        match err {
            PaletteError::InvalidColor { name, .. } => assert_eq!(name, "fallback"),
            other => panic!("Expected InvalidColor, got {:?}", other),
        }
    }

    #[test]
    fn test_from_yaml_malformed() {
        let err = Palette::from_yaml("colors: [unclosed").unwrap_err();
        assert!(matches!(err, PaletteError::Parse { path: None, .. }));
    }

    #[test]
    fn test_from_yaml_unknown_field() {
        let err = Palette::from_yaml("colours: {}\n").unwrap_err();
        assert!(matches!(err, PaletteError::Parse { .. }));
    }
}
