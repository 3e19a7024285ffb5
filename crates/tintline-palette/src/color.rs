//! Color values and their parsing.
//!
//! A [`ColorSpec`] is a 24-bit RGB triple plus a flag selecting foreground or
//! background output. Colors can be written as:
//!
//! - Hex: `"#ff6b35"` or `"#f63"` (3 or 6 digits)
//! - RGB tuple (config files only): `[255, 107, 53]`
//! - A palette name, resolved by [`Palette`](crate::Palette)
//!
//! # Example
//!
//! ```rust
//! use tintline_palette::ColorSpec;
//!
//! let orange = ColorSpec::parse_hex("#ff6b35").unwrap();
//! assert_eq!((orange.r, orange.g, orange.b), (255, 107, 53));
//! assert_eq!(orange.escape(), "\x1b[38;2;255;107;53m");
//! assert_eq!(orange.on_background(true).escape(), "\x1b[48;2;255;107;53m");
//! ```

use crate::sgr;

/// An RGB color with a foreground/background selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Emit as a background (`48;2`) rather than foreground (`38;2`) sequence.
    pub background: bool,
}

impl ColorSpec {
    /// Creates a foreground color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            background: false,
        }
    }

    /// Creates a foreground color from wider integers, clamping each channel
    /// into `0..=255`.
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        let clamp = |c: i64| c.clamp(0, 255) as u8;
        Self::rgb(clamp(r), clamp(g), clamp(b))
    }

    /// Returns a copy with the background flag set to `background`.
    pub const fn on_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    /// The SGR sequence that switches the terminal to this color.
    pub fn escape(&self) -> String {
        if self.background {
            sgr::bg(self.r, self.g, self.b)
        } else {
            sgr::fg(self.r, self.g, self.b)
        }
    }

    /// Linear interpolation between `self` and `other`.
    ///
    /// `t` is clamped to `0.0..=1.0`; channels are rounded. The result keeps
    /// `self`'s background flag.
    pub fn lerp(&self, other: &ColorSpec, t: f64) -> ColorSpec {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            let v = a as f64 + (b as f64 - a as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        ColorSpec {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            background: self.background,
        }
    }

    /// Shifts the color toward white (`level < 5`) or black (`level > 5`).
    ///
    /// Level 5 is the color itself; each step moves 18% of the way.
    /// Levels outside `1..=9` are clamped.
    pub fn shade(&self, level: u8) -> ColorSpec {
        let level = level.clamp(1, 9) as f64;
        let step = 0.18;
        if level < 5.0 {
            self.lerp(&ColorSpec::rgb(255, 255, 255), (5.0 - level) * step)
        } else {
            self.lerp(&ColorSpec::rgb(0, 0, 0), (level - 5.0) * step)
        }
    }

    /// Parses a hex color, with or without the leading `#`.
    pub fn parse_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(format!("Invalid hex: {}", hex));
        }
        match hex.len() {
            // #rgb -> #rrggbb
            3 => {
                let digit = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| format!("Invalid hex: {}", hex))
                };
                Ok(ColorSpec::rgb(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => {
                let pair = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 2], 16)
                        .map_err(|_| format!("Invalid hex: {}", hex))
                };
                Ok(ColorSpec::rgb(pair(0)?, pair(2)?, pair(4)?))
            }
            _ => Err(format!(
                "Invalid hex color: #{} (must be 3 or 6 digits)",
                hex
            )),
        }
    }

    /// Parses an `[r, g, b]` tuple from a YAML sequence.
    pub fn parse_rgb_tuple(seq: &[serde_yaml::Value]) -> Result<Self, String> {
        if seq.len() != 3 {
            return Err(format!(
                "RGB tuple must have exactly 3 values, got {}",
                seq.len()
            ));
        }

        let mut components = [0u8; 3];
        for (i, val) in seq.iter().enumerate() {
            let n = val
                .as_u64()
                .ok_or_else(|| format!("RGB component {} is not a number", i))?;
            if n > 255 {
                return Err(format!("RGB component {} out of range (0-255): {}", i, n));
            }
            components[i] = n as u8;
        }

        Ok(ColorSpec::rgb(components[0], components[1], components[2]))
    }
}

impl std::fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
