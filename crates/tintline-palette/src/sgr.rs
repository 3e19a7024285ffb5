//! SGR (Select Graphic Rendition) escape sequences.
//!
//! All sequences produced by this workspace go through this module so the
//! byte layout stays identical everywhere:
//!
//! - foreground: `ESC[38;2;R;G;Bm`
//! - background: `ESC[48;2;R;G;Bm`
//! - reset: `ESC[0m`
//!
//! Text attributes use their single-parameter codes.

/// Clears every active attribute and color.
pub const RESET: &str = "\x1b[0m";
/// Bold / increased intensity.
pub const BOLD: &str = "\x1b[1m";
pub const ITALIC: &str = "\x1b[3m";
pub const UNDERLINE: &str = "\x1b[4m";
/// Slow blink.
pub const BLINK: &str = "\x1b[5m";
/// Swap foreground and background.
pub const REVERSE: &str = "\x1b[7m";
pub const STRIKETHROUGH: &str = "\x1b[9m";

/// Builds a 24-bit foreground sequence.
///
/// ```rust
/// assert_eq!(tintline_palette::sgr::fg(255, 0, 0), "\x1b[38;2;255;0;0m");
/// ```
pub fn fg(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

/// Builds a 24-bit background sequence.
pub fn bg(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[48;2;{};{};{}m", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fg_layout() {
        assert_eq!(fg(1, 22, 233), "\x1b[38;2;1;22;233m");
    }

    #[test]
    fn test_bg_layout() {
        assert_eq!(bg(0, 0, 0), "\x1b[48;2;0;0;0m");
    }

    #[test]
    fn test_attribute_codes() {
        assert_eq!(RESET, "\x1b[0m");
        assert_eq!(BOLD, "\x1b[1m");
        assert_eq!(STRIKETHROUGH, "\x1b[9m");
        assert_eq!(ITALIC, "\x1b[3m");
        assert_eq!(UNDERLINE, "\x1b[4m");
        assert_eq!(BLINK, "\x1b[5m");
        assert_eq!(REVERSE, "\x1b[7m");
    }
}
