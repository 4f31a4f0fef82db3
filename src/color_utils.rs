//! Color parsing for render styles and the `--background` flag

use palette::{Srgb, Srgba};
use std::str::FromStr;

/// Parse a color string into sRGBA
/// Accepts:
/// - "transparent" => fully transparent black
/// - #RRGGBB, RRGGBB or #RGB => opaque color
/// - #RRGGBBAA or RRGGBBAA => color with alpha
pub fn parse_color(color_str: &str) -> Result<Srgba<u8>, String> {
    let trimmed = color_str.trim();
    if trimmed.eq_ignore_ascii_case("transparent") {
        return Ok(Srgba::new(0, 0, 0, 0));
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !hex.is_ascii() {
        return Err(format!("Invalid color {color_str:?}: not a hex code"));
    }
    let (rgb, alpha) = match hex.len() {
        3 | 6 => (hex, 255),
        8 => {
            let alpha = u8::from_str_radix(&hex[6..8], 16)
                .map_err(|_| "Invalid hex digit in A component".to_string())?;
            (&hex[0..6], alpha)
        }
        n => {
            return Err(format!(
                "Expected 3, 6 or 8 hex digits (RGB, RRGGBB or RRGGBBAA), got {n}"
            ))
        }
    };

    let color = Srgb::<u8>::from_str(rgb).map_err(|e| format!("Invalid color {color_str:?}: {e}"))?;
    Ok(Srgba::new(color.red, color.green, color.blue, alpha))
}

/// Parse a style color, falling back to opaque black for malformed input
pub fn parse_color_or_black(color_str: &str) -> Srgba<u8> {
    parse_color(color_str).unwrap_or_else(|err| {
        log::warn!("{err}; using black");
        Srgba::new(0, 0, 0, 255)
    })
}

/// `#rrggbb` for SVG attributes; alpha is emitted separately as opacity
pub fn to_svg_hex(color: Srgba<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

pub fn svg_opacity(color: Srgba<u8>) -> f64 {
    f64::from(color.alpha) / 255.0
}

pub fn is_transparent(color: Srgba<u8>) -> bool {
    color.alpha == 0
}

pub fn to_skia(color: Srgba<u8>) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.red, color.green, color.blue, color.alpha)
}
