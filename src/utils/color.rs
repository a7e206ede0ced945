use plotters::style::RGBAColor;

use super::errors::ChartError;

/// Parse a CSS color string into an RGBA color
/// Supported: `#rgb`, `#rrggbb`, `rgb(r,g,b)`, `rgba(r,g,b,a)`
pub fn parse_css_color(input: &str) -> Result<RGBAColor, ChartError> {
    let s = input.trim().to_lowercase();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ChartError::InvalidColor(input.to_string()));
    }

    let (body, expect_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
        (rest, true)
    } else if let Some(rest) = s.strip_prefix("rgb(") {
        (rest, false)
    } else {
        return Err(ChartError::InvalidColor(input.to_string()));
    };

    let body = body
        .strip_suffix(')')
        .ok_or_else(|| ChartError::InvalidColor(input.to_string()))?;
    let parts: Vec<&str> = body.split(',').map(|p| p.trim()).collect();

    let expected = if expect_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return Err(ChartError::InvalidColor(input.to_string()));
    }

    let channel = |p: &str| -> Result<u8, ChartError> {
        p.parse::<u8>()
            .map_err(|_| ChartError::InvalidColor(input.to_string()))
    };

    let alpha = if expect_alpha {
        let a: f64 = parts[3]
            .parse()
            .map_err(|_| ChartError::InvalidColor(input.to_string()))?;
        if !(0.0..=1.0).contains(&a) {
            return Err(ChartError::InvalidColor(input.to_string()));
        }
        a
    } else {
        1.0
    };

    Ok(RGBAColor(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, alpha))
}

fn parse_hex(hex: &str) -> Option<RGBAColor> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some(RGBAColor(digit(0)?, digit(1)?, digit(2)?, 1.0))
        }
        6 => {
            let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(RGBAColor(pair(0)?, pair(2)?, pair(4)?, 1.0))
        }
        _ => None,
    }
}
