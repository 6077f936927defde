//! CSS background color parsing.
//!
//! Accepts the subset of CSS color syntax a computed style produces:
//! `transparent`, `rgb(r, g, b)` and `rgba(r, g, b, a)`. Anything else is
//! treated as "no declared background".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An RGB color with a real-valued alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f32,
}

impl Color {
    /// Fully transparent black, the value of the `transparent` keyword.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with alpha, clamped to `[0, 1]`.
    #[must_use]
    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Parse a CSS color string.
    ///
    /// Returns `None` for empty or unrecognized input.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        parse_color(Some(input))
    }

    /// Whether this color has zero alpha.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Sum of absolute RGB channel differences to `pixel`. Alpha is ignored.
    #[must_use]
    pub fn manhattan_distance(&self, pixel: [u8; 4]) -> u32 {
        u32::from(self.r.abs_diff(pixel[0]))
            + u32::from(self.g.abs_diff(pixel[1]))
            + u32::from(self.b.abs_diff(pixel[2]))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::InvalidConfig(format!("Unrecognized color: {s}")))
    }
}

/// Parse an optional CSS color string into a [`Color`].
///
/// - `None` or `""` yields `None`.
/// - `"transparent"` yields [`Color::TRANSPARENT`].
/// - `rgb(r, g, b)` / `rgba(r, g, b, a)`, matched case-insensitively anywhere in
///   the string, yields the rounded channels with alpha defaulting to `1`.
/// - Anything else yields `None`.
#[must_use]
pub fn parse_color(input: Option<&str>) -> Option<Color> {
    let input = input?;
    if input.is_empty() {
        return None;
    }
    if input == "transparent" {
        return Some(Color::TRANSPARENT);
    }

    let lowered = input.to_ascii_lowercase();
    let mut search_from = 0;
    while let Some(offset) = lowered[search_from..].find("rgb") {
        let start = search_from + offset;
        if let Some(channels) = match_functional(&lowered[start + 3..]) {
            return channels_to_color(&channels);
        }
        search_from = start + 3;
    }

    None
}

/// Raw channel tokens captured from a functional color.
struct Channels<'a> {
    rgb: [&'a str; 3],
    alpha: Option<&'a str>,
}

/// Match `a?(n, n, n[, n])` at the start of `rest`.
fn match_functional(rest: &str) -> Option<Channels<'_>> {
    let mut cursor = Cursor::new(rest);
    cursor.eat('a');
    if !cursor.eat('(') {
        return None;
    }

    cursor.skip_whitespace();
    let r = cursor.number_token()?;
    cursor.separator()?;
    let g = cursor.number_token()?;
    cursor.separator()?;
    let b = cursor.number_token()?;

    let checkpoint = cursor.rest;
    let alpha = match cursor.separator().and_then(|()| cursor.number_token()) {
        Some(token) => Some(token),
        None => {
            cursor.rest = checkpoint;
            None
        }
    };

    cursor.skip_whitespace();
    if !cursor.eat(')') {
        return None;
    }

    Some(Channels {
        rgb: [r, g, b],
        alpha,
    })
}

fn channels_to_color(channels: &Channels<'_>) -> Option<Color> {
    let [r, g, b] = channels.rgb;
    #[allow(clippy::cast_possible_truncation)]
    let alpha = match channels.alpha {
        Some(token) => parse_number(token)? as f32,
        None => 1.0,
    };

    Some(Color::rgba(
        round_channel(parse_number(r)?),
        round_channel(parse_number(g)?),
        round_channel(parse_number(b)?),
        alpha,
    ))
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Minimal forward-only scanner over the color body.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(rest: &'a str) -> Self {
        Self { rest }
    }

    fn eat(&mut self, expected: char) -> bool {
        match self.rest.strip_prefix(expected) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    /// Whitespace, a comma, whitespace.
    fn separator(&mut self) -> Option<()> {
        self.skip_whitespace();
        if !self.eat(',') {
            return None;
        }
        self.skip_whitespace();
        Some(())
    }

    /// A non-empty run of ASCII digits and dots.
    fn number_token(&mut self) -> Option<&'a str> {
        let end = self
            .rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgba_with_alpha() {
        let color = parse_color(Some("rgba(10, 20, 30, 0.5)")).expect("rgba");
        assert_eq!(color, Color::rgba(10, 20, 30, 0.5));
    }

    #[test]
    fn test_parse_transparent_keyword() {
        assert_eq!(parse_color(Some("transparent")), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_parse_absent_and_empty() {
        assert_eq!(parse_color(None), None);
        assert_eq!(parse_color(Some("")), None);
    }

    #[test]
    fn test_parse_unrecognized() {
        assert_eq!(parse_color(Some("not-a-color")), None);
        assert_eq!(parse_color(Some("#ffffff")), None);
        assert_eq!(parse_color(Some("rgb(1, 2)")), None);
        assert_eq!(parse_color(Some("rgb(1, 2, 3")), None);
    }

    #[test]
    fn test_parse_rgb_defaults_to_opaque() {
        let color = parse_color(Some("rgb(255, 255, 255)")).expect("rgb");
        assert_eq!(color, Color::rgb(255, 255, 255));
        assert!(!color.is_transparent());
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let color = parse_color(Some("rgba(  1 ,2,   3 ,  0.25  )")).expect("spaced");
        assert_eq!(color, Color::rgba(1, 2, 3, 0.25));
    }

    #[test]
    fn test_parse_is_case_insensitive_and_unanchored() {
        let color = parse_color(Some("background: RGB(4, 5, 6);")).expect("embedded");
        assert_eq!(color, Color::rgb(4, 5, 6));
    }

    #[test]
    fn test_parse_rounds_fractional_channels() {
        let color = parse_color(Some("rgb(10.4, 10.5, 254.6)")).expect("fractional");
        assert_eq!(color, Color::rgb(10, 11, 255));
    }

    #[test]
    fn test_parse_clamps_out_of_range() {
        let color = parse_color(Some("rgba(300, 0, 0, 2)")).expect("out of range");
        assert_eq!(color, Color::rgba(255, 0, 0, 1.0));
    }

    #[test]
    fn test_parse_rejects_malformed_numbers() {
        assert_eq!(parse_color(Some("rgb(1.2.3, 0, 0)")), None);
        assert_eq!(parse_color(Some("rgb(., 0, 0)")), None);
    }

    #[test]
    fn test_parse_zero_alpha_is_transparent() {
        let color = parse_color(Some("rgba(0, 0, 0, 0)")).expect("zero alpha");
        assert!(color.is_transparent());
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        let color = Color::rgba(12, 34, 56, 0.5);
        assert_eq!(color.to_string(), "rgba(12, 34, 56, 0.5)");
        assert_eq!(Color::parse(&color.to_string()), Some(color));
    }

    #[test]
    fn test_from_str_error() {
        assert!("nope".parse::<Color>().is_err());
        assert_eq!("rgb(1, 2, 3)".parse::<Color>().expect("parse"), Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_manhattan_distance_ignores_alpha() {
        let bg = Color::rgb(100, 100, 100);
        assert_eq!(bg.manhattan_distance([104, 96, 104, 0]), 12);
        assert_eq!(bg.manhattan_distance([100, 100, 100, 255]), 0);
    }
}
