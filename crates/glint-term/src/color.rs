// SPDX-License-Identifier: MIT
//
// Color types.
//
// Two representations:
//
//   Color     an opaque sRGB color, the unit themes are written in
//             (`#f472b6`). Knows its WCAG relative luminance so themes
//             can check readability.
//
//   CellColor what actually gets encoded as an escape sequence, either
//             24-bit RGB, a 256-palette index, or the terminal's default.
//
// Terminals that can't do TrueColor get downsampled CellColors at write
// time (see `ColorDepth`). Nearest-match uses Euclidean distance in
// linear-light RGB, which is plenty for mapping a dozen theme colors.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An opaque 8-bit-per-channel sRGB color.
///
/// ```
/// use glint_term::color::Color;
///
/// let pink = Color::hex("#f472b6").unwrap();
/// assert_eq!(pink, Color::rgb(0xf4, 0x72, 0xb6));
/// assert_eq!(pink.to_hex(), "#f472b6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB` (the `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns a [`ColorParseError`] if the string has the wrong length or a
    /// non-hex digit.
    pub fn hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        let bad = || ColorParseError {
            input: s.to_owned(),
        };
        if !digits.is_ascii() {
            return Err(bad());
        }
        let bytes = digits.as_bytes();
        match bytes.len() {
            3 => {
                let r = hex_digit(bytes[0]).ok_or_else(bad)?;
                let g = hex_digit(bytes[1]).ok_or_else(bad)?;
                let b = hex_digit(bytes[2]).ok_or_else(bad)?;
                // #abc → #aabbcc
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = hex_byte(&bytes[0..2]).ok_or_else(bad)?;
                let g = hex_byte(&bytes[2..4]).ok_or_else(bad)?;
                let b = hex_byte(&bytes[4..6]).ok_or_else(bad)?;
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(bad()),
        }
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels in linear light, 0.0–1.0.
    #[must_use]
    pub fn to_linear(self) -> (f32, f32, f32) {
        (
            srgb_to_linear(f32::from(self.r) / 255.0),
            srgb_to_linear(f32::from(self.g) / 255.0),
            srgb_to_linear(f32::from(self.b) / 255.0),
        )
    }

    /// WCAG 2.x relative luminance, 0.0 (black) to 1.0 (white).
    #[must_use]
    pub fn luminance(self) -> f32 {
        let (r, g, b) = self.to_linear();
        0.0722f32.mul_add(b, 0.2126f32.mul_add(r, 0.7152 * g))
    }

    /// Interpolate toward `other` in sRGB; `t` is clamped to 0.0–1.0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn mix(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| {
            let (a, b) = (f32::from(a), f32::from(b));
            // Clamp guarantees 0.0 <= v <= 255.0 before truncation.
            (b - a).mul_add(t, a).round().clamp(0.0, 255.0) as u8
        };
        Self::rgb(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }

    /// Squared distance in linear-light RGB.
    #[must_use]
    pub fn distance_sq(self, other: Self) -> f32 {
        let (r1, g1, b1) = self.to_linear();
        let (r2, g2, b2) = other.to_linear();
        let (dr, dg, db) = (r1 - r2, g1 - g2, b1 - b2);
        db.mul_add(db, dr.mul_add(dr, dg * dg))
    }

    /// Nearest index in the xterm 256-color palette.
    #[must_use]
    pub fn nearest_ansi256(self) -> u8 {
        nearest_in(self, 0..=255)
    }

    /// Nearest index among the 16 standard colors.
    #[must_use]
    pub fn nearest_ansi16(self) -> u8 {
        nearest_in(self, 0..=15)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::hex(s)
    }
}

impl From<Color> for CellColor {
    fn from(c: Color) -> Self {
        Self::Rgb(c.r, c.g, c.b)
    }
}

/// Returned by [`Color::hex`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color `{input}` (expected #RGB or #RRGGBB)")]
pub struct ColorParseError {
    pub input: String,
}

// ─── CellColor ───────────────────────────────────────────────────────────────

/// A color as the terminal sees it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// ANSI 256-color palette index (0–15 are the user's themed colors).
    Ansi256(u8),

    /// Whatever the terminal's default is.
    #[default]
    Default,
}

impl CellColor {
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    /// The sRGB value this color stands for, using xterm defaults for
    /// palette indices. `None` for [`CellColor::Default`].
    #[must_use]
    pub fn to_color(self) -> Option<Color> {
        match self {
            Self::Rgb(r, g, b) => Some(Color::rgb(r, g, b)),
            Self::Ansi256(idx) => Some(ansi256_to_color(idx)),
            Self::Default => None,
        }
    }

    /// Re-express this color for a terminal with the given depth.
    ///
    /// Palette indices below 16 are left alone for 16-color terminals: the
    /// user's palette is the point of using them.
    #[must_use]
    pub fn downsample(self, depth: ColorDepth) -> Self {
        match (depth, self) {
            (ColorDepth::None, _) | (_, Self::Default) => Self::Default,
            (ColorDepth::TrueColor, c) => c,
            (ColorDepth::Ansi256, Self::Rgb(r, g, b)) => {
                Self::Ansi256(Color::rgb(r, g, b).nearest_ansi256())
            }
            (ColorDepth::Ansi256, c) => c,
            (ColorDepth::Ansi16, Self::Rgb(r, g, b)) => {
                Self::Ansi256(Color::rgb(r, g, b).nearest_ansi16())
            }
            (ColorDepth::Ansi16, Self::Ansi256(idx)) if idx < 16 => self,
            (ColorDepth::Ansi16, Self::Ansi256(idx)) => {
                Self::Ansi256(ansi256_to_color(idx).nearest_ansi16())
            }
        }
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Default => write!(f, "default"),
        }
    }
}

// ─── ColorDepth ──────────────────────────────────────────────────────────────

/// How many colors the output terminal can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    #[default]
    TrueColor,
    Ansi256,
    Ansi16,
    /// No escapes at all: plain text for pipes and files.
    None,
}

impl ColorDepth {
    /// Guess from `COLORTERM` / `TERM` values.
    ///
    /// `COLORTERM=truecolor|24bit` → `TrueColor`; a `TERM` containing
    /// `256color` → `Ansi256`; `TERM=dumb` → `None`; anything else → `Ansi16`.
    #[must_use]
    pub fn detect(colorterm: Option<&str>, term: Option<&str>) -> Self {
        if matches!(colorterm, Some("truecolor" | "24bit")) {
            return Self::TrueColor;
        }
        match term {
            Some("dumb") => Self::None,
            Some(t) if t.contains("256color") => Self::Ansi256,
            _ => Self::Ansi16,
        }
    }

    /// [`detect`](Self::detect) using the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let colorterm = std::env::var("COLORTERM").ok();
        let term = std::env::var("TERM").ok();
        Self::detect(colorterm.as_deref(), term.as_deref())
    }
}

// ─── Palette ─────────────────────────────────────────────────────────────────

/// xterm's default values for the 16 standard colors.
pub const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// The sRGB value of a 256-palette index.
#[must_use]
pub fn ansi256_to_color(idx: u8) -> Color {
    match idx {
        0..=15 => {
            let (r, g, b) = ANSI16_RGB[usize::from(idx)];
            Color::rgb(r, g, b)
        }
        // 6×6×6 cube, levels 0, 95, 135, 175, 215, 255.
        16..=231 => {
            let i = idx - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + 40 * v };
            Color::rgb(level(i / 36), level((i % 36) / 6), level(i % 6))
        }
        232..=255 => {
            let v = 8 + 10 * (idx - 232);
            Color::rgb(v, v, v)
        }
    }
}

fn nearest_in(color: Color, candidates: std::ops::RangeInclusive<u8>) -> u8 {
    let mut best = 0;
    let mut best_dist = f32::MAX;
    for idx in candidates {
        let dist = color.distance_sq(ansi256_to_color(idx));
        if dist < best_dist {
            best_dist = dist;
            best = idx;
        }
    }
    best
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// sRGB transfer function, inverse (gamma → linear).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn hex_byte(pair: &[u8]) -> Option<u8> {
    Some((hex_digit(pair[0])? << 4) | hex_digit(pair[1])?)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
