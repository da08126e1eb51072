//! WCAG contrast ratio checks for readable code.
//!
//! - Code text: contrast ratio >= 4.5:1 (WCAG AA)
//! - Comments: at least 2.5:1 so they stay legible, and below plain text so
//!   they read as de-emphasized

use glint_term::color::Color;

/// Minimum ratio for code text.
pub const MIN_TEXT_RATIO: f64 = 4.5;

/// Minimum ratio for comments.
pub const MIN_COMMENT_RATIO: f64 = 2.5;

/// WCAG 2.1 contrast ratio between two colors, in [1.0, 21.0].
///
/// The result is the same regardless of argument order.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = f64::from(a.luminance());
    let lb = f64::from(b.luminance());
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Move `fg` toward white (dark backgrounds) or black (light backgrounds)
/// just far enough to reach `min_ratio` against `bg`.
///
/// Returns `fg` unchanged if it is already readable. If even pure white or
/// black can't reach the ratio, returns that extreme.
#[must_use]
pub fn ensure_readability(fg: Color, bg: Color, min_ratio: f64) -> Color {
    if contrast_ratio(fg, bg) >= min_ratio {
        return fg;
    }

    let target = if bg.luminance() < 0.18 {
        Color::WHITE
    } else {
        Color::BLACK
    };

    // Binary search on the blend amount; stay as close to `fg` as possible.
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    let mut best = target;
    for _ in 0..24 {
        let mid = (lo + hi) * 0.5;
        let candidate = fg.mix(target, mid);
        if contrast_ratio(candidate, bg) >= min_ratio {
            best = candidate;
            hi = mid;
        } else {
            lo = mid;
        }
    }
    best
}
