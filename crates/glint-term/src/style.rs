// SPDX-License-Identifier: MIT
//
// Text style: foreground, background, attributes.
//
// A Style is what one styled run of text needs. It's Copy and compared on
// every run by the StyleWriter, so it stays small: two CellColors and a
// u8 of flags.

use crate::color::CellColor;

// ─── Text Attributes ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// SGR text attributes.
    ///
    /// ```
    /// use glint_term::style::Attr;
    ///
    /// let badge = Attr::BOLD | Attr::INVERSE;
    /// assert!(badge.contains(Attr::BOLD));
    /// assert!(!badge.contains(Attr::ITALIC));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1.
        const BOLD      = 1 << 0;
        /// SGR 2: faint.
        const DIM       = 1 << 1;
        /// SGR 3.
        const ITALIC    = 1 << 2;
        /// SGR 4.
        const UNDERLINE = 1 << 3;
        /// SGR 7: swap fg and bg.
        const INVERSE   = 1 << 4;
    }
}

// ─── Style ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: CellColor,
    pub bg: CellColor,
    pub attrs: Attr,
}

impl Style {
    /// Terminal defaults, no attributes.
    pub const PLAIN: Self = Self {
        fg: CellColor::Default,
        bg: CellColor::Default,
        attrs: Attr::empty(),
    };

    #[must_use]
    pub const fn fg(fg: CellColor) -> Self {
        Self { fg, ..Self::PLAIN }
    }

    #[must_use]
    pub const fn with_bg(self, bg: CellColor) -> Self {
        Self { bg, ..self }
    }

    #[must_use]
    pub const fn with_attrs(self, attrs: Attr) -> Self {
        Self { attrs, ..self }
    }

    /// Whether writing this style needs no escape sequence at all.
    #[must_use]
    pub const fn is_plain(self) -> bool {
        self.fg.is_default() && self.bg.is_default() && self.attrs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_is_default() {
        assert_eq!(Style::default(), Style::PLAIN);
        assert!(Style::PLAIN.is_plain());
    }

    #[test]
    fn builders_compose() {
        let s = Style::fg(CellColor::Ansi256(5))
            .with_bg(CellColor::Rgb(3, 7, 18))
            .with_attrs(Attr::BOLD);
        assert_eq!(s.fg, CellColor::Ansi256(5));
        assert_eq!(s.bg, CellColor::Rgb(3, 7, 18));
        assert_eq!(s.attrs, Attr::BOLD);
        assert!(!s.is_plain());
    }

    #[test]
    fn attrs_alone_are_not_plain() {
        assert!(!Style::PLAIN.with_attrs(Attr::DIM).is_plain());
    }
}
