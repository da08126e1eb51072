//! Theme assembly: named highlight groups for code block rendering.
//!
//! A `Theme` is the complete set of `HighlightGroup`s the block renderer
//! uses: one per scanner category plus the block chrome. Colors are
//! pre-resolved to terminal-ready `CellColor` values.

use glint_scan::Category;
use glint_term::color::{CellColor, Color, ColorParseError};
use glint_term::style::{Attr, Style};
use thiserror::Error;

use crate::contrast::{MIN_COMMENT_RATIO, MIN_TEXT_RATIO, contrast_ratio, ensure_readability};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("unknown theme `{name}` (available: {available})")]
    Unknown { name: String, available: String },

    #[error("bad color for `{category}`")]
    Color {
        category: Category,
        #[source]
        source: ColorParseError,
    },
}

// ---------------------------------------------------------------------------
// HighlightGroup
// ---------------------------------------------------------------------------

/// A resolved style for one element of a code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightGroup {
    pub fg: CellColor,
    pub bg: CellColor,
    pub attrs: Attr,
}

impl HighlightGroup {
    #[must_use]
    pub const fn fg_only(fg: CellColor) -> Self {
        Self {
            fg,
            bg: CellColor::Default,
            attrs: Attr::empty(),
        }
    }

    #[must_use]
    pub const fn fg_attrs(fg: CellColor, attrs: Attr) -> Self {
        Self {
            fg,
            bg: CellColor::Default,
            attrs,
        }
    }

    #[must_use]
    pub const fn fg_bg(fg: CellColor, bg: CellColor) -> Self {
        Self {
            fg,
            bg,
            attrs: Attr::empty(),
        }
    }

    #[must_use]
    pub const fn attrs_only(attrs: Attr) -> Self {
        Self::fg_attrs(CellColor::Default, attrs)
    }

    /// The terminal style for this group.
    #[must_use]
    pub const fn style(self) -> Style {
        Style {
            fg: self.fg,
            bg: self.bg,
            attrs: self.attrs,
        }
    }

    /// This group drawn over `bg`, unless it sets its own background.
    #[must_use]
    pub const fn over(self, bg: CellColor) -> Style {
        let style = self.style();
        if style.bg.is_default() {
            style.with_bg(bg)
        } else {
            style
        }
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// A complete code block theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Name of this theme (e.g., "docs", "terminal").
    pub name: String,

    /// Whether this is a dark theme.
    pub is_dark: bool,

    // ── Block chrome ──────────────────────────────────────────
    /// Fill color behind code rows. `Default` = terminal background.
    pub background: CellColor,
    /// Border characters of the frame.
    pub frame: HighlightGroup,
    /// Header row (title bar) fill and title text.
    pub title: HighlightGroup,
    /// Description line under the title.
    pub description: HighlightGroup,
    /// Language badge at the right of the header.
    pub badge: HighlightGroup,
    /// Line number gutter.
    pub line_nr: HighlightGroup,

    // ── Token categories ──────────────────────────────────────
    pub plain: HighlightGroup,
    pub keyword: HighlightGroup,
    pub builtin: HighlightGroup,
    pub class: HighlightGroup,
    pub string: HighlightGroup,
    pub comment: HighlightGroup,
}

impl Theme {
    /// Dark theme in the documentation site's colors.
    #[must_use]
    pub fn docs() -> Self {
        let rgb = |r, g, b| CellColor::Rgb(r, g, b);
        let white = rgb(0xff, 0xff, 0xff);
        Self {
            name: "docs".to_string(),
            is_dark: true,

            background: rgb(0x03, 0x07, 0x12), // gray-950
            frame: HighlightGroup::fg_only(rgb(0x1f, 0x29, 0x37)),
            title: HighlightGroup {
                fg: white,
                bg: rgb(0x11, 0x18, 0x27), // gray-900
                attrs: Attr::BOLD,
            },
            description: HighlightGroup::fg_bg(rgb(0x9c, 0xa3, 0xaf), rgb(0x11, 0x18, 0x27)),
            badge: HighlightGroup {
                fg: white,
                bg: rgb(0x25, 0x63, 0xeb), // blue-600
                attrs: Attr::BOLD,
            },
            line_nr: HighlightGroup::fg_only(rgb(0x4b, 0x55, 0x63)),

            plain: HighlightGroup::fg_only(rgb(0xd1, 0xd5, 0xdb)),    // gray-300
            keyword: HighlightGroup::fg_only(rgb(0xf4, 0x72, 0xb6)),  // pink-400
            builtin: HighlightGroup::fg_only(rgb(0xfa, 0xcc, 0x15)),  // yellow-400
            class: HighlightGroup::fg_only(rgb(0x93, 0xc5, 0xfd)),    // blue-300
            string: HighlightGroup::fg_only(rgb(0x4a, 0xde, 0x80)),   // green-400
            comment: HighlightGroup::fg_only(rgb(0x6b, 0x72, 0x80)),  // gray-500
        }
    }

    /// Light counterpart of [`docs`](Self::docs): same hues, darker shades.
    #[must_use]
    pub fn docs_light() -> Self {
        let rgb = |r, g, b| CellColor::Rgb(r, g, b);
        Self {
            name: "docs-light".to_string(),
            is_dark: false,

            background: rgb(0xf9, 0xfa, 0xfb),
            frame: HighlightGroup::fg_only(rgb(0xd1, 0xd5, 0xdb)),
            title: HighlightGroup {
                fg: rgb(0x11, 0x18, 0x27),
                bg: rgb(0xf3, 0xf4, 0xf6),
                attrs: Attr::BOLD,
            },
            description: HighlightGroup::fg_bg(rgb(0x4b, 0x55, 0x63), rgb(0xf3, 0xf4, 0xf6)),
            badge: HighlightGroup {
                fg: rgb(0xff, 0xff, 0xff),
                bg: rgb(0x7c, 0x3a, 0xed), // purple-600
                attrs: Attr::BOLD,
            },
            line_nr: HighlightGroup::fg_only(rgb(0x9c, 0xa3, 0xaf)),

            plain: HighlightGroup::fg_only(rgb(0x1f, 0x29, 0x37)),
            keyword: HighlightGroup::fg_only(rgb(0xbe, 0x18, 0x5d)),
            builtin: HighlightGroup::fg_only(rgb(0xa1, 0x62, 0x07)),
            class: HighlightGroup::fg_only(rgb(0x1d, 0x4e, 0xd8)),
            string: HighlightGroup::fg_only(rgb(0x15, 0x80, 0x3d)),
            comment: HighlightGroup::fg_only(rgb(0x6b, 0x72, 0x80)),
        }
    }

    /// Terminal-native theme using the 16 ANSI colors, so code follows the
    /// user's terminal palette. No background fill.
    #[must_use]
    pub fn terminal() -> Self {
        use CellColor::{Ansi256, Default};

        Self {
            name: "terminal".to_string(),
            is_dark: true, // Unused: no colors are generated.

            background: Default,
            frame: HighlightGroup::fg_only(Ansi256(8)),
            title: HighlightGroup::attrs_only(Attr::BOLD),
            description: HighlightGroup::fg_only(Ansi256(8)),
            badge: HighlightGroup::fg_attrs(Ansi256(4), Attr::BOLD.union(Attr::INVERSE)),
            line_nr: HighlightGroup::fg_only(Ansi256(8)),

            plain: HighlightGroup::default(),
            keyword: HighlightGroup::fg_only(Ansi256(5)), // magenta
            builtin: HighlightGroup::fg_only(Ansi256(3)), // yellow
            class: HighlightGroup::fg_only(Ansi256(4)),   // blue
            string: HighlightGroup::fg_only(Ansi256(2)),  // green
            comment: HighlightGroup::fg_only(Ansi256(8)), // bright black
        }
    }

    /// Attributes only, for terminals where color is unwelcome but
    /// escapes still work.
    #[must_use]
    pub fn mono() -> Self {
        Self {
            name: "mono".to_string(),
            is_dark: true,

            background: CellColor::Default,
            frame: HighlightGroup::attrs_only(Attr::DIM),
            title: HighlightGroup::attrs_only(Attr::BOLD),
            description: HighlightGroup::attrs_only(Attr::DIM),
            badge: HighlightGroup::attrs_only(Attr::INVERSE),
            line_nr: HighlightGroup::attrs_only(Attr::DIM),

            plain: HighlightGroup::default(),
            keyword: HighlightGroup::attrs_only(Attr::BOLD),
            builtin: HighlightGroup::attrs_only(Attr::UNDERLINE),
            class: HighlightGroup::attrs_only(Attr::BOLD),
            string: HighlightGroup::attrs_only(Attr::ITALIC),
            comment: HighlightGroup::attrs_only(Attr::DIM),
        }
    }

    /// The group for a scanner category.
    #[must_use]
    pub const fn group(&self, category: Category) -> HighlightGroup {
        match category {
            Category::Plain => self.plain,
            Category::Keyword => self.keyword,
            Category::Builtin => self.builtin,
            Category::ClassName => self.class,
            Category::StringLiteral => self.string,
            Category::Comment => self.comment,
        }
    }

    const fn group_mut(&mut self, category: Category) -> &mut HighlightGroup {
        match category {
            Category::Plain => &mut self.plain,
            Category::Keyword => &mut self.keyword,
            Category::Builtin => &mut self.builtin,
            Category::ClassName => &mut self.class,
            Category::StringLiteral => &mut self.string,
            Category::Comment => &mut self.comment,
        }
    }

    /// The style to draw `category` text with on a code row.
    #[must_use]
    pub const fn code_style(&self, category: Category) -> Style {
        self.group(category).over(self.background)
    }

    /// Replace the foreground color of one category.
    #[must_use]
    pub fn with_color(mut self, category: Category, color: Color) -> Self {
        self.group_mut(category).fg = color.into();
        self
    }

    /// Apply `category → hex` overrides, e.g. from a config file.
    ///
    /// With `min_contrast`, each override on a theme with an RGB background
    /// is nudged until it reaches that ratio (comments use the lower
    /// comment threshold scaled by the same factor).
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Color`] for the first unparsable color.
    pub fn with_overrides<'a, I>(
        mut self,
        overrides: I,
        min_contrast: Option<f64>,
    ) -> Result<Self, ThemeError>
    where
        I: IntoIterator<Item = (Category, &'a str)>,
    {
        let background = self.background.to_color();
        for (category, hex) in overrides {
            let mut color =
                Color::hex(hex).map_err(|source| ThemeError::Color { category, source })?;
            if let (Some(min), Some(bg)) = (min_contrast, background) {
                let min = if category == Category::Comment {
                    min * MIN_COMMENT_RATIO / MIN_TEXT_RATIO
                } else {
                    min
                };
                color = ensure_readability(color, bg, min);
            }
            self = self.with_color(category, color);
        }
        Ok(self)
    }

    /// Categories whose foreground falls short of the readability
    /// thresholds against the code background, with the measured ratio.
    ///
    /// Empty for themes that leave colors to the terminal.
    #[must_use]
    pub fn readability_issues(&self) -> Vec<(Category, f64)> {
        let Some(bg) = self.background.to_color() else {
            return Vec::new();
        };
        Category::ALL
            .into_iter()
            .filter_map(|category| {
                let fg = self.group(category).fg.to_color()?;
                let ratio = contrast_ratio(fg, bg);
                let min = if category == Category::Comment {
                    MIN_COMMENT_RATIO
                } else {
                    MIN_TEXT_RATIO
                };
                (ratio < min).then_some((category, ratio))
            })
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::docs()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docs_matches_site_palette() {
        let t = Theme::docs();
        assert_eq!(t.keyword.fg, CellColor::Rgb(0xf4, 0x72, 0xb6));
        assert_eq!(t.builtin.fg, CellColor::Rgb(0xfa, 0xcc, 0x15));
        assert_eq!(t.class.fg, CellColor::Rgb(0x93, 0xc5, 0xfd));
        assert_eq!(t.string.fg, CellColor::Rgb(0x4a, 0xde, 0x80));
        assert_eq!(t.comment.fg, CellColor::Rgb(0x6b, 0x72, 0x80));
        assert_eq!(t.plain.fg, CellColor::Rgb(0xd1, 0xd5, 0xdb));
    }

    #[test]
    fn group_covers_every_category() {
        let t = Theme::docs();
        let groups: Vec<_> = Category::ALL.iter().map(|&c| t.group(c)).collect();
        // All six category colors are distinct in the docs theme.
        for (i, a) in groups.iter().enumerate() {
            for b in &groups[i + 1..] {
                assert_ne!(a.fg, b.fg);
            }
        }
    }

    #[test]
    fn code_style_fills_background() {
        let t = Theme::docs();
        let style = t.code_style(Category::Keyword);
        assert_eq!(style.bg, t.background);
        assert_eq!(style.fg, t.keyword.fg);
    }

    #[test]
    fn terminal_uses_only_palette_colors() {
        let t = Theme::terminal();
        for c in Category::ALL {
            assert!(!matches!(t.group(c).fg, CellColor::Rgb(..)), "{c} uses RGB");
        }
        assert!(t.background.is_default());
        assert!(t.code_style(Category::Plain).is_plain());
    }

    #[test]
    fn builtin_themes_are_readable() {
        for theme in [Theme::docs(), Theme::docs_light()] {
            let issues = theme.readability_issues();
            assert!(issues.is_empty(), "{}: {issues:?}", theme.name);
        }
    }

    #[test]
    fn comments_are_de_emphasized() {
        for theme in [Theme::docs(), Theme::docs_light()] {
            let bg = theme.background.to_color().unwrap();
            let plain = contrast_ratio(theme.plain.fg.to_color().unwrap(), bg);
            let comment = contrast_ratio(theme.comment.fg.to_color().unwrap(), bg);
            assert!(comment < plain, "{}: comment {comment} vs plain {plain}", theme.name);
        }
    }

    #[test]
    fn override_replaces_fg() {
        let t = Theme::docs()
            .with_overrides([(Category::Keyword, "#ff0000")], None)
            .unwrap();
        assert_eq!(t.keyword.fg, CellColor::Rgb(255, 0, 0));
        assert_eq!(t.builtin, Theme::docs().builtin);
    }

    #[test]
    fn override_bad_hex() {
        let err = Theme::docs()
            .with_overrides([(Category::StringLiteral, "green")], None)
            .unwrap_err();
        assert!(matches!(err, ThemeError::Color { category: Category::StringLiteral, .. }));
        assert_eq!(err.to_string(), "bad color for `string`");
    }

    #[test]
    fn override_nudged_to_min_contrast() {
        let t = Theme::docs()
            .with_overrides([(Category::Keyword, "#1f2937")], Some(MIN_TEXT_RATIO))
            .unwrap();
        assert!(t.readability_issues().is_empty());
        assert_ne!(t.keyword.fg, CellColor::Rgb(0x1f, 0x29, 0x37));
    }

    #[test]
    fn unreadable_override_reported() {
        let t = Theme::docs()
            .with_overrides([(Category::Builtin, "#111111")], None)
            .unwrap();
        let issues = t.readability_issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].0, Category::Builtin);
    }

    #[test]
    fn terminal_theme_has_no_readability_report() {
        assert!(Theme::terminal().readability_issues().is_empty());
    }
}
