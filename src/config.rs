// SPDX-License-Identifier: MIT
//
// glint.toml: user configuration.
//
// Every key is optional. Resolution order, lowest to highest:
//
//   built-in defaults  →  glint.toml  →  command-line flags
//
//   theme = "docs-light"
//   color = "always"            # auto | always | never
//   line_numbers = true
//   frame = true
//   width = 100
//   min_contrast = 4.5          # nudge theme_colors until readable
//
//   [theme_colors]
//   keyword = "#c678dd"
//
//   [lexicon]
//   keywords = ["async", "await"]
//   builtins = ["open"]
//   replace = false             # true: start from empty word sets
//   class_pattern = "[A-Z][A-Za-z0-9]*"

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glint_docs::RenderOptions;
use glint_scan::{Category, Lexicon, Scanner};
use glint_term::ColorDepth;
use glint_term::terminal;
use glint_theme::Theme;
use serde::Deserialize;

use crate::cli::{ColorMode, GlobalArgs};
use crate::error::ConfigError;

/// Looked up in the working directory when `--config` isn't given.
pub const DEFAULT_PATH: &str = "glint.toml";

/// Theme used when neither the flags nor the config name one.
pub const DEFAULT_THEME: &str = "default";

// ─── File model ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub theme: Option<String>,
    pub color: Option<ColorMode>,
    pub line_numbers: Option<bool>,
    pub frame: Option<bool>,
    pub width: Option<usize>,
    pub min_contrast: Option<f64>,
    #[serde(default)]
    pub theme_colors: BTreeMap<String, String>,
    #[serde(default)]
    pub lexicon: LexiconConfig,
}

/// The `[lexicon]` table.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LexiconConfig {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub builtins: Vec<String>,
    #[serde(default)]
    pub replace: bool,
    pub class_pattern: Option<String>,
}

impl Config {
    /// Parse config text. `path` is only used in the error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file can't be read, otherwise the
    /// errors of [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content, path)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// The config for this run: `explicit` if given (it must exist), else
    /// `./glint.toml` if present, else defaults.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`load`](Self::load).
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let path = PathBuf::from(DEFAULT_PATH);
        if path.is_file() {
            Self::load(&path)
        } else {
            tracing::debug!("no {DEFAULT_PATH}, using defaults");
            Ok(Self::default())
        }
    }

    /// Merge with the command-line flags into what the commands run with.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown theme, a bad override color or
    /// category, an invalid lexicon word or class pattern, or an
    /// out-of-range `min_contrast`.
    pub fn resolve(self, flags: &GlobalArgs) -> Result<Settings, ConfigError> {
        let theme = self.theme(flags)?;
        let scanner = Scanner::new(self.lexicon.build()?);

        let mode = flags.color.or(self.color).unwrap_or_default();
        let depth = color_depth(mode, terminal::is_stdout_tty(), no_color_env());

        let options = RenderOptions {
            width: flags.width.or(self.width),
            line_numbers: flags.line_numbers || self.line_numbers.unwrap_or(false),
            frame: !flags.no_frame && self.frame.unwrap_or(true),
            ..RenderOptions::default()
        };

        tracing::debug!(theme = %theme.name, ?mode, ?depth, ?options, "resolved settings");
        Ok(Settings {
            theme,
            scanner,
            depth,
            options,
        })
    }

    fn theme(&self, flags: &GlobalArgs) -> Result<Theme, ConfigError> {
        let name = flags
            .theme
            .as_deref()
            .or(self.theme.as_deref())
            .unwrap_or(DEFAULT_THEME);
        let theme = glint_theme::builtin::resolve(name)?;

        if let Some(min) = self.min_contrast {
            if !(1.0..=21.0).contains(&min) {
                return Err(ConfigError::MinContrast(min));
            }
        }

        let overrides = self
            .theme_colors
            .iter()
            .map(|(category, hex)| Ok((category.parse::<Category>()?, hex.as_str())))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let theme = theme.with_overrides(overrides, self.min_contrast)?;

        for (category, ratio) in theme.readability_issues() {
            tracing::warn!(
                %category,
                ratio = %format!("{ratio:.2}"),
                "low contrast against the block background"
            );
        }
        Ok(theme)
    }
}

impl LexiconConfig {
    fn build(&self) -> Result<Lexicon, ConfigError> {
        let base = if self.replace {
            Lexicon::empty()
        } else {
            Lexicon::python()
        };
        let mut lexicon = base
            .with_keywords(self.keywords.iter().cloned())?
            .with_builtins(self.builtins.iter().cloned())?;
        if let Some(pattern) = &self.class_pattern {
            lexicon = lexicon.with_class_pattern(pattern)?;
        }
        tracing::debug!(
            keywords = lexicon.keyword_count(),
            builtins = lexicon.builtin_count(),
            "lexicon"
        );
        Ok(lexicon)
    }
}

// ─── Resolved settings ──────────────────────────────────────────────────────

/// Everything a command needs to render.
pub struct Settings {
    pub theme: Theme,
    pub scanner: Scanner,
    pub depth: ColorDepth,
    pub options: RenderOptions,
}

fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

/// The color depth for a `--color` mode.
///
/// `always` still honors the depth the terminal advertises, but never
/// drops to no color at all.
fn color_depth(mode: ColorMode, is_tty: bool, no_color: bool) -> ColorDepth {
    match mode {
        ColorMode::Never => ColorDepth::None,
        ColorMode::Auto if !is_tty || no_color => ColorDepth::None,
        ColorMode::Auto => ColorDepth::from_env(),
        ColorMode::Always => match ColorDepth::from_env() {
            ColorDepth::None => ColorDepth::Ansi16,
            depth => depth,
        },
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use glint_term::CellColor;
    use pretty_assertions::assert_eq;

    fn parse(s: &str) -> Result<Config, ConfigError> {
        Config::from_toml_str(s, Path::new("glint.toml"))
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn full_config_parses() {
        let config = parse(
            r##"
theme = "docs-light"
color = "always"
line_numbers = true
frame = false
width = 100
min_contrast = 4.5

[theme_colors]
keyword = "#c678dd"

[lexicon]
keywords = ["async", "await"]
builtins = ["open"]
class_pattern = "[A-Z][A-Za-z0-9]*"
"##,
        )
        .unwrap();
        assert_eq!(config.theme.as_deref(), Some("docs-light"));
        assert_eq!(config.color, Some(ColorMode::Always));
        assert_eq!(config.width, Some(100));
        assert_eq!(config.theme_colors["keyword"], "#c678dd");
        assert_eq!(config.lexicon.keywords, ["async", "await"]);
        assert!(!config.lexicon.replace);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(matches!(parse("colour = \"never\""), Err(ConfigError::Parse { .. })));
        assert!(parse("[lexicon]\nwords = []").is_err());
    }

    #[test]
    fn bad_color_mode_rejected() {
        assert!(parse("color = \"sometimes\"").is_err());
    }

    #[test]
    fn flags_override_file() {
        let config = parse("theme = \"mono\"\nwidth = 60\nline_numbers = true").unwrap();
        let flags = GlobalArgs {
            theme: Some("terminal".to_string()),
            width: Some(90),
            no_frame: true,
            color: Some(ColorMode::Never),
            ..GlobalArgs::default()
        };
        let settings = config.resolve(&flags).unwrap();
        assert_eq!(settings.theme.name, "terminal");
        assert_eq!(settings.options.width, Some(90));
        assert!(settings.options.line_numbers);
        assert!(!settings.options.frame);
        assert_eq!(settings.depth, ColorDepth::None);
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let flags = GlobalArgs {
            color: Some(ColorMode::Never),
            ..GlobalArgs::default()
        };
        let settings = Config::default().resolve(&flags).unwrap();
        assert_eq!(settings.theme, Theme::docs());
        assert_eq!(settings.options, RenderOptions::default());
    }

    #[test]
    fn theme_colors_applied() {
        let config = parse("[theme_colors]\nstring = \"#ff8800\"").unwrap();
        let settings = config.resolve(&GlobalArgs::default()).unwrap();
        assert_eq!(settings.theme.string.fg, CellColor::Rgb(0xff, 0x88, 0x00));
    }

    #[test]
    fn unknown_category_rejected() {
        let config = parse("[theme_colors]\nnumber = \"#ff8800\"").unwrap();
        let err = config.resolve(&GlobalArgs::default()).err().unwrap();
        assert!(matches!(err, ConfigError::Category(_)));
    }

    #[test]
    fn unknown_theme_rejected() {
        let config = parse("theme = \"solarized\"").unwrap();
        let err = config.resolve(&GlobalArgs::default()).err().unwrap();
        assert!(err.to_string().contains("solarized"));
    }

    #[test]
    fn min_contrast_range_checked() {
        let config = parse("min_contrast = 30.0").unwrap();
        let err = config.resolve(&GlobalArgs::default()).err().unwrap();
        assert!(matches!(err, ConfigError::MinContrast(_)));
    }

    #[test]
    fn lexicon_extends_defaults() {
        let config = parse("[lexicon]\nkeywords = [\"async\"]").unwrap();
        let lexicon = config.lexicon.build().unwrap();
        assert!(lexicon.is_keyword("async"));
        assert!(lexicon.is_keyword("def"));
    }

    #[test]
    fn lexicon_replace_starts_empty() {
        let config = parse("[lexicon]\nreplace = true\nkeywords = [\"fn\"]").unwrap();
        let lexicon = config.lexicon.build().unwrap();
        assert!(lexicon.is_keyword("fn"));
        assert!(!lexicon.is_keyword("def"));
        assert!(!lexicon.is_builtin("print"));
    }

    #[test]
    fn lexicon_rejects_non_words() {
        let config = parse("[lexicon]\nkeywords = [\"not-a-word\"]").unwrap();
        assert!(matches!(config.lexicon.build(), Err(ConfigError::Lexicon(_))));
    }

    #[test]
    fn color_depth_modes() {
        assert_eq!(color_depth(ColorMode::Never, true, false), ColorDepth::None);
        assert_eq!(color_depth(ColorMode::Auto, false, false), ColorDepth::None);
        assert_eq!(color_depth(ColorMode::Auto, true, true), ColorDepth::None);
        assert_ne!(color_depth(ColorMode::Always, false, true), ColorDepth::None);
    }

    #[test]
    fn discover_explicit_missing_file() {
        let err = Config::discover(Some(Path::new("/nonexistent/glint.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
