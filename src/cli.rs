// SPDX-License-Identifier: MIT
//
// Command-line interface definition.
//
// Global flags override glint.toml, which overrides built-in defaults.
// Flags that only switch something on or off (`--line-numbers`,
// `--no-frame`) can only move away from the default; the config file is
// the place to flip the default itself.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

#[derive(Debug, Parser)]
#[command(
    name = "glint",
    version,
    about = "Highlight Python-like code samples as framed blocks in the terminal"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every subcommand.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Config file (default: ./glint.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Theme name (see `glint themes`)
    #[arg(long, global = true, value_name = "NAME")]
    pub theme: Option<String>,

    /// When to emit color escapes
    #[arg(long, global = true, value_enum, value_name = "WHEN")]
    pub color: Option<ColorMode>,

    /// Show line numbers
    #[arg(long, global = true)]
    pub line_numbers: bool,

    /// Print only the highlighted code, without header or separator
    #[arg(long, global = true)]
    pub no_frame: bool,

    /// Block width in columns (default: terminal width, 40 to 120)
    #[arg(long, global = true, value_name = "N")]
    pub width: Option<usize>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Highlight a file (or stdin) as one code block
    Render {
        /// File to highlight; `-` or absent reads stdin
        file: Option<PathBuf>,

        /// Block title (default: the file name)
        #[arg(long)]
        title: Option<String>,

        /// Language shown on the badge (default: from the file extension)
        #[arg(long)]
        language: Option<String>,

        /// Line shown under the title
        #[arg(long)]
        description: Option<String>,
    },

    /// Render the documentation samples
    Docs {
        /// Only this section (see --list)
        section: Option<String>,

        /// Read samples from this catalog instead of the bundled one
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// List section ids and titles instead of rendering
        #[arg(long)]
        list: bool,
    },

    /// Print the spans of each line as JSON, one array per line
    Spans {
        /// File to scan; `-` or absent reads stdin
        file: Option<PathBuf>,
    },

    /// List builtin theme names
    Themes,
}

/// `--color` / `color = "..."`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    /// Always color, at the depth the terminal advertises
    Always,
    /// Never emit escapes
    Never,
}
