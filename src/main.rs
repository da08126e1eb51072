// SPDX-License-Identifier: MIT
//
// glint: highlight Python-like code samples as framed terminal blocks.
//
// This is the binary that wires the crates together:
//
//   glint-scan  → line scanner: text → categorized spans
//   glint-theme → category → style, block chrome colors
//   glint-docs  → code block model, sample catalog, BlockView renderer
//   glint-term  → colors, SGR escapes, buffered output, tty queries
//
// Every command follows the same path:
//
//   flags + glint.toml → Settings (theme, scanner, depth, layout)
//   input → CodeBlock(s) → BlockView → OutputBuffer → one write to stdout
//
// Logs go to stderr. Any error prints its cause chain and exits with 1.

mod cli;
mod config;
mod error;
mod logging;

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use glint_docs::{BlockView, Catalog, CodeBlock, Section};
use glint_scan::Scanner;
use glint_term::OutputBuffer;
use glint_theme::{builtin_names, builtin_theme};

use crate::cli::{Cli, Command, GlobalArgs};
use crate::config::{Config, Settings};
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    if let Err(err) = run(cli) {
        report(&err);
        process::exit(1);
    }
}

/// Print an error and its sources to stderr.
fn report(err: &dyn std::error::Error) {
    eprintln!("glint: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut out = OutputBuffer::new();

    match cli.command {
        Command::Render {
            file,
            title,
            language,
            description,
        } => {
            let settings = load_settings(&cli.global)?;
            let input = Input::read(file.as_deref())?;
            let block = input.into_block(title, language, description);
            render_block(&settings, &mut out, &block);
        }
        Command::Docs {
            section,
            catalog,
            list,
        } => {
            let catalog = match catalog {
                Some(path) => Catalog::load(&path)?,
                None => Catalog::bundled()?,
            };
            if list {
                list_sections(&catalog, &mut out);
            } else {
                let settings = load_settings(&cli.global)?;
                let sections = match section {
                    Some(id) => vec![catalog.require(&id)?],
                    None => catalog.sections().iter().collect(),
                };
                render_sections(&settings, &mut out, &sections);
            }
        }
        Command::Spans { file } => {
            let settings = load_settings(&cli.global)?;
            let input = Input::read(file.as_deref())?;
            write_spans(&settings.scanner, input.code(), &mut out)?;
        }
        Command::Themes => list_themes(&mut out),
    }

    flush(&mut out)
}

fn load_settings(flags: &GlobalArgs) -> Result<Settings, CliError> {
    let config = Config::discover(flags.config.as_deref())?;
    Ok(config.resolve(flags)?)
}

/// Write the buffer to stdout. A closed pipe (`glint docs | head`) is not
/// an error.
fn flush(out: &mut OutputBuffer) -> Result<(), CliError> {
    match out.flush_stdout() {
        Err(err) if err.kind() != io::ErrorKind::BrokenPipe => Err(CliError::Output(err)),
        _ => Ok(()),
    }
}

// ─── Input ──────────────────────────────────────────────────────────────────

/// Source text from a file or stdin.
struct Input {
    path: Option<PathBuf>,
    text: String,
}

impl Input {
    /// Read `path`, or stdin when it's absent or `-`.
    fn read(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) if path != Path::new("-") => {
                let text = std::fs::read_to_string(path).map_err(|source| CliError::Input {
                    path: path.to_path_buf(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), bytes = text.len(), "read input");
                Ok(Self {
                    path: Some(path.to_path_buf()),
                    text,
                })
            }
            _ => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .map_err(CliError::Stdin)?;
                tracing::debug!(bytes = text.len(), "read stdin");
                Ok(Self { path: None, text })
            }
        }
    }

    /// The text without the final line terminator files conventionally end
    /// with, so it doesn't render as an extra empty row.
    fn code(&self) -> &str {
        strip_final_newline(&self.text)
    }

    fn into_block(
        self,
        title: Option<String>,
        language: Option<String>,
        description: Option<String>,
    ) -> CodeBlock {
        let title = title.unwrap_or_else(|| {
            self.path
                .as_deref()
                .and_then(Path::file_name)
                .map_or_else(|| "stdin".to_string(), |n| n.to_string_lossy().into_owned())
        });
        let language = language.or_else(|| self.path.as_deref().and_then(language_for));

        let mut block = CodeBlock::new(title, self.code());
        if let Some(language) = language {
            block = block.with_language(language);
        }
        block.with_description(description.unwrap_or_default())
    }
}

fn strip_final_newline(text: &str) -> &str {
    text.strip_suffix('\n')
        .map_or(text, |rest| rest.strip_suffix('\r').unwrap_or(rest))
}

/// Badge label for a file, from its extension.
fn language_for(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let name = match ext.as_str() {
        "py" | "pyi" | "pyw" => "python",
        "sh" | "bash" | "zsh" => "bash",
        "rs" => "rust",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" => "typescript",
        "rb" => "ruby",
        "yml" => "yaml",
        _ => return Some(ext),
    };
    Some(name.to_string())
}

// ─── Commands ───────────────────────────────────────────────────────────────

fn render_block(settings: &Settings, out: &mut OutputBuffer, block: &CodeBlock) {
    view_for(settings).render(out, block);
}

fn render_sections(settings: &Settings, out: &mut OutputBuffer, sections: &[&Section]) {
    let mut view = view_for(settings);
    let mut blocks = 0;
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push_str("\n");
        }
        // Headings only help when several sections share the output.
        if sections.len() > 1 && settings.options.frame {
            view.heading(out, section);
            out.push_str("\n");
        }
        for (j, block) in section.blocks.iter().enumerate() {
            if j > 0 {
                out.push_str("\n");
            }
            view.render(out, block);
            blocks += 1;
        }
    }
    tracing::info!(sections = sections.len(), blocks, "rendered docs");
}

fn view_for(settings: &Settings) -> BlockView<'_> {
    BlockView::new(
        &settings.scanner,
        &settings.theme,
        settings.depth,
        settings.options,
    )
}

fn list_sections(catalog: &Catalog, out: &mut OutputBuffer) {
    let id_width = catalog.ids().map(str::len).max().unwrap_or(0);
    for section in catalog.sections() {
        let count = section.blocks.len();
        let noun = if count == 1 { "block" } else { "blocks" };
        out.push_str(&format!(
            "{:<id_width$}  {} ({count} {noun})\n",
            section.id, section.title
        ));
    }
}

fn list_themes(out: &mut OutputBuffer) {
    for name in builtin_names() {
        let Some(theme) = builtin_theme(name) else {
            continue;
        };
        if theme.name == *name {
            out.push_str(&format!("{name}\n"));
        } else {
            out.push_str(&format!("{name} (alias of {})\n", theme.name));
        }
    }
}

/// One JSON array of `{text, category}` objects per input line.
fn write_spans(scanner: &Scanner, text: &str, out: &mut OutputBuffer) -> Result<(), CliError> {
    let lines = scanner.scan_text(text);
    for spans in &lines {
        serde_json::to_writer(&mut *out, spans)?;
        out.push_str("\n");
    }
    tracing::debug!(lines = lines.len(), "wrote spans");
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use glint_docs::RenderOptions;
    use glint_term::ColorDepth;
    use glint_theme::Theme;
    use pretty_assertions::assert_eq;

    fn plain_settings(options: RenderOptions) -> Settings {
        Settings {
            theme: Theme::docs(),
            scanner: Scanner::default(),
            depth: ColorDepth::None,
            options,
        }
    }

    #[test]
    fn final_newline_stripped_once() {
        assert_eq!(strip_final_newline("a\n"), "a");
        assert_eq!(strip_final_newline("a\r\n"), "a");
        assert_eq!(strip_final_newline("a\n\n"), "a\n");
        assert_eq!(strip_final_newline("a"), "a");
        assert_eq!(strip_final_newline(""), "");
    }

    #[test]
    fn language_from_extension() {
        assert_eq!(language_for(Path::new("demo.py")).as_deref(), Some("python"));
        assert_eq!(language_for(Path::new("install.SH")).as_deref(), Some("bash"));
        assert_eq!(language_for(Path::new("notes.toml")).as_deref(), Some("toml"));
        assert_eq!(language_for(Path::new("Makefile")), None);
    }

    #[test]
    fn input_block_defaults() {
        let input = Input {
            path: Some(PathBuf::from("samples/demo.sh")),
            text: "echo hi\n".to_string(),
        };
        let block = input.into_block(None, None, Some(String::new()));
        assert_eq!(block.title, "demo.sh");
        assert_eq!(block.language, "bash");
        assert_eq!(block.description, None);
        assert_eq!(block.code, "echo hi");
    }

    #[test]
    fn stdin_block_defaults() {
        let input = Input {
            path: None,
            text: "x = 1".to_string(),
        };
        let block = input.into_block(Some("T".to_string()), None, Some("d".to_string()));
        assert_eq!(block.title, "T");
        assert_eq!(block.language, "python");
        assert_eq!(block.description.as_deref(), Some("d"));
    }

    #[test]
    fn spans_as_json_lines() {
        let mut out = OutputBuffer::new();
        write_spans(&Scanner::default(), "def f():\n# hi", &mut out).unwrap();
        let text = out.to_string_lossy();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"[{"text":"def","category":"keyword"},"#));
        assert_eq!(lines[1], r##"[{"text":"# hi","category":"comment"}]"##);
    }

    #[test]
    fn sections_listed_with_counts() {
        let catalog = Catalog::bundled().unwrap();
        let mut out = OutputBuffer::new();
        list_sections(&catalog, &mut out);
        let text = out.to_string_lossy();
        assert_eq!(text.lines().count(), catalog.sections().len());
        assert!(text.starts_with("installation         Installation (3 blocks)\n"));
    }

    #[test]
    fn themes_listed_with_aliases() {
        let mut out = OutputBuffer::new();
        list_themes(&mut out);
        let text = out.to_string_lossy();
        assert!(text.contains("default (alias of docs)\n"));
        assert!(text.contains("mono\n"));
    }

    #[test]
    fn single_section_has_no_heading() {
        let catalog = Catalog::bundled().unwrap();
        let section = catalog.section("installation").unwrap();
        let settings = plain_settings(RenderOptions {
            width: Some(40),
            frame: false,
            ..RenderOptions::default()
        });
        let mut out = OutputBuffer::new();
        render_sections(&settings, &mut out, &[section]);
        assert_eq!(
            out.to_string_lossy(),
            "pip install justllms\n\npip install justllms[pdf]\n\npip install justllms[all]\n"
        );
    }
}
