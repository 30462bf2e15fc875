/// Output formatting: text, JSON, table and id modes. TTY detection.
use std::io::{self, IsTerminal, Write};

use colored::Colorize;
use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;

use super::args::{ColorMode, OutputFormat};
use crate::atlas::{Game, SearchResult};
use crate::types::ErrorOutput;

/// Resolve the effective output format, handling the `--json` flag.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        return OutputFormat::Json;
    }
    if fmt == OutputFormat::Auto {
        OutputFormat::Text
    } else {
        fmt
    }
}

/// Whether labels should carry ANSI styling.
#[must_use]
pub fn resolve_styled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal(),
    }
}

/// Output context passed to all formatters.
pub struct OutputCtx {
    pub format: OutputFormat,
    pub no_header: bool,
    /// Emphasize labels (bold bright green) in text output.
    pub styled: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool, no_header: bool, color: ColorMode) -> Self {
        let styled = resolve_styled(color);
        // `colored` would otherwise consult CLICOLOR / NO_COLOR on its own.
        colored::control::set_override(styled);
        Self {
            format: resolve_format(fmt, json_flag),
            no_header,
            styled,
        }
    }

    /// Start a named timer that logs its elapsed time at debug level on drop.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label)
    }
}

// --- Search results ---

/// Write a search result to stdout in the context's format.
pub fn write_search_result(result: &SearchResult, ctx: &OutputCtx) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = render_search_result(&mut out, result, ctx) {
        tracing::debug!(error = %e, "stdout write failed");
    }
}

/// Render `result` into any writer. Split out from [`write_search_result`] for tests.
///
/// # Errors
///
/// Propagates write and JSON serialization failures.
pub fn render_search_result<W: Write>(
    out: &mut W,
    result: &SearchResult,
    ctx: &OutputCtx,
) -> io::Result<()> {
    match ctx.format {
        OutputFormat::Json => write_json(out, result, true),
        OutputFormat::Compact => write_json(out, result, false),
        OutputFormat::Ndjson => {
            for game in &result.games {
                write_json(out, game, false)?;
            }
            Ok(())
        }
        OutputFormat::Table => write_games_table(out, &result.games, ctx),
        OutputFormat::Id => {
            for game in &result.games {
                writeln!(out, "{}", game.name)?;
            }
            Ok(())
        }
        OutputFormat::Text | OutputFormat::Auto => write_games_text(out, &result.games, ctx.styled),
    }
}

fn write_games_text<W: Write>(out: &mut W, games: &[Game], styled: bool) -> io::Result<()> {
    let label = |name: &str| {
        if styled {
            name.bold().bright_green().to_string()
        } else {
            name.to_owned()
        }
    };
    for game in games {
        writeln!(out, "{}: {}", label("Name"), game.name)?;
        writeln!(out, "{}: {}", label("Description"), game.description)?;
        writeln!(out, "{}: {}", label("Url"), game.url)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_games_table<W: Write>(out: &mut W, games: &[Game], ctx: &OutputCtx) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !ctx.no_header {
        table.set_header(["NAME", "YEAR", "PRICE", "URL"]);
    }
    for game in games {
        let year = if game.year_published == 0 {
            String::new()
        } else {
            game.year_published.to_string()
        };
        table.add_row([
            game.name.as_str(),
            year.as_str(),
            game.price.as_str(),
            game.url.as_str(),
        ]);
    }
    writeln!(out, "{table}")
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat, json_flag: bool) {
    let fmt = resolve_format(format, json_flag);
    let stderr = io::stderr();
    let mut out = stderr.lock();
    let _ = render_error(&mut out, err, fmt);
}

fn render_error<W: Write>(out: &mut W, err: &ErrorOutput, fmt: OutputFormat) -> io::Result<()> {
    match fmt {
        OutputFormat::Json | OutputFormat::Compact | OutputFormat::Ndjson => {
            write_json(out, err, fmt == OutputFormat::Json)
        }
        _ => {
            writeln!(out, "Error: {}", err.error.message)?;
            if let Some(usage) = &err.error.usage {
                writeln!(out, "Usage: {usage}")?;
            }
            Ok(())
        }
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds at debug level on drop.
///
/// Created via [`OutputCtx::timer`].
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(label = self.label, "{ms:.2}ms");
    }
}

// --- Generic JSON helper ---

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T, pretty: bool) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)
}
