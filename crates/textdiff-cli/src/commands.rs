use std::io::{IsTerminal, Read, Write};
use std::time::Duration;

use anyhow::{bail, Context};
use colored::Colorize;
use serde::Serialize;
use textdiff_core::{compare_in_background, CancellationToken, DiffOptions, DiffResult, DiffStats};
use textdiff_render::{render_result, summary, AnsiRenderer, HtmlRenderer, PlainRenderer};
use tracing::{debug, warn};

use crate::cli::*;
use crate::config::{CliConfig, ColorChoice, OutputFormat, CONFIG_ENV};

pub const EXIT_OK: u8 = 0;
/// Returned by `compare --exit-code` when the texts differ.
pub const EXIT_DIFFERENT: u8 = 1;

/// Output settings after merging the config file with command-line flags.
struct Output {
    format: OutputFormat,
    color: bool,
    legend: bool,
}

pub async fn run_command(cli: Cli, out: &mut dyn Write) -> anyhow::Result<u8> {
    let config = CliConfig::resolve(cli.config.as_deref(), std::env::var_os(CONFIG_ENV))?;
    let output = Output {
        format: cli.format.unwrap_or(config.output.format),
        color: use_color(cli.color.unwrap_or(config.output.color)),
        legend: config.output.legend,
    };

    match cli.command {
        Command::Compare(args) => cmd_compare(args, &config, &output, out).await,
        Command::Stats(args) => cmd_stats(args, &config, &output, out).await,
        Command::Config(args) => cmd_config(args, &config, out),
    }
}

fn use_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => {
            colored::control::set_override(true);
            true
        }
        ColorChoice::Never => {
            colored::control::set_override(false);
            false
        }
        ColorChoice::Auto => {
            std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
    }
}

async fn cmd_compare(
    args: CompareArgs,
    config: &CliConfig,
    output: &Output,
    out: &mut dyn Write,
) -> anyhow::Result<u8> {
    let diff = run_diff(&args.input, config).await?;
    let stats = diff.stats();

    match output.format {
        OutputFormat::Json => {
            let report = JsonReport {
                diff: &diff,
                stats: args.stat.then_some(stats),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        OutputFormat::Html => {
            let renderer = HtmlRenderer {
                legend: output.legend,
            };
            write!(out, "{}", render_result(&diff, &renderer))?;
            if args.stat {
                writeln!(out, "<p class=\"summary\">{}</p>", summary(&stats))?;
            }
        }
        OutputFormat::Text | OutputFormat::Plain => {
            let rendered = if output.format == OutputFormat::Plain {
                render_result(&diff, &PlainRenderer)
            } else {
                render_result(&diff, &AnsiRenderer { color: output.color })
            };
            write!(out, "{rendered}")?;
            if !rendered.is_empty() && !rendered.ends_with('\n') {
                writeln!(out)?;
            }
            if args.stat {
                let line = summary(&stats);
                if output.color {
                    writeln!(out, "{}", line.dimmed())?;
                } else {
                    writeln!(out, "{line}")?;
                }
            }
        }
    }

    if args.exit_code && !diff.is_identical() {
        return Ok(EXIT_DIFFERENT);
    }
    Ok(EXIT_OK)
}

async fn cmd_stats(
    args: StatsArgs,
    config: &CliConfig,
    output: &Output,
    out: &mut dyn Write,
) -> anyhow::Result<u8> {
    let diff = run_diff(&args.input, config).await?;
    let stats = diff.stats();

    match output.format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?,
        _ => write_stats(&stats, output.color, out)?,
    }
    Ok(EXIT_OK)
}

fn write_stats(stats: &DiffStats, color: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    let inserted = format!("+{}", stats.inserted);
    let deleted = format!("-{}", stats.deleted);
    if color {
        writeln!(out, "Inserted:   {} chars", inserted.green())?;
        writeln!(out, "Deleted:    {} chars", deleted.red())?;
    } else {
        writeln!(out, "Inserted:   {inserted} chars")?;
        writeln!(out, "Deleted:    {deleted} chars")?;
    }
    writeln!(out, "Unchanged:  {} chars", stats.equal)?;
    writeln!(out, "Changes:    {}", stats.changes)?;
    writeln!(out, "Similarity: {:.1}%", stats.similarity() * 100.0)?;
    Ok(())
}

fn cmd_config(args: ConfigArgs, config: &CliConfig, out: &mut dyn Write) -> anyhow::Result<u8> {
    let shown = if args.default {
        CliConfig::default()
    } else {
        config.clone()
    };
    write!(out, "{}", shown.to_toml()?)?;
    Ok(EXIT_OK)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    diff: &'a DiffResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<DiffStats>,
}

/// Read both inputs and compare them on the blocking pool, honouring the
/// configured timeout.
async fn run_diff(input: &InputArgs, config: &CliConfig) -> anyhow::Result<DiffResult> {
    if !input.text && input.original == "-" && input.modified == "-" {
        bail!("only one side can be read from stdin");
    }
    let original = read_input(&input.original, input.text)?;
    let modified = read_input(&input.modified, input.text)?;

    let options = DiffOptions {
        granularity: input.granularity.unwrap_or(config.diff.granularity),
        algorithm: input.algorithm.unwrap_or(config.diff.algorithm),
        max_table_cells: config.diff.max_table_cells,
    };
    debug!(
        granularity = %options.granularity,
        algorithm = %options.algorithm,
        original_bytes = original.len(),
        modified_bytes = modified.len(),
        "comparing"
    );

    let token = CancellationToken::new();
    let task = compare_in_background(original, modified, options, token.clone());
    match input.timeout_ms.or(config.timeout_ms) {
        Some(ms) => match tokio::time::timeout(Duration::from_millis(ms), task).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                token.cancel();
                bail!("comparison timed out after {ms} ms")
            }
        },
        None => Ok(task.await?),
    }
}

fn read_input(arg: &str, literal: bool) -> anyhow::Result<String> {
    if literal {
        return Ok(arg.to_string());
    }
    let bytes = if arg == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read(arg).with_context(|| format!("failed to read {arg}"))?
    };
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(input = arg, "input is not valid UTF-8; replacing invalid sequences");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
