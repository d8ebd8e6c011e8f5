use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use textdiff_core::{Algorithm, Granularity};

use crate::config::{ColorChoice, OutputFormat};

#[derive(Parser)]
#[command(
    name = "textdiff",
    about = "Compare two texts and show what was added and removed",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (overrides the config file)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// When to use terminal colours (overrides the config file)
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,

    /// Config file (defaults to $TEXTDIFF_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the differences between two texts
    Compare(CompareArgs),
    /// Print change counts and similarity only
    Stats(StatsArgs),
    /// Print the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Original text: a file path, or `-` for stdin
    pub original: String,
    /// Modified text: a file path, or `-` for stdin
    pub modified: String,
    /// Treat ORIGINAL and MODIFIED as literal text instead of paths
    #[arg(long)]
    pub text: bool,
    #[arg(short, long)]
    pub granularity: Option<Granularity>,
    #[arg(long)]
    pub algorithm: Option<Algorithm>,
    /// Abort the comparison after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Append a summary line
    #[arg(long)]
    pub stat: bool,
    /// Exit with status 1 when the texts differ
    #[arg(long)]
    pub exit_code: bool,
}

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Print the built-in defaults instead of the loaded file
    #[arg(long)]
    pub default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_compare() {
        let cli = Cli::try_parse_from(["textdiff", "compare", "a.txt", "b.txt"]).unwrap();
        if let Command::Compare(args) = cli.command {
            assert_eq!(args.input.original, "a.txt");
            assert_eq!(args.input.modified, "b.txt");
            assert!(!args.input.text);
            assert!(args.input.granularity.is_none());
            assert!(!args.stat);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_compare_literal_words() {
        let cli = Cli::try_parse_from([
            "textdiff", "compare", "--text", "-g", "word", "the cat", "the dog",
        ])
        .unwrap();
        if let Command::Compare(args) = cli.command {
            assert!(args.input.text);
            assert_eq!(args.input.granularity, Some(Granularity::Word));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_algorithm_and_timeout() {
        let cli = Cli::try_parse_from([
            "textdiff", "stats", "a", "b", "--algorithm", "myers", "--timeout-ms", "50",
        ])
        .unwrap();
        if let Command::Stats(args) = cli.command {
            assert_eq!(args.input.algorithm, Some(Algorithm::Myers));
            assert_eq!(args.input.timeout_ms, Some(50));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_rejects_unknown_granularity() {
        assert!(Cli::try_parse_from(["textdiff", "compare", "-g", "byte", "a", "b"]).is_err());
    }

    #[test]
    fn parse_compare_flags() {
        let cli = Cli::try_parse_from(["textdiff", "compare", "a", "b", "--stat", "--exit-code"]).unwrap();
        if let Command::Compare(args) = cli.command {
            assert!(args.stat);
            assert!(args.exit_code);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_config_default() {
        let cli = Cli::try_parse_from(["textdiff", "config", "--default"]).unwrap();
        if let Command::Config(args) = cli.command {
            assert!(args.default);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_options() {
        let cli = Cli::try_parse_from([
            "textdiff", "--verbose", "--format", "json", "--color", "never", "--config", "x.toml",
            "config",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.color, Some(ColorChoice::Never));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }
}
