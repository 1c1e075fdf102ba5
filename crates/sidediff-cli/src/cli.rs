use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sidediff_view::DiffMode;

#[derive(Parser)]
#[command(
    name = "sidediff",
    about = "Side-by-side text comparison with inline highlighting",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with view settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Where preferences are saved between runs
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    Lines,
    Words,
    Chars,
}

impl From<ModeArg> for DiffMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Lines => DiffMode::Lines,
            ModeArg::Words => DiffMode::Words,
            ModeArg::Chars => DiffMode::Chars,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two files side by side
    Diff(DiffArgs),
    /// Swap the saved left and right texts
    Swap(SwapArgs),
    /// Show the saved preferences
    Show(ShowArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Original text file (keeps the saved text when omitted)
    pub old: Option<PathBuf>,
    /// Modified text file (keeps the saved text when omitted)
    pub new: Option<PathBuf>,
    #[arg(short, long)]
    pub mode: Option<ModeArg>,
    /// Match lines regardless of leading and trailing whitespace
    #[arg(long, conflicts_with = "no_ignore_ws")]
    pub ignore_ws: bool,
    #[arg(long)]
    pub no_ignore_ws: bool,
    #[arg(long, conflicts_with = "no_wrap")]
    pub wrap: bool,
    #[arg(long)]
    pub no_wrap: bool,
    #[arg(short, long)]
    pub width: Option<usize>,
    /// Do not save the inputs and options
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Args)]
pub struct SwapArgs {}

#[derive(Args)]
pub struct ShowArgs {}

/// Resolve a pair of `--flag` / `--no-flag` switches.
pub fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_diff_files() {
        let cli = Cli::try_parse_from(["sidediff", "diff", "a.txt", "b.txt"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.old, Some(PathBuf::from("a.txt")));
            assert_eq!(args.new, Some(PathBuf::from("b.txt")));
            assert!(args.mode.is_none());
            assert!(!args.no_save);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_diff_options() {
        let cli = Cli::try_parse_from([
            "sidediff", "diff", "--mode", "chars", "--ignore-ws", "--wrap", "-w", "80", "--no-save",
        ])
        .unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.mode, Some(ModeArg::Chars));
            assert!(args.ignore_ws);
            assert!(args.wrap);
            assert_eq!(args.width, Some(80));
            assert!(args.no_save);
            assert!(args.old.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn wrap_flags_conflict() {
        assert!(Cli::try_parse_from(["sidediff", "diff", "--wrap", "--no-wrap"]).is_err());
    }

    #[test]
    fn parse_swap() {
        let cli = Cli::try_parse_from(["sidediff", "swap"]).unwrap();
        assert!(matches!(cli.command, Command::Swap(_)));
    }

    #[test]
    fn parse_global_state_and_format() {
        let cli = Cli::try_parse_from([
            "sidediff", "show", "--state", "/tmp/s.json", "--format", "json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Show(_)));
        assert_eq!(cli.state, Some(PathBuf::from("/tmp/s.json")));
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["sidediff", "--verbose", "show"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn toggle_resolution() {
        assert_eq!(toggle(true, false), Some(true));
        assert_eq!(toggle(false, true), Some(false));
        assert_eq!(toggle(false, false), None);
    }

    #[test]
    fn mode_arg_maps_to_diff_mode() {
        assert_eq!(DiffMode::from(ModeArg::Words), DiffMode::Words);
        assert_eq!(DiffMode::from(ModeArg::Lines), DiffMode::Lines);
    }
}
