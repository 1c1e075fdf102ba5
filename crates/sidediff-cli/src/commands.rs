use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use sidediff_core::{highlight, InlineSpan, Row, RowKind, RowSummary};
use sidediff_view::{DiffView, Preferences, StateStore, ViewConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli { command, format, config, state, .. } = cli;
    let config = load_config(config.as_deref(), state)?;
    match command {
        Command::Diff(args) => cmd_diff(args, config, &format),
        Command::Swap(_) => cmd_swap(config, &format),
        Command::Show(_) => cmd_show(config, &format),
    }
}

fn load_config(path: Option<&Path>, state: Option<PathBuf>) -> anyhow::Result<ViewConfig> {
    let mut config = match path {
        Some(path) => ViewConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ViewConfig::default(),
    };
    if let Some(state) = state {
        config.state_path = state;
    }
    Ok(config)
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn cmd_diff(args: DiffArgs, mut config: ViewConfig, format: &OutputFormat) -> anyhow::Result<()> {
    if let Some(width) = args.width {
        config.width = width;
    }
    let store = StateStore::new(&config.state_path);
    let mut view = if args.no_save {
        let prefs = store.load()?.unwrap_or_else(Preferences::first_run);
        DiffView::in_memory(prefs, config)
    } else {
        DiffView::open(store, config)?
    };

    if let Some(path) = &args.old {
        view.set_left(read_text(path)?)?;
    }
    if let Some(path) = &args.new {
        view.set_right(read_text(path)?)?;
    }
    if let Some(mode) = args.mode {
        view.set_mode(mode.into())?;
    }
    if let Some(ignore) = toggle(args.ignore_ws, args.no_ignore_ws) {
        view.set_ignore_whitespace(ignore)?;
    }
    if let Some(wrap) = toggle(args.wrap, args.no_wrap) {
        view.set_wrap(wrap)?;
    }

    print_view(&view, format)
}

fn cmd_swap(config: ViewConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let mut view = DiffView::open(StateStore::new(&config.state_path), config)?;
    view.swap()?;
    print_view(&view, format)
}

fn cmd_show(config: ViewConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let path = config.state_path.clone();
    let view = DiffView::open(StateStore::new(&path), config)?;
    let prefs = view.prefs();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(prefs)?),
        OutputFormat::Text => {
            let (left, right) = view.line_counts();
            println!("State: {}", path.display().to_string().bold());
            println!("  Mode: {}", format!("{:?}", prefs.mode).to_lowercase().cyan());
            println!("  Ignore whitespace: {}", yes_no(prefs.ignore_whitespace));
            println!("  Wrap: {}", yes_no(prefs.wrap));
            println!("  Original: {} lines", left.to_string().yellow());
            println!("  Modified: {} lines", right.to_string().yellow());
        }
    }
    Ok(())
}

fn yes_no(flag: bool) -> colored::ColoredString {
    if flag { "yes".green() } else { "no".dimmed() }
}

#[derive(Serialize)]
struct JsonReport {
    left_lines: usize,
    right_lines: usize,
    summary: RowSummary,
    rows: Vec<JsonRow>,
}

#[derive(Serialize)]
struct JsonRow {
    #[serde(flatten)]
    row: Row,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline: Option<JsonInline>,
}

#[derive(Serialize)]
struct JsonInline {
    left: Vec<InlineSpan>,
    right: Vec<InlineSpan>,
}

fn json_report(view: &DiffView) -> JsonReport {
    let rows = view.rows();
    let summary = RowSummary::from_rows(&rows);
    let (left_lines, right_lines) = view.line_counts();
    let inline_mode = view.prefs().mode.inline();

    let rows = rows
        .into_iter()
        .map(|row| {
            let inline = match (row.kind, inline_mode, &row.left_line, &row.right_line) {
                (RowKind::Changed, Some(mode), Some(left), Some(right)) => {
                    let (left, right) = highlight(left, right, mode);
                    Some(JsonInline { left, right })
                }
                _ => None,
            };
            JsonRow { row, inline }
        })
        .collect();

    JsonReport {
        left_lines,
        right_lines,
        summary,
        rows,
    }
}

fn print_view(view: &DiffView, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", view.render()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json_report(view))?),
    }
    Ok(())
}
