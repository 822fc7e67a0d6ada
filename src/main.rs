use anyhow::{Context, Result as AnyhowResult};
use bytesight::app::panel::{BytecodePanel, SyncedBytecodePanel};
use bytesight::app::standalone::StandaloneHost;
use bytesight::config::Config;
use bytesight::model::selection::EditorSelection;
use bytesight::services::tracing_setup;
use bytesight::view::surface::PLAIN_MARKER;
use clap::Parser;
use crossterm::style::{Color, Stylize};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Show the bytecode of a Python file with the blocks of some source lines highlighted
#[derive(Parser, Debug)]
#[command(name = "bytesight")]
#[command(about = "Python bytecode viewer that follows source line selections", long_about = None)]
#[command(version)]
struct Args {
    /// Python source file to disassemble
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Source lines to highlight: a single line (`7`) or a range (`7:12`)
    #[arg(long, value_name = "A[:B]", value_parser = parse_lines)]
    lines: Option<EditorSelection>,

    /// Interpreter (or installation root) to use instead of the configured one
    #[arg(long, value_name = "PATH")]
    python: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Only print this many rows, scrolled to the highlighted block
    #[arg(long, value_name = "N")]
    height: Option<usize>,

    /// Mark highlighted lines with a `>` gutter instead of colors
    #[arg(long)]
    plain: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn parse_lines(value: &str) -> Result<EditorSelection, String> {
    let parse_one = |s: &str| -> Result<usize, String> {
        match s.trim().parse::<usize>() {
            Ok(0) => Err("line numbers start at 1".to_string()),
            Ok(line) => Ok(line),
            Err(e) => Err(format!("invalid line number '{}': {}", s, e)),
        }
    };
    match value.split_once(':') {
        Some((a, b)) => {
            let (start, end) = (parse_one(a)?, parse_one(b)?);
            Ok(EditorSelection::selecting(start, end, end))
        }
        None => Ok(EditorSelection::caret(parse_one(value)?)),
    }
}

fn load_config(args: &Args) -> AnyhowResult<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_or_default(),
    };
    if let Some(python) = &args.python {
        config.python.interpreter = Some(python.clone());
    }
    Ok(config)
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(tracing_setup::default_log_path);
    tracing_setup::init(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let config = load_config(&args)?;

    if args.dump_config {
        let json =
            serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{}", json);
        return Ok(());
    }

    let mut host = StandaloneHost::new(&args.file, &config.python);
    if let Some(selection) = args.lines.clone() {
        host.set_selection(selection);
    }
    let host = Rc::new(RefCell::new(host));

    let mut panel = SyncedBytecodePanel::new(Rc::clone(&host), &config, args.height.unwrap_or(1));
    panel.update_bytecode();
    if args.height.is_none() {
        let line_count = panel.component().lines().len();
        panel.resize(line_count.max(1));
    }
    panel.settle();

    let [r, g, b] = config.panel.highlight_color;
    for (highlighted, line) in panel.component().plain_lines() {
        if args.plain {
            println!("{}", line);
            continue;
        }
        let text = line.get(PLAIN_MARKER.len()..).unwrap_or_default();
        if highlighted {
            println!("{}", text.on(Color::Rgb { r, g, b }));
        } else {
            println!("{}", text);
        }
    }
    tracing::info!(
        "Printed {} highlighted block(s) of {}",
        panel.highlighted().len(),
        args.file.display()
    );
    Ok(())
}
