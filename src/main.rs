use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use minimax_connect_four::config::AppConfig;
use minimax_connect_four::driver::Driver;
use minimax_connect_four::game::Player;
use minimax_connect_four::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Play Connect Four against a minimax opponent.
#[derive(Parser)]
#[command(name = "minimax-connect-four", about = "Play Connect Four against a minimax opponent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Side the machine plays: one or two
    #[arg(long)]
    machine: Option<String>,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    if let Some(path) = &cli.log_file {
        initialize_logging(path, cli.log_level)
            .with_context(|| format!("opening log file {}", path.display()))?;
    }

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(machine) = cli.machine.as_deref() {
        config.game.machine = match machine {
            "one" => Player::PlayerOne,
            "two" => Player::PlayerTwo,
            other => bail!("unknown side '{}' (expected 'one' or 'two')", other),
        };
    }
    config.validate().context("invalid configuration")?;

    info!(
        rows = config.board.rows,
        cols = config.board.cols,
        connection_length = config.board.connection_length,
        depth = config.search.depth,
        machine = config.game.machine.name(),
        "starting game"
    );

    let driver = Driver::from_config(&config)?;
    run(driver).context("terminal UI failed")
}

fn run(driver: Driver) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(driver);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}

fn initialize_logging(path: &Path, level: LevelFilter) -> io::Result<()> {
    let file = File::create(path)?;
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
    Ok(())
}
