use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use ncmu::app::App;
use ncmu::config::{self, Config};
use ncmu::event::{Event, EventHandler};
use ncmu::system::collector::Collector;
use ncmu::ui;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "ncmu",
    about = "Interactive viewer of the process tree with memory usage bars"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write diagnostic logs to the log file
    #[arg(long, default_value_t = false)]
    log: bool,

    /// Log file path (used with --log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Usage bar width in cells
    #[arg(long)]
    bar_width: Option<usize>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    if cli.log {
        let path = cli
            .log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.general.log_file));
        init_logging(&path)?;
    }

    info!("starting ncmu");

    // Capture before entering the alternate screen so a startup failure
    // prints a readable error.
    let app = App::new(&config, Box::new(Collector::new()))?;

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, app).await;

    ratatui::restore();
    info!("ncmu stopped");

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, mut app: App) -> Result<()> {
    let mut events = EventHandler::new();

    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                    }
                }
                Event::Resize => {}
            }
            terminal.draw(|frame| ui::draw(frame, &mut app))?;
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };

    if let Some(width) = cli.bar_width {
        config.general.bar_width = width.clamp(4, 80);
    }

    config
}

fn init_logging(path: &PathBuf) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
