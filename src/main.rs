use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use rubros::{
    cli::{format_rubro_table, Cli, Commands},
    config::Config,
    rubro_tui::App,
    service::{HttpRubroService, RubroService},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let config = Config::from_env()?.with_api_url(cli.api_url);
    config.validate()?;

    init_logging(&config, command == Commands::Tui)?;

    let service: Arc<dyn RubroService> =
        Arc::new(HttpRubroService::new(&config).context("Failed to build HTTP client")?);

    match command {
        Commands::Tui => {
            info!("Launching rubros TUI against {}", config.api_url);
            match run_tui(&config, service).await {
                Ok(()) => info!("TUI exited successfully"),
                Err(e) => {
                    error!("TUI failed: {}", e);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::List { json } => {
            info!("Listing rubros from {}", config.api_url);
            let rubros = service
                .list()
                .await
                .with_context(|| format!("Failed to list rubros from {}", config.api_url))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&rubros)?);
            } else {
                print!("{}", format_rubro_table(&rubros));
            }
        }
    }

    Ok(())
}

/// Log to the configured file; the TUI keeps stderr clean so it does not
/// draw over the screen
fn init_logging(config: &Config, tui_mode: bool) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "rubros=info");
    }

    let directory = match config.log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    let file_name = config
        .log_file
        .file_name()
        .context("Log file path has no file name")?;
    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let stderr_layer = (!tui_mode).then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();

    Ok(())
}

async fn run_tui(config: &Config, service: Arc<dyn RubroService>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, service);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
