mod api;
mod app;
mod cli;
mod config;
mod event;
mod gateway;
mod logging;
mod model;
mod normalize;
mod pipeline;
mod store;
mod ui;
mod util;

use std::io;
use std::panic;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use api::gateway_client::GatewayClient;
use app::{Action, App};
use cli::Command;
use config::{AppConfig, DEFAULT_BROWSE_URL};
use store::DashboardStore;
use util::clipboard::Osc52Clipboard;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match cli::parse_args(&args)? {
        Command::Help => {
            cli::print_help();
            Ok(())
        }
        Command::Serve { port } => {
            logging::init_stderr()?;
            let config = config::load_config()?;
            let port = port.unwrap_or_else(|| config.port());
            gateway::serve(&config, port).await
        }
        Command::Dashboard => {
            logging::init_file(&config::data_dir().join("sprintdesk.log"))?;
            let config = config::load_config()?;
            run_dashboard(&config).await
        }
    }
}

async fn run_dashboard(config: &AppConfig) -> Result<()> {
    let gateway_url = config.gateway_url();
    tracing::info!("Dashboard starting against {gateway_url}");
    if config.configured_browse_url().is_none() {
        tracing::warn!(
            "No dashboard.browse_url or jira.base_url configured; links use {}",
            DEFAULT_BROWSE_URL
        );
    }

    // Set up action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let store = DashboardStore::new(
        config.default_jql(),
        config.board_id(),
        config.browse_base_url(),
    );
    let mut app = App::new(
        store,
        Arc::new(GatewayClient::new(gateway_url)),
        Box::new(Osc52Clipboard::stdout()),
        action_tx.clone(),
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    // Restore the terminal before printing a panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Spawn event reader
    let event_tx = action_tx.clone();
    tokio::spawn(async move {
        event::run_event_loop(event_tx).await;
    });

    // Initial fetch
    app.fetch_issues();

    // Main loop
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        if let Some(action) = action_rx.recv().await {
            app.update(action);
            if app.should_quit {
                break;
            }
        } else {
            break;
        }
    }

    // Restore terminal
    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    tracing::info!("Dashboard stopped");
    Ok(())
}
