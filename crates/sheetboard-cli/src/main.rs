mod app;
mod commands;
mod config;
mod dashboard;
mod display;
mod logging;
mod publish;
mod scheduler;
mod state;

use clap::Parser;
use sheetboard_sync::SheetsClient;
use tokio::io::BufReader;

use crate::app::Cli;
use crate::config::DashboardConfig;
use crate::dashboard::{Command, Dashboard, Publisher};
use crate::publish::HtmlPublisher;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.quiet);
    tracing::info!("sheetboard v{}", env!("CARGO_PKG_VERSION"));

    let config = DashboardConfig::from(&cli);
    let reload_secs = (!cli.once).then(|| config.reload_secs());
    let mut publisher = HtmlPublisher::new(config.output.clone(), reload_secs);
    if cli.json {
        publisher = publisher.without_terminal();
    }
    let mut state = AppState::new(config.initial_filters.clone());

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid configuration, not fetching");
        state.block(&e);
        publisher.publish(&state)?;
        return Err(e.into());
    }

    let client = SheetsClient::new(config.sheets_config())?;
    let mut dashboard = Dashboard::new(state, client, publisher);

    if cli.once {
        dashboard.dispatch(Command::Tick).await;
        if cli.json {
            let json = serde_json::to_string_pretty(dashboard.state().filtered())?;
            println!("{json}");
        }
        if let Some(banner) = dashboard.state().banner() {
            anyhow::bail!("{}", banner.text);
        }
        return Ok(());
    }

    eprintln!("{}", commands::HELP);
    let input = BufReader::new(tokio::io::stdin());
    let shutdown = scheduler::wait_for_signal(tokio::signal::ctrl_c());
    scheduler::run(&mut dashboard, config.refresh, input, shutdown).await
}
