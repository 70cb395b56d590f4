use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

mod app;
mod browser;
mod config;
mod db;
mod invoice;
mod logging;
mod models;
mod ui;
mod utils;

use app::state::{AppMessage, AppState, DataEvent};
use config::Settings;
use ui::app::{Dashboard, TuiApp};
use ui::theme::Theme;
use utils::LocaleFormatter;

#[derive(Parser, Debug)]
#[command(name = "tradedesk-tui")]
#[command(about = "Terminal dashboard for a small trading company")]
#[command(version)]
struct Args {
    /// Database path (use :memory: for in-memory)
    #[arg(short, long)]
    database: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Fill an empty database with demo data
    #[arg(long)]
    seed_demo: bool,

    /// Export the invoice for this sales document number and exit
    #[arg(long, value_name = "NUMBER")]
    export_invoice: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref())?;

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.log_file));
    let level = logging::parse_level(args.log_level.as_deref().unwrap_or(&settings.log_level));
    logging::init(&log_file, level)?;

    let db_path = args.database.as_deref().unwrap_or(&settings.database_path);
    let db = db::Database::open(db_path).with_context(|| format!("opening database {}", db_path))?;
    tracing::info!("Opened database {}", db_path);

    if args.seed_demo {
        if db.is_empty()? {
            db::seed_demo(&db, chrono::Local::now().date_naive())?;
        } else {
            tracing::info!("Database already has data, skipping demo seed");
        }
    }

    let formatter = LocaleFormatter::new(settings.locale.clone());
    let state = Arc::new(AppState::new(
        db,
        settings.company.clone(),
        formatter.clone(),
        PathBuf::from(&settings.export_dir),
    ));

    if let Some(number) = args.export_invoice {
        return match state.export_invoice(&number) {
            DataEvent::InvoiceExported { path, .. } => {
                println!("{}", path.display());
                Ok(())
            }
            DataEvent::Error(message) => bail!(message),
            other => bail!("unexpected result: {:?}", other),
        };
    }

    let (state_tx, state_rx) = mpsc::channel(64);
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let state_manager_handle = tokio::spawn(app::state::run_state_manager(
        state.clone(),
        state_rx,
        event_tx,
    ));

    let refresh_handle = (settings.refresh_interval_secs > 0).then(|| {
        let tx = state_tx.clone();
        let period = std::time::Duration::from_secs(settings.refresh_interval_secs);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(AppMessage::Reload).await.is_err() {
                    break;
                }
            }
        })
    });

    let dashboard = Dashboard::new(settings.default_page_size)?;
    let result = {
        let mut tui = TuiApp::new(
            state_tx,
            event_rx,
            dashboard,
            Theme::named(&settings.theme),
            formatter,
        )?;
        tui.run().await
    };

    if let Some(handle) = refresh_handle {
        handle.abort();
    }
    state_manager_handle.abort();
    tracing::info!("Exiting");

    result
}
