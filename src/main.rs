use std::fs::OpenOptions;
use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use peerdesk::api::ApiClient;
use peerdesk::config::{AppConfig, fetch_config};
use peerdesk::credentials::{self, CredentialKey};
use peerdesk::tui::event::{spawn_event_reader, spawn_tick_timer, update};
use peerdesk::tui::{App, Message, Tui, dispatch, render, restore_terminal, setup_terminal};
use peerdesk::workflow::AdminContext;
use peerdesk::{PeerdeskError, Result};

/// UI refresh tick, also drives notice expiry.
const TICK_MS: u64 = 250;

fn main() -> Result<()> {
    // Env mutation must happen before the runtime spawns worker threads.
    credentials::populate_env_from_keychain();

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None => {}
        Some("store-token") => return store_token(),
        Some(other) => {
            return Err(PeerdeskError::Config(format!(
                "unknown command `{other}` (usage: peerdesk [store-token])"
            )));
        }
    }

    let config = fetch_config()?;
    init_logging(&config.log_file)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| PeerdeskError::Io(format!("failed to start runtime: {e}")))?;
    runtime.block_on(run(config))
}

/// Reads a token from stdin and stores it in the keychain.
fn store_token() -> Result<()> {
    eprintln!("Paste the API token and press Enter:");
    let mut line = Zeroizing::new(String::new());
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| PeerdeskError::Io(format!("failed to read token: {e}")))?;
    let token = line.trim();
    if token.is_empty() {
        return Err(PeerdeskError::Config("empty token".to_string()));
    }
    credentials::save(CredentialKey::ApiToken, token)?;
    eprintln!("Token stored in the system keychain.");
    Ok(())
}

/// Sends logs to `path`; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| PeerdeskError::Io(format!("failed to open {}: {e}", path.display())))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run(config: AppConfig) -> Result<()> {
    let api = ApiClient::new(&config.api)?;
    info!(base_url = %api.base_url(), "starting dashboard");

    let snapshot = match api.admin_stats(&config.api.stats_path).await {
        Ok(Some(stats)) => Some(stats),
        Ok(None) => {
            warn!(path = %config.api.stats_path, "statistics endpoint returned no data");
            None
        }
        Err(e) => {
            warn!(path = %config.api.stats_path, error = %e, "failed to load statistics");
            None
        }
    };
    let mut app = App::new(AdminContext::initialize(snapshot));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut terminal = setup_terminal()?;

    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), TICK_MS);
    spawn_signal_listener(tx.clone());
    for effect in app.mount() {
        dispatch(&api, effect, &tx);
    }

    let result = event_loop(&mut terminal, &mut app, &api, &tx, &mut rx).await;
    restore_terminal(&mut terminal)?;
    info!("dashboard closed");
    result
}

async fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    api: &ApiClient,
    tx: &mpsc::UnboundedSender<Message>,
    rx: &mut mpsc::UnboundedReceiver<Message>,
) -> Result<()> {
    while !app.should_quit {
        terminal
            .draw(|frame| render(frame, app))
            .map_err(|e| PeerdeskError::Io(format!("failed to draw: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        if let Some(effect) = update(app, message) {
            dispatch(api, effect, tx);
        }
    }
    Ok(())
}

/// Quits on SIGINT delivered from outside the terminal.
fn spawn_signal_listener(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(Message::Quit);
        }
    });
}
