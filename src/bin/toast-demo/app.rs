use std::path::PathBuf;
use std::time::Duration;

use storefront_toast::Result;
use storefront_toast::config::{Durations, ToastConfig};
use storefront_toast::telemetry::init_tracing;
use storefront_toast::{ToastEvent, ToastManager};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::time::sleep;
use tracing::{info, warn};

use super::cli::Cli;
use super::console::ConsoleSurface;
use super::script::{Command, parse_line};

const DEFAULT_CONFIG: &str = "toast.toml";
const DRAIN_POLL: Duration = Duration::from_millis(50);

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut config = ToastConfig::from_env_and_file(&config_path)?;
    if cli.sticky {
        config.durations = Durations::sticky();
    }

    let (manager, events) = ToastManager::with_events(ConsoleSurface::new(cli.markup), config);
    let printer = cli.events.then(|| tokio::spawn(print_events(events)));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut interrupted = false;
    loop {
        let line = tokio::select! {
            biased;
            _ = signal::ctrl_c() => {
                info!("interrupt received, stopping script");
                interrupted = true;
                break;
            }
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!(line = %line, error = %err, "skipping script line");
                continue;
            }
        };
        if matches!(command, Command::Quit) {
            break;
        }
        if !execute(&manager, command).await {
            interrupted = true;
            break;
        }
    }

    if !interrupted {
        drain(&manager).await;
    }
    drop(manager);

    if let Some(printer) = printer {
        if let Err(err) = printer.await {
            warn!(error = %err, "event printer terminated unexpectedly");
        }
    }
    Ok(())
}

/// Run one command. Returns `false` when the user interrupted a wait.
async fn execute(manager: &ToastManager, command: Command) -> bool {
    match command {
        Command::Notify(request) => {
            manager.notify(request);
        }
        Command::Click(index) | Command::Dismiss(index) => {
            let Some(toast) = manager.active().into_iter().nth(index) else {
                warn!(index, active = manager.len(), "no toast at that position");
                return true;
            };
            if matches!(command, Command::Click(_)) {
                manager.click(toast.id);
            } else {
                manager.dismiss(toast.id);
            }
        }
        Command::Wait(duration) => {
            tokio::select! {
                _ = signal::ctrl_c() => return false,
                () = sleep(duration) => {}
            }
        }
        Command::List => {
            for (index, toast) in manager.active().iter().enumerate() {
                println!(
                    "{index}: {} {:?} {:<7} {:?}",
                    toast.id, toast.state, toast.severity, toast.message
                );
            }
        }
        Command::Quit => {}
    }
    true
}

/// Wait for every toast that leaves on its own. Sticky toasts stay behind.
async fn drain(manager: &ToastManager) {
    while manager.has_pending_timers() {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("interrupt received, not waiting for remaining toasts");
                return;
            }
            () = sleep(DRAIN_POLL) => {}
        }
    }
    if !manager.is_empty() {
        info!(remaining = manager.len(), "leaving sticky toasts on screen");
    }
}

async fn print_events(events: async_channel::Receiver<ToastEvent>) {
    while let Ok(event) = events.recv().await {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{line}"),
            Err(err) => warn!(error = %err, "failed to encode toast event"),
        }
    }
}
