//! RentFit client - dashboard snapshot and notification watcher
//!
//! Signs in (or restores the saved session), prints the rental and donation
//! dashboards with the actions available to the signed-in role, then follows
//! the unread notification count until interrupted.

use anyhow::{bail, Context};
use tokio_stream::StreamExt;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use rentfit_client::{
    config::{AppConfig, LoggingConfig},
    lifecycle::{rental_status_hint, LifecycleEntity, TransitionAction},
    services::{poller::Feed, view_model::ListView},
    RentfitClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging);

    tracing::info!("Starting RentFit client v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Backend at {}", config.api.base_url);

    let credentials = config.credentials.clone();
    let client = RentfitClient::new(config).context("Failed to create client")?;
    let services = &client.services;

    if !client.session.is_authenticated() {
        let (Some(email), Some(password)) = (credentials.email, credentials.password) else {
            bail!("Not signed in: set RENTFIT__CREDENTIALS__EMAIL and RENTFIT__CREDENTIALS__PASSWORD");
        };
        services
            .auth
            .login(&email, &password)
            .await
            .map_err(|e| anyhow::anyhow!(e.user_message("Login failed.")))?;
    }

    let Some(role) = client.session.role() else {
        bail!("Session has no role");
    };

    let rentals = services.rental_board(role);
    rentals.refresh().await.context("Failed to load rentals")?;
    println!("Rentals ({} view)", role);
    match rentals.view() {
        ListView::Ready(items) => {
            for rental in items {
                let actions: Vec<_> = rental.actions_for(role).iter().map(|a| a.label()).collect();
                let hint = rental_status_hint(rental.status, role).unwrap_or_default();
                println!(
                    "  #{:<5} {:<30} {:<18} {:>10}  [{}] {}",
                    rental.id,
                    rental.clothing_name,
                    rental.status.to_string(),
                    rental.total_price.to_string(),
                    actions.join(", "),
                    hint
                );
            }
        }
        ListView::Empty => println!("  No rentals yet."),
        other => println!("  {:?}", other),
    }

    let donations = services.donation_board(role);
    match donations.refresh().await {
        Ok(_) => {
            println!("Donations");
            match donations.view() {
                ListView::Ready(items) => {
                    for donation in items {
                        let actions: Vec<_> =
                            donation.actions_for(role).iter().map(|a| a.label()).collect();
                        println!(
                            "  #{:<5} {:<30} {:<10} [{}]",
                            donation.id,
                            donation.item_name,
                            donation.donation_status.to_string(),
                            actions.join(", ")
                        );
                    }
                }
                _ => println!("  No donations yet."),
            }
        }
        Err(e) => tracing::warn!("Skipping donations: {}", e),
    }

    let (handle, feed) = services.notifications.watch_unread();
    let mut unread = feed.stream();
    let mut session = client.session.subscribe();

    loop {
        tokio::select! {
            Some(count) = unread.next() => println!("Unread notifications: {}", count),
            changed = session.changed() => {
                if changed.is_err() || session.borrow().is_none() {
                    tracing::warn!("Session ended, stopping");
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    handle.stop();
    Ok(())
}

/// Install the global subscriber; the guard must live as long as file logging is wanted
fn init_tracing(logging: &LoggingConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("rentfit_client={}", logging.level).into());

    let (writer, guard) = match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "rentfit-client.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(fmt::layer().json().with_writer(writer)).init();
    } else {
        registry.with(fmt::layer().with_writer(writer)).init();
    }
    guard
}
