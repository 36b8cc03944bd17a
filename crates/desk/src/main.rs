use anyhow::Context;
use ticketdesk_core::clock::SystemClock;
use ticketdesk_desk::{load_snapshot, Desk, DeskConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing; logs go to stderr so stdout stays pure JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticketdesk_desk=debug,ticketdesk_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = DeskConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        snapshot = %config.snapshot_path.display(),
        window_days = config.report_window_days,
        "Starting ticketdesk report",
    );

    let snapshot = load_snapshot(&config.snapshot_path)
        .await
        .with_context(|| format!("failed to load {}", config.snapshot_path.display()))?;

    let desk = Desk::new(snapshot, SystemClock, config.thresholds)?;
    let window = desk.default_window(config.report_window_days);
    let report = desk.department_report(&window)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
