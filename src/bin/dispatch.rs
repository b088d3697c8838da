use anyhow::Context;

use smartbrief::ai_client::AiClient;
use smartbrief::config::get_configuration;
use smartbrief::digest::dispatcher::{DigestDispatcher, RetryPolicy};
use smartbrief::digest::eligibility::SendWindow;
use smartbrief::email_client::EmailClient;
use smartbrief::news_client::NewsClient;
use smartbrief::startup::get_connection_db_pool;
use smartbrief::storage::PgSubscriberStore;
use smartbrief::telemetry::{get_subscriber, init_subscriber};
use smartbrief::weather_client::WeatherClient;

/// One dispatch cycle, then exit. Meant to be invoked by an external trigger
/// (cron, roughly hourly so no subscriber's send window is missed). Anything
/// wrong with the configuration fails fast here, before any subscriber is
/// touched; per-subscriber failures only show up in the summary counts.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber(String::from("smartbrief_dispatch"), String::from("info"));

    init_subscriber(subscriber);

    let config = get_configuration().context("Failed to load configuration")?;

    let window = SendWindow::new(
        config.digest.window_start_hour,
        config.digest.window_end_hour,
    )
    .map_err(anyhow::Error::msg)
    .context("Invalid send window configuration")?;

    let sender = config
        .get_email_client_sender()
        .map_err(anyhow::Error::msg)
        .context("Invalid sender email configuration")?;

    let store = PgSubscriberStore::new(get_connection_db_pool(&config.database));

    let dispatcher = DigestDispatcher::new(
        store,
        WeatherClient::new(config.weather_client.base_url.clone(), None),
        NewsClient::new(
            config.news_client.base_url.clone(),
            config.news_client.api_key.clone(),
            None,
        ),
        AiClient::new(
            config.ai_client.base_url.clone(),
            config.ai_client.api_key.clone(),
            config.ai_client.model.clone(),
            None,
        ),
        EmailClient::new(
            config.email_client.base_url.clone(),
            sender,
            config.email_client.api_key.clone(),
            None,
        ),
        window,
        RetryPolicy {
            max_attempts: config.digest.weather_retry_attempts,
            backoff: std::time::Duration::from_secs(config.digest.weather_retry_backoff_secs),
        },
        config.news_client.region.clone(),
        config.news_client.page_size,
    );

    let summary = dispatcher
        .run_dispatch_cycle()
        .await
        .context("Dispatch cycle could not read the subscriber list")?;

    tracing::info!(
        sent = summary.sent,
        skipped = summary.skipped,
        failed = summary.failed,
        "dispatch complete"
    );

    Ok(())
}
