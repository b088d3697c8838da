use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};

use crate::ai_client::AiClient;
use crate::digest::content;
use crate::digest::eligibility::{local_now, should_send, SendWindow};
use crate::domain::subscriber::Subscriber;
use crate::email_client::EmailClient;
use crate::news_client::{Headline, NewsClient};
use crate::storage::{StoreError, SubscriberStore};
use crate::weather_client::{WeatherClient, WeatherError, WeatherReport};

/// Aggregate outcome of one dispatch cycle.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub sent: u32,
    pub skipped: u32,
    pub failed: u32,
}

/// A per-subscriber pipeline failure, attributed to the stage that caused it.
#[derive(thiserror::Error, Debug)]
enum PipelineError {
    #[error("no timezone resolvable for coordinate ({latitude}, {longitude})")]
    Timezone { latitude: f64, longitude: f64 },
    #[error("weather fetch failed after {attempts} attempts: {source}")]
    Weather {
        attempts: u32,
        source: WeatherError,
    },
    #[error("email transmission failed: {0}")]
    Email(#[source] reqwest::Error),
}

/// Retry policy for the mandatory weather stage. News, generation and email
/// get a single attempt each; news and generation degrade instead of failing.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

/// Orchestrates one full pass over the active subscribers: eligibility gate,
/// weather (with retry), news (best effort), briefing composition (with
/// local fallback), email transmission, then the last-sent marker.
///
/// Every collaborator is an explicit constructor argument; the dispatcher
/// holds no ambient global state.
pub struct DigestDispatcher<S> {
    store: S,
    weather_client: WeatherClient,
    news_client: NewsClient,
    ai_client: AiClient,
    email_client: EmailClient,
    window: SendWindow,
    weather_retry: RetryPolicy,
    news_region: String,
    news_page_size: u16,
}

impl<S: SubscriberStore> DigestDispatcher<S> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: S,
        weather_client: WeatherClient,
        news_client: NewsClient,
        ai_client: AiClient,
        email_client: EmailClient,
        window: SendWindow,
        weather_retry: RetryPolicy,
        news_region: String,
        news_page_size: u16,
    ) -> DigestDispatcher<S> {
        DigestDispatcher {
            store,
            weather_client,
            news_client,
            ai_client,
            email_client,
            window,
            weather_retry,
            news_region,
            news_page_size,
        }
    }

    /// Run one dispatch cycle against the current wall clock.
    ///
    /// Only the initial subscriber snapshot can fail the cycle as a whole;
    /// everything after that is isolated per subscriber and ends up in the
    /// summary counts.
    pub async fn run_dispatch_cycle(&self) -> Result<DispatchSummary, StoreError> {
        self.dispatch_at(Utc::now()).await
    }

    #[tracing::instrument(name = "Dispatch cycle", skip(self))]
    pub async fn dispatch_at(&self, now_utc: DateTime<Utc>) -> Result<DispatchSummary, StoreError> {
        let subscribers = self.store.list_active().await?;
        tracing::info!(total = subscribers.len(), "starting dispatch cycle");

        let mut summary = DispatchSummary::default();

        for subscriber in subscribers {
            if !should_send(
                subscriber.latitude,
                subscriber.longitude,
                subscriber.last_sent_date,
                now_utc,
                &self.window,
            ) {
                tracing::debug!(
                    subscriber_id = %subscriber.id,
                    "skipping: outside send window or already served today"
                );
                summary.skipped += 1;
                continue;
            }

            match self.deliver(&subscriber, now_utc).await {
                Ok(()) => {
                    tracing::info!(
                        subscriber_id = %subscriber.id,
                        email = %subscriber.email.as_ref(),
                        "digest sent"
                    );
                    summary.sent += 1;
                }
                Err(error) => {
                    tracing::error!(
                        error = %error,
                        subscriber_id = %subscriber.id,
                        email = %subscriber.email.as_ref(),
                        "digest delivery failed"
                    );
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            sent = summary.sent,
            skipped = summary.skipped,
            failed = summary.failed,
            "dispatch cycle finished"
        );

        Ok(summary)
    }

    async fn deliver(
        &self,
        subscriber: &Subscriber,
        now_utc: DateTime<Utc>,
    ) -> Result<(), PipelineError> {
        // Eligibility already resolved this zone, but recompute rather than
        // thread the value through; it cannot have changed within one cycle.
        let local_date = local_now(subscriber.latitude, subscriber.longitude, now_utc)
            .ok_or(PipelineError::Timezone {
                latitude: subscriber.latitude,
                longitude: subscriber.longitude,
            })?
            .date_naive();

        let weather = self.fetch_weather_with_retry(subscriber).await?;
        let headlines = self.fetch_headlines_best_effort(subscriber).await;

        let location = subscriber
            .location_name
            .as_deref()
            .unwrap_or("your location");

        let briefing = self
            .compose_briefing(subscriber, &weather, location, local_date, &headlines)
            .await;

        let subject = content::subject_line(local_date);
        let html = content::render_shell(&briefing);

        self.email_client
            .send_email(&subscriber.email, &subject, &html)
            .await
            .map_err(PipelineError::Email)?;

        // The email is out; a failed marker update must not turn the outcome
        // into a failure. Worst case the subscriber gets one duplicate before
        // local midnight.
        if let Err(error) = self.store.mark_sent(subscriber.id, local_date).await {
            tracing::error!(
                error = %error,
                subscriber_id = %subscriber.id,
                "digest was sent but the last-sent marker was not updated"
            );
        }

        Ok(())
    }

    /// Weather is a mandatory content block: no digest goes out without it.
    async fn fetch_weather_with_retry(
        &self,
        subscriber: &Subscriber,
    ) -> Result<WeatherReport, PipelineError> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self
                .weather_client
                .current_and_daily(subscriber.latitude, subscriber.longitude)
                .await
            {
                Ok(report) => return Ok(report),
                Err(source) if attempt < self.weather_retry.max_attempts => {
                    tracing::warn!(
                        error = %source,
                        subscriber_id = %subscriber.id,
                        attempt,
                        "weather fetch failed, retrying"
                    );
                    tokio::time::sleep(self.weather_retry.backoff).await;
                }
                Err(source) => {
                    return Err(PipelineError::Weather {
                        attempts: attempt,
                        source,
                    })
                }
            }
        }
    }

    /// News is optional: any failure degrades to an empty list, which the
    /// composition stage turns into the no-news sentinel.
    async fn fetch_headlines_best_effort(&self, subscriber: &Subscriber) -> Vec<Headline> {
        match self
            .news_client
            .top_headlines(&self.news_region, self.news_page_size)
            .await
        {
            Ok(headlines) => headlines,
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    subscriber_id = %subscriber.id,
                    "news fetch failed, continuing without headlines"
                );
                Vec::new()
            }
        }
    }

    /// AI composition with a deterministic local fallback; this stage always
    /// produces a briefing.
    async fn compose_briefing(
        &self,
        subscriber: &Subscriber,
        weather: &WeatherReport,
        location: &str,
        local_date: NaiveDate,
        headlines: &[Headline],
    ) -> String {
        let prompt = content::build_prompt(weather, location, local_date, headlines);

        match self.ai_client.generate(&prompt).await {
            Ok(briefing) => briefing,
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    subscriber_id = %subscriber.id,
                    "generation failed, using the fallback template"
                );
                content::fallback_digest(weather, location, headlines)
            }
        }
    }
}
