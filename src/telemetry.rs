use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Build a bunyan-formatted tracing subscriber writing to stdout. 'subscriber'
/// here is the `tracing` concept, not a digest subscriber.
pub fn get_subscriber(name: String, default_filter_level: String) -> impl Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter_level));
    let formatting_layer = BunyanFormattingLayer::new(name, std::io::stdout);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Register the subscriber globally. Call once, before anything logs.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    // Redirects `log` events (e.g. from actix-web) into the tracing pipeline
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set tracing subscriber");
}
