//! Place Keeper bot entry point.
//!
//! Loads configuration, connects the database, wires the adapters and runs
//! the long-polling loop until Ctrl-C.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use place_keeper::adapters::{
    BotApiConfig, GoogleDistanceMatrix, GoogleMapsConfig, InMemorySessionStore,
    LocalPhotoStorage, PostgresPlaceRepository, TelegramClient, TelegramPoller,
    TelegramTransport,
};
use place_keeper::application::{Dispatcher, NearestPlaceMatcher, PlaceBot};
use place_keeper::config::{AppConfig, LogFormat, LoggingConfig};

/// Inbound events buffered between the poller and the dispatcher.
const INBOUND_BUFFER: usize = 256;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging);
    config.validate()?;

    tracing::info!(
        photo_dir = %config.storage.photo_dir.display(),
        concurrency = config.maps.concurrency,
        "Starting place-keeper"
    );

    // Persistence
    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    // Outbound adapters
    let mut maps = GoogleMapsConfig::new(config.maps.api_key.expose_secret().clone())
        .with_base_url(config.maps.base_url.clone())
        .with_timeout(config.maps.timeout());
    if let Some(language) = &config.maps.language {
        maps = maps.with_language(language.clone());
    }
    let provider = Arc::new(GoogleDistanceMatrix::new(maps)?);

    let client = Arc::new(TelegramClient::new(
        BotApiConfig::new(config.telegram.bot_token.expose_secret().clone())
            .with_api_base_url(config.telegram.api_base_url.clone())
            .with_poll_timeout(config.telegram.poll_timeout())
            .with_request_timeout(config.telegram.request_timeout()),
    )?);

    let bot = Arc::new(PlaceBot::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(PostgresPlaceRepository::new(pool.clone())),
        Arc::new(LocalPhotoStorage::new(&config.storage.photo_dir)),
        Arc::new(TelegramTransport::new(Arc::clone(&client))),
        NearestPlaceMatcher::new(provider, config.maps.concurrency, config.maps.timeout()),
    ));

    // Inbound pipeline: poller -> dispatcher -> per-conversation actors
    let (sender, receiver) = mpsc::channel(INBOUND_BUFFER);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let poller = tokio::spawn(TelegramPoller::new(client, sender).run(shutdown_rx));
    let dispatcher = tokio::spawn(Dispatcher::new(bot).run(receiver));

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");
    let _ = shutdown_tx.send(true);

    // The poller drops its sender on exit, which lets the dispatcher drain
    poller.await?;
    dispatcher.await?;
    pool.close().await;

    tracing::info!("Stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("place_keeper={}", logging.level)));

    let registry = tracing_subscriber::registry().with(env_filter);
    match logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
