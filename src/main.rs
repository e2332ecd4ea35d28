use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;

use berdybot::cli::{Cli, Commands};
use berdybot::core::{config, init_logger, log_startup_configuration};
use berdybot::telegram::{create_bot, run_webhook, schema, setup_bot_commands, HandlerDeps, MenuRouter};
use berdybot::upstream::weather::display_place;
use berdybot::upstream::{crypto, Endpoints, Snapshot, UpstreamClient};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, configuration, upstream snapshot, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Set up global panic handler so panics inside handlers end up in the log
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // Load environment variables from .env if present; config is read lazily after this
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run { webhook }) => {
            log::info!("Running bot (webhook flag: {})", webhook);
            run_bot(webhook).await
        }
        Some(Commands::Snapshot { place }) => run_snapshot(place).await,
        None => run_bot(false).await,
    }
}

/// Fetches all upstream data once and prints it, without starting the bot.
async fn run_snapshot(place: Option<String>) -> Result<()> {
    let client = UpstreamClient::new(Endpoints::from_config())?;
    let place = place.unwrap_or_else(|| config::upstream::WEATHER_PLACE.clone());
    let snapshot = Snapshot::fetch(&client, &place, chrono::Local::now().date_naive()).await?;

    let place_name = display_place(&snapshot.place);
    println!("📍 {}\n{}\n", place_name, snapshot.weather.current.describe());
    println!("{}\n", snapshot.weather.forecast_text(&place_name));
    println!("{}\n", snapshot.fiat.summary_text());
    println!("{}", crypto::prices_text(&snapshot.crypto));
    Ok(())
}

async fn run_bot(webhook_flag: bool) -> Result<()> {
    let bot_init_start = std::time::Instant::now();
    log::info!("Starting bot...");

    let mode = if webhook_flag {
        config::DeliveryMode::Webhook
    } else {
        *config::DELIVERY_MODE
    };
    log_startup_configuration(mode);
    config::validate(mode)?;

    // Upstream data is fetched exactly once; a failure here is fatal
    let client = UpstreamClient::new(Endpoints::from_config())?;
    let snapshot = match Snapshot::fetch_today(&client).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::error!("❌ Failed to fetch upstream data: {}", e);
            return Err(e.into());
        }
    };
    log::info!(
        "✅ Upstream snapshot ready: weather for {}, {} hourly records, {} coins",
        snapshot.place,
        snapshot.weather.hourly.len(),
        snapshot.crypto.len()
    );

    let bot = create_bot()?;
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let router = MenuRouter::new(Arc::new(snapshot), Arc::new(client), *config::menu::WEATHER_MENU);
    let handler = schema(HandlerDeps::new(router));

    log::info!("================================================");
    log::info!("🎉 Bot initialization complete in {:.2}s", bot_init_start.elapsed().as_secs_f64());
    log::info!("================================================");

    match (mode, config::WEBHOOK_URL.as_deref()) {
        (config::DeliveryMode::Webhook, Some(url)) => run_webhook(bot, handler, url, *config::PORT).await?,
        _ => {
            log::info!("Starting bot in long polling mode");
            // A stale webhook would make getUpdates fail
            if let Err(e) = bot.delete_webhook().await {
                log::warn!("Failed to delete webhook: {}", e);
            }

            let listener = teloxide::update_listeners::Polling::builder(bot.clone()).build();
            log::info!("📡 Ready to receive updates!");

            Dispatcher::builder(bot, handler)
                .enable_ctrlc_handler()
                .build()
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
    }

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
