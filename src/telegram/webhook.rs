//! Webhook delivery
//!
//! Telegram pushes updates to `<WEBHOOK_URL>/<bot token>`. The root path `/`
//! re-registers that URL with Telegram, which is handy after a redeploy.

use std::net::SocketAddr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks::{self, Options};
use url::Url;

use super::handlers::HandlerError;
use crate::telegram::Bot;

/// URL Telegram should push updates to: the public base URL plus the token.
pub fn webhook_url(base: &str, token: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("{}/{}", base.trim_end_matches('/'), token))
}

#[derive(Clone)]
struct RootState {
    bot: Bot,
    url: Url,
}

/// `GET /`: registers the webhook again.
async fn reset_webhook(State(state): State<RootState>) -> (StatusCode, &'static str) {
    match state.bot.set_webhook(state.url.clone()).await {
        Ok(_) => {
            log::info!("🔁 Webhook re-registered");
            (StatusCode::OK, "!")
        }
        Err(e) => {
            log::error!("❌ Failed to re-register webhook: {}", e);
            (StatusCode::BAD_GATEWAY, "webhook registration failed")
        }
    }
}

/// Serves updates over a webhook until Ctrl+C.
///
/// # Arguments
/// * `bot` - Bot instance
/// * `handler` - Dispatcher schema
/// * `base_url` - Public base URL (`WEBHOOK_URL`)
/// * `port` - Local listen port
pub async fn run_webhook(
    bot: Bot,
    handler: UpdateHandler<HandlerError>,
    base_url: &str,
    port: u16,
) -> anyhow::Result<()> {
    let url = webhook_url(base_url, bot.token())?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log::info!("Starting bot in webhook mode on {} (public base {})", addr, base_url);

    // Registers the webhook with Telegram and routes `/<token>` to the listener
    let (listener, stop_flag, updates_router) = webhooks::axum_to_router(bot.clone(), Options::new(addr, url.clone())).await?;

    let root = axum::Router::new()
        .route("/", get(reset_webhook))
        .with_state(RootState { bot: bot.clone(), url });
    let app = updates_router.merge(root);

    let tcp = tokio::net::TcpListener::bind(addr).await?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(tcp, app).with_graceful_shutdown(stop_flag).await {
            log::error!("Webhook server error: {}", e);
        }
    });

    log::info!("📡 Ready to receive updates!");
    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    Ok(())
}
