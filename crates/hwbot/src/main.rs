use std::sync::Arc;

use anyhow::Context;

use hwbot_core::{
    api::PracticumClient,
    config::Config,
    poll::{PollState, Poller},
    status::StatusCatalog,
};
use hwbot_telegram::TelegramMessenger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hwbot_core::logging::init("hwbot")?;

    // Nothing touches the network until the configuration is complete.
    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(critical = true, "hwbot stopped: {e}");
            std::process::exit(1);
        }
    };

    let api = Arc::new(
        PracticumClient::new(&cfg.credentials).context("failed to build review API client")?,
    );
    let messenger = Arc::new(TelegramMessenger::from_token(
        cfg.credentials.telegram_token.clone(),
    ));

    tracing::info!(
        "hwbot started: endpoint {}, chat {}",
        api.endpoint(),
        cfg.credentials.chat_id.0
    );

    let poller = Poller::new(
        api,
        messenger,
        StatusCatalog::default(),
        cfg.credentials.chat_id,
        cfg.retry_time,
    );
    poller.run_forever(PollState::starting_now()).await;

    Ok(())
}
