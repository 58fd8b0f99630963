//! Bot entrypoint: logging, config, one AniList client, Telegram polling.

use std::sync::Arc;

use mosura_anilist::AniListClient;
use mosura_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), mosura_core::Error> {
    mosura_core::logging::init("mosura")?;

    let cfg = Arc::new(Config::load()?);

    // One long-lived client per process; handlers get it by handle.
    let anilist = Arc::new(AniListClient::new(
        cfg.api_url.clone(),
        cfg.request_timeout,
        cfg.retry_policy(),
    ));

    mosura_telegram::router::run_polling(cfg, anilist)
        .await
        .map_err(|e| mosura_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
