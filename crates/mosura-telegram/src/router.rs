use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tracing::info;

use mosura_anilist::AniListClient;
use mosura_core::{
    config::Config,
    lang::{LanguageStore, MemoryLanguageStore},
    messaging::MessagingPort,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub anilist: Arc<AniListClient>,
    pub languages: Arc<dyn LanguageStore>,
    pub messenger: Arc<dyn MessagingPort>,
}

pub async fn run_polling(cfg: Arc<Config>, anilist: Arc<AniListClient>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        info!("mosura started as @{}", me.username());
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let languages: Arc<dyn LanguageStore> =
        Arc::new(MemoryLanguageStore::new(cfg.default_language.clone()));

    let state = Arc::new(AppState {
        cfg,
        anilist: anilist.clone(),
        languages,
        messenger,
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    // Let the connection pool drain before the process exits.
    anilist.close().await;
    info!("mosura stopped");

    Ok(())
}
