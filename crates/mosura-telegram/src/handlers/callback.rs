use std::sync::Arc;

use teloxide::{prelude::*, types::CallbackQuery};
use tracing::warn;

use mosura_core::{callback::CallbackToken, domain::MediaKind};

use crate::{
    handlers::{self, commands, language, media, popular},
    interaction::{resolve_chat_and_user, Interaction},
    router::AppState,
};

pub async fn handle_callback(q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    let callback_id = q.id.clone();
    let data = q.data.clone().unwrap_or_default();

    // Unknown or stale button data is ignored, but the query is still
    // answered so the client stops its spinner.
    let Some(token) = CallbackToken::decode(&data) else {
        let _ = state.messenger.answer_callback(&callback_id, None).await;
        return Ok(());
    };

    let interaction = Interaction::Callback(q);
    let Some(ctx) = resolve_chat_and_user(&interaction) else {
        let _ = state.messenger.answer_callback(&callback_id, None).await;
        return Ok(());
    };

    let outcome = match token {
        CallbackToken::Menu { name } => match name.as_str() {
            "start" => commands::send_menu(&state, &ctx).await,
            "anime" => {
                popular::show_popular(&state, ctx.chat_id, ctx.editable, MediaKind::Anime, 0).await
            }
            "manga" => {
                popular::show_popular(&state, ctx.chat_id, ctx.editable, MediaKind::Manga, 0).await
            }
            "language" => language::select_language(&state, &ctx).await,
            _ => Ok(()),
        },
        CallbackToken::Page { kind, page } => {
            popular::show_popular(&state, ctx.chat_id, ctx.editable, kind, page).await
        }
        CallbackToken::Media { kind, id, page } => {
            media::show_media(&state, ctx.chat_id, ctx.editable, kind, id, page).await
        }
        CallbackToken::Language { code, scope } => {
            language::set_language(&state, &ctx, &code, scope).await
        }
    };

    match outcome {
        Ok(()) => {
            let _ = state.messenger.answer_callback(&callback_id, None).await;
        }
        Err(err) => {
            warn!(error = %err, "callback handler failed");
            let _ = state
                .messenger
                .answer_callback(&callback_id, Some(handlers::failure_notice(&err)))
                .await;
        }
    }

    Ok(())
}
