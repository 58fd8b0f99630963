use std::sync::Arc;

use teloxide::{prelude::*, types::Message};
use tracing::warn;

use mosura_core::{
    callback::CallbackToken,
    domain::MediaKind,
    formatting::escape_html,
    keyboard::{InlineButton, InlineKeyboard},
    Result,
};

use crate::{
    handlers::{self, language, popular},
    interaction::{resolve_chat_and_user, Interaction, InteractionContext},
    router::AppState,
};

pub async fn handle_command(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some((name, args)) = parse_command(msg.text().unwrap_or_default()) else {
        return Ok(());
    };
    let name = name.to_string();
    let args = args.to_string();

    let interaction = Interaction::Message(msg);
    let Some(ctx) = resolve_chat_and_user(&interaction) else {
        return Ok(());
    };

    let outcome = match name.as_str() {
        "start" | "help" => send_menu(&state, &ctx).await,
        "anime" => media_command(&state, &ctx, MediaKind::Anime, &args).await,
        "manga" => media_command(&state, &ctx, MediaKind::Manga, &args).await,
        "language" => language::select_language(&state, &ctx).await,
        _ => Ok(()),
    };

    if let Err(err) = outcome {
        warn!(command = %name, error = %err, "command handler failed");
        let _ = state
            .messenger
            .send_html(ctx.chat_id, handlers::failure_notice(&err))
            .await;
    }

    Ok(())
}

/// The `/start` menu; also reachable from `menu:start` back buttons.
pub(crate) async fn send_menu(state: &AppState, ctx: &InteractionContext) -> Result<()> {
    let mut keyboard = InlineKeyboard::default();
    keyboard.push_row(vec![
        InlineButton::new(
            "📚 Manga",
            CallbackToken::Menu {
                name: "manga".to_string(),
            }
            .encode()?,
        ),
        InlineButton::new(
            "🎬 Anime",
            CallbackToken::Menu {
                name: "anime".to_string(),
            }
            .encode()?,
        ),
    ]);
    keyboard.push_row(vec![InlineButton::new(
        "🌐 Language",
        CallbackToken::Menu {
            name: "language".to_string(),
        }
        .encode()?,
    )]);

    let text = "Hi! I can look up anime and manga on AniList.\n\
                Pick a catalogue below, or search with /anime <i>name</i> or /manga <i>name</i>.";

    match ctx.editable {
        Some(msg) => state.messenger.edit_keyboard(msg, text, keyboard).await,
        None => state
            .messenger
            .send_keyboard(ctx.chat_id, text, keyboard)
            .await
            .map(|_| ()),
    }
}

/// `/anime` and `/manga`: with a term, search by name; without, show the
/// popular list.
async fn media_command(
    state: &AppState,
    ctx: &InteractionContext,
    kind: MediaKind,
    args: &str,
) -> Result<()> {
    if args.is_empty() {
        return popular::show_popular(state, ctx.chat_id, ctx.editable, kind, 0).await;
    }
    search(state, ctx, kind, args).await
}

async fn search(
    state: &AppState,
    ctx: &InteractionContext,
    kind: MediaKind,
    term: &str,
) -> Result<()> {
    let results = state.anilist.search(kind, term).await?;
    let shown = escape_html(term);

    if results.is_empty() {
        let text = format!("Nothing on AniList matched <i>{shown}</i>.");
        return state.messenger.send_html(ctx.chat_id, &text).await.map(|_| ());
    }

    // Search results are a single window: the stateless page tokens cannot
    // carry an arbitrary-length search term, so only popular lists paginate.
    let mut buttons = Vec::new();
    for media in results.iter().take(state.cfg.page_size) {
        buttons.push(InlineButton::new(
            media.title.preferred(),
            CallbackToken::Media {
                kind,
                id: media.id,
                page: 0,
            }
            .encode()?,
        ));
    }
    let keyboard = InlineKeyboard::from_grid(buttons, 1);

    let text = format!("Top {kind} matches for <i>{shown}</i>:");
    state
        .messenger
        .send_keyboard(ctx.chat_id, &text, keyboard)
        .await
        .map(|_| ())
}

/// Split `/name@bot args` into the bare command name and its argument string.
fn parse_command(text: &str) -> Option<(&str, &str)> {
    let rest = text.trim().strip_prefix('/')?;
    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (rest, ""),
    };
    let name = head.split('@').next().unwrap_or(head);
    if name.is_empty() {
        return None;
    }
    Some((name, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_with_mentions_and_args() {
        assert_eq!(parse_command("/start"), Some(("start", "")));
        assert_eq!(parse_command("/manga one piece"), Some(("manga", "one piece")));
        assert_eq!(
            parse_command("/anime@mosura_bot cowboy bebop"),
            Some(("anime", "cowboy bebop"))
        );
        assert_eq!(parse_command("not a command"), None);
        assert_eq!(parse_command("/"), None);
    }
}
