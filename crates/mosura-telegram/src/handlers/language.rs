use mosura_core::{
    callback::CallbackToken,
    domain::ChatScope,
    keyboard::{InlineButton, InlineKeyboard},
    Result,
};

use crate::{interaction::InteractionContext, router::AppState};

const LANGUAGE_COLUMNS: usize = 4;

/// `/language` and the `menu:language` button: show the current preference
/// and a grid of the configured languages.
pub(crate) async fn select_language(state: &AppState, ctx: &InteractionContext) -> Result<()> {
    let current = state
        .languages
        .language(ctx.scope, ctx.subject_id())
        .await?;

    let mut buttons = Vec::with_capacity(state.cfg.available_languages.len());
    for code in &state.cfg.available_languages {
        buttons.push(InlineButton::new(
            display_name(code),
            CallbackToken::Language {
                code: code.clone(),
                scope: ctx.scope,
            }
            .encode()?,
        ));
    }
    let keyboard = InlineKeyboard::from_grid(buttons, LANGUAGE_COLUMNS);

    let text = match ctx.scope {
        ChatScope::Private => format!("Your language: <b>{}</b>", display_name(&current)),
        ChatScope::Group => format!("Chat language: <b>{}</b>", display_name(&current)),
    };

    match ctx.editable {
        Some(msg) => state.messenger.edit_keyboard(msg, &text, keyboard).await,
        None => state
            .messenger
            .send_keyboard(ctx.chat_id, &text, keyboard)
            .await
            .map(|_| ()),
    }
}

/// A `lang:{code}:{scope}` button press: persist and confirm. The scope comes
/// from the token so the preference is stored against the same subject the
/// menu was built for.
pub(crate) async fn set_language(
    state: &AppState,
    ctx: &InteractionContext,
    code: &str,
    scope: ChatScope,
) -> Result<()> {
    let subject_id = match scope {
        ChatScope::Private => ctx.user_id.0,
        ChatScope::Group => ctx.chat_id.0,
    };
    state.languages.set_language(scope, subject_id, code).await?;

    let text = format!("Changed language to <b>{}</b>.", display_name(code));
    match ctx.editable {
        Some(msg) => state.messenger.edit_html(msg, &text).await,
        None => state.messenger.send_html(ctx.chat_id, &text).await.map(|_| ()),
    }
}

/// Native display names for the codes the bot ships with; unknown codes show
/// as-is. Full locale tables are out of scope.
fn display_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "pt" => "Português",
        "es" => "Español",
        "it" => "Italiano",
        "fr" => "Français",
        "de" => "Deutsch",
        "ja" => "日本語",
        other => other,
    }
}
