use mosura_anilist::Media;
use mosura_core::{
    callback::CallbackToken,
    domain::{ChatId, MediaKind, MessageRef},
    formatting::{clean_description, escape_html},
    keyboard::{InlineButton, InlineKeyboard},
    Result,
};

use crate::router::AppState;

const DESCRIPTION_MAX_CHARS: usize = 600;

/// Show the detail card for one title. The back button returns to the list
/// page the item was picked from, carried in the media token.
pub(crate) async fn show_media(
    state: &AppState,
    chat_id: ChatId,
    editable: Option<MessageRef>,
    kind: MediaKind,
    id: u64,
    page: usize,
) -> Result<()> {
    let Some(media) = state.anilist.media(kind, id).await? else {
        // A stale button for an id AniList no longer knows; keep the list.
        let text = format!("That {kind} is no longer available on AniList.");
        return state.messenger.send_html(chat_id, &text).await.map(|_| ());
    };

    let text = format_media(&media);

    let mut keyboard = InlineKeyboard::default();
    keyboard.push_row(vec![InlineButton::new(
        "🔙 Back",
        CallbackToken::Page { kind, page }.encode()?,
    )]);

    match editable {
        Some(msg) => state.messenger.edit_keyboard(msg, &text, keyboard).await,
        None => state
            .messenger
            .send_keyboard(chat_id, &text, keyboard)
            .await
            .map(|_| ()),
    }
}

fn format_media(media: &Media) -> String {
    let mut out = format!("<b>{}</b>", escape_html(media.title.preferred()));

    let mut facts = Vec::new();
    if let Some(format) = &media.format {
        facts.push(format.clone());
    }
    if let Some(status) = &media.status {
        facts.push(status.clone());
    }
    if let Some(score) = media.average_score {
        facts.push(format!("{score}%"));
    }
    if !facts.is_empty() {
        out.push_str(&format!("\n<i>{}</i>", escape_html(&facts.join(" | "))));
    }

    if !media.genres.is_empty() {
        out.push_str(&format!("\n{}", escape_html(&media.genres.join(", "))));
    }

    if let Some(description) = &media.description {
        let cleaned = clean_description(description, DESCRIPTION_MAX_CHARS);
        if !cleaned.is_empty() {
            out.push_str(&format!("\n\n{}", escape_html(&cleaned)));
        }
    }

    if let Some(url) = &media.site_url {
        out.push_str(&format!("\n\n<a href=\"{}\">View on AniList</a>", escape_html(url)));
    }

    out
}
