use mosura_anilist::Media;
use mosura_core::{
    callback::CallbackToken,
    domain::{ChatId, MediaKind, MessageRef},
    keyboard::InlineButton,
    pagination::Paginator,
    Result,
};

use crate::router::AppState;

/// Render one page of the popular list for a kind. Entered from the menu
/// (page 0, fresh or edited message) and from prev/next buttons (edit in
/// place). Page state round-trips through `page:{kind}:{n}` tokens.
pub(crate) async fn show_popular(
    state: &AppState,
    chat_id: ChatId,
    editable: Option<MessageRef>,
    kind: MediaKind,
    page: usize,
) -> Result<()> {
    let items = state.anilist.popular(kind).await?;

    let paginator = Paginator::new(
        &items,
        |media: &Media, _| media.title.preferred().to_string(),
        |media: &Media, page| {
            CallbackToken::Media {
                kind,
                id: media.id,
                page,
            }
            .encode()
        },
        |page| CallbackToken::Page { kind, page }.encode(),
    );
    let (mut keyboard, window) = paginator.render_page(page, state.cfg.page_size, 1)?;

    keyboard.push_row(vec![InlineButton::new(
        "🔙 Back",
        CallbackToken::Menu {
            name: "start".to_string(),
        }
        .encode()?,
    )]);

    let text = if window.total == 0 {
        format!("AniList returned no popular {kind} right now.")
    } else {
        format!(
            "<b>{total}</b> most popular {kind} on AniList, showing {from}–{to}.",
            total = window.total,
            from = window.start + 1,
            to = window.end,
        )
    };

    match editable {
        Some(msg) => state.messenger.edit_keyboard(msg, &text, keyboard).await,
        None => state
            .messenger
            .send_keyboard(chat_id, &text, keyboard)
            .await
            .map(|_| ()),
    }
}
