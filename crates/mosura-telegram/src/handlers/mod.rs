//! Telegram update handlers: thin glue binding commands and callback buttons
//! to the AniList client and the pagination engine.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use mosura_core::Error;

use crate::router::AppState;

mod callback;
mod commands;
mod language;
mod media;
mod popular;

pub async fn handle_callback(q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    callback::handle_callback(q, state).await
}

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if !text.starts_with('/') {
        return Ok(());
    }
    commands::handle_command(msg, state).await
}

/// User-facing notice for a failed interaction. Transport failures degrade to
/// a transient "unavailable" message; everything else stays generic.
pub(crate) fn failure_notice(err: &Error) -> &'static str {
    match err {
        Error::Transport(_) => "😕 AniList is unavailable right now. Please try again later.",
        _ => "Something went wrong. Please try again.",
    }
}
