//! A tagged union over the two ways a handler can be entered, so commands and
//! callback buttons share one extraction path instead of dynamic dispatch.

use teloxide::types::{CallbackQuery, Chat, Message};

use mosura_core::domain::{ChatId, ChatScope, MessageId, MessageRef, UserId};

pub enum Interaction {
    Message(Message),
    Callback(CallbackQuery),
}

/// Everything a handler needs to act on an interaction.
#[derive(Clone, Copy, Debug)]
pub struct InteractionContext {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub scope: ChatScope,
    /// Present for callbacks: the message the pressed keyboard hangs off,
    /// which the handler should edit in place instead of sending a new one.
    pub editable: Option<MessageRef>,
}

impl InteractionContext {
    /// The id a per-chat preference is keyed by: the user in private chats,
    /// the chat itself in groups.
    pub fn subject_id(&self) -> i64 {
        match self.scope {
            ChatScope::Private => self.user_id.0,
            ChatScope::Group => self.chat_id.0,
        }
    }
}

/// Extract chat, user, and the editable message (if any) from either entry
/// point. `None` when the update is missing its sender or message.
pub fn resolve_chat_and_user(interaction: &Interaction) -> Option<InteractionContext> {
    match interaction {
        Interaction::Message(msg) => {
            let user = msg.from()?;
            Some(InteractionContext {
                chat_id: ChatId(msg.chat.id.0),
                user_id: UserId(user.id.0 as i64),
                scope: scope_of(&msg.chat),
                editable: None,
            })
        }
        Interaction::Callback(q) => {
            let msg = q.message.as_ref()?;
            Some(InteractionContext {
                chat_id: ChatId(msg.chat.id.0),
                user_id: UserId(q.from.id.0 as i64),
                scope: scope_of(&msg.chat),
                editable: Some(MessageRef {
                    chat_id: ChatId(msg.chat.id.0),
                    message_id: MessageId(msg.id.0),
                }),
            })
        }
    }
}

fn scope_of(chat: &Chat) -> ChatScope {
    if chat.is_private() {
        ChatScope::Private
    } else {
        ChatScope::Group
    }
}
