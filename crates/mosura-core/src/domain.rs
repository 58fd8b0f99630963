use std::fmt;

/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a Telegram message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// The two AniList media catalogues the bot browses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Anime,
    Manga,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Anime => "anime",
            MediaKind::Manga => "manga",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "anime" => Some(MediaKind::Anime),
            "manga" => Some(MediaKind::Manga),
            _ => None,
        }
    }

    /// The `MediaType` enum value AniList's GraphQL schema expects.
    pub fn graphql(self) -> &'static str {
        match self {
            MediaKind::Anime => "ANIME",
            MediaKind::Manga => "MANGA",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a preference applies to one user (private chat) or a whole group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChatScope {
    Private,
    Group,
}

impl ChatScope {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatScope::Private => "private",
            ChatScope::Group => "group",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "private" => Some(ChatScope::Private),
            "group" => Some(ChatScope::Group),
            _ => None,
        }
    }
}

impl fmt::Display for ChatScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_round_trips_through_str() {
        for kind in [MediaKind::Anime, MediaKind::Manga] {
            assert_eq!(MediaKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(MediaKind::parse("ANIME"), None);
    }

    #[test]
    fn chat_scope_round_trips_through_str() {
        for scope in [ChatScope::Private, ChatScope::Group] {
            assert_eq!(ChatScope::parse(scope.as_str()), Some(scope));
        }
        assert_eq!(ChatScope::parse("channel"), None);
    }
}
