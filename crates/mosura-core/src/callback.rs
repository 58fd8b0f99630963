//! Stateless callback tokens round-tripped through inline-keyboard buttons.
//!
//! All navigation state lives in the button data itself; there is no
//! server-side session store. Decoding is pure and total: anything outside the
//! encoding's value space decodes to `None`.

use crate::{
    domain::{ChatScope, MediaKind},
    errors::Error,
    Result,
};

/// Telegram rejects callback data above 64 bytes.
pub const CALLBACK_DATA_LIMIT: usize = 64;

/// One action carried by a button press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackToken {
    /// Menu navigation, e.g. `menu:start`.
    Menu { name: String },
    /// Item selection, e.g. `media:manga:30002:3`. Carries the list page the
    /// button was rendered on, so the detail card can link back to it.
    Media {
        kind: MediaKind,
        id: u64,
        page: usize,
    },
    /// Page navigation inside a popular list, e.g. `page:anime:3`.
    Page { kind: MediaKind, page: usize },
    /// Language selection, e.g. `lang:pt:group`.
    Language { code: String, scope: ChatScope },
}

impl CallbackToken {
    /// Encode into compact button data, enforcing the platform size limit.
    pub fn encode(&self) -> Result<String> {
        let data = match self {
            CallbackToken::Menu { name } => format!("menu:{name}"),
            CallbackToken::Media { kind, id, page } => format!("media:{kind}:{id}:{page}"),
            CallbackToken::Page { kind, page } => format!("page:{kind}:{page}"),
            CallbackToken::Language { code, scope } => format!("lang:{code}:{scope}"),
        };

        if data.len() > CALLBACK_DATA_LIMIT {
            return Err(Error::TokenTooLarge {
                len: data.len(),
                limit: CALLBACK_DATA_LIMIT,
            });
        }
        Ok(data)
    }

    /// Decode button data back into a token. Never panics; unknown or
    /// malformed data yields `None`.
    pub fn decode(data: &str) -> Option<Self> {
        let mut parts = data.split(':');
        let family = parts.next()?;

        let token = match family {
            "menu" => {
                let name = parts.next()?;
                if name.is_empty() {
                    return None;
                }
                CallbackToken::Menu {
                    name: name.to_string(),
                }
            }
            "media" => {
                let kind = MediaKind::parse(parts.next()?)?;
                let id = parts.next()?.parse::<u64>().ok()?;
                let page = parts.next()?.parse::<usize>().ok()?;
                CallbackToken::Media { kind, id, page }
            }
            "page" => {
                let kind = MediaKind::parse(parts.next()?)?;
                let page = parts.next()?.parse::<usize>().ok()?;
                CallbackToken::Page { kind, page }
            }
            "lang" => {
                let code = parts.next()?;
                if code.is_empty() {
                    return None;
                }
                let scope = ChatScope::parse(parts.next()?)?;
                CallbackToken::Language {
                    code: code.to_string(),
                    scope,
                }
            }
            _ => return None,
        };

        if parts.next().is_some() {
            return None;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_families_round_trip() {
        let tokens = [
            CallbackToken::Menu {
                name: "start".to_string(),
            },
            CallbackToken::Media {
                kind: MediaKind::Manga,
                id: 30002,
                page: 5,
            },
            CallbackToken::Page {
                kind: MediaKind::Anime,
                page: 6,
            },
            CallbackToken::Language {
                code: "pt".to_string(),
                scope: ChatScope::Group,
            },
            CallbackToken::Language {
                code: "en".to_string(),
                scope: ChatScope::Private,
            },
        ];

        for token in tokens {
            let data = token.encode().unwrap();
            assert!(data.len() <= CALLBACK_DATA_LIMIT);
            assert_eq!(CallbackToken::decode(&data), Some(token));
        }
    }

    #[test]
    fn decode_rejects_garbage() {
        for data in [
            "",
            "menu",
            "menu:",
            "media:manga",
            "media:manga:1",
            "media:movie:1:0",
            "media:manga:abc:0",
            "media:manga:1:x",
            "page:manga:1:extra",
            "lang:en:channel",
            "askuser:1:2",
        ] {
            assert_eq!(CallbackToken::decode(data), None, "data = {data:?}");
        }
    }

    #[test]
    fn media_tokens_remember_their_list_page() {
        let token = CallbackToken::Media {
            kind: MediaKind::Anime,
            id: 16498,
            page: 5,
        };
        let data = token.encode().unwrap();
        assert_eq!(data, "media:anime:16498:5");
        assert_eq!(CallbackToken::decode(&data), Some(token));
    }

    #[test]
    fn oversized_token_fails_fast() {
        let token = CallbackToken::Menu {
            name: "x".repeat(CALLBACK_DATA_LIMIT),
        };
        match token.encode() {
            Err(Error::TokenTooLarge { len, limit }) => {
                assert!(len > limit);
                assert_eq!(limit, CALLBACK_DATA_LIMIT);
            }
            other => panic!("expected TokenTooLarge, got {other:?}"),
        }
    }
}
