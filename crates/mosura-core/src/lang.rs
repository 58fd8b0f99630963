//! Per-chat language preference, behind a port so real persistence can be
//! swapped in without touching handlers.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{domain::ChatScope, Result};

/// Storage port for language preference. Private chats key by user id, group
/// chats by chat id.
#[async_trait]
pub trait LanguageStore: Send + Sync {
    async fn language(&self, scope: ChatScope, id: i64) -> Result<String>;
    async fn set_language(&self, scope: ChatScope, id: i64, code: &str) -> Result<()>;
}

/// In-memory store; preferences last for the process lifetime.
pub struct MemoryLanguageStore {
    fallback: String,
    inner: Mutex<HashMap<(ChatScope, i64), String>>,
}

impl MemoryLanguageStore {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            inner: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl LanguageStore for MemoryLanguageStore {
    async fn language(&self, scope: ChatScope, id: i64) -> Result<String> {
        let map = self.inner.lock().await;
        Ok(map
            .get(&(scope, id))
            .cloned()
            .unwrap_or_else(|| self.fallback.clone()))
    }

    async fn set_language(&self, scope: ChatScope, id: i64, code: &str) -> Result<()> {
        let mut map = self.inner.lock().await;
        map.insert((scope, id), code.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn falls_back_until_set() {
        let store = MemoryLanguageStore::new("en");
        assert_eq!(store.language(ChatScope::Private, 1).await.unwrap(), "en");

        store.set_language(ChatScope::Private, 1, "pt").await.unwrap();
        assert_eq!(store.language(ChatScope::Private, 1).await.unwrap(), "pt");

        // Group scope with the same numeric id is a different key.
        assert_eq!(store.language(ChatScope::Group, 1).await.unwrap(), "en");
    }
}
