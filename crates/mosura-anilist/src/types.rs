//! Response models for the slice of the AniList schema the bot uses.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Media {
    pub id: u64,
    pub title: MediaTitle,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(rename = "averageScore", default)]
    pub average_score: Option<u32>,
    #[serde(rename = "siteUrl", default)]
    pub site_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MediaTitle {
    #[serde(default)]
    pub romaji: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub native: Option<String>,
}

impl MediaTitle {
    /// Romaji first (AniList's canonical form), then english, then native.
    pub fn preferred(&self) -> &str {
        self.romaji
            .as_deref()
            .or(self.english.as_deref())
            .or(self.native.as_deref())
            .unwrap_or("(untitled)")
    }
}
