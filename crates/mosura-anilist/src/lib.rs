//! AniList adapter: GraphQL requests over the core HTTP client.
//!
//! All operations POST `{query, variables}` JSON to the configured endpoint.
//! AniList answers GraphQL errors with `data: null`, which maps to an empty
//! result here rather than an error.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use mosura_core::{
    domain::MediaKind,
    http::{BaseClient, RetryPolicy},
    Error, Result,
};

pub mod queries;
pub mod types;

pub use types::{Media, MediaTitle};

const SEARCH_PER_PAGE: u32 = 25;

pub struct AniListClient {
    http: BaseClient,
}

impl AniListClient {
    pub fn new(api_url: Url, timeout: Duration, policy: RetryPolicy) -> Self {
        Self {
            http: BaseClient::new(api_url, timeout, policy),
        }
    }

    /// The 50 most popular titles of a kind, most popular first.
    pub async fn popular(&self, kind: MediaKind) -> Result<Vec<Media>> {
        let body = json!({
            "query": queries::POPULAR_QUERY,
            "variables": { "media": kind.graphql() },
        });
        let value = self.execute(body).await?;
        let media = parse_page(value)?;
        debug!(%kind, count = media.len(), "fetched popular list");
        Ok(media)
    }

    /// First page of titles matching `term` by name.
    pub async fn search(&self, kind: MediaKind, term: &str) -> Result<Vec<Media>> {
        let body = json!({
            "query": queries::SEARCH_QUERY,
            "variables": {
                "search": term,
                "media": kind.graphql(),
                "perPage": SEARCH_PER_PAGE,
            },
        });
        let value = self.execute(body).await?;
        let media = parse_page(value)?;
        debug!(%kind, term, count = media.len(), "searched media");
        Ok(media)
    }

    /// Details for a single title; `None` when AniList does not know the id.
    pub async fn media(&self, kind: MediaKind, id: u64) -> Result<Option<Media>> {
        let body = json!({
            "query": queries::MEDIA_QUERY,
            "variables": { "id": id, "media": kind.graphql() },
        });
        let value = self.execute(body).await?;
        parse_media(value)
    }

    /// Release the underlying HTTP session.
    pub async fn close(&self) {
        self.http.close().await;
    }

    async fn execute(&self, body: Value) -> Result<Value> {
        let (status, value) = self.http.post_json("", body).await?;
        // AniList reports GraphQL failures as 4xx with an `errors` array;
        // treat anything non-2xx as an upstream failure.
        if !(200..300).contains(&status) {
            return Err(Error::External(format!("anilist returned status {status}")));
        }
        Ok(value)
    }
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    #[serde(default)]
    data: Option<T>,
}

#[derive(Deserialize, Default)]
struct PageData {
    #[serde(rename = "Page", default)]
    page: Option<PageMedia>,
}

#[derive(Deserialize)]
struct PageMedia {
    #[serde(default)]
    media: Vec<Media>,
}

fn parse_page(value: Value) -> Result<Vec<Media>> {
    let response: GraphQlResponse<PageData> = serde_json::from_value(value)?;
    Ok(response
        .data
        .and_then(|d| d.page)
        .map(|p| p.media)
        .unwrap_or_default())
}

#[derive(Deserialize, Default)]
struct MediaData {
    #[serde(rename = "Media", default)]
    media: Option<Media>,
}

fn parse_media(value: Value) -> Result<Option<Media>> {
    let response: GraphQlResponse<MediaData> = serde_json::from_value(value)?;
    Ok(response.data.and_then(|d| d.media))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_media(id: u64, romaji: &str) -> Value {
        json!({
            "id": id,
            "title": { "romaji": romaji, "english": null, "native": null },
            "format": "MANGA",
            "status": "FINISHED",
            "genres": ["Action"],
            "averageScore": 84,
            "siteUrl": format!("https://anilist.co/manga/{id}"),
            "description": "desc<br>here",
        })
    }

    #[test]
    fn page_payload_parses_in_order() {
        let value = json!({
            "data": { "Page": { "media": [sample_media(1, "One"), sample_media(2, "Two")] } }
        });
        let media = parse_page(value).unwrap();
        assert_eq!(media.len(), 2);
        assert_eq!(media[0].id, 1);
        assert_eq!(media[0].title.preferred(), "One");
        assert_eq!(media[1].average_score, Some(84));
    }

    #[test]
    fn null_data_means_empty_page() {
        let value = json!({ "data": null, "errors": [{ "message": "Not Found." }] });
        assert!(parse_page(value).unwrap().is_empty());
    }

    #[test]
    fn single_media_parses_and_null_is_none() {
        let value = json!({ "data": { "Media": sample_media(30002, "Berserk") } });
        let media = parse_media(value).unwrap().unwrap();
        assert_eq!(media.id, 30002);
        assert_eq!(media.genres, vec!["Action"]);

        let value = json!({ "data": { "Media": null } });
        assert!(parse_media(value).unwrap().is_none());
    }

    #[test]
    fn unexpected_shape_is_a_json_error() {
        let value = json!({ "data": { "Page": { "media": [{ "id": "not-a-number" }] } } });
        assert!(matches!(parse_page(value), Err(Error::Json(_))));
    }
}
