use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use reqwest::{Client, Method, Url};
use serde_json::Value;
use tokio::{sync::Mutex, time::sleep};
use tracing::debug;

use super::retry::{retry_with_backoff, RetryPolicy};
use crate::{errors::Error, Result};

/// Wait for in-flight TLS close_notify after dropping the pool.
const CLOSE_DRAIN: Duration = Duration::from_millis(250);

/// Resilient JSON client bound to one base URL.
///
/// Owns at most one lazily-created `reqwest::Client` (the "session"): the
/// pooled connections inside it are shared by all concurrent requests. Closing
/// is idempotent; the next request after `close()` opens a fresh session.
pub struct BaseClient {
    base_url: Url,
    timeout: Duration,
    policy: RetryPolicy,
    session: Mutex<Option<Client>>,
    sessions_created: AtomicUsize,
}

/// Optional parts of a request: query parameters and one body encoding.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub json: Option<Value>,
    pub form: Vec<(String, String)>,
}

impl BaseClient {
    pub fn new(base_url: Url, timeout: Duration, policy: RetryPolicy) -> Self {
        Self {
            base_url,
            timeout,
            policy,
            session: Mutex::new(None),
            sessions_created: AtomicUsize::new(0),
        }
    }

    /// Return the live session, creating it on first use. Never creates more
    /// than one concurrent session per client.
    async fn session(&self) -> Result<Client> {
        let mut slot = self.session.lock().await;
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::Transport(format!("building http session: {e}")))?;
        let opened = self.sessions_created.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(base_url = %self.base_url, opened, "http session opened");

        *slot = Some(client.clone());
        Ok(client)
    }

    /// Release the session. A no-op when none exists or it was already
    /// closed; otherwise waits briefly so transport teardown can finish.
    pub async fn close(&self) {
        let mut slot = self.session.lock().await;
        match slot.take() {
            None => debug!("no http session to close"),
            Some(client) => {
                drop(client);
                sleep(CLOSE_DRAIN).await;
                debug!(base_url = %self.base_url, "http session closed");
            }
        }
    }

    /// Issue one logical request and return `(status, parsed JSON body)`.
    ///
    /// Transient transport failures (connect errors, timeouts, a connection
    /// dropped mid-body) are retried with backoff under the policy's budget
    /// and then surfaced as [`Error::Transport`]. The whole attempt is inside
    /// the retry loop: send plus body read. HTTP error statuses are returned
    /// in the envelope, not retried. A fully received body that is not valid
    /// JSON surfaces as [`Error::MalformedResponse`] after exactly one
    /// attempt.
    pub async fn request(
        &self,
        method: Method,
        target: &str,
        options: RequestOptions,
    ) -> Result<(u16, Value)> {
        let session = self.session().await?;
        let url = self.resolve(target)?;

        debug!(
            %method,
            %url,
            query = ?options.query,
            json = ?options.json,
            "sending request"
        );

        let (status, raw) = retry_with_backoff(&self.policy, is_transient, || {
            let mut req = session.request(method.clone(), url.clone());
            if !options.query.is_empty() {
                req = req.query(&options.query);
            }
            if let Some(body) = &options.json {
                req = req.json(body);
            }
            if !options.form.is_empty() {
                req = req.form(&options.form);
            }
            async move {
                let response = req.send().await?;
                let status = response.status().as_u16();
                let raw = response.text().await?;
                Ok::<_, reqwest::Error>((status, raw))
            }
        })
        .await
        .map_err(|e| Error::Transport(e.to_string()))?;

        let body: Value = serde_json::from_str(&raw).map_err(|e| Error::MalformedResponse {
            status,
            reason: e.to_string(),
        })?;

        debug!(%method, %url, status, "got response");
        Ok((status, body))
    }

    pub async fn get(&self, target: &str, query: Vec<(String, String)>) -> Result<(u16, Value)> {
        self.request(
            Method::GET,
            target,
            RequestOptions {
                query,
                ..RequestOptions::default()
            },
        )
        .await
    }

    pub async fn post_json(&self, target: &str, body: Value) -> Result<(u16, Value)> {
        self.request(
            Method::POST,
            target,
            RequestOptions {
                json: Some(body),
                ..RequestOptions::default()
            },
        )
        .await
    }

    /// Resolve `target` against the base URL unless it is already absolute.
    fn resolve(&self, target: &str) -> Result<Url> {
        if target.is_empty() {
            return Ok(self.base_url.clone());
        }
        Url::parse(target)
            .or_else(|_| self.base_url.join(target))
            .map_err(|e| Error::Config(format!("invalid request target {target:?}: {e}")))
    }
}

/// Transport-level failures worth another attempt. HTTP statuses never reach
/// here; they are not errors at this layer. `is_decode` covers a connection
/// dropped mid-body: `text()` reports body read failures as decode errors.
/// JSON validity is checked outside the retry loop, so a decode error here is
/// always transport-level.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_connect() || e.is_timeout() || e.is_request() || e.is_decode()
}
