/// Core error type for the bot.
///
/// Adapter crates should map their specific errors into this type so the bot
/// core can handle failures consistently (user-facing notice vs retryable).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// Network-level failure, surfaced after the retry budget is exhausted.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote returned a body that is not valid JSON. Never retried.
    #[error("malformed response (status {status}): {reason}")]
    MalformedResponse { status: u16, reason: String },

    /// A callback token exceeded the button-data size limit. This is a
    /// programming error at the call site and should fail fast in tests.
    #[error("callback token too large: {len} bytes (limit {limit})")]
    TokenTooLarge { len: usize, limit: usize },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
