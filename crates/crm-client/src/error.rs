//! Client error types.

/// Errors from calls to the crm API.
///
/// Callers that follow the lenient contract (empty list, `None`, `false`)
/// only log these; the error body sent by the server is never inspected.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the connection failed.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// The server answered with a non-success status.
    #[error("server returned status {status} for {url}")]
    Status { url: String, status: u16 },

    /// The response body was not the expected JSON.
    #[error("invalid response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// A concurrent fetch worker panicked.
    #[error("fetch worker failed: {0}")]
    Worker(String),
}

/// Convenience alias for client calls.
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub(crate) fn from_ureq(url: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => Self::Status {
                url: url.to_owned(),
                status,
            },
            ureq::Error::Json(e) => Self::Decode {
                url: url.to_owned(),
                reason: e.to_string(),
            },
            other => Self::Transport {
                url: url.to_owned(),
                source: other,
            },
        }
    }

    /// Returns `true` if the server reported the record as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
