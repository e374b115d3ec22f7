//! Release fetch error type, split so pagination can tell transient failures
//! from responses it cannot interpret.

/// Error returned by a single page request.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, TLS, etc.).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Http { status: u32, url: String },
    /// Body was not a JSON array of releases.
    #[error("page {page}: response is not a release list")]
    Decode {
        page: u32,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Transport and HTTP failures end pagination quietly; decode failures do not.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Curl(_) | FetchError::Http { .. })
    }
}
