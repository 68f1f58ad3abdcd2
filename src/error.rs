use std::path::PathBuf;

use thiserror::Error;

/// Anything that stops publication data from arriving in one piece.
///
/// Callers on the render path never propagate this: they swap in the
/// fallback listing that points at the external profile instead.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed publication data: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn network(url: &str, source: reqwest::Error) -> Self {
        FetchError::Network {
            url: url.to_string(),
            source,
        }
    }
}
