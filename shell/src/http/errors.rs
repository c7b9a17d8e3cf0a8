use thiserror::Error;

/// Errors raised while building or dispatching a request through the pipeline.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to create HTTP client: {0}")]
    ClientCreation(#[source] reqwest::Error),

    #[error("Request has no URL argument")]
    MissingUrl,

    #[error("Failed to build {method} request to {url}: {source}")]
    Build {
        method: reqwest::Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} request to {url} failed: {source}")]
    Send {
        method: reqwest::Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
