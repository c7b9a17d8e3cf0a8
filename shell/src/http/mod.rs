//! Outgoing HTTP request pipeline.
//!
//! Call sites describe a request as an ordered list of [`RequestArg`]s. Before
//! dispatch the [`HttpPipeline`] runs every registered [`RequestInterceptor`]
//! over that list, then turns it into a `reqwest` request.

pub mod errors;
pub mod interceptor;
pub mod pipeline;

pub use errors::HttpError;
pub use interceptor::{AuthHeaderInterceptor, RequestInterceptor};
pub use pipeline::HttpPipeline;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// One pending argument of an outgoing request.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestArg {
    /// Absolute URL, or a path resolved against the pipeline's base URL
    Url(String),
    /// JSON request body
    Body(serde_json::Value),
    /// Request descriptor carrying headers and query parameters
    Options(RequestOptions),
}

impl RequestArg {
    pub fn url(url: impl Into<String>) -> Self {
        RequestArg::Url(url.into())
    }

    pub fn options(&self) -> Option<&RequestOptions> {
        match self {
            RequestArg::Options(options) => Some(options),
            _ => None,
        }
    }
}

/// Request descriptor: the per-request header collection plus query
/// parameters. Header keys are unique within one descriptor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing any previous value under the same key.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}
