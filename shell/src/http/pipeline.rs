use super::errors::HttpError;
use super::interceptor::RequestInterceptor;
use super::RequestArg;
use reqwest::{Client, Method, Request, Response};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// HTTP pipeline running registered interceptors before every dispatch.
///
/// Interceptors run in registration order, each receiving the previous
/// one's output.
pub struct HttpPipeline {
    client: Client,
    base_url: Option<String>,
    interceptors: RwLock<Vec<Arc<dyn RequestInterceptor>>>,
}

impl HttpPipeline {
    pub fn new(client: Client, base_url: Option<String>) -> Self {
        Self {
            client,
            base_url,
            interceptors: RwLock::new(Vec::new()),
        }
    }

    /// Creates a pipeline with its own client using the given request timeout.
    pub fn with_timeout(base_url: Option<String>, timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HttpError::ClientCreation)?;
        Ok(Self::new(client, base_url))
    }

    pub fn add_interceptor(&self, interceptor: Arc<dyn RequestInterceptor>) {
        match self.interceptors.write() {
            Ok(mut interceptors) => interceptors.push(interceptor),
            Err(poisoned) => poisoned.into_inner().push(interceptor),
        }
    }

    pub fn interceptor_count(&self) -> usize {
        self.interceptors.read().map(|i| i.len()).unwrap_or(0)
    }

    /// Runs every registered interceptor over `args`.
    pub fn intercept(&self, method: &Method, args: Vec<RequestArg>) -> Vec<RequestArg> {
        let interceptors: Vec<Arc<dyn RequestInterceptor>> = match self.interceptors.read() {
            Ok(interceptors) => interceptors.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };

        interceptors
            .iter()
            .fold(args, |args, interceptor| interceptor.intercept(args, method))
    }

    /// Intercepts `args` and builds the request that would be dispatched.
    ///
    /// The first `Url` argument is the target; every `Body` is sent as JSON
    /// (the last one wins) and every descriptor contributes its headers and
    /// query parameters.
    pub fn build(&self, method: Method, args: Vec<RequestArg>) -> Result<Request, HttpError> {
        let args = self.intercept(&method, args);

        let url = args
            .iter()
            .find_map(|arg| match arg {
                RequestArg::Url(url) => Some(self.resolve_url(url)),
                _ => None,
            })
            .ok_or(HttpError::MissingUrl)?;

        let mut builder = self.client.request(method.clone(), &url);
        for arg in args {
            builder = match arg {
                RequestArg::Url(_) => builder,
                RequestArg::Body(body) => builder.json(&body),
                RequestArg::Options(options) => {
                    builder.headers(options.headers).query(&options.query)
                }
            };
        }

        builder.build().map_err(|source| HttpError::Build {
            method,
            url,
            source,
        })
    }

    /// Builds and sends the request.
    pub async fn dispatch(&self, method: Method, args: Vec<RequestArg>) -> Result<Response, HttpError> {
        let request = self.build(method, args)?;
        let method = request.method().clone();
        let url = request.url().to_string();

        log::debug!("Dispatching {method} {url}");
        self.client
            .execute(request)
            .await
            .map_err(|source| HttpError::Send {
                method,
                url,
                source,
            })
    }

    fn resolve_url(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if !url.contains("://") => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                url.trim_start_matches('/')
            ),
            _ => url.to_string(),
        }
    }
}
