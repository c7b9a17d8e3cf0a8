use super::{RequestArg, RequestOptions};
use crate::consts::AUTH_SCHEME;
use crate::settings::SettingsStore;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderValue, InvalidHeaderValue};
use std::sync::Arc;

/// Hook invoked on every outgoing request immediately before dispatch.
///
/// Receives the full pending argument list and the request method and
/// returns the list to dispatch. Implementations consume the input and
/// build their output from it; they never edit a caller's list in place.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, requests: Vec<RequestArg>, method: &Method) -> Vec<RequestArg>;
}

/// Attaches the stored credential to every outgoing request.
///
/// The token is read from the injected settings store on every call, so a
/// token set or cleared elsewhere in the application applies to the very
/// next request.
///
/// With a token present, every request descriptor in the list gets its
/// `Authorization` header replaced by `Basic <token>`. When the list holds
/// no descriptor at all, one carrying only that header is appended. Without
/// a token the list passes through untouched.
///
/// # Examples
///
/// ```no_run
/// use shell::http::{AuthHeaderInterceptor, HttpPipeline};
/// use shell::settings::JsonFileSettingsStore;
/// use std::sync::Arc;
///
/// let settings = Arc::new(JsonFileSettingsStore::new("settings.json"));
/// let pipeline = HttpPipeline::new(reqwest::Client::new(), None);
/// pipeline.add_interceptor(Arc::new(AuthHeaderInterceptor::new(settings)));
/// ```
pub struct AuthHeaderInterceptor {
    settings: Arc<dyn SettingsStore>,
}

impl AuthHeaderInterceptor {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    fn header_value(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut value = HeaderValue::from_str(&format!("{AUTH_SCHEME} {token}"))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl RequestInterceptor for AuthHeaderInterceptor {
    fn intercept(&self, requests: Vec<RequestArg>, method: &Method) -> Vec<RequestArg> {
        let Some(token) = self.settings.auth_token().filter(|token| !token.is_empty()) else {
            return requests;
        };

        let auth_header = match Self::header_value(&token) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Stored auth token is not a valid header value, sending {method} request without it: {e}");
                return requests;
            }
        };

        let mut descriptor_found = false;
        let mut intercepted: Vec<RequestArg> = requests
            .into_iter()
            .map(|arg| match arg {
                RequestArg::Options(mut options) => {
                    descriptor_found = true;
                    options.headers.remove(AUTHORIZATION);
                    options.headers.insert(AUTHORIZATION, auth_header.clone());
                    RequestArg::Options(options)
                }
                other => other,
            })
            .collect();

        if !descriptor_found {
            intercepted.push(RequestArg::Options(
                RequestOptions::new().with_header(AUTHORIZATION, auth_header),
            ));
        }

        intercepted
    }
}
