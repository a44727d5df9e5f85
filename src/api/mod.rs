//! User lookup API
//!
//! The card depends on the lookup service only through the `UserApi` trait,
//! so tests can script outcomes without a network. `HttpUserApi` is the real
//! implementation: a GET against a URL template with `{id}` substituted.

mod error;

pub use error::FetchError;

use crate::card::UserRecord;
use futures::future::BoxFuture;
use std::time::Duration;

/// Default lookup URL template
pub const DEFAULT_URL_TEMPLATE: &str = "https://api.example.com/users/{id}";

/// Placeholder replaced by the user id in URL templates
const ID_PLACEHOLDER: &str = "{id}";

/// Source of user records
///
/// Returned futures must be `'static` because the card runs each fetch as
/// its own task; implementations clone whatever they need up front.
pub trait UserApi: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &'static str;

    /// Look up one user by id
    fn fetch_user(&self, id: &str) -> BoxFuture<'static, Result<UserRecord, FetchError>>;
}

/// Expand a URL template for one id
///
/// Templates without a placeholder get the id appended as a path segment.
pub fn expand_url(template: &str, id: &str) -> String {
    if template.contains(ID_PLACEHOLDER) {
        template.replace(ID_PLACEHOLDER, id)
    } else {
        format!("{}/{}", template.trim_end_matches('/'), id)
    }
}

/// `UserApi` backed by reqwest
#[derive(Clone)]
pub struct HttpUserApi {
    client: reqwest::Client,
    url_template: String,
}

impl HttpUserApi {
    /// Create a client for the given URL template
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        let url_template = url_template.into();
        tracing::debug!("User API client ready ({})", url_template);

        Ok(Self {
            client,
            url_template,
        })
    }

    /// The URL a lookup for `id` will request
    pub fn url_for(&self, id: &str) -> String {
        expand_url(&self.url_template, id)
    }
}

impl UserApi for HttpUserApi {
    fn name(&self) -> &'static str {
        "http"
    }

    fn fetch_user(&self, id: &str) -> BoxFuture<'static, Result<UserRecord, FetchError>> {
        let client = self.client.clone();
        let url = self.url_for(id);

        Box::pin(async move {
            tracing::debug!("GET {}", url);
            let response = client.get(&url).send().await?;

            let status = response.status();
            if !status.is_success() {
                tracing::warn!("User lookup failed: {} returned {}", url, status);
                return Err(FetchError::Response {
                    status: status.as_u16(),
                });
            }

            let body: serde_json::Value = response.json().await?;
            UserRecord::from_json(body).map_err(|e| FetchError::Decode(e.to_string()))
        })
    }
}
