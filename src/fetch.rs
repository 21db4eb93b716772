//! # HTTP Fetching
//!
//! The pipeline never talks to `reqwest` directly; it goes through the
//! [`Fetch`] trait so transport, retries and test doubles stay outside the
//! core. [`HttpFetcher`] is the production implementation.
//!
//! Errors map onto [`SurfError`] transport variants:
//! - network failure or timeout → `Http`
//! - non-2xx status → `Status`

use crate::error::SurfError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument};

/// Capability to GET a text resource.
pub trait Fetch: Sync {
    /// Fetch `url` with `query` appended, returning the body of a 2xx response.
    fn get_text(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> impl Future<Output = Result<String, SurfError>> + Send;
}

/// `reqwest`-backed fetcher. One instance wraps one connection pool.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, SurfError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("surf-report/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| SurfError::Http {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(skip(self, query))]
    async fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, SurfError> {
        debug!("Sending HTTP request");
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| SurfError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        debug!("Received HTTP response with status: {}", status);
        if !status.is_success() {
            return Err(SurfError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| SurfError::Http {
            url: url.to_string(),
            source,
        })?;
        debug!("Retrieved body, size: {} bytes", body.len());
        Ok(body)
    }
}
