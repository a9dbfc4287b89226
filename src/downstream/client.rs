use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::config::DownstreamConfig;
use crate::errors::{DownstreamFailure, Failure};
use crate::metrics::registry::DOWNSTREAM_CALLS_TOTAL;

/// JSON client for calls to another service.
///
/// Non-success answers become [`DownstreamFailure`]s carrying the full
/// response body; transport and decode errors stay unclassified.
#[derive(Clone)]
pub struct DownstreamClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl DownstreamClient {
    pub fn new(config: &DownstreamConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("http-exceptions/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .context("Failed to build downstream HTTP client")?;

        info!(
            base_url = %config.base_url,
            timeout_ms = config.timeout_ms,
            "Initialized downstream client"
        );

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` as JSON to `path` and decode the JSON answer
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, Failure>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Calling downstream service");

        let response = match self.http_client.post(&url).json(body).send().await {
            Ok(response) => response,
            Err(e) => {
                DOWNSTREAM_CALLS_TOTAL
                    .with_label_values(&["transport_error"])
                    .inc();
                return Err(e.into());
            }
        };

        if !response.status().is_success() {
            DOWNSTREAM_CALLS_TOTAL.with_label_values(&["failure"]).inc();
            let failure = DownstreamFailure::from_response(response).await;
            warn!(url = %failure.url(), status = %failure.status(), "Downstream call rejected");
            return Err(failure.into());
        }

        DOWNSTREAM_CALLS_TOTAL.with_label_values(&["success"]).inc();
        Ok(response.json::<R>().await?)
    }
}
