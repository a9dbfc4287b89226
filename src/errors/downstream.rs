use axum::http::StatusCode;

/// Non-success answer from an outbound call to another service.
///
/// Status and body belong to the downstream service and are only ever
/// written to the internal log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("downstream call to {url} failed with status {status}")]
pub struct DownstreamFailure {
    url: String,
    status: StatusCode,
    body: String,
}

impl DownstreamFailure {
    pub fn new(url: impl Into<String>, status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Capture a failed response, reading its full body
    pub async fn from_response(response: reqwest::Response) -> Self {
        let url = response.url().to_string();
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => format!("<unreadable body: {}>", e),
        };
        Self::new(url, status, body)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
