use async_trait::async_trait;
use tracing::debug;

use crate::downstream::DownstreamClient;
use crate::errors::Failure;
use crate::models::Data;

/// Business step invoked by `POST /test`
#[async_trait]
pub trait Operation: Send + Sync {
    async fn action(&self, data: Data) -> Result<Data, Failure>;
}

/// Forwards the payload to the downstream service's `/action` endpoint
pub struct ForwardingOperation {
    client: DownstreamClient,
}

impl ForwardingOperation {
    pub fn new(client: DownstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Operation for ForwardingOperation {
    async fn action(&self, data: Data) -> Result<Data, Failure> {
        debug!(base_url = %self.client.base_url(), "Forwarding payload downstream");
        self.client.post_json("/action", &data).await
    }
}
