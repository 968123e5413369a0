use promdash_protocol::ToolFailure;
use reqwest::Client;
use std::time::Duration;

/// GET passthrough to an external workflow trigger. The response status is
/// reported, never checked.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: Client,
    timeout: Duration,
}

impl WebhookClient {
    pub fn new(timeout_ms: u64) -> reqwest::Result<Self> {
        let http = Client::builder().pool_max_idle_per_host(0).build()?;
        Ok(Self {
            http,
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub async fn trigger(&self, url: &str) -> Result<String, ToolFailure> {
        log::debug!("webhook: GET {url}");
        let call = async {
            let resp = self.http.get(url).timeout(self.timeout).send().await?;
            let status = resp.status().as_u16();
            let body = resp.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };
        match call.await {
            Ok((status, body)) => Ok(format!("Webhook GET Response ({status}): {body}")),
            Err(e) => Err(ToolFailure::lookup(format!("Error calling webhook: {e}"))),
        }
    }
}
