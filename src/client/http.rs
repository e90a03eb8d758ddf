use super::traits::Transport;
use super::types::ClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Tibia.com redirects every request here while the site is down.
const MAINTENANCE_HOST: &str = "maintenance.tibia.com";

/// [`Transport`] backed by `reqwest`.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    async fn send(&self, method: &str, url: &str, request: RequestBuilder) -> Result<String> {
        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            warn!(url, error = %e, "Request failed");
            Error::Network(e.to_string())
        })?;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let status = response.status();

        if response.url().host_str() == Some(MAINTENANCE_HOST) {
            info!(url, method, "Tibia.com is under maintenance");
            return Err(Error::Maintenance);
        }
        info!(url, method, status = status.as_u16(), elapsed_ms, "Request finished");

        if status == StatusCode::FORBIDDEN {
            return Err(Error::Forbidden);
        }
        if status.is_client_error() || status.is_server_error() {
            return Err(Error::Network(format!("request error, status code: {}", status.as_u16())));
        }

        let body = response.text().await?;
        debug!(url, bytes = body.len(), "Read response body");
        Ok(body)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<String> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        self.send("GET", url, request).await
    }

    async fn post(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        let request = self.client.post(url).form(form);
        self.send("POST", url, request).await
    }
}
