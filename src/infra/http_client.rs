use async_trait::async_trait;
use reqwest::header::COOKIE;
use tracing::{debug, instrument};

use crate::app::ports::DetailSource;
use crate::config::PortalConfig;
use crate::constants::shift_claim_url;
use crate::error::{Result, ShiftError};

/// HTTP client for the member services portal
pub struct PortalClient {
    client: reqwest::Client,
    base_url: String,
    cookie: Option<String>,
}

impl PortalClient {
    pub fn new(config: &PortalConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            cookie: config.cookie.clone(),
        })
    }

    /// GET `url` and return the body. Non-success statuses are errors.
    #[instrument(skip(self))]
    pub async fn get_page(&self, url: &str) -> Result<String> {
        let mut request = self.client.get(url);
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie.as_str());
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShiftError::Fetch {
                message: format!("GET {url} returned {status}"),
            });
        }
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Fetched portal page");
        Ok(body)
    }
}

#[async_trait]
impl DetailSource for PortalClient {
    async fn fetch_detail(&self, shift_id: &str) -> Result<String> {
        self.get_page(&shift_claim_url(&self.base_url, shift_id)).await
    }
}
