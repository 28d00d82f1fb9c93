use async_trait::async_trait;
use reqwest::Client;

use crate::config::Config;
use crate::error::{CheckinError, Result};
use crate::hipin::types::{AccountInfo, ProfileResponse};

pub const API_BASE: &str = "https://api.hi-pin.com/api/v1";

/// Remote operations a check-in run needs from the Hi-Pin service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckinApi: Send + Sync {
    /// Fetch the account profile for a token. `Ok(None)` means the service
    /// answered but did not recognize the token.
    async fn fetch_profile(&self, token: &str) -> Result<Option<AccountInfo>>;

    /// Perform the check-in action for a token.
    async fn check_in(&self, token: &str) -> Result<()>;
}

pub struct HipinClient {
    client: Client,
    base_url: String,
}

impl HipinClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().timeout(config.request_timeout());

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| CheckinError::Config(format!("invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: API_BASE.to_string(),
        })
    }

    /// Point the client at a different host, e.g. a staging deployment.
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response".to_string());
            return Err(CheckinError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl CheckinApi for HipinClient {
    async fn fetch_profile(&self, token: &str) -> Result<Option<AccountInfo>> {
        let url = format!("{}/user/profile", self.base_url);
        let response = self.client.get(&url).bearer_auth(token).send().await?;
        let response = Self::ensure_success(response).await?;

        let profile: ProfileResponse = response.json().await?;
        Ok(profile.data)
    }

    async fn check_in(&self, token: &str) -> Result<()> {
        let url = format!("{}/user/check-in", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }
}
