use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use crate::TranslateError;

/// Sends one JSON request and hands back the decoded JSON body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: Url, body: &Value) -> Result<Value, TranslateError>;
}

#[derive(Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, url: Url, body: &Value) -> Result<Value, TranslateError> {
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();

        // Error envelopes come with non-2xx codes, the body is still JSON
        if !status.is_success() {
            tracing::debug!("generation endpoint answered HTTP {status}");
        }

        Ok(response.json::<Value>().await?)
    }
}
