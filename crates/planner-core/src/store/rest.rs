//! Hosted real-time database over its REST interface
//!
//! - `PUT {base}/{path}.json` replaces the document
//! - `GET {base}/{path}.json` returns it, or JSON `null` when nothing is stored
//! - an access token, when configured, travels as the `auth` query parameter

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{normalize_path, DocumentStore};
use crate::error::{PlannerError, Result};

#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RestStore {
    pub fn new(base_url: &str, auth_token: Option<String>, timeout_seconds: u64) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            crate::bail_invalid!("backend url", base_url);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(format!(
                "weekend-planner/{} ({})",
                env!("CARGO_PKG_VERSION"),
                std::env::consts::OS
            ))
            .build()?;

        Ok(Self {
            client,
            base_url,
            auth_token,
        })
    }

    fn document_url(&self, path: &str) -> Result<String> {
        Ok(format!("{}/{}.json", self.base_url, normalize_path(path)?))
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token.as_str())]),
            None => request,
        }
    }
}

fn status_error(method: &str, url: &str, status: StatusCode) -> PlannerError {
    PlannerError::HttpStatus {
        method: method.to_string(),
        url: url.to_string(),
        status: status.as_u16(),
    }
}

#[async_trait]
impl DocumentStore for RestStore {
    #[tracing::instrument(skip(self, document), fields(base = %self.base_url))]
    async fn write(&self, path: &str, document: &Value) -> Result<()> {
        let url = self.document_url(path)?;

        let response = self
            .with_auth(self.client.put(&url))
            .json(document)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error("PUT", &url, status));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(base = %self.base_url))]
    async fn read(&self, path: &str) -> Result<Option<Value>> {
        let url = self.document_url(path)?;

        let response = self.with_auth(self.client.get(&url)).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(status_error("GET", &url, status));
        }

        let document: Value = response.json().await?;
        Ok((!document.is_null()).then_some(document))
    }

    fn describe(&self) -> String {
        format!("rest:{}", self.base_url)
    }
}
