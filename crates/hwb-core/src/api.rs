//! Homework status API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::{errors::Error, Result};

/// Port for fetching homework statuses.
///
/// Returns the decoded envelope as-is; shape validation lives in `status`.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value>;
}

#[derive(Clone, Debug)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http: reqwest::Client,
}

impl PracticumClient {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("http client build failed: {e}")))?;
        Ok(Self {
            endpoint: endpoint.into(),
            token: token.into(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value> {
        let resp = self
            .http
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(Error::ApiRequest)?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(Error::ApiRequest)?;
        serde_json::from_str(&body).map_err(|e| Error::InvalidData(e.to_string()))
    }
}
