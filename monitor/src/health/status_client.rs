//! Node status query over the daemon's GraphQL API

use anyhow::Result;
use reqwest::Client as HttpClient;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use super::types::{GraphQlResponse, StatusSnapshot};
use crate::config::Config;
use crate::constants::http;
use crate::errors::StatusQueryError;

pub const DAEMON_STATUS_QUERY: &str = r#"
{
    daemonStatus {
        syncStatus
        uptimeSecs
        blockchainLength
        highestBlockLengthReceived
        highestUnvalidatedBlockLengthReceived
        nextBlockProduction {
            times {
                startTime
            }
        }
    }
}
"#;

/// One status query attempt against the node
pub trait StatusSource: Send + Sync {
    fn fetch_status(
        &self,
    ) -> impl Future<Output = Result<StatusSnapshot, StatusQueryError>> + Send;
}

pub struct GraphQlStatusClient {
    client: HttpClient,
    status_url: String,
}

impl GraphQlStatusClient {
    pub fn new(status_url: String, request_timeout: Duration) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(request_timeout)
            .connect_timeout(http::CONNECT_TIMEOUT.min(request_timeout))
            .build()?;

        Ok(Self { client, status_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.status_url.clone(), config.request_timeout())
    }

    async fn query_daemon_status(&self) -> Result<StatusSnapshot, StatusQueryError> {
        debug!("Fetching node status from {}", self.status_url);

        let request_body = serde_json::json!({ "query": DAEMON_STATUS_QUERY });

        let response = self
            .client
            .post(&self.status_url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(StatusQueryError::BadStatus {
                url: self.status_url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let snapshot = self.parse_body(&body)?;

        debug!("Status fetched successfully: {:?}", snapshot);
        if let Some(next) = snapshot.next_block_production.first() {
            debug!("Next block production slot starts at {}", next);
        }

        Ok(snapshot)
    }

    fn parse_body(&self, body: &str) -> Result<StatusSnapshot, StatusQueryError> {
        let parsed: GraphQlResponse =
            serde_json::from_str(body).map_err(|e| StatusQueryError::UnusableStatus {
                url: self.status_url.clone(),
                reason: format!("Failed to parse JSON response: {}", e),
            })?;

        match parsed.data {
            Some(data) => Ok(data.daemon_status.into()),
            None => {
                let reason = if parsed.errors.is_empty() {
                    "response carries no data".to_string()
                } else {
                    parsed
                        .errors
                        .iter()
                        .map(|e| e.message.as_str())
                        .collect::<Vec<_>>()
                        .join("; ")
                };
                Err(StatusQueryError::UnusableStatus {
                    url: self.status_url.clone(),
                    reason,
                })
            }
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> StatusQueryError {
        let url = self.status_url.clone();
        if e.is_connect() {
            StatusQueryError::Unreachable {
                url,
                reason: e.to_string(),
            }
        } else if e.is_timeout() {
            StatusQueryError::Timeout { url }
        } else {
            StatusQueryError::RequestFailed {
                url,
                reason: e.to_string(),
            }
        }
    }
}

impl StatusSource for GraphQlStatusClient {
    async fn fetch_status(&self) -> Result<StatusSnapshot, StatusQueryError> {
        self.query_daemon_status().await
    }
}
