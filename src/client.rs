//! HTTP client for the crawling service
//!
//! This module provides the transport layer for talking to a Crawl4AI-style
//! service: job submission, task status lookup, and the synchronous crawl
//! endpoint. It owns no polling or retry logic.

use crate::config::{JobSettings, ServiceConfig};
use crate::error::{Error, Result};
use reqwest::{Client as ReqwestClient, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// HTTP client for the crawling service API
#[derive(Clone)]
pub struct CrawlClient {
    /// The underlying reqwest client
    client: ReqwestClient,

    /// Base URL for service requests, without a trailing slash
    base_url: String,

    /// Bearer credential, left off requests entirely when unset
    auth_token: Option<String>,

    /// Fixed crawl parameters merged into every submission
    settings: JobSettings,
}

/// Submission body: the fixed job settings merged with the caller's URLs
#[derive(Serialize)]
struct SubmitBody<'a> {
    #[serde(flatten)]
    settings: &'a JobSettings,
    urls: &'a [String],
}

/// Response from submitting a deferred crawl job
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    /// Identifier of the queued task, when the service accepted the job
    pub task_id: Option<String>,
}

/// Status payload for a submitted task
#[derive(Debug, Deserialize)]
pub struct TaskStatus {
    /// Current task state as reported by the service
    pub status: String,

    /// Per-URL results, present once the task completes
    pub results: Option<Vec<TaskResult>>,

    /// Failure message, present when the task failed
    pub error: Option<String>,
}

/// Per-URL result in the deferred protocol shape
#[derive(Debug, Deserialize)]
pub struct TaskResult {
    /// URL the result corresponds to
    pub url: Option<String>,

    /// Extracted markdown
    pub markdown: Option<String>,
}

/// Response from the synchronous crawl endpoint
#[derive(Debug, Deserialize)]
pub struct DirectResponse {
    /// Per-URL results returned inline
    pub results: Option<Vec<DirectResult>>,
}

/// Per-URL result in the immediate protocol shape
#[derive(Debug, Deserialize)]
pub struct DirectResult {
    /// Versioned markdown payload
    pub markdown_v2: Option<MarkdownV2>,
}

/// Markdown payload carrying citation-annotated content
#[derive(Debug, Deserialize)]
pub struct MarkdownV2 {
    /// Markdown with inline citations
    pub markdown_with_citations: Option<String>,
}

impl CrawlClient {
    /// Create a client bound to the configured service
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Url::parse(&config.api_url)
            .map_err(|e| Error::Config(format!("invalid API URL {:?}: {}", config.api_url, e)))?;

        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
            settings: JobSettings::default(),
        })
    }

    /// Submit a crawl job for deferred resolution
    #[instrument(skip(self, urls), level = "debug")]
    pub async fn submit(&self, urls: &[String]) -> Result<SubmitResponse> {
        debug!("Submitting crawl job for {} URLs", urls.len());
        let body = SubmitBody {
            settings: &self.settings,
            urls,
        };
        self.post("/crawl", &body).await
    }

    /// Fetch the current status of a submitted task
    #[instrument(skip(self), level = "debug")]
    pub async fn task_status(&self, task_id: &str) -> Result<TaskStatus> {
        self.get(&format!("/task/{}", task_id)).await
    }

    /// Crawl synchronously, returning completed results inline
    #[instrument(skip(self, urls), level = "debug")]
    pub async fn crawl_direct(&self, urls: &[String]) -> Result<DirectResponse> {
        debug!("Submitting direct crawl for {} URLs", urls.len());
        let body = SubmitBody {
            settings: &self.settings,
            urls,
        };
        self.post("/crawl_direct", &body).await
    }

    /// Attach the bearer credential when one is configured
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.authorize(self.client.post(&url).json(body));
        self.execute_request(request).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.authorize(self.client.get(&url));
        self.execute_request(request).await
    }

    /// Execute an HTTP request and decode the response
    async fn execute_request<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(Error::Http)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Crawling service error: {} - {}", status, body);
            return Err(Error::Api {
                status_code: status.as_u16(),
                message: error_message(body),
            });
        }

        response.json().await.map_err(Error::Http)
    }
}

/// Pull the service's own message out of an error body when it carries one
fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("detail"))
                .and_then(|field| field.as_str().map(str::to_owned))
        })
        .unwrap_or(body)
}
