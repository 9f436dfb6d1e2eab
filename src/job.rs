//! # Crawl Job Resolution
//!
//! Turns a batch of URLs into crawled page contents against one of the two
//! upstream contracts:
//!
//! - `TaskPoller`: submit a job, then poll the task endpoint until the
//!   service reports a terminal status, within a bounded attempt budget
//! - `DirectCrawler`: call the synchronous endpoint and read results out of
//!   the same response
//!
//! Both sit behind the `CrawlBackend` trait so the tool facade stays
//! protocol-agnostic. A deployment runs exactly one of them.

use crate::client::{CrawlClient, DirectResult, TaskResult};
use crate::error::{Error, Result};
use crate::results::PageContent;
use futures::future::BoxFuture;
use std::time::Duration;
use tracing::{info, warn};

/// Maximum number of status checks for one submitted task
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Delay between consecutive status checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// A strategy for resolving a batch of URLs to crawled page contents
pub trait CrawlBackend: Send + Sync {
    /// Resolve the batch against the upstream service
    fn fetch<'a>(&'a self, urls: &'a [String]) -> BoxFuture<'a, Result<Vec<PageContent>>>;

    /// Short name identifying the backend in diagnostics
    fn name(&self) -> &'static str;
}

/// Deferred-protocol backend: submit, then poll to a terminal status.
///
/// One invocation drives one job to completion; nothing about the job
/// outlives the call.
pub struct TaskPoller {
    client: CrawlClient,
    max_attempts: u32,
    poll_interval: Duration,
}

impl TaskPoller {
    /// Create a poller with the standard attempt budget and interval
    pub fn new(client: CrawlClient) -> Self {
        Self {
            client,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the poll attempt budget
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the delay between poll attempts
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    async fn resolve(&self, urls: &[String]) -> Result<Vec<PageContent>> {
        let submitted = self.client.submit(urls).await?;
        let task_id = submitted
            .task_id
            .ok_or_else(|| Error::UnexpectedResponse("No task ID".to_string()))?;

        info!(task_id = %task_id, "Task submitted, polling for results");

        for attempt in 1..=self.max_attempts {
            let status = self.client.task_status(&task_id).await?;

            match status.status.as_str() {
                "completed" => {
                    let results = status.results.unwrap_or_default();
                    if results.is_empty() && !urls.is_empty() {
                        return Err(Error::UnexpectedResponse(
                            "No results in completed task".to_string(),
                        ));
                    }
                    return Ok(results.into_iter().map(task_result_to_page).collect());
                }
                "failed" => {
                    return Err(Error::JobFailed {
                        task_id,
                        message: status.error.unwrap_or_else(|| "Unknown error".to_string()),
                    });
                }
                other => {
                    info!(
                        task_id = %task_id,
                        attempt,
                        max_attempts = self.max_attempts,
                        status = other,
                        "Task not completed yet"
                    );
                    // Delay only between attempts, never after the last one
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.poll_interval).await;
                    }
                }
            }
        }

        warn!(
            task_id = %task_id,
            attempts = self.max_attempts,
            "Task never reached a terminal status"
        );
        Err(Error::PollTimeout {
            task_id,
            attempts: self.max_attempts,
        })
    }
}

impl CrawlBackend for TaskPoller {
    fn fetch<'a>(&'a self, urls: &'a [String]) -> BoxFuture<'a, Result<Vec<PageContent>>> {
        Box::pin(self.resolve(urls))
    }

    fn name(&self) -> &'static str {
        "task"
    }
}

/// Immediate-protocol backend: results arrive with the submit response
pub struct DirectCrawler {
    client: CrawlClient,
}

impl DirectCrawler {
    /// Create a backend for the synchronous crawl endpoint
    pub fn new(client: CrawlClient) -> Self {
        Self { client }
    }

    async fn resolve(&self, urls: &[String]) -> Result<Vec<PageContent>> {
        let response = self.client.crawl_direct(urls).await?;
        let results = response.results.unwrap_or_default();
        if results.is_empty() && !urls.is_empty() {
            return Err(Error::UnexpectedResponse(
                "No results in completed task".to_string(),
            ));
        }
        Ok(results.into_iter().map(direct_result_to_page).collect())
    }
}

impl CrawlBackend for DirectCrawler {
    fn fetch<'a>(&'a self, urls: &'a [String]) -> BoxFuture<'a, Result<Vec<PageContent>>> {
        Box::pin(self.resolve(urls))
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}

fn task_result_to_page(result: TaskResult) -> PageContent {
    PageContent {
        url: result.url,
        markdown: result.markdown,
    }
}

fn direct_result_to_page(result: DirectResult) -> PageContent {
    PageContent {
        url: None,
        markdown: result
            .markdown_v2
            .and_then(|payload| payload.markdown_with_citations),
    }
}
