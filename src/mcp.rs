//! Model Context Protocol (MCP) server implementation
//!
//! This module exposes the crawl bridge to MCP clients over stdio. It
//! implements:
//!
//! - The `crawl_urls` tool: submit a batch of URLs to the crawling service
//!   and return the extracted markdown, joined per URL
//! - Two-tier failure mapping: transport failures reaching the service come
//!   back as in-band error content, while broken requests and broken
//!   upstream contracts abort the call as protocol faults
//!
//! All diagnostics go to stderr via `tracing`; stdout carries the protocol
//! stream.

use std::sync::Arc;

use rmcp::{
    Error as McpError, ServerHandler, ServiceExt,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool,
    transport::stdio,
};
use tracing::{error, info, warn};

use crate::job::CrawlBackend;
use crate::request::CrawlRequest;
use crate::results::render_batch;

/// MCP server handler for the crawl bridge
#[derive(Clone)]
pub struct CrawlServer {
    /// Active protocol backend resolving URL batches
    backend: Arc<dyn CrawlBackend>,
}

#[tool(tool_box)]
impl CrawlServer {
    /// Create a server handler around the given backend
    pub fn new(backend: Arc<dyn CrawlBackend>) -> Self {
        Self { backend }
    }

    #[tool(
        description = "Crawl one or more URLs and return markdown content with citations"
    )]
    async fn crawl_urls(
        &self,
        #[tool(aggr)] request: CrawlRequest,
    ) -> Result<CallToolResult, McpError> {
        self.crawl_batch(request).await
    }

    /// Resolve a crawl request into a tool result.
    ///
    /// Transport failures reaching the service become in-band error content;
    /// everything else surfaces as a protocol fault.
    async fn crawl_batch(&self, request: CrawlRequest) -> Result<CallToolResult, McpError> {
        info!(
            url_count = request.urls.len(),
            backend = self.backend.name(),
            "Handling crawl_urls call"
        );

        match self.backend.fetch(&request.urls).await {
            Ok(pages) => Ok(CallToolResult::success(vec![Content::text(render_batch(
                &pages,
            ))])),
            Err(err) if err.is_transport() => {
                warn!(error = %err, "Crawling service unreachable");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Crawling service error: {}",
                    err
                ))]))
            }
            Err(err) => {
                error!(error = %err, "Crawl failed");
                Err(McpError::internal_error(err.to_string(), None))
            }
        }
    }
}

#[tool(tool_box)]
impl ServerHandler for CrawlServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Bridge to a Crawl4AI crawling service. Use crawl_urls to fetch one or more \
                 URLs and receive their content as markdown with citations."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Run the MCP server over stdio until the client disconnects or the
/// process is interrupted
pub async fn run(backend: Arc<dyn CrawlBackend>) -> anyhow::Result<()> {
    info!(backend = backend.name(), "Starting crawlgate MCP server");

    let service = CrawlServer::new(backend).serve(stdio()).await?;
    info!("Crawl bridge running on stdio");

    tokio::select! {
        result = service.waiting() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received interrupt, shutting down");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::results::PageContent;
    use futures::future::BoxFuture;
    use std::sync::Mutex;

    /// Backend double that yields one canned outcome
    struct StubBackend {
        outcome: Mutex<Option<Result<Vec<PageContent>>>>,
    }

    impl StubBackend {
        fn ok(pages: Vec<PageContent>) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(Some(Ok(pages))),
            })
        }

        fn err(error: Error) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(Some(Err(error))),
            })
        }
    }

    impl CrawlBackend for StubBackend {
        fn fetch<'a>(&'a self, _urls: &'a [String]) -> BoxFuture<'a, Result<Vec<PageContent>>> {
            Box::pin(async move {
                self.outcome
                    .lock()
                    .unwrap()
                    .take()
                    .expect("backend called more than once")
            })
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn request(urls: &[&str]) -> CrawlRequest {
        CrawlRequest {
            urls: urls.iter().map(|url| url.to_string()).collect(),
        }
    }

    fn text_of(result: &CallToolResult) -> String {
        let first = result.content.first().expect("result carries content");
        match &first.raw {
            rmcp::model::RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_success_joins_pages() {
        let backend = StubBackend::ok(vec![
            PageContent {
                url: Some("https://a.example".to_string()),
                markdown: Some("first".to_string()),
            },
            PageContent {
                url: Some("https://b.example".to_string()),
                markdown: None,
            },
        ]);
        let server = CrawlServer::new(backend);

        let result = server
            .crawl_batch(request(&["https://a.example", "https://b.example"]))
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(
            text_of(&result),
            "first\n\n---\n\nError: No markdown content available for URL https://b.example"
        );
    }

    #[tokio::test]
    async fn test_empty_batch_returns_empty_text() {
        let server = CrawlServer::new(StubBackend::ok(Vec::new()));

        let result = server.crawl_batch(request(&[])).await.unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "");
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_soft_error() {
        let server = CrawlServer::new(StubBackend::err(Error::Api {
            status_code: 502,
            message: "upstream exploded".to_string(),
        }));

        let result = server
            .crawl_batch(request(&["https://a.example"]))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        let text = text_of(&result);
        assert!(text.starts_with("Crawling service error:"));
        assert!(text.contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_protocol_error_is_hard_fault() {
        let server = CrawlServer::new(StubBackend::err(Error::UnexpectedResponse(
            "No task ID".to_string(),
        )));

        let result = server.crawl_batch(request(&["https://a.example"])).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_failed_job_is_hard_fault() {
        let server = CrawlServer::new(StubBackend::err(Error::JobFailed {
            task_id: "task-1".to_string(),
            message: "boom".to_string(),
        }));

        let result = server.crawl_batch(request(&["https://a.example"])).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_timeout_is_hard_fault() {
        let server = CrawlServer::new(StubBackend::err(Error::PollTimeout {
            task_id: "task-1".to_string(),
            attempts: 30,
        }));

        let result = server.crawl_batch(request(&["https://a.example"])).await;
        assert!(result.is_err());
    }
}
