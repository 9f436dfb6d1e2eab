//! # Crawlgate - MCP Bridge to a Crawling Service
//!
//! This crate exposes an external Crawl4AI-style crawling service to MCP
//! clients as a single `crawl_urls` tool. It turns the service's
//! asynchronous submit/poll job protocol into one synchronous tool call
//! with a bounded wait, and normalizes both upstream response shapes into
//! markdown joined per URL.
//!
//! ## Features
//!
//! - Deferred-task resolution: submit a job, then poll its status to a
//!   terminal state within a fixed attempt budget
//! - Immediate resolution against the synchronous crawl endpoint
//! - One tool facade with a uniform success/error contract: transport
//!   failures surface as in-band error content, broken contracts abort
//! - Bearer authentication and base URL configuration from the environment
//! - Async API with Tokio
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use crawlgate::client::CrawlClient;
//! use crawlgate::config::ServiceConfig;
//! use crawlgate::job::{CrawlBackend, TaskPoller};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServiceConfig::from_env();
//!     let client = CrawlClient::new(&config)?;
//!     let backend: Arc<dyn CrawlBackend> = Arc::new(TaskPoller::new(client));
//!     crawlgate::mcp::run(backend).await
//! }
//! ```

mod error;

pub mod client;
pub mod config;
pub mod job;
pub mod mcp;
pub mod request;
pub mod results;

pub use error::Error;

/// Re-export of the error types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
