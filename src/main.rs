//! # Crawlgate MCP Server
//!
//! Command-line entrypoint for the crawl bridge. Parses flags, builds the
//! HTTP client from the environment, selects a resolution backend, and
//! serves the `crawl_urls` tool over stdio.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - `--backend task` resolves crawls through the submit/poll job API
//! - `--backend direct` resolves crawls through the synchronous endpoint
//! - Telemetry initialization routing all diagnostics to stderr

mod telemetry;

use std::sync::Arc;

use anyhow::anyhow;
use clap::Parser;
use tracing::info;

use crawlgate::client::CrawlClient;
use crawlgate::config::ServiceConfig;
use crawlgate::job::{CrawlBackend, DirectCrawler, TaskPoller};

#[derive(Parser)]
#[command(author, version, about = "MCP server bridging agents to a Crawl4AI crawling service", long_about = None)]
struct Cli {
    /// Base URL of the crawling service (overrides CRAWL4AI_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Resolution strategy: "task" polls the job API, "direct" calls the synchronous endpoint
    #[arg(short, long, default_value = "task")]
    backend: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing_subscriber();

    let mut config = ServiceConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    info!(
        api_url = %config.api_url,
        auth_token_set = config.auth_token.is_some(),
        "Starting crawl bridge"
    );

    let client = CrawlClient::new(&config)?;
    let backend: Arc<dyn CrawlBackend> = match cli.backend.as_str() {
        "task" => Arc::new(TaskPoller::new(client)),
        "direct" => Arc::new(DirectCrawler::new(client)),
        other => {
            return Err(anyhow!(
                "Unknown backend '{}', expected 'task' or 'direct'",
                other
            ));
        }
    };

    crawlgate::mcp::run(backend).await
}
