//! # Bridge Configuration Module
//!
//! Configuration for the crawl bridge, read once at process start:
//!
//! - `ServiceConfig`: where the crawling service lives and how to
//!   authenticate against it, sourced from the environment
//! - `JobSettings`: the fixed crawl parameters merged with the caller's
//!   URLs on every submission

use serde::Serialize;

/// Environment variable naming the crawling service base URL
pub const API_URL_ENV: &str = "CRAWL4AI_API_URL";

/// Environment variable holding the optional bearer credential
pub const AUTH_TOKEN_ENV: &str = "CRAWL4AI_AUTH_TOKEN";

/// Default base URL for a locally deployed crawling service
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:11235";

/// Connection settings for the crawling service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the crawling service
    pub api_url: String,

    /// Bearer credential sent on every request, omitted entirely when unset
    pub auth_token: Option<String>,
}

impl ServiceConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(AUTH_TOKEN_ENV).ok(),
        )
    }

    /// Build the configuration from raw variable values.
    ///
    /// An empty token counts as unset so an empty `Authorization` header is
    /// never sent.
    fn from_vars(api_url: Option<String>, auth_token: Option<String>) -> Self {
        Self {
            api_url: api_url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            auth_token: auth_token.filter(|token| !token.is_empty()),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_token: None,
        }
    }
}

/// Fixed crawl parameters sent with every submission
#[derive(Debug, Clone, Serialize)]
pub struct JobSettings {
    /// Scheduling priority for the job
    pub priority: u32,

    /// Enable the service's automatic anti-bot handling
    pub magic: bool,

    /// Browser emulation profile for the crawl
    pub crawler_params: BrowserParams,

    /// Skip the service's page cache
    pub bypass_cache: bool,

    /// Strip image content during extraction
    pub ignore_images: bool,
}

/// Browser-level parameters understood by the crawling service
#[derive(Debug, Clone, Serialize)]
pub struct BrowserParams {
    /// Run the browser headless
    pub headless: bool,

    /// Page load timeout in milliseconds
    pub page_timeout: u64,

    /// Remove cookie banners and modal overlays before extraction
    pub remove_overlay_elements: bool,

    /// Browser engine to drive
    pub browser_type: String,

    /// Scroll the full page so lazily loaded content renders
    pub scan_full_page: bool,

    /// User agent selection strategy
    pub user_agent_mode: String,

    /// Profile constraining randomized user agents
    pub user_agent_generator_config: UserAgentProfile,
}

/// Device and OS profile for randomized user agents
#[derive(Debug, Clone, Serialize)]
pub struct UserAgentProfile {
    /// Device class to emulate
    pub device_type: String,

    /// Operating system to emulate
    pub os_type: String,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            priority: 10,
            magic: true,
            crawler_params: BrowserParams {
                headless: true,
                page_timeout: 30_000,
                remove_overlay_elements: true,
                browser_type: "chromium".to_string(),
                scan_full_page: true,
                user_agent_mode: "random".to_string(),
                user_agent_generator_config: UserAgentProfile {
                    device_type: "mobile".to_string(),
                    os_type: "android".to_string(),
                },
            },
            bypass_cache: true,
            ignore_images: true,
        }
    }
}
