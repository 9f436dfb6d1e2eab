//! Error types for the crawlgate crate

use thiserror::Error;

/// Result type for crawl bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for crawl bridge operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Crawling service returned an error response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Upstream response lacked a field the protocol requires
    #[error("Invalid response format from crawling service: {0}")]
    UnexpectedResponse(String),

    /// Upstream reported the crawl task as failed
    #[error("Task {task_id} failed: {message}")]
    JobFailed {
        /// Identifier of the failed task
        task_id: String,
        /// Failure message reported by the service
        message: String,
    },

    /// Poll budget exhausted before the task reached a terminal state
    #[error("Task {task_id} did not complete within the expected time ({attempts} attempts)")]
    PollTimeout {
        /// Identifier of the unfinished task
        task_id: String,
        /// Number of poll attempts made
        attempts: u32,
    },

    /// Invalid startup configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this is a transport-level failure reaching the service,
    /// as opposed to a broken protocol contract or a failed job.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Api { .. })
    }
}
