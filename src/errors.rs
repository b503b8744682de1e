//! Centralized error handling for the glot application.
//!
//! This module provides a unified error type that consolidates all
//! application errors into a single enum for better error handling.

use thiserror::Error;

/// Unified error type for the glot application.
#[derive(Error, Debug)]
pub enum GlotError {
    /// GitHub API related errors
    #[error("GitHub API error: {0}")]
    GitHub(#[from] GitHubError),

    /// Card validation errors
    #[error("Card error: {0}")]
    Card(#[from] CardError),

    /// Server/HTTP related errors
    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    /// General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network/HTTP client errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// GitHub API specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GitHubError {
    /// User could not be resolved by the GraphQL API.
    ///
    /// Carries the upstream error message verbatim so the error card can
    /// display exactly what GitHub reported.
    #[error("{0}")]
    UserNotFound(String),

    /// Rate limit exceeded (403)
    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    /// API error with status code
    #[error("GitHub API error: {0}")]
    ApiError(u16),

    /// Network or parsing error
    #[error("Network error while contacting GitHub API")]
    NetworkError,

    /// GraphQL-level error without a recognized type
    #[error("GitHub GraphQL error: {0}")]
    GraphQl(String),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Circuit breaker is open, calls are temporarily disabled
    #[error("GitHub API calls are temporarily disabled")]
    Disabled,
}

/// Validation and upstream errors that surface as rendered error cards.
///
/// The `Display` impl is the card's primary message; [`CardError::secondary_message`]
/// supplies the smaller hint line beneath it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    /// The requested username is on the deny list
    #[error("This username is blacklisted")]
    Blacklisted,

    /// No username was supplied in the request
    #[error("Something went wrong")]
    MissingUsername,

    /// Unrecognized `layout` parameter value
    #[error("Something went wrong")]
    InvalidLayout,

    /// Unsupported `locale` parameter value
    #[error("Something went wrong")]
    InvalidLocale,

    /// The fetch collaborator failed; carries its message
    #[error("{message}")]
    Upstream { message: String },
}

impl CardError {
    /// The secondary hint rendered below the primary message.
    pub fn secondary_message(&self) -> &'static str {
        match self {
            CardError::Blacklisted => "Please deploy your own instance",
            CardError::MissingUsername => {
                "Missing params \"username\" make sure you pass the parameters in URL"
            }
            CardError::InvalidLayout => "Incorrect layout input",
            CardError::InvalidLocale => "Locale not found",
            CardError::Upstream { .. } => "Make sure the provided username is not an organization",
        }
    }

    /// Whether the error card may show the repo-link affordance.
    ///
    /// Blacklisted users are pointed at self-hosting instead.
    pub fn show_repo_link(&self) -> bool {
        !matches!(self, CardError::Blacklisted)
    }
}

impl From<GitHubError> for CardError {
    fn from(error: GitHubError) -> Self {
        CardError::Upstream {
            message: error.to_string(),
        }
    }
}

/// Server/HTTP specific errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// Failed to bind to address
    #[error("Failed to bind to address: {0}")]
    BindError(String),

    /// Invalid address format
    #[error("Invalid address format: {0}")]
    InvalidAddress(String),
}

/// Type alias for Result using the unified error type
pub type Result<T> = std::result::Result<T, GlotError>;
