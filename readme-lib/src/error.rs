use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadmeError {
    #[error("Repository URL is required")]
    MissingUrl,

    #[error("Invalid GitHub repository URL: {0}")]
    InvalidUrl(String),

    #[error("Repository not found or is private")]
    RepositoryNotFound,

    #[error("Invalid GitHub token or unauthorized access")]
    Unauthorized,

    #[error("GitHub API rate limit exceeded or access denied")]
    RateLimited,

    #[error("Failed to generate README using Gemini: {0}")]
    GenerationFailed(String),

    #[error("{0} is not configured")]
    Configuration(&'static str),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReadmeError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingUrl | Self::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            Self::RepositoryNotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::GenerationFailed(_) | Self::Configuration(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message returned to HTTP callers. Upstream details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::MissingUrl => String::from("Repository URL is required"),
            Self::InvalidUrl(_) => String::from("Invalid GitHub repository URL"),
            Self::RepositoryNotFound => String::from("Repository not found or is private"),
            Self::Unauthorized => String::from("Invalid GitHub token or unauthorized access"),
            Self::RateLimited => String::from("API rate limit exceeded. Please try again later."),
            Self::GenerationFailed(_) => String::from("Failed to generate README using Gemini"),
            Self::Configuration(what) => format!("{what} is not configured"),
            Self::Other(e) => format!("Failed to fetch repository data: {e}"),
        }
    }

    pub(crate) fn from_upstream_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::NOT_FOUND => Some(Self::RepositoryNotFound),
            StatusCode::UNAUTHORIZED => Some(Self::Unauthorized),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => Some(Self::RateLimited),
            _ => None,
        }
    }
}
