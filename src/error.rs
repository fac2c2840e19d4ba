use thiserror::Error;

#[derive(Error, Debug)]
pub enum CiStatsError {
    #[error(
        "No GitHub credentials found: set GITHUB_TOKEN, or both GITHUB_USERNAME and GITHUB_PASSWORD"
    )]
    MissingCredentials,

    #[error("Invalid repository identifier '{0}': expected 'owner/name'")]
    InvalidRepository(String),

    #[error("GitHub API request failed with status {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("No commits found on branch '{0}'")]
    NoCommits(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Result cache error: {0}")]
    Cache(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CiStatsError>;
