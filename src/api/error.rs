use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API URL: {0}")]
    Url(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Compute API returned status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;
