use reqwest::{Response, StatusCode};
use thiserror::Error;

/// Why a call to the landmarks endpoint failed
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not signed in")]
    Unauthorized,
    #[error("landmarks endpoint answered {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            status => ApiError::Status(status),
        }
    }
}

/// Pass 2xx responses through, classify everything else
pub fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_status(status))
    }
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;
