use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Could not reach the contacts API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Request failed with status code {status}: {message}")]
    Status { status: StatusCode, message: String },
}
