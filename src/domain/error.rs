// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Request failed: {0}")]
    Network(String),
    #[error("Unexpected status {status} from {path}")]
    Status { status: u16, path: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for DomainError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            DomainError::InvalidResponse(error.to_string())
        } else {
            DomainError::Network(error.to_string())
        }
    }
}

/// Client-side validation failures; no request is sent when one occurs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Content is required")]
    EmptyContent,
    #[error("Category name is required")]
    EmptyCategoryName,
}
