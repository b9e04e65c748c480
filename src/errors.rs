//! Error types for the remote Rubro service

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rubro service error (status {status_code}): {message}")]
    Status {
        status_code: u16,
        message: String,
    },
}

impl ServiceError {
    /// HTTP status reported by the service, if the request got that far
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status_code, .. } => Some(*status_code),
            ServiceError::Http(err) => err.status().map(|s| s.as_u16()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ServiceError::Status {
            status_code: 404,
            message: "rubro 9 not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Rubro service error (status 404): rubro 9 not found"
        );
        assert_eq!(err.status_code(), Some(404));
    }
}
