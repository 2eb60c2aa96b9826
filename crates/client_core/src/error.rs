use reqwest::StatusCode;
use thiserror::Error;

/// Shown whenever the backend gives no usable explanation for a failure.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("api base url '{0}' cannot carry path segments")]
    InvalidBaseUrl(String),
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} responded with {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status {
        path: String,
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("unexpected response body from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

impl GatewayError {
    pub fn status(path: impl Into<String>, status: StatusCode, detail: Option<String>) -> Self {
        Self::Status {
            path: path.into(),
            status,
            detail,
        }
    }

    /// Text suitable for the notification surface.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Local form checks that short-circuit before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill all fields!")]
    IncompleteEmployee,
    #[error("Please select employee and date!")]
    IncompleteAttendance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_detail_becomes_user_message() {
        let err = GatewayError::status(
            "/api/employees",
            StatusCode::BAD_REQUEST,
            Some("Employee with this email already exists".into()),
        );
        assert_eq!(err.user_message(), "Employee with this email already exists");
    }

    #[test]
    fn status_without_detail_falls_back_to_generic_message() {
        let err = GatewayError::status("/api/employees", StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        assert!(err.to_string().contains("500"));
    }
}
