use thiserror::Error;

/// Errors raised while driving the translation UI.
///
/// Three classes reach the user: transport/parse failures, failures reported
/// by the backend, and files rejected before upload. The rest are local
/// plumbing errors.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Backend(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Page error: {0}")]
    Page(String),
}

impl ClientError {
    /// True when the failure came from the transport or from decoding the
    /// body, as opposed to an error the backend chose to report.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_) | ClientError::InvalidResponse(_) | ClientError::Json(_)
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_errors_display_the_raw_message() {
        let err = ClientError::Backend("quota exceeded".to_string());
        assert_eq!(err.to_string(), "quota exceeded");
        assert!(!err.is_transport());
    }

    #[test]
    fn file_too_large_reports_both_sizes() {
        let err = ClientError::FileTooLarge { size: 11, limit: 10 };
        assert_eq!(err.to_string(), "File too large: 11 bytes (limit 10 bytes)");
    }

    #[test]
    fn decode_failures_count_as_transport() {
        assert!(ClientError::InvalidResponse("not json".into()).is_transport());
    }
}
