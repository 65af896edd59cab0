use shared::ApiErrorBody;

/// Failure of a call to the tracker backend.
///
/// The backend distinguishes errors only by HTTP status and a detail
/// message, so that is all this type carries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Could not reach the tracker backend: {0}")]
    Transport(String),
    #[error("Backend returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("Unexpected response from the tracker backend: {0}")]
    Decode(String),
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Build a status error from a non-2xx response body
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => parsed.message(),
            Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
            Err(_) => body.trim().to_string(),
        };
        ApiError::Status { status, detail }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The backend rejected the payload
    pub fn is_validation(&self) -> bool {
        matches!(self.status(), Some(400) | Some(422))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// Message suitable for a transient notification
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
