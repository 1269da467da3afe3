// ABOUTME: Provisioning error types with SNAFU pattern.
// ABOUTME: Carries the provider's own reason so it can be shown to users verbatim.

use reqwest::StatusCode;
use serde::Deserialize;
use snafu::Snafu;
use std::fmt;

/// The remote operation a provisioning error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateRepository,
    UploadContent,
    EnablePages,
}

impl Operation {
    /// Message used when the provider gives no reason of its own.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::CreateRepository => "Failed to create repository",
            Operation::UploadContent => "Failed to upload files",
            Operation::EnablePages => "Failed to configure GitHub Pages",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CreateRepository => "create repository",
            Operation::UploadContent => "upload content",
            Operation::EnablePages => "enable pages",
        };
        f.write_str(name)
    }
}

/// Failure of a single provisioning request.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ProvisionError {
    #[snafu(display("{message}"))]
    Rejected {
        operation: Operation,
        status: StatusCode,
        message: String,
    },

    #[snafu(display("{operation}: request failed: {source}"))]
    Transport {
        operation: Operation,
        source: reqwest::Error,
    },

    #[snafu(display("{operation}: unexpected response: {source}"))]
    Decode {
        operation: Operation,
        source: reqwest::Error,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionErrorKind {
    /// A repository with the derived name already exists.
    NameTaken,
    /// The credential lacks the required scope or was revoked.
    Permission,
    /// The repository or endpoint does not exist.
    NotFound,
    /// Any other non-success response.
    Api,
    /// The request never produced a response.
    Transport,
    /// The response could not be decoded.
    Decode,
}

impl ProvisionError {
    pub fn kind(&self) -> ProvisionErrorKind {
        match self {
            ProvisionError::Rejected {
                operation, status, ..
            } => match *status {
                StatusCode::UNPROCESSABLE_ENTITY
                    if *operation == Operation::CreateRepository =>
                {
                    ProvisionErrorKind::NameTaken
                }
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ProvisionErrorKind::Permission
                }
                StatusCode::NOT_FOUND => ProvisionErrorKind::NotFound,
                _ => ProvisionErrorKind::Api,
            },
            ProvisionError::Transport { .. } => ProvisionErrorKind::Transport,
            ProvisionError::Decode { .. } => ProvisionErrorKind::Decode,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            ProvisionError::Rejected { operation, .. }
            | ProvisionError::Transport { operation, .. }
            | ProvisionError::Decode { operation, .. } => *operation,
        }
    }

    /// Build a rejection from a non-success response body.
    ///
    /// GitHub reports failures as `{"message": ..., "errors": [{"message": ...}]}`.
    /// Both levels are kept so a 422 on create reads
    /// `Repository creation failed. (name already exists on this account)`.
    pub fn rejected(operation: Operation, status: StatusCode, body: &str) -> Self {
        ProvisionError::Rejected {
            operation,
            status,
            message: reason_from_body(body)
                .unwrap_or_else(|| operation.fallback_message().to_string()),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

fn reason_from_body(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let details: Vec<String> = parsed
        .errors
        .into_iter()
        .filter_map(|d| d.message.or(d.code))
        .collect();

    match (parsed.message.filter(|m| !m.is_empty()), details.is_empty()) {
        (Some(message), true) => Some(message),
        (Some(message), false) => Some(format!("{message} ({})", details.join("; "))),
        (None, false) => Some(details.join("; ")),
        (None, true) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_collision_keeps_provider_reason() {
        let body = r#"{"message":"Repository creation failed.","errors":[{"resource":"Repository","code":"custom","field":"name","message":"name already exists on this account"}]}"#;
        let err = ProvisionError::rejected(
            Operation::CreateRepository,
            StatusCode::UNPROCESSABLE_ENTITY,
            body,
        );
        assert_eq!(err.kind(), ProvisionErrorKind::NameTaken);
        assert_eq!(
            err.to_string(),
            "Repository creation failed. (name already exists on this account)"
        );
    }

    #[test]
    fn empty_body_uses_operation_fallback() {
        let err = ProvisionError::rejected(
            Operation::UploadContent,
            StatusCode::INTERNAL_SERVER_ERROR,
            "",
        );
        assert_eq!(err.kind(), ProvisionErrorKind::Api);
        assert_eq!(err.to_string(), "Failed to upload files");
    }

    #[test]
    fn forbidden_maps_to_permission() {
        let err = ProvisionError::rejected(
            Operation::UploadContent,
            StatusCode::FORBIDDEN,
            r#"{"message":"Resource not accessible by integration"}"#,
        );
        assert_eq!(err.kind(), ProvisionErrorKind::Permission);
        assert_eq!(err.to_string(), "Resource not accessible by integration");
    }

    #[test]
    fn unprocessable_upload_is_not_a_name_collision() {
        let err = ProvisionError::rejected(
            Operation::UploadContent,
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"Invalid request"}"#,
        );
        assert_eq!(err.kind(), ProvisionErrorKind::Api);
        assert_eq!(err.operation(), Operation::UploadContent);
    }
}
