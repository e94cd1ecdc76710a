use reqwest::StatusCode;
use serde_json::Value;
use std::collections::BTreeMap;

const FALLBACK_MESSAGE: &str = "Request failed";

/// Failure of a backend call, classified once at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received.
    #[error("{message}")]
    Transport { message: String },
    /// Non-success status whose `details` is a per-field error map.
    #[error("{message}")]
    Validation {
        status: StatusCode,
        message: String,
        fields: BTreeMap<String, String>,
    },
    /// Any other non-success status.
    #[error("{message}")]
    Server {
        status: StatusCode,
        message: String,
        details: Option<String>,
    },
    /// Success body that does not have the expected shape.
    #[error("unexpected response body: {message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn transport(err: &reqwest::Error) -> Self {
        Self::Transport {
            message: format!("Network error: {err}"),
        }
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }

    /// Builds the error for a non-success response from its parsed body.
    pub fn from_response(status: StatusCode, body: &Value) -> Self {
        let error = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|error| !error.is_empty());
        let details = body.get("details").filter(|details| is_truthy(details));

        let message = match (error, details) {
            (error, Some(details)) => {
                format!("{}: {}", error.unwrap_or(FALLBACK_MESSAGE), describe_details(details))
            }
            (Some(error), None) => error.to_string(),
            (None, None) => status
                .canonical_reason()
                .unwrap_or(FALLBACK_MESSAGE)
                .to_string(),
        };

        match details {
            Some(Value::Object(map)) => Self::Validation {
                status,
                message,
                fields: map
                    .iter()
                    .map(|(field, value)| (field.clone(), describe_details(value)))
                    .collect(),
            },
            _ => Self::Server {
                status,
                message,
                details: details.map(describe_details),
            },
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Validation { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Number(_) | Value::Array(_) => true,
    }
}

fn describe_details(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(describe_details)
            .collect::<Vec<_>>()
            .join(" "),
        Value::Object(map) => map
            .iter()
            .map(|(field, value)| format!("{field}: {}", describe_details(value)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
