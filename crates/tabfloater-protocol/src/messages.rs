use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ProtocolError;

/// Pin the window whose title contains `windowTitle` above all others.
pub const ACTION_MAKE_WINDOW_FLOATING: &str = "makeWindowFloating";

/// Response text when the window was pinned.
pub const FLOATING_SUCCEEDED_MESSAGE: &str = "窗口已设置为浮动";

/// Response text when no window was pinned.
pub const FLOATING_FAILED_MESSAGE: &str = "设置浮动窗口失败";

/// A request from the extension.
///
/// Keeps the whole JSON object so unknown fields survive logging and
/// round-trips. Field accessors are lenient: a field of the wrong JSON type
/// reads as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Request {
    body: Map<String, Value>,
}

impl Request {
    /// Build a `makeWindowFloating` request.
    pub fn make_window_floating(window_title: impl Into<String>) -> Self {
        let mut body = Map::new();
        body.insert(
            "action".to_string(),
            Value::String(ACTION_MAKE_WINDOW_FLOATING.to_string()),
        );
        body.insert("windowTitle".to_string(), Value::String(window_title.into()));
        Self { body }
    }

    /// Interpret a decoded JSON value as a request. Only objects qualify.
    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        match value {
            Value::Object(body) => Ok(Self { body }),
            other => Err(ProtocolError::NotAnObject {
                kind: json_kind(&other),
            }),
        }
    }

    pub fn action(&self) -> Option<&str> {
        self.body.get("action").and_then(Value::as_str)
    }

    pub fn window_title(&self) -> Option<&str> {
        self.body.get("windowTitle").and_then(Value::as_str)
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.body)
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Map<String, Value> always serializes.
        let text = serde_json::to_string(&self.body).map_err(|_| std::fmt::Error)?;
        f.write_str(&text)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A response to the extension.
///
/// Carries either a human-readable `message` or an `error` description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// Outcome of a `makeWindowFloating` request, with the fixed texts.
    pub fn floating(success: bool) -> Self {
        let message = if success {
            FLOATING_SUCCEEDED_MESSAGE
        } else {
            FLOATING_FAILED_MESSAGE
        };
        Self {
            success,
            message: Some(message.to_string()),
            error: None,
        }
    }

    /// A failed exchange described by `error`.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}
