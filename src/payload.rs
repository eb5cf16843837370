use crate::error::{ReportError, Result};
use crate::markdown::looks_like_markdown;
use log::debug;
use serde_json::Value;
use std::borrow::Cow;

/// Field the upstream service uses when it could not return JSON directly.
pub const RAW_RESPONSE_KEY: &str = "rawResponse";

/// A raw analysis result as received from the analysis service.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPayload {
    Empty,
    Text(String),
    /// An object or array of unknown shape.
    Structured(Value),
}

impl AnalysisPayload {
    /// Accepts null, strings, objects and arrays. Bare numbers and booleans
    /// are outside the input contract.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(AnalysisPayload::Empty),
            Value::String(s) if s.is_empty() => Ok(AnalysisPayload::Empty),
            Value::String(s) => Ok(AnalysisPayload::Text(s)),
            Value::Object(_) | Value::Array(_) => Ok(AnalysisPayload::Structured(value)),
            other => Err(ReportError::UnsupportedPayload(format!("got {}", other))),
        }
    }
}

impl From<&str> for AnalysisPayload {
    fn from(text: &str) -> Self {
        AnalysisPayload::Text(text.to_string())
    }
}

impl From<String> for AnalysisPayload {
    fn from(text: String) -> Self {
        AnalysisPayload::Text(text)
    }
}

impl<T: Into<AnalysisPayload>> From<Option<T>> for AnalysisPayload {
    fn from(payload: Option<T>) -> Self {
        payload.map(Into::into).unwrap_or(AnalysisPayload::Empty)
    }
}

/// Where a payload goes after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Route<'a> {
    Empty,
    /// Already markup; emitted untouched.
    Markup(&'a str),
    Structured(Cow<'a, Value>),
    Markdown(&'a str),
    PlainText(&'a str),
}

pub fn classify(payload: &AnalysisPayload) -> Route<'_> {
    match payload {
        AnalysisPayload::Empty => Route::Empty,
        AnalysisPayload::Text(text) if text.is_empty() => Route::Empty,
        AnalysisPayload::Text(text) => {
            if text.trim_start().starts_with('<') {
                debug!("Payload is already markup, passing through");
                return Route::Markup(text);
            }
            classify_text(text)
        }
        AnalysisPayload::Structured(Value::Null) => Route::Empty,
        AnalysisPayload::Structured(value) => match value.get(RAW_RESPONSE_KEY) {
            Some(Value::String(raw)) if !raw.is_empty() => {
                debug!("Payload carries a {} string", RAW_RESPONSE_KEY);
                classify_text(raw)
            }
            _ => Route::Structured(Cow::Borrowed(value)),
        },
    }
}

/// JSON first, then markdown, then opaque text.
fn classify_text(text: &str) -> Route<'_> {
    match serde_json::from_str::<Value>(text) {
        Ok(parsed) => Route::Structured(Cow::Owned(parsed)),
        Err(e) => {
            debug!("Text is not JSON ({}), trying markdown", e);
            if looks_like_markdown(text) {
                Route::Markdown(text)
            } else {
                Route::PlainText(text)
            }
        }
    }
}
