use serde_json::Value;

use super::errors::ApiError;
use crate::constants::GENERIC_API_ERROR_KIND;

/// One buffered HTTP response as returned by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status_code: u16,
    pub body: Vec<u8>,
}

/// Response body, parsed as JSON when possible and kept as text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Structured(Value),
    Raw(String),
}

impl ApiBody {
    /// `None` for an empty body.
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        Some(match serde_json::from_slice(bytes) {
            Ok(value) => Self::Structured(value),
            Err(_) => Self::Raw(String::from_utf8_lossy(bytes).into_owned()),
        })
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Structured(Value::Object(map)) => map.get(name),
            _ => None,
        }
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        self.field(name)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Structured(value) => value,
            Self::Raw(text) => Value::String(text),
        }
    }
}

/// Maps a raw response onto either its payload or an [`ApiError`].
///
/// Failures arrive either as an HTTP status of 400 or above, or as a 2xx
/// envelope whose `status` is `"error"`. Both produce the same error shape.
/// On success the payload is the body's `data` field, or the whole body when
/// there is none.
pub fn normalize(raw: RawResponse) -> Result<ApiBody, ApiError> {
    let body = ApiBody::parse(&raw.body);
    let text = |name: &str| {
        body.as_ref()
            .and_then(|body| body.text_field(name))
            .map(str::to_string)
    };

    if raw.status_code >= 400 {
        return Err(ApiError {
            kind: text("error_type").unwrap_or_else(|| GENERIC_API_ERROR_KIND.to_string()),
            message: text("message").unwrap_or_else(|| format!("HTTP {}", raw.status_code)),
            status_code: Some(raw.status_code),
            raw_body: body,
        });
    }

    if text("status").as_deref() == Some("error") {
        let status_code = if raw.status_code == 0 {
            500
        } else {
            raw.status_code
        };
        return Err(ApiError {
            kind: text("error_type").unwrap_or_else(|| GENERIC_API_ERROR_KIND.to_string()),
            message: text("message").unwrap_or_else(|| "API error".to_string()),
            status_code: Some(status_code),
            raw_body: body,
        });
    }

    Ok(match body {
        None => ApiBody::Structured(Value::Null),
        Some(ApiBody::Structured(Value::Object(mut map))) => match map.remove("data") {
            Some(data) => ApiBody::Structured(data),
            None => ApiBody::Structured(Value::Object(map)),
        },
        Some(other) => other,
    })
}
