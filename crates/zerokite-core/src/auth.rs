use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{non_blank, ConfigError};

/// API key and secret, supplied once per process. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: Option<&str>, api_secret: Option<&str>) -> Result<Self, ConfigError> {
        let api_key = non_blank(api_key).ok_or(ConfigError::MissingVar("KITE_API_KEY"))?;
        let api_secret =
            non_blank(api_secret).ok_or(ConfigError::MissingVar("KITE_API_SECRET"))?;
        Ok(Self {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Durable credential produced by a successful token exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub api_key: String,
    pub access_token: String,
    #[serde(default)]
    pub public_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    pub login_time: DateTime<Utc>,
}

impl Session {
    /// Builds a session from the `data` payload of the session exchange
    /// response. Returns `None` when no access token was issued.
    #[must_use]
    pub fn from_token_data(api_key: &str, data: &Value, login_time: DateTime<Utc>) -> Option<Self> {
        let field = |name: &str| {
            data.get(name)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Some(Self {
            api_key: api_key.to_string(),
            access_token: field("access_token")?,
            public_token: field("public_token"),
            refresh_token: field("refresh_token"),
            user_id: field("user_id"),
            login_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credentials_require_key_and_secret() {
        assert_eq!(
            Credentials::new(None, Some("secret")),
            Err(ConfigError::MissingVar("KITE_API_KEY"))
        );
        assert_eq!(
            Credentials::new(Some("key"), Some("   ")),
            Err(ConfigError::MissingVar("KITE_API_SECRET"))
        );
        let credentials = Credentials::new(Some(" key "), Some("secret")).expect("credentials");
        assert_eq!(credentials.api_key, "key");
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let credentials = Credentials::new(Some("key"), Some("hunter2")).expect("credentials");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("key"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn session_from_token_data_reads_optional_fields() {
        let now = Utc::now();
        let data = json!({
            "access_token": "abc",
            "public_token": "pub",
            "user_id": "U1",
            "refresh_token": ""
        });
        let session = Session::from_token_data("key", &data, now).expect("session");
        assert_eq!(session.access_token, "abc");
        assert_eq!(session.public_token.as_deref(), Some("pub"));
        assert_eq!(session.user_id.as_deref(), Some("U1"));
        assert_eq!(session.refresh_token, None);
        assert_eq!(session.login_time, now);
    }

    #[test]
    fn session_from_token_data_requires_access_token() {
        assert!(Session::from_token_data("key", &json!({"user_id": "U1"}), Utc::now()).is_none());
        assert!(Session::from_token_data("key", &json!("text"), Utc::now()).is_none());
    }

    #[test]
    fn session_serializes_missing_fields_as_null() {
        let session = Session::from_token_data("key", &json!({"access_token": "abc"}), Utc::now())
            .expect("session");
        let value = serde_json::to_value(&session).expect("json");
        assert_eq!(value["user_id"], Value::Null);
        let parsed: Session = serde_json::from_value(value).expect("parse");
        assert_eq!(parsed, session);
    }
}
