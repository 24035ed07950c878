use thiserror::Error;

/// Invalid or missing local configuration. Never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing {0}.")]
    MissingVar(&'static str),
    #[error("Missing KITE_REDIRECT_URL. Example: http://127.0.0.1:6583/callback")]
    MissingRedirectUrl,
    #[error("KITE_REDIRECT_URL is not a valid URL.")]
    InvalidRedirectUrl,
    #[error(
        "Configured redirect URL port ({configured}) does not match selected port ({selected})."
    )]
    PortMismatch { configured: u16, selected: u16 },
    #[error("Missing api_key. Set KITE_API_KEY or login once with `zerokite auth`.")]
    MissingApiKey,
    #[error("No access token found. Run `zerokite auth`.")]
    MissingAccessToken,
    #[error("Invalid API base URL: {0}")]
    InvalidApiBase(String),
    #[error("API key or access token contains characters not allowed in an HTTP header.")]
    InvalidHeaderValue,
}

/// Treats unset and blank values the same way.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
