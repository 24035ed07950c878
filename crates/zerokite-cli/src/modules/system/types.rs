use std::fmt;

use super::http::ApiClient;

/// Key and token attached to every authenticated call.
#[derive(Clone)]
pub(crate) struct AuthContext {
    pub api_key: String,
    pub access_token: String,
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("api_key", &self.api_key)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

pub(crate) struct CommandContext<'a> {
    pub api: &'a ApiClient,
    pub auth: AuthContext,
    pub json: bool,
}
