use zerokite_core::{non_blank, ConfigError};

use super::session::SessionStore;
use super::types::AuthContext;
use crate::errors::CliError;

/// Resolves the key and token for authenticated commands. The configured
/// key wins over the one recorded in the session.
pub(crate) fn resolve_auth_context(
    api_key: Option<&str>,
    store: &dyn SessionStore,
) -> Result<AuthContext, CliError> {
    let session = store.load()?;
    let api_key = non_blank(api_key)
        .map(str::to_string)
        .or_else(|| session.as_ref().map(|session| session.api_key.clone()))
        .filter(|key| !key.is_empty())
        .ok_or(ConfigError::MissingApiKey)?;
    let access_token = session
        .map(|session| session.access_token)
        .filter(|token| !token.is_empty())
        .ok_or(ConfigError::MissingAccessToken)?;
    Ok(AuthContext {
        api_key,
        access_token,
    })
}
