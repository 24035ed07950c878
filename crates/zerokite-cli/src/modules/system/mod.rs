pub(crate) mod actions;
pub(crate) mod args;
pub(crate) mod config;
pub(crate) mod http;
pub(crate) mod session;
pub(crate) mod types;

pub(crate) use actions::handle_completion;
pub(crate) use config::resolve_auth_context;
pub(crate) use http::{ApiClient, ApiRequest};
pub(crate) use session::{FileSessionStore, SessionStore};
pub(crate) use types::{AuthContext, CommandContext};
