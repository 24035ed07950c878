mod actions;
mod http;

pub(crate) use actions::handle_profile;
pub(crate) use http::{fetch_margins, fetch_profile};
