mod actions;
pub(crate) mod args;
pub(crate) mod capture;
pub(crate) mod login;

pub(crate) use actions::{handle_login, handle_logout, handle_verify};
