pub(crate) mod auth;
pub(crate) mod orders;
pub(crate) mod portfolio;
pub(crate) mod shared;
pub(crate) mod system;
pub(crate) mod user;
