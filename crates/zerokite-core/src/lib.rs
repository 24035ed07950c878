#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod auth;
pub mod config;
pub mod constants;
pub mod redirect;

pub use crate::api::*;
pub use crate::auth::*;
pub use crate::config::*;
pub use crate::constants::*;
pub use crate::redirect::*;
