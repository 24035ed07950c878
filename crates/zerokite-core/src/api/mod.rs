pub mod errors;
pub mod response;

#[cfg(test)]
mod tests;

pub use errors::ApiError;
pub use response::{normalize, ApiBody, RawResponse};
