use std::time::Duration;

pub const API_BASE: &str = "https://api.kite.trade";
pub const LOGIN_BASE: &str = "https://kite.zerodha.com/connect/login";
pub const API_VERSION_HEADER: &str = "X-Kite-Version";
pub const API_VERSION: &str = "3";
pub const SESSION_TOKEN_ROUTE: &str = "/session/token";

pub const DEFAULT_AUTH_PORT: u16 = 6583;
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(180);
pub const LOOPBACK_HOSTS: [&str; 2] = ["127.0.0.1", "localhost"];

/// Upper bound on a buffered remote API response body.
pub const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

pub const GENERIC_API_ERROR_KIND: &str = "ApiError";
