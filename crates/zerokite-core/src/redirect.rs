use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use url::Url;

use crate::config::{non_blank, ConfigError};
use crate::constants::LOOPBACK_HOSTS;

/// Callback URL the remote login page redirects the browser to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl RedirectTarget {
    pub fn parse(raw: Option<&str>) -> Result<Self, ConfigError> {
        let raw = non_blank(raw).ok_or(ConfigError::MissingRedirectUrl)?;
        let url = Url::parse(raw).map_err(|_| ConfigError::InvalidRedirectUrl)?;
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or(ConfigError::InvalidRedirectUrl)?;
        let port = url
            .port_or_known_default()
            .ok_or(ConfigError::InvalidRedirectUrl)?;
        let path = if url.path().is_empty() { "/" } else { url.path() };
        Ok(Self {
            scheme: url.scheme().to_string(),
            host: host.to_string(),
            port,
            path: path.to_string(),
        })
    }

    /// Parses `raw` and rejects it unless it points at `port`, so the login
    /// page never advertises a port other than the one being listened on.
    pub fn for_port(raw: Option<&str>, port: u16) -> Result<Self, ConfigError> {
        let target = Self::parse(raw)?;
        if target.port != port {
            return Err(ConfigError::PortMismatch {
                configured: target.port,
                selected: port,
            });
        }
        Ok(target)
    }

    #[must_use]
    pub fn is_loopback(&self) -> bool {
        LOOPBACK_HOSTS.contains(&self.host.as_str()) || self.host == "[::1]"
    }

    /// Loopback hosts bind loopback only; anything else binds all interfaces.
    #[must_use]
    pub fn bind_ip(&self) -> IpAddr {
        if self.host == "[::1]" {
            IpAddr::V6(Ipv6Addr::LOCALHOST)
        } else if self.is_loopback() {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_callback_url() {
        let target =
            RedirectTarget::parse(Some("http://127.0.0.1:6583/callback")).expect("target");
        assert_eq!(
            target,
            RedirectTarget {
                scheme: "http".to_string(),
                host: "127.0.0.1".to_string(),
                port: 6583,
                path: "/callback".to_string(),
            }
        );
        assert!(target.is_loopback());
        assert_eq!(target.bind_addr(), "127.0.0.1:6583".parse().expect("addr"));
    }

    #[test]
    fn missing_and_malformed_urls_are_config_errors() {
        assert_eq!(
            RedirectTarget::parse(None),
            Err(ConfigError::MissingRedirectUrl)
        );
        assert_eq!(
            RedirectTarget::parse(Some("  ")),
            Err(ConfigError::MissingRedirectUrl)
        );
        assert_eq!(
            RedirectTarget::parse(Some("not a url")),
            Err(ConfigError::InvalidRedirectUrl)
        );
    }

    #[test]
    fn default_ports_follow_scheme() {
        let http = RedirectTarget::parse(Some("http://localhost")).expect("http");
        assert_eq!(http.port, 80);
        assert_eq!(http.path, "/");
        let https = RedirectTarget::parse(Some("https://example.com/cb")).expect("https");
        assert_eq!(https.port, 443);
    }

    #[test]
    fn port_mismatch_is_rejected() {
        assert_eq!(
            RedirectTarget::for_port(Some("http://127.0.0.1:6584/callback"), 6583),
            Err(ConfigError::PortMismatch {
                configured: 6584,
                selected: 6583
            })
        );
        assert!(RedirectTarget::for_port(Some("http://127.0.0.1:6583/callback"), 6583).is_ok());
    }

    #[test]
    fn non_loopback_hosts_bind_all_interfaces() {
        let target =
            RedirectTarget::parse(Some("http://devbox.internal:6583/callback")).expect("target");
        assert!(!target.is_loopback());
        assert_eq!(target.bind_ip(), IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        let v6 = RedirectTarget::parse(Some("http://[::1]:6583/callback")).expect("v6");
        assert!(v6.is_loopback());
        assert_eq!(v6.bind_ip(), IpAddr::V6(Ipv6Addr::LOCALHOST));
    }
}
