//! Base server options: listen address and public base URL.

use std::net::{SocketAddr, ToSocketAddrs};

use serde::Serialize;
use thiserror::Error;

use crate::config::reader::{ConfigError, ConfigReader, Result};

const LISTEN_GRAMMAR: &str = "expected <port> or <host>:<port>";

/// Listen address and base URL of the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listen_port: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listen_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// A parsed `listen` value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenAddress {
    pub host: Option<String>,
    pub port: Option<i64>,
}

/// Read the base options from the root of a backend config.
///
/// ```toml
/// listen = "0.0.0.0:7000"
/// baseUrl = "http://localhost:7000"
/// ```
pub fn read_base_options<R: ConfigReader>(config: &R) -> Result<BaseOptions> {
    let listen = config.get_string("listen")?;
    let address = parse_listen_address(&listen).ok_or_else(|| ConfigError::InvalidFormat {
        key: config.full_key("listen"),
        value: listen.clone(),
        expected: LISTEN_GRAMMAR,
    })?;
    let base_url = config.get_optional_string("baseUrl")?;

    Ok(BaseOptions {
        listen_port: address.port,
        listen_host: address.host,
        base_url,
    })
}

/// Parse `"<port>"` or `"<host>:<port>"`. Returns `None` for any other
/// number of `:`-separated segments.
///
/// The port is parsed leniently: digits are consumed up to the first
/// non-digit, so `"80x"` yields `80`. A port with no leading digits is absent.
pub fn parse_listen_address(value: &str) -> Option<ListenAddress> {
    let parts: Vec<&str> = value.split(':').collect();
    match parts.as_slice() {
        [port] => Some(ListenAddress {
            host: None,
            port: parse_int_prefix(port),
        }),
        [host, port] => Some(ListenAddress {
            host: Some((*host).to_string()),
            port: parse_int_prefix(port),
        }),
        _ => None,
    }
}

/// Leading-integer parse: optional whitespace, optional sign, then digits.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: Vec<i64> = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| i64::from(b - b'0'))
        .collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .into_iter()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(d));
    Some(if negative { -magnitude } else { magnitude })
}

/// Errors turning base options into a bindable socket address.
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("listen address has no port")]
    MissingPort,

    #[error("listen port {0} is out of range")]
    PortOutOfRange(i64),

    #[error("failed to resolve listen host '{host}': {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("listen host '{0}' resolved to no addresses")]
    NoAddress(String),
}

impl BaseOptions {
    /// Resolve the address to bind. A missing or empty host binds all
    /// interfaces.
    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, AddressError> {
        let port = self.listen_port.ok_or(AddressError::MissingPort)?;
        let port = u16::try_from(port).map_err(|_| AddressError::PortOutOfRange(port))?;
        let host = match self.listen_host.as_deref() {
            None | Some("") => "0.0.0.0",
            Some(host) => host,
        };

        (host, port)
            .to_socket_addrs()
            .map_err(|source| AddressError::Resolve {
                host: host.to_string(),
                source,
            })?
            .next()
            .ok_or_else(|| AddressError::NoAddress(host.to_string()))
    }
}
