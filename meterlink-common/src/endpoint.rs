use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default CSE address used when no server argument is supplied.
pub const DEFAULT_ENDPOINT: &str = "127.0.0.1:8080";

/// A validated `host:port` pair for the remote CSE.
///
/// Validation is purely lexical: the string must contain exactly three `.`
/// separators and exactly one `:` dividing host from port. Nothing else is
/// checked, so `a.b.c.d:x` is accepted. The port is therefore kept as a
/// string and only ever re-joined into a URL authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    host: String,
    port: String,
}

impl ServerEndpoint {
    /// Host part (everything before the `:`).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port part (everything after the `:`), unparsed.
    pub fn port(&self) -> &str {
        &self.port
    }

    /// `host:port`, suitable as the authority of a base URL.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromStr for ServerEndpoint {
    type Err = Error;

    /// Parse an `IP:Port` string, counting separators only.
    ///
    /// # Example
    /// ```
    /// use meterlink_common::ServerEndpoint;
    ///
    /// let endpoint: ServerEndpoint = "127.0.0.1:8080".parse().unwrap();
    /// assert_eq!(endpoint.host(), "127.0.0.1");
    /// assert_eq!(endpoint.port(), "8080");
    ///
    /// assert!("1.2.3.4".parse::<ServerEndpoint>().is_err());
    /// ```
    fn from_str(raw: &str) -> Result<Self, Error> {
        let dots = raw.chars().filter(|c| *c == '.').count();
        let colons = raw.chars().filter(|c| *c == ':').count();

        if dots != 3 {
            return Err(Error::Endpoint {
                raw: raw.to_string(),
                reason: format!("expected 3 '.' separators, found {}", dots),
            });
        }
        if colons != 1 {
            return Err(Error::Endpoint {
                raw: raw.to_string(),
                reason: format!("expected 1 ':' separator, found {}", colons),
            });
        }

        let (host, port) = raw.split_once(':').ok_or_else(|| Error::Endpoint {
            raw: raw.to_string(),
            reason: "missing ':' separator".to_string(),
        })?;

        Ok(Self {
            host: host.to_string(),
            port: port.to_string(),
        })
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Pass-through originator credentials.
///
/// Not interpreted anywhere in meterlink; they are joined into the
/// `X-M2M-Origin` header verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            secret: secret.into(),
        }
    }

    /// The `login:secret` originator string the CSE expects.
    pub fn originator(&self) -> String {
        format!("{}:{}", self.login, self.secret)
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("admin", "admin")
    }
}
