//! Target URL resolution for report labelling

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use percent_encoding::percent_decode_str;
use url::{Host, Url};

/// Host, port and path extracted from the target URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Normalized URL
    pub url: String,
    /// Host name without port, IPv6 addresses without brackets
    pub hostname: String,
    /// Explicit port, or the scheme default (80 / 443)
    pub port: u16,
    /// Percent-decoded path component, `/` when empty
    pub document_path: String,
}

impl Target {
    /// Parse and validate an absolute `http`/`https` URL
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TargetError::Empty);
        }

        let url = Url::parse(raw)?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(TargetError::UnsupportedScheme(other.to_string())),
        }

        let hostname = match url.host().ok_or(TargetError::MissingHost)? {
            Host::Domain("") => return Err(TargetError::MissingHost),
            Host::Domain(domain) => domain.to_string(),
            Host::Ipv4(addr) => addr.to_string(),
            Host::Ipv6(addr) => addr.to_string(),
        };

        // Both supported schemes have a known default port
        let port = url
            .port_or_known_default()
            .ok_or_else(|| TargetError::UnsupportedScheme(url.scheme().to_string()))?;

        let document_path = match url.path() {
            "" => "/".to_string(),
            path => percent_decode_str(path).decode_utf8_lossy().into_owned(),
        };

        Ok(Self {
            url: url.to_string(),
            hostname,
            port,
            document_path,
        })
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// URL resolution errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// Nothing to parse
    #[error("the target URL is empty")]
    Empty,

    /// Not a syntactically valid absolute URL
    #[error("malformed URL: {0}")]
    Malformed(#[from] url::ParseError),

    /// Only http and https are benchmarked
    #[error("unsupported scheme `{0}`, expected http or https")]
    UnsupportedScheme(String),

    /// URL has no host
    #[error("the target URL has no host")]
    MissingHost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_port() {
        let target = Target::parse("http://example.com:8080/index.html").unwrap();
        assert_eq!(target.hostname, "example.com");
        assert_eq!(target.port, 8080);
        assert_eq!(target.document_path, "/index.html");
    }

    #[test]
    fn test_default_ports() {
        assert_eq!(Target::parse("http://example.com/").unwrap().port, 80);
        assert_eq!(Target::parse("https://example.com/").unwrap().port, 443);
    }

    #[test]
    fn test_empty_path_reports_root() {
        let target: Target = "https://example.com".parse().unwrap();
        assert_eq!(target.document_path, "/");
    }

    #[test]
    fn test_query_not_part_of_path() {
        let target = Target::parse("http://127.0.0.1:3000/api/items?page=2").unwrap();
        assert_eq!(target.hostname, "127.0.0.1");
        assert_eq!(target.document_path, "/api/items");
    }

    #[test]
    fn test_ipv6_host_without_brackets() {
        let target = Target::parse("http://[::1]:8080/a%20b").unwrap();
        assert_eq!(target.hostname, "::1");
        assert_eq!(target.port, 8080);
        assert_eq!(target.document_path, "/a b");
    }

    #[test]
    fn test_path_is_percent_decoded() {
        let target = Target::parse("https://example.com/docs/caf%C3%A9%2Fmenu.html").unwrap();
        assert_eq!(target.document_path, "/docs/café/menu.html");
    }

    #[test]
    fn test_rejects_relative() {
        assert!(matches!(
            Target::parse("/just/a/path"),
            Err(TargetError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert_eq!(
            Target::parse("ftp://example.com/file"),
            Err(TargetError::UnsupportedScheme("ftp".into()))
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(Target::parse("   "), Err(TargetError::Empty));
    }
}
