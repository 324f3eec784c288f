//! Domain normalization
//!
//! Turns user-supplied URLs or bare hostnames into the canonical form used
//! everywhere else: lowercase host, no scheme, no leading `www.`.

use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

const DEFAULT_SCHEME: &str = "https://";
const WWW_PREFIX: &str = "www.";

/// A normalized domain name.
///
/// Only constructible through [`normalize`], so holding one means the host
/// parsed successfully.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Domain(String);

impl Domain {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Domain {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        normalize(&value)
    }
}

impl From<Domain> for String {
    fn from(domain: Domain) -> Self {
        domain.0
    }
}

/// Normalize a raw URL or domain string.
///
/// Inputs without a scheme get `https://` prepended before parsing. Exactly one
/// leading `www.` is stripped from the host.
pub fn normalize(input: &str) -> AppResult<Domain> {
    let trimmed = input.trim();
    let url = parse_with_scheme(trimmed)
        .ok_or_else(|| AppError::InvalidDomain(format!("'{}' is not a valid URL or domain", input)))?;

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::InvalidDomain(format!("'{}' has no host", input)))?;

    Ok(Domain(strip_www(host).to_string()))
}

/// Extract a hostname from a link without validating it further.
///
/// Used for search-result URLs, where unparsable links are skipped instead of
/// failing the whole request.
pub fn extract_host(link: &str) -> Option<String> {
    let url = parse_with_scheme(link.trim())?;
    let host = url.host_str()?;
    let host = strip_www(host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

fn parse_with_scheme(input: &str) -> Option<Url> {
    if input.is_empty() {
        return None;
    }

    let candidate = if has_scheme(input) {
        input.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, input)
    };

    Url::parse(&candidate).ok()
}

/// True when `input` starts with `scheme://`. A `://` later in a path or
/// query does not count.
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix(WWW_PREFIX).unwrap_or(host)
}
