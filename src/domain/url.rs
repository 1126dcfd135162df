//! URL value object
//!
//! Splits a URL into scheme, user, pass, host, port, path, query and fragment
//! so the query string and fragment can be edited, then puts it back together.
//! Only those components are modelled; this is not a general RFC 3986 parser.
//!
//! Unmutated URLs serialize back to exactly the input string. Partial URLs
//! (path-only, query-only, scheme-relative) parse without error; components
//! that are absent are simply left out of the output.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Bytes escaped in query values: everything except RFC 3986 unreserved characters
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A decomposed URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Url {
    scheme: Option<String>,

    /// Whether the source carried a `//` authority marker
    authority: bool,

    user: Option<String>,
    pass: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: Option<String>,

    /// Raw query string, without the leading `?`
    query: Option<String>,

    fragment: Option<String>,
}

impl Url {
    /// Parses a URL string. Never fails; unrecognised input ends up in the path.
    pub fn parse(input: &str) -> Self {
        let mut url = Url::default();

        let rest = match input.split_once('#') {
            Some((rest, fragment)) => {
                url.fragment = Some(fragment.to_string());
                rest
            }
            None => input,
        };

        let rest = match rest.split_once('?') {
            Some((rest, query)) => {
                url.query = Some(query.to_string());
                rest
            }
            None => rest,
        };

        let rest = match split_scheme(rest) {
            Some((scheme, rest)) => {
                url.scheme = Some(scheme.to_string());
                rest
            }
            None => rest,
        };

        let path = match rest.strip_prefix("//") {
            Some(after) => {
                url.authority = true;
                let (authority, path) = after.split_at(after.find('/').unwrap_or(after.len()));
                url.parse_authority(authority);
                path
            }
            None => rest,
        };

        if !path.is_empty() {
            url.path = Some(path.to_string());
        }

        url
    }

    fn parse_authority(&mut self, authority: &str) {
        let host_port = match authority.rsplit_once('@') {
            Some((userinfo, host_port)) => {
                match userinfo.split_once(':') {
                    Some((user, pass)) => {
                        self.user = non_empty(user);
                        self.pass = Some(pass.to_string());
                    }
                    None => self.user = non_empty(userinfo),
                }
                host_port
            }
            None => authority,
        };

        let (host, port) = split_port(host_port);
        self.host = non_empty(host);
        self.port = port;
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn pass(&self) -> Option<&str> {
        self.pass.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the raw query string as stored (no decoding)
    pub fn raw_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the fragment, if any
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Sets the fragment verbatim. `None` or an empty string removes it.
    pub fn set_fragment(&mut self, fragment: Option<&str>) {
        self.fragment = fragment.and_then(non_empty);
    }

    /// Parses the query string into key/value pairs.
    ///
    /// Pairs without an `=` are skipped. Values are percent-decoded (with `+`
    /// read as a space), keys are kept verbatim. Repeated keys collapse: the
    /// key keeps its first position and the last value.
    pub fn query(&self) -> QueryParams {
        self.query.as_deref().map(QueryParams::parse).unwrap_or_default()
    }

    /// Replaces the query string. An empty mapping removes it entirely.
    ///
    /// Values are percent-encoded, keys are written as given.
    pub fn set_query(&mut self, params: &QueryParams) {
        if params.is_empty() {
            self.query = None;
            return;
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&");

        self.query = Some(query);
    }

    /// Merges extra parameters into the existing query (later values win)
    pub fn merge_query(&mut self, extra: &QueryParams) {
        if extra.is_empty() {
            return;
        }

        let mut params = self.query();
        params.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        self.set_query(&params);
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{}:", scheme)?;
        }
        if self.authority {
            f.write_str("//")?;
        }
        if let Some(user) = &self.user {
            f.write_str(user)?;
        }
        if let Some(pass) = &self.pass {
            write!(f, ":{}", pass)?;
        }
        if self.user.is_some() || self.pass.is_some() {
            f.write_str("@")?;
        }
        if let Some(host) = &self.host {
            f.write_str(host)?;
        }
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        if let Some(path) = &self.path {
            f.write_str(path)?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

impl FromStr for Url {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Url::parse(s))
    }
}

impl From<&str> for Url {
    fn from(s: &str) -> Self {
        Url::parse(s)
    }
}

/// Splits off a leading `scheme:` if the prefix is a syntactically valid scheme
fn split_scheme(input: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = input.split_once(':')?;
    let mut chars = scheme.chars();

    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    valid.then_some((scheme, rest))
}

/// Splits `host:port`, handling bracketed IPv6 hosts. A suffix that is not a
/// canonical port number stays part of the host.
fn split_port(host_port: &str) -> (&str, Option<u16>) {
    let colon = if host_port.starts_with('[') {
        host_port.find("]:").map(|idx| idx + 1)
    } else {
        host_port.rfind(':')
    };

    if let Some(idx) = colon {
        let digits = &host_port[idx + 1..];
        let canonical = !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && (digits.len() == 1 || !digits.starts_with('0'));

        if canonical {
            if let Ok(port) = digits.parse::<u16>() {
                return (&host_port[..idx], Some(port));
            }
        }
    }

    (host_port, None)
}

fn decode_value(value: &str) -> String {
    let value = value.replace('+', " ");
    percent_decode_str(&value).decode_utf8_lossy().into_owned()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Ordered query parameters with unique keys
///
/// Inserting an existing key replaces its value in place, so the key keeps
/// the position of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parses a raw query string (without the leading `?`)
    pub fn parse(raw: &str) -> Self {
        raw.split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(key, value)| (key.to_string(), decode_value(value)))
            .collect()
    }

    /// Inserts a pair, returning the previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for QueryParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl Serialize for QueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
