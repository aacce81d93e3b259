use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

/// HTTP request methods.
///
/// Each wire token decodes to its own variant; see [`Method::from_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
}

impl Method {
    /// Every supported method, in wire-token order.
    pub const ALL: [Method; 7] = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::HEAD,
        Method::OPTIONS,
    ];

    /// Parses an HTTP method from its wire token.
    ///
    /// Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use crest::http::request::Method;
    /// assert_eq!(Method::from_token(b"GET"), Some(Method::GET));
    /// assert_eq!(Method::from_token(b"POST"), Some(Method::POST));
    /// assert_eq!(Method::from_token(b"get"), None);
    /// ```
    pub fn from_token(token: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().as_bytes() == token)
    }

    /// Returns the uppercase wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully parsed request head.
///
/// Every field is owned; nothing here points back into the read buffer. The
/// URI and header values are kept as raw bytes: the wire allows any non-control
/// octet there, UTF-8 or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target exactly as sent (e.g., "/books?page=2")
    pub uri: Bytes,
    pub major: u16,
    pub minor: u16,
    /// Headers in arrival order; repeated keys appear more than once.
    pub headers: Vec<(String, Bytes)>,
    /// Byte offset where the body starts, relative to the request start.
    pub body_offset: usize,
}

impl ParsedRequest {
    /// Raw value of the first header with the given name, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&[u8]> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| &v[..])
    }

    /// Like [`header`](Self::header), but only if the value is valid UTF-8.
    pub fn header_str(&self, key: &str) -> Option<&str> {
        self.header(key).and_then(|v| std::str::from_utf8(v).ok())
    }

    /// All raw values of a possibly repeated header, in arrival order.
    pub fn header_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| &v[..])
    }

    /// The URI for display, with invalid UTF-8 replaced.
    pub fn uri_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.uri)
    }

    /// The URI without its query string; this is what routes match against.
    pub fn path(&self) -> &[u8] {
        match self.uri.iter().position(|&b| b == b'?') {
            Some(query) => &self.uri[..query],
            None => &self.uri,
        }
    }

    /// True only when the head proves there is no body to skip: no
    /// Transfer-Encoding, and every Content-Length present parses to zero.
    ///
    /// Bodies are never read, so anything else leaves unknown bytes on the
    /// wire and the connection cannot be reused.
    pub fn has_empty_body(&self) -> bool {
        if self.header("Transfer-Encoding").is_some() {
            return false;
        }
        self.header_values("Content-Length").all(|v| {
            std::str::from_utf8(v)
                .ok()
                .and_then(|v| v.trim().parse::<usize>().ok())
                == Some(0)
        })
    }

    /// Determines whether the connection should remain open after the response.
    ///
    /// An explicit Connection header wins. Otherwise HTTP/1.1 and later keep
    /// the connection alive and HTTP/1.0 closes it.
    pub fn keep_alive(&self) -> bool {
        match self.header("Connection") {
            Some(v) if v.eq_ignore_ascii_case(b"close") => false,
            Some(v) if v.eq_ignore_ascii_case(b"keep-alive") => true,
            _ => (self.major, self.minor) >= (1, 1),
        }
    }
}
