/// HTTP status codes the server produces.
///
/// - `Ok` (200): a handler ran
/// - `BadRequest` (400): the request head could not be parsed
/// - `NotFound` (404): no route matched
/// - `RequestHeaderFieldsTooLarge` (431): a head line exceeded the limit
/// - `InternalServerError` (500): a route matched but nothing handles it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 431 Request Header Fields Too Large
    RequestHeaderFieldsTooLarge,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use crest::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::RequestHeaderFieldsTooLarge => 431,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::RequestHeaderFieldsTooLarge => "Request Header Fields Too Large",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// A response being accumulated by a handler.
///
/// Body bytes are appended with [`write`](Self::write); Content-Length is
/// derived from the accumulated length when the response is serialized.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Headers in the order they were set
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    /// An empty response with the given status.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Appends raw bytes to the body.
    pub fn write(&mut self, data: &[u8]) {
        self.body.extend_from_slice(data);
    }

    pub fn write_str(&mut self, data: &str) {
        self.write(data.as_bytes());
    }

    /// Number of body bytes written so far.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Adds or replaces a header (names compare case-insensitively).
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(entry) => entry.1 = value,
            None => self.headers.push((key, value)),
        }
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        Self::plain(StatusCode::NotFound, "404 Not Found")
    }

    /// Creates a 400 Bad Request response.
    pub fn bad_request() -> Self {
        Self::plain(StatusCode::BadRequest, "400 Bad Request")
    }

    /// Creates a 431 response for an oversized head line.
    pub fn header_too_large() -> Self {
        Self::plain(
            StatusCode::RequestHeaderFieldsTooLarge,
            "431 Request Header Fields Too Large",
        )
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        Self::plain(StatusCode::InternalServerError, "500 Internal Server Error")
    }

    fn plain(status: StatusCode, body: &str) -> Self {
        let mut response = Self::new(status);
        response.set_header("Content-Type", "text/plain");
        response.write_str(body);
        response
    }
}
