//! Request line and header line parsing.
//!
//! Both parsers work on a single line with its CRLF already stripped by the
//! [`LineReader`]. Everything they return is copied out of the line, so the
//! reader is free to refill or grow as soon as a parser returns.

use bytes::Bytes;
use tokio::io::AsyncRead;

use crate::error::{ParseError, RequestError};
use crate::http::buffer::{LineReader, LineSpan};
use crate::http::request::{Method, ParsedRequest};

const SP: u8 = b' ';
const HT: u8 = b'\t';
const HTTP_VERSION_PREFIX: &[u8] = b"HTTP/";

/// Maximum digits in either half of the version number.
pub const MAX_VERSION_DIGITS: usize = 3;

/// Parsed pieces of the first line of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub uri: Bytes,
    pub major: u16,
    pub minor: u16,
}

/// Outcome of one header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderLine {
    Header(String, Bytes),
    /// The blank line; holds the offset of the first body byte.
    EndOfHeaders(usize),
}

// CTL = <any US-ASCII control character (octets 0 - 31) and DEL (127)>
fn is_ctl(b: u8) -> bool {
    b < 32 || b == 127
}

// separators = "(" | ")" | "<" | ">" | "@" | "," | ";" | ":" | "\" | <">
//            | "/" | "[" | "]" | "?" | "=" | "{" | "}" | SP | HT
fn is_separator(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')'
            | b'<'
            | b'>'
            | b'@'
            | b','
            | b';'
            | b':'
            | b'\\'
            | b'"'
            | b'/'
            | b'['
            | b']'
            | b'?'
            | b'='
            | b'{'
            | b'}'
            | SP
            | HT
    )
}

fn is_token(b: u8) -> bool {
    !is_ctl(b) && !is_separator(b)
}

/// Parses `METHOD SP URI SP HTTP/major.minor`.
pub fn parse_request_line(line: &[u8]) -> Result<RequestLine, ParseError> {
    let method = Method::ALL
        .into_iter()
        .find(|m| {
            let token = m.as_str().as_bytes();
            line.starts_with(token) && line.get(token.len()) == Some(&SP)
        })
        .ok_or(ParseError::UnknownMethod)?;

    let rest = &line[method.as_str().len() + 1..];

    let uri_len = rest
        .iter()
        .position(|&b| b == SP || is_ctl(b))
        .ok_or(ParseError::MalformedUri)?;
    if uri_len == 0 || rest[uri_len] != SP {
        return Err(ParseError::MalformedUri);
    }
    let uri = Bytes::copy_from_slice(&rest[..uri_len]);

    let (major, minor) = parse_version(&rest[uri_len + 1..])?;

    Ok(RequestLine {
        method,
        uri,
        major,
        minor,
    })
}

fn parse_version(version: &[u8]) -> Result<(u16, u16), ParseError> {
    let digits = version
        .strip_prefix(HTTP_VERSION_PREFIX)
        .ok_or(ParseError::MalformedVersion)?;

    let (major, after_major) = parse_digits(digits)?;
    let after_dot = after_major
        .strip_prefix(b".")
        .ok_or(ParseError::MalformedVersion)?;
    let (minor, trailing) = parse_digits(after_dot)?;

    // The line ends here; the reader already consumed the CRLF.
    if !trailing.is_empty() {
        return Err(ParseError::MalformedVersion);
    }
    Ok((major, minor))
}

fn parse_digits(input: &[u8]) -> Result<(u16, &[u8]), ParseError> {
    let len = input.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 || len > MAX_VERSION_DIGITS {
        return Err(ParseError::MalformedVersion);
    }
    let value = input[..len]
        .iter()
        .fold(0u16, |acc, &b| acc * 10 + u16::from(b - b'0'));
    Ok((value, &input[len..]))
}

/// Parses one header line, or recognizes the blank line ending the head.
///
/// `span` locates `line` in the read buffer and is only used to compute the
/// body offset.
pub fn parse_header_line(line: &[u8], span: LineSpan) -> Result<HeaderLine, ParseError> {
    if line.is_empty() {
        return Ok(HeaderLine::EndOfHeaders(span.next_offset()));
    }

    let key_len = line.iter().take_while(|&&b| is_token(b)).count();
    if key_len == 0 || line.get(key_len) != Some(&b':') {
        return Err(ParseError::MalformedHeader);
    }

    let value = &line[key_len + 1..];
    let value: &[u8] = match value.iter().position(|&b| b != SP && b != HT) {
        Some(start) => &value[start..],
        None => &[],
    };
    let value: &[u8] = match value
        .iter()
        .rposition(|&b| !matches!(b, b'\r' | b'\n' | SP | HT))
    {
        Some(last) => &value[..=last],
        None => &[],
    };
    if value.iter().any(|&b| is_ctl(b) && b != HT) {
        return Err(ParseError::MalformedHeader);
    }

    // Token bytes are ASCII, so the key is always valid UTF-8.
    let key = String::from_utf8_lossy(&line[..key_len]).into_owned();
    Ok(HeaderLine::Header(key, Bytes::copy_from_slice(value)))
}

/// Reads and parses a complete request head from `reader`.
///
/// The head is expected to start at the reader's current cursor, which is
/// offset zero for a fresh connection or after
/// [`LineReader::discard_consumed`].
pub async fn read_request_head<R>(reader: &mut LineReader<R>) -> Result<ParsedRequest, RequestError>
where
    R: AsyncRead + Unpin,
{
    let span = reader.next_line().await?;
    let RequestLine {
        method,
        uri,
        major,
        minor,
    } = parse_request_line(reader.line(span))?;

    let mut headers = Vec::new();
    let body_offset = loop {
        let span = reader.next_line().await?;
        match parse_header_line(reader.line(span), span)? {
            HeaderLine::Header(key, value) => headers.push((key, value)),
            HeaderLine::EndOfHeaders(offset) => break offset,
        }
    };

    Ok(ParsedRequest {
        method,
        uri,
        major,
        minor,
        headers,
        body_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let line = parse_request_line(b"GET / HTTP/1.1").unwrap();

        assert_eq!(line.method, Method::GET);
        assert_eq!(line.uri, "/");
        assert_eq!((line.major, line.minor), (1, 1));
    }

    #[test]
    fn method_needs_exactly_one_space() {
        assert_eq!(
            parse_request_line(b"GETX / HTTP/1.1"),
            Err(ParseError::UnknownMethod)
        );
        assert_eq!(
            parse_request_line(b"GET  / HTTP/1.1"),
            Err(ParseError::MalformedUri)
        );
    }

    #[test]
    fn header_value_is_trimmed() {
        let span = LineSpan { start: 0, end: 17 };
        let parsed = parse_header_line(b"Host: \t example  ", span).unwrap();

        assert_eq!(
            parsed,
            HeaderLine::Header("Host".to_string(), Bytes::from_static(b"example"))
        );
    }

    #[test]
    fn non_utf8_bytes_are_kept() {
        let line = parse_request_line(b"GET /caf\xe9 HTTP/1.1").unwrap();
        assert_eq!(line.uri, Bytes::from_static(b"/caf\xe9"));

        let span = LineSpan { start: 0, end: 12 };
        let parsed = parse_header_line(b"X-Name: caf\xe9", span).unwrap();
        assert_eq!(
            parsed,
            HeaderLine::Header("X-Name".to_string(), Bytes::from_static(b"caf\xe9"))
        );
    }
}
