use crate::http::request::{Method, Request};

/// Largest accepted request line plus header block.
pub const MAX_HEAD_SIZE: usize = 8 * 1024;
/// Largest accepted request body.
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed request: {0}")]
    MalformedRequest(&'static str),
    #[error("request head too large")]
    HeadersTooLarge,
    #[error("invalid Content-Length")]
    InvalidContentLength,
    #[error("request body too large")]
    BodyTooLarge,
    #[error("incomplete request")]
    Incomplete,
}

/// Parses one request from the start of `buf`.
///
/// The head ends at the first blank line (`\r\n\r\n` or `\n\n`). When a
/// Content-Length is announced the body must be fully buffered as well.
/// Returns the request and the number of bytes it occupied.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let Some((head_len, body_start)) = find_headers_end(buf) else {
        if buf.len() > MAX_HEAD_SIZE {
            return Err(ParseError::HeadersTooLarge);
        }
        return Err(ParseError::Incomplete);
    };

    if head_len > MAX_HEAD_SIZE {
        return Err(ParseError::HeadersTooLarge);
    }

    let mut request = parse_head(&buf[..head_len])?;

    let content_length = match request.header("Content-Length") {
        Some(v) => v
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidContentLength)?,
        None => 0,
    };

    if content_length > MAX_BODY_SIZE {
        return Err(ParseError::BodyTooLarge);
    }

    let body_bytes = &buf[body_start..];
    if body_bytes.len() < content_length {
        return Err(ParseError::Incomplete);
    }

    request.body = body_bytes[..content_length].to_vec();

    Ok((request, body_start + content_length))
}

/// Parses whatever head was received before the client closed its side.
///
/// Used when the stream ends before the request is complete: the lines
/// that did arrive still form a request. A partial body is dropped.
pub fn parse_truncated_request(buf: &[u8]) -> Result<Request, ParseError> {
    let head = match find_headers_end(buf) {
        Some((head_len, _)) => &buf[..head_len],
        None => buf,
    };

    if head.len() > MAX_HEAD_SIZE {
        return Err(ParseError::HeadersTooLarge);
    }
    parse_head(head)
}

fn parse_head(head: &[u8]) -> Result<Request, ParseError> {
    let head = std::str::from_utf8(head)
        .map_err(|_| ParseError::MalformedRequest("request head is not valid UTF-8"))?;

    let mut lines = head.lines();

    let request_line = lines
        .next()
        .filter(|line| !line.trim().is_empty())
        .ok_or(ParseError::MalformedRequest("empty request line"))?;

    let mut parts = request_line.split(' ').filter(|part| !part.is_empty());

    let method = parts
        .next()
        .ok_or(ParseError::MalformedRequest("missing method"))?;
    let path = parts
        .next()
        .ok_or(ParseError::MalformedRequest("missing request target"))?;
    let version = parts.next().unwrap_or("HTTP/1.0");

    if parts.next().is_some() {
        return Err(ParseError::MalformedRequest("too many request line tokens"));
    }

    let mut headers = Vec::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        headers.push(line.to_string());
    }

    Ok(Request {
        method: Method::parse(method),
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body: Vec::new(),
    })
}

/// Finds the blank line closing the head.
///
/// Returns the length of the head (request line and header lines) and the
/// offset where the body starts.
fn find_headers_end(buf: &[u8]) -> Option<(usize, usize)> {
    let mut line_start = 0;

    for (i, &byte) in buf.iter().enumerate() {
        if byte != b'\n' {
            continue;
        }

        let line = &buf[line_start..i];
        if line.is_empty() || line == b"\r" {
            return Some((line_start, i + 1));
        }

        line_start = i + 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.header("Host"), Some("example.com"));
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn headers_end_accepts_bare_newlines() {
        assert_eq!(find_headers_end(b"GET / HTTP/1.1\nA: b\n\nrest"), Some((20, 21)));
        assert_eq!(find_headers_end(b"GET / HTTP/1.1\r\n\r\n"), Some((16, 18)));
        assert_eq!(find_headers_end(b"GET / HTTP/1.1\r\n"), None);
    }
}
