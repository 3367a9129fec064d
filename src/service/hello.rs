//! Greeting service mounted at `/app/hello`

use url::form_urlencoded;

use crate::service::registry::{Service, ServiceError};

/// Line-break marker between the JSON and the plain greeting.
const SEPARATOR: &str = "<br />";

/// Greets the name passed as a single `key=value` pair.
///
/// `/app/hello?nombre=Jos%C3%A9` answers
/// `{"nombre": "José"}<br />Hola, José`.
pub struct HelloService;

impl Service for HelloService {
    fn handle(&self, target: &str) -> Result<String, ServiceError> {
        let name = decode_single_pair(argument_of(target))?;
        let name = escape_html(&name);

        let json = format!(
            "{{\"nombre\": {}}}",
            serde_json::Value::String(name.clone())
        );
        Ok(format!("{json}{SEPARATOR}Hola, {name}"))
    }
}

/// The query string when present, otherwise the last path segment
/// (`/hello/nombre=World`).
fn argument_of(target: &str) -> &str {
    match target.split_once('?') {
        Some((_, query)) => query,
        None => target.rsplit('/').next().unwrap_or(target),
    }
}

/// Decodes the value of the one and only `key=value` pair in `raw`.
fn decode_single_pair(raw: &str) -> Result<String, ServiceError> {
    let malformed = |reason: &str| ServiceError::MalformedServiceInput(reason.to_string());

    if raw.contains('&') {
        return Err(malformed("expected exactly one key=value pair"));
    }

    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| malformed("expected key=value"))?;

    if key.is_empty() {
        return Err(malformed("empty key"));
    }
    if value.contains('=') {
        return Err(malformed("expected exactly one '=' in key=value"));
    }
    if !has_valid_escapes(value) {
        return Err(malformed("invalid percent-encoding"));
    }

    form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| malformed("expected key=value"))
}

/// Every `%` must introduce two hex digits.
fn has_valid_escapes(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3);
            if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}
