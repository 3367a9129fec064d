//! Content-Type detection from the requested path.

/// Maps a path to its MIME type by exact, case-sensitive suffix.
///
/// ```
/// use plainserve::http::mime::content_type_for;
/// assert_eq!(content_type_for("/css/site.css"), "text/css");
/// assert_eq!(content_type_for("/logo.PNG"), "text/plain");
/// ```
pub fn content_type_for(path: &str) -> &'static str {
    const TYPES: [(&str, &str); 5] = [
        (".html", "text/html"),
        (".css", "text/css"),
        (".js", "application/javascript"),
        (".png", "image/png"),
        (".jpg", "image/jpeg"),
    ];

    TYPES
        .iter()
        .find(|(suffix, _)| path.ends_with(suffix))
        .map(|(_, mime)| *mime)
        .unwrap_or("text/plain")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_dot_names_use_last_suffix() {
        assert_eq!(content_type_for("bundle.min.js"), "application/javascript");
        assert_eq!(content_type_for("archive.html.bak"), "text/plain");
    }
}
