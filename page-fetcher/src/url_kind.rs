/// Kind of document an input URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    Book,
    Chapter,
}

/// The input URL matches neither a book nor a chapter reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid url: {url}")]
pub struct InvalidUrl {
    pub url: String,
}

/// Classify an input URL.
///
/// Book: contains `&res=` or ends with `/zh`. Chapter: contains `chapter=`.
/// The book test runs first. Anything else, including non-http(s) input, is rejected.
pub fn classify_url(url: &str) -> Result<UrlKind, InvalidUrl> {
    let u = url.trim();
    let invalid = || InvalidUrl { url: url.to_string() };
    if !(u.starts_with("http://") || u.starts_with("https://")) {
        return Err(invalid());
    }
    if u.contains("&res=") || u.ends_with("/zh") {
        Ok(UrlKind::Book)
    } else if u.contains("chapter=") {
        Ok(UrlKind::Chapter)
    } else {
        Err(invalid())
    }
}
