use std::sync::Arc;

use encoding_rs::{Encoding, UTF_8};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::config::FetchConfig;

/// Per-page retrieval failure. Recoverable by callers that traverse many pages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("http client setup failed: {message}")]
    Client { message: String },
}

/// The single retrieval primitive shared by page and dictionary loading.
pub trait TextFetcher: Send + Sync {
    /// Fetch `url` and return its body decoded to text.
    fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

impl<T: TextFetcher + ?Sized> TextFetcher for Arc<T> {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch_text(url)
    }
}

impl<T: TextFetcher + ?Sized> TextFetcher for &T {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch_text(url)
    }
}

/// Blocking HTTP fetcher backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(cfg: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(cfg.timeout)
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client { message: e.to_string() })?;
        Ok(Self { client })
    }
}

impl TextFetcher for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        log::debug!("GET {url}");
        let resp = self.client.get(url).send().map_err(|e| map_reqwest_error(url, e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }
        let charset = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_from_content_type)
            .map(str::to_string);
        let bytes = resp.bytes().map_err(|e| map_reqwest_error(url, e))?;
        Ok(decode_body(&bytes, charset.as_deref()))
    }
}

fn map_reqwest_error(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout { url: url.to_string() }
    } else {
        FetchError::Request { url: url.to_string(), message: err.to_string() }
    }
}

/// Extract the `charset=` parameter of a Content-Type header value.
pub fn charset_from_content_type(value: &str) -> Option<&str> {
    value.split(';').skip(1).find_map(|param| {
        let (k, v) = param.split_once('=')?;
        if k.trim().eq_ignore_ascii_case("charset") {
            Some(v.trim().trim_matches('"'))
        } else {
            None
        }
    })
}

/// Decode a response body. A BOM wins over the label; unknown or missing labels fall back to UTF-8 (lossy).
pub fn decode_body(bytes: &[u8], charset: Option<&str>) -> String {
    let enc = charset
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (cow, _enc_used, _had_errors) = enc.decode(bytes);
    cow.into_owned()
}
