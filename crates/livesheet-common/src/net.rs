//! Resource fetching for the stylesheet loader.
//!
//! The loader never talks to the network directly. It is handed a
//! [`ResourceFetcher`], so the host decides how a stylesheet URL becomes text:
//! [`NetFetcher`] does it with `reqwest`, the filesystem and `data:` decoding,
//! tests do it with canned responses.
//!
//! TODO: Implement proper Fetch Standard (<https://fetch.spec.whatwg.org/>)
use crate::warning::warn_once;
use base64::Engine;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Client-level request timeout. The loader itself imposes none.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Why a resource could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be built or the request never completed.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Status(String),
    /// A local file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A `data:` URL was malformed or not text.
    #[error("invalid data URL: {0}")]
    DataUrl(String),
    /// The host runtime reported an error for the request.
    #[error("{0}")]
    Host(String),
}

/// Capability to turn a URL into the text behind it.
///
/// One call is one request: no retry, no caching. Implementations may settle
/// in any order when several fetches are in flight.
pub trait ResourceFetcher {
    /// Fetch `url` and return its body as text.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>>;
}

/// A parsed `data:` URL that can be decoded into raw bytes.
///
/// [RFC 2397](https://www.rfc-editor.org/rfc/rfc2397)
pub struct DataUrl<'a> {
    /// Everything between `data:` and the first comma.
    metadata: &'a str,
    /// The payload after the comma.
    data: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Split a raw `data:` URL into metadata and payload.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::DataUrl`] if the URL is not a `data:` URL or has
    /// no comma.
    pub fn parse(raw: &'a str) -> Result<Self, FetchError> {
        let rest = raw
            .strip_prefix("data:")
            .ok_or_else(|| FetchError::DataUrl("missing data: prefix".to_string()))?;
        let (metadata, data) = rest
            .split_once(',')
            .ok_or_else(|| FetchError::DataUrl("missing comma".to_string()))?;
        Ok(Self { metadata, data })
    }

    /// The `charset` parameter, if given.
    #[must_use]
    pub fn charset(&self) -> Option<&'a str> {
        self.metadata
            .split(';')
            .find_map(|param| param.trim().strip_prefix("charset="))
    }

    /// Decode the payload into raw bytes.
    ///
    /// Base64 payloads are base64-decoded, anything else is percent-decoded.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::DataUrl`] if base64 decoding fails.
    pub fn decode(&self) -> Result<Vec<u8>, FetchError> {
        if self.metadata.ends_with(";base64") {
            base64::engine::general_purpose::STANDARD
                .decode(self.data)
                .map_err(|e| FetchError::DataUrl(format!("base64 decode error: {e}")))
        } else {
            Ok(urlencoding::decode_binary(self.data.as_bytes()).into_owned())
        }
    }

    /// Decode the payload as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::DataUrl`] if decoding fails or the bytes are not
    /// UTF-8.
    pub fn decode_text(&self) -> Result<String, FetchError> {
        if let Some(charset) = self.charset()
            && !charset.eq_ignore_ascii_case("utf-8")
            && !charset.eq_ignore_ascii_case("us-ascii")
        {
            let _ = warn_once("net", &format!("data: URL charset '{charset}' decoded as UTF-8"));
        }
        String::from_utf8(self.decode()?)
            .map_err(|e| FetchError::DataUrl(format!("payload is not UTF-8: {e}")))
    }
}

/// Fetches over HTTP(S), from the filesystem (`file://` URLs and bare paths)
/// and from `data:` URLs.
#[derive(Debug, Clone)]
pub struct NetFetcher {
    client: reqwest::Client,
}

impl NetFetcher {
    /// Build a fetcher with the default user agent and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the HTTP client cannot be created.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    async fn fetch_http(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().to_string()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(format!("failed to read response body: {e}")))
    }

    async fn fetch_file(path: &str) -> Result<String, FetchError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FetchError::Io {
                path: path.to_string(),
                source,
            })
    }
}

impl ResourceFetcher for NetFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        log::debug!("fetching {url}");
        if url.starts_with("data:") {
            DataUrl::parse(url)?.decode_text()
        } else if url.starts_with("http://") || url.starts_with("https://") {
            self.fetch_http(url).await
        } else if let Some(path) = url.strip_prefix("file://") {
            Self::fetch_file(path).await
        } else {
            Self::fetch_file(url).await
        }
    }
}
