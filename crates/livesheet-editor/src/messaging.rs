//! The host message protocol.
//!
//! The editor runs inside a page but cannot always reach the network itself.
//! It talks to its host (a browser extension's background process, a test
//! harness, the CLI) with small JSON messages:
//!
//! - `{"toggle": <anything>}` from the host asks the overlay to show or hide.
//! - `{"get": "<url>"}` from the editor asks the host to fetch a URL. The host
//!   answers `{"text": "<body>"}` or `{"err": "<message>"}`.
//!
//! [`HostBridge`] turns the `get` round trip into a [`ResourceFetcher`], so the
//! loader can fetch through the host without knowing it.

use livesheet_common::net::{FetchError, ResourceFetcher};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// Errors raised while decoding host messages.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The message is not a JSON object.
    #[error("malformed host message: {0}")]
    Json(#[from] serde_json::Error),
}

/// A message from the host, or a request to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMessage {
    /// Show or hide the overlay.
    Toggle,
    /// Fetch `url` on the editor's behalf.
    Get {
        /// URL to fetch.
        url: String,
    },
    /// Anything else. Ignored.
    Other,
}

impl HostMessage {
    /// Decode one message.
    ///
    /// Any object carrying a `toggle` key is a toggle, whatever its value.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Json`] if `raw` is not a JSON object.
    pub fn parse(raw: &str) -> Result<Self, MessageError> {
        let object: Map<String, Value> = serde_json::from_str(raw)?;
        if object.contains_key("toggle") {
            return Ok(Self::Toggle);
        }
        if let Some(Value::String(url)) = object.get("get") {
            return Ok(Self::Get { url: url.clone() });
        }
        Ok(Self::Other)
    }

    /// Encode the message. [`HostMessage::Other`] encodes as `{}`.
    #[must_use]
    pub fn to_json(&self) -> String {
        let value = match self {
            Self::Toggle => serde_json::json!({ "toggle": true }),
            Self::Get { url } => serde_json::json!({ "get": url }),
            Self::Other => serde_json::json!({}),
        };
        value.to_string()
    }
}

/// The host's answer to a `get` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostResponse {
    /// Error message, if the fetch failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
    /// Response body, if the fetch succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl HostResponse {
    /// A successful response.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            err: None,
            text: Some(body.into()),
        }
    }

    /// A failed response.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            err: Some(message.into()),
            text: None,
        }
    }

    /// Decode a response.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Json`] if `raw` is not a response object.
    pub fn parse(raw: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The body, or the host's error. A response with neither is an empty
    /// body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Host`] if the host reported an error.
    pub fn into_result(self) -> Result<String, FetchError> {
        match self.err {
            Some(err) => Err(FetchError::Host(err)),
            None => Ok(self.text.unwrap_or_default()),
        }
    }
}

/// Routes incoming host messages to registered handlers.
#[derive(Default)]
pub struct MessageRouter {
    on_toggle: Vec<Box<dyn FnMut()>>,
}

impl fmt::Debug for MessageRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageRouter")
            .field("on_toggle", &self.on_toggle.len())
            .finish()
    }
}

impl MessageRouter {
    /// A router with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `handler` for every toggle message.
    pub fn on_toggle_message(&mut self, handler: impl FnMut() + 'static) {
        self.on_toggle.push(Box::new(handler));
    }

    /// Decode `raw` and run the matching handlers. Returns whether any ran.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Json`] if `raw` is not a JSON object.
    pub fn dispatch(&mut self, raw: &str) -> Result<bool, MessageError> {
        match HostMessage::parse(raw)? {
            HostMessage::Toggle => {
                for handler in &mut self.on_toggle {
                    handler();
                }
                Ok(!self.on_toggle.is_empty())
            }
            HostMessage::Get { url } => {
                log::debug!("ignoring get request for {url} sent to the editor");
                Ok(false)
            }
            HostMessage::Other => Ok(false),
        }
    }
}

/// A `get` request waiting for the host's answer.
#[derive(Debug)]
pub struct PendingRequest {
    /// URL to fetch.
    pub url: String,
    reply: oneshot::Sender<HostResponse>,
}

impl PendingRequest {
    /// The request as it goes over the wire.
    #[must_use]
    pub fn to_json(&self) -> String {
        HostMessage::Get {
            url: self.url.clone(),
        }
        .to_json()
    }

    /// Answer the request. Answering a request whose fetch was dropped is a
    /// no-op.
    pub fn respond(self, response: HostResponse) {
        if self.reply.send(response).is_err() {
            log::debug!("response for {} arrived after the fetch was dropped", self.url);
        }
    }
}

/// A [`ResourceFetcher`] that forwards each fetch to the host as a `get`
/// request.
#[derive(Debug, Clone)]
pub struct HostBridge {
    requests: mpsc::UnboundedSender<PendingRequest>,
}

impl HostBridge {
    /// A bridge and the receiving end the host answers requests from.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingRequest>) {
        let (requests, receiver) = mpsc::unbounded_channel();
        (Self { requests }, receiver)
    }
}

impl ResourceFetcher for HostBridge {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(PendingRequest {
                url: url.to_string(),
                reply,
            })
            .map_err(|_| FetchError::Host("host is not listening".to_string()))?;
        response
            .await
            .map_err(|_| FetchError::Host("host dropped the request".to_string()))?
            .into_result()
    }
}
