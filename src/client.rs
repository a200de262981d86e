//! HTTP client for the Cisco Spark / Webex messaging API

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::config::ApiSettings;
use crate::error::{NotifyError, Result};

/// Bearer token for the messaging API. Never printed.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// A room as returned by `GET /rooms`. Other fields are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Room {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
struct RoomList {
    #[serde(default)]
    items: Vec<Room>,
}

/// Body of `POST /messages`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEnvelope {
    pub room_id: String,
    pub markdown: String,
}

impl MessageEnvelope {
    pub fn new(room_id: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            markdown: markdown.into(),
        }
    }
}

/// Raw outcome of a message post; the caller decides what counts as success.
#[derive(Debug, Clone)]
pub struct DeliveryResult {
    pub status: u16,
    /// Parsed JSON body, or the raw text as a JSON string when it isn't JSON
    pub body: Value,
}

impl DeliveryResult {
    pub fn is_delivered(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }

    /// The API's `message` field, falling back to a plain text body.
    pub fn error_message(&self) -> Option<&str> {
        match &self.body {
            Value::Object(map) => map.get("message").and_then(Value::as_str),
            Value::String(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

pub struct SparkClient {
    client: Client,
    base_url: Url,
}

impl SparkClient {
    /// Build a client whose every request carries the bearer token.
    pub fn new(settings: &ApiSettings, credential: &Credential) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            NotifyError::Config(format!("Invalid API URL '{}': {}", settings.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(NotifyError::Config(format!(
                "Invalid API URL '{}'",
                settings.base_url
            )));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
            .map_err(|_| NotifyError::Config("Auth token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // checked in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `GET /rooms`: every room the token can see, in API order.
    pub async fn list_rooms(&self) -> Result<Vec<Room>> {
        let url = self.endpoint(&["rooms"]);
        debug!("GET {}", url);
        let rooms: RoomList = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("Found {} rooms", rooms.items.len());
        Ok(rooms.items)
    }

    /// `GET /rooms/{id}`: true only on HTTP 200.
    pub async fn verify_room(&self, room_id: &str) -> Result<bool> {
        let url = self.endpoint(&["rooms", room_id]);
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        debug!("Room lookup returned HTTP {}", response.status());
        Ok(response.status() == StatusCode::OK)
    }

    /// `POST /messages` with the envelope as JSON.
    pub async fn send(&self, envelope: &MessageEnvelope) -> Result<DeliveryResult> {
        let url = self.endpoint(&["messages"]);
        debug!(
            "POST {} (room {}, {} bytes of markdown)",
            url,
            envelope.room_id,
            envelope.markdown.len()
        );
        let response = self.client.post(url).json(envelope).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(DeliveryResult { status, body })
    }
}
