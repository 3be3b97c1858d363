//! Message segments: the closed set of content kinds (text, image, mention) the client understands,
//! plus [`OutboundMessage`], the "string or segment list" input accepted by every send path.
//!
//! Loose JSON items are classified with [`Segment::classify`]. Classification never fails:
//! anything unrecognized becomes a text segment holding the item's JSON form.

use std::fmt;
use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Prefix marking an inline base64 image payload.
pub const BASE64_PREFIX: &str = "base64://";

const FILE_URI_PREFIX: &str = "file://";

/// Where the bytes of an image come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Raw image bytes held in memory.
    Binary(Vec<u8>),
    /// Remote `http:` / `https:` URL, fetched by the platform.
    Url(String),
    /// Local file, uploaded by the transport.
    Path(PathBuf),
}

impl ImageSource {
    /// Classifies a string reference: remote URL, `base64://` payload, `file://` URI, or bare path.
    ///
    /// Returns `None` for an empty reference or an undecodable base64 payload.
    pub fn from_reference(file: &str) -> Option<Self> {
        if file.is_empty() {
            return None;
        }
        if file.starts_with("http:") || file.starts_with("https:") {
            return Some(ImageSource::Url(file.to_string()));
        }
        if let Some(encoded) = file.strip_prefix(BASE64_PREFIX) {
            return STANDARD.decode(encoded).ok().map(ImageSource::Binary);
        }
        let path = file.strip_prefix(FILE_URI_PREFIX).unwrap_or(file);
        Some(ImageSource::Path(PathBuf::from(path)))
    }

    /// Classifies the `file` field of an image item. Besides strings this accepts a byte array or a
    /// `{"type":"Buffer","data":[..]}` object.
    fn from_value(file: &Value) -> Option<Self> {
        match file {
            Value::String(s) => Self::from_reference(s),
            Value::Array(items) => bytes_from_array(items).map(ImageSource::Binary),
            Value::Object(map) if map.get("type").and_then(Value::as_str) == Some("Buffer") => map
                .get("data")
                .and_then(Value::as_array)
                .and_then(|items| bytes_from_array(items))
                .map(ImageSource::Binary),
            _ => None,
        }
    }

    /// String form used when serializing; binary payloads become `base64://...`.
    pub fn to_reference(&self) -> String {
        match self {
            ImageSource::Binary(bytes) => format!("{}{}", BASE64_PREFIX, STANDARD.encode(bytes)),
            ImageSource::Url(url) => url.clone(),
            ImageSource::Path(path) => path.display().to_string(),
        }
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Binary(bytes)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

fn bytes_from_array(items: &[Value]) -> Option<Vec<u8>> {
    items
        .iter()
        .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
        .collect()
}

/// One classified unit of message content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text { text: String },
    Image { source: ImageSource },
    /// Mention of a user; rendered as `@target` on platforms without native mentions.
    Mention { target: String },
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text { text: text.into() }
    }

    pub fn image(source: impl Into<ImageSource>) -> Self {
        Segment::Image {
            source: source.into(),
        }
    }

    pub fn at(target: impl Into<String>) -> Self {
        Segment::Mention {
            target: target.into(),
        }
    }

    /// Classifies a loose content item.
    ///
    /// - string → text
    /// - `{"type":"text","text":..}` → text
    /// - `{"type":"image","file":..}` → image (see [`ImageSource::from_reference`])
    /// - `{"type":"at","qq"|"text"|"target":..}` → mention
    /// - anything else, including a known type with unusable fields → text of the item's JSON
    pub fn classify(item: &Value) -> Segment {
        let classified = match item {
            Value::String(s) => Some(Segment::text(s.as_str())),
            Value::Object(map) => match map.get("type").and_then(Value::as_str) {
                Some("text") => map.get("text").and_then(Value::as_str).map(Segment::text),
                Some("image") => map
                    .get("file")
                    .and_then(ImageSource::from_value)
                    .map(Segment::image),
                Some("at") => mention_target(map).map(Segment::at),
                _ => None,
            },
            _ => None,
        };
        classified.unwrap_or_else(|| Segment::text(item.to_string()))
    }

    /// Text this segment contributes to a message body; `None` for images.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            Segment::Text { text } => Some(text.clone()),
            Segment::Mention { target } => Some(format!("@{}", target)),
            Segment::Image { .. } => None,
        }
    }

    /// Wire name of the segment kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Segment::Text { .. } => "text",
            Segment::Image { .. } => "image",
            Segment::Mention { .. } => "at",
        }
    }
}

fn mention_target(map: &Map<String, Value>) -> Option<String> {
    ["qq", "text", "target"]
        .iter()
        .find_map(|key| match map.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Text { text } => write!(f, "{}", text),
            Segment::Mention { target } => write!(f, "@{}", target),
            Segment::Image {
                source: ImageSource::Binary(bytes),
            } => write!(f, "[image:{} bytes]", bytes.len()),
            Segment::Image { source } => write!(f, "[image:{}]", source.to_reference()),
        }
    }
}

impl Serialize for Segment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", self.kind())?;
        match self {
            Segment::Text { text } => map.serialize_entry("text", text)?,
            Segment::Image { source } => map.serialize_entry("file", &source.to_reference())?,
            Segment::Mention { target } => map.serialize_entry("qq", target)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Segment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Segment::classify(&value))
    }
}

/// A message to send: a bare string or an ordered list of segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    Text(String),
    Segments(Vec<Segment>),
}

impl OutboundMessage {
    /// Builds a message from loose JSON: a string, a single item, or an array mixing both.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => OutboundMessage::Text(s.clone()),
            Value::Array(items) => {
                OutboundMessage::Segments(items.iter().map(Segment::classify).collect())
            }
            other => OutboundMessage::Segments(vec![Segment::classify(other)]),
        }
    }

    /// Ordered segments of this message; a bare string is one text segment.
    pub fn segments(&self) -> Vec<Segment> {
        match self {
            OutboundMessage::Text(text) => vec![Segment::text(text.as_str())],
            OutboundMessage::Segments(segments) => segments.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for OutboundMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(OutboundMessage::from_value(&value))
    }
}

impl From<&str> for OutboundMessage {
    fn from(text: &str) -> Self {
        OutboundMessage::Text(text.to_string())
    }
}

impl From<String> for OutboundMessage {
    fn from(text: String) -> Self {
        OutboundMessage::Text(text)
    }
}

impl From<Segment> for OutboundMessage {
    fn from(segment: Segment) -> Self {
        OutboundMessage::Segments(vec![segment])
    }
}

impl From<Vec<Segment>> for OutboundMessage {
    fn from(segments: Vec<Segment>) -> Self {
        OutboundMessage::Segments(segments)
    }
}
