//! Profile photos: inline encoded payloads or external URLs.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde::Serialize;
use thiserror::Error;

/// Raw photo strings longer than this are treated as inline payloads.
pub const INLINE_LENGTH_THRESHOLD: usize = 100;

const DATA_IMAGE_PREFIX: &str = "data:image";

/// Standard alphabet, tolerant of missing padding.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("invalid base64 image payload: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoRef {
    Inline(InlineImage),
    Url(String),
}

impl PhotoRef {
    /// Classify a stored photo string. Blank strings mean "no photo".
    pub fn classify(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with(DATA_IMAGE_PREFIX) || raw.len() > INLINE_LENGTH_THRESHOLD {
            Some(PhotoRef::Inline(InlineImage {
                raw: raw.to_string(),
            }))
        } else {
            Some(PhotoRef::Url(raw.to_string()))
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, PhotoRef::Inline(_))
    }
}

/// An image embedded in the record, optionally wrapped in a data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    raw: String,
}

impl InlineImage {
    /// MIME type from a `data:<mime>;base64,` prefix, if present.
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.raw.strip_prefix("data:")?;
        let end = rest.find([';', ','])?;
        let mime = &rest[..end];
        (!mime.is_empty()).then_some(mime)
    }

    /// The encoded payload with any data URL prefix removed.
    pub fn payload(&self) -> &str {
        if self.raw.starts_with(DATA_IMAGE_PREFIX) {
            match self.raw.find(',') {
                Some(idx) => &self.raw[idx + 1..],
                None => "",
            }
        } else {
            &self.raw
        }
    }

    /// Decode the payload into image bytes. Embedded whitespace is ignored.
    pub fn decode(&self) -> Result<Vec<u8>, PhotoError> {
        let compact: String = self
            .payload()
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        LENIENT_BASE64
            .decode(compact.as_bytes())
            .map_err(|e| PhotoError::Decode(e.to_string()))
    }
}

/// Display-friendly description of a photo, without the payload itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhotoSummary {
    Inline {
        mime_type: Option<String>,
        /// Decoded size, `None` when the payload does not decode.
        decoded_bytes: Option<usize>,
    },
    Url {
        url: String,
    },
}

impl From<&PhotoRef> for PhotoSummary {
    fn from(photo: &PhotoRef) -> Self {
        match photo {
            PhotoRef::Inline(image) => {
                let decoded_bytes = match image.decode() {
                    Ok(bytes) => Some(bytes.len()),
                    Err(e) => {
                        tracing::warn!("Failed to decode inline profile photo: {e}");
                        None
                    }
                };
                PhotoSummary::Inline {
                    mime_type: image.mime_type().map(str::to_string),
                    decoded_bytes,
                }
            }
            PhotoRef::Url(url) => PhotoSummary::Url { url: url.clone() },
        }
    }
}
