use anyhow::{bail, Context, Result};
use encoding_rs::{Encoding, UTF_8};
use serde::Deserialize;
use serde_json::Value;

/// How the producer should decode a response body before storing it.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Bytes,
    #[default]
    Text,
    Json,
}

/// Default payload of an [`Outcome`](crate::Outcome), one variant per [`BodyType`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Bytes(Vec<u8>),
    Text(String),
    Json(Value),
}

impl ResponseBody {
    /// Decodes `raw` as requested, using `charset` for text (UTF-8 when absent).
    pub fn decode(
        raw: Vec<u8>,
        body_type: BodyType,
        charset: Option<&str>,
    ) -> Result<Self> {
        match body_type {
            BodyType::Bytes => Ok(ResponseBody::Bytes(raw)),
            BodyType::Text => decode_text(raw, charset).map(ResponseBody::Text),
            BodyType::Json => {
                let text = decode_text(raw, charset)?;
                let value = serde_json::from_str(&text)
                    .with_context(|| format!("failed to parse response body as json\nBody was '{}'", text))?;
                Ok(ResponseBody::Json(value))
            }
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ResponseBody::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Unknown charset labels fall back to UTF-8, as reqwest's `text_with_charset` does.
fn decode_text(
    raw: Vec<u8>,
    charset: Option<&str>,
) -> Result<String> {
    let encoding = charset
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
        .unwrap_or(UTF_8);

    let (text, actual, had_errors) = encoding.decode(&raw);
    if had_errors {
        bail!("response body is not valid {}", actual.name());
    }
    Ok(text.into_owned())
}
