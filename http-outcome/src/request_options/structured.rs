use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use reqwest::Method;
use serde::Deserialize;

use crate::body::BodyType;

use super::RequestOptions;

#[derive(Debug, Deserialize)]
struct StructuredRequestOptions {
    method: String,
    url: String,
    headers: Option<HashMap<String, String>>,
    body: Option<String>,
    #[serde(rename = "as")]
    body_type: Option<BodyType>,
}

impl TryFrom<StructuredRequestOptions> for RequestOptions {
    type Error = anyhow::Error;

    fn try_from(value: StructuredRequestOptions) -> std::result::Result<Self, Self::Error> {
        let method = Method::from_str(&value.method)
            .with_context(|| format!("invalid method '{}'", value.method))?;
        let mut options = RequestOptions::new(method, &value.url)?;

        let mut headers: Vec<_> = value.headers.unwrap_or_default().into_iter().collect();
        headers.sort();
        for (name, value) in headers {
            options = options.with_header(&name, &value)?;
        }
        if let Some(body) = value.body {
            options = options.with_body(body);
        }
        if let Some(body_type) = value.body_type {
            options = options.with_body_type(body_type);
        }

        Ok(options)
    }
}

impl RequestOptions {
    pub fn from_json(text: &str) -> Result<Self> {
        let structured: StructuredRequestOptions = serde_json::from_str(text)?;
        RequestOptions::try_from(structured)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let structured: StructuredRequestOptions = serde_yaml::from_str(text)?;
        RequestOptions::try_from(structured)
    }

    /// Loads a `.json`, `.yaml` or `.yml` request definition.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("error reading file {}", path.display()))?;
        let extension = path.extension()
            .and_then(|it| it.to_str())
            .map(str::to_ascii_lowercase);

        let result = match extension.as_deref() {
            Some("json") => Self::from_json(&text),
            Some("yaml") | Some("yml") => Self::from_yaml(&text),
            _ => bail!("unsupported request definition format: {}", path.display()),
        };
        result.with_context(|| format!("error parsing request definition {}", path.display()))
    }
}
