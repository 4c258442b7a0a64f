use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use anyhow::{bail, Result};
use itertools::Itertools;
use lazy_regex::{regex, regex_is_match};

/// A parsed `Content-Type` value: media type plus its parameters.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ContentType {
    mime_type: String,
    params: Vec<(String, String)>,
}

impl ContentType {
    pub fn new<S: Into<String>>(mime_type: S) -> Self {
        ContentType {
            mime_type: mime_type.into().to_ascii_lowercase(),
            params: vec![],
        }
    }

    pub fn with_param<N: Into<String>, V: Into<String>>(
        mut self,
        name: N,
        value: V,
    ) -> Self {
        self.params.push((name.into().to_ascii_lowercase(), value.into()));
        self
    }

    pub fn parse(text: &str) -> Result<Self> {
        let (mime_type, rest) = match text.find(';') {
            Some(idx) => (&text[..idx], &text[idx..]),
            None => (text, ""),
        };
        let mime_type = mime_type.trim();
        if !regex_is_match!(r#"^[^\s/]+/[^\s/]+$"#, mime_type) {
            bail!("invalid content type '{}'", text);
        }

        let params = regex!(r#";\s*([^=;\s]+)\s*=\s*("(?:[^"\\]|\\.)*"|[^;]*)"#)
            .captures_iter(rest)
            .map(|caps| (caps[1].to_ascii_lowercase(), unquote(caps[2].trim())))
            .collect();

        Ok(ContentType {
            mime_type: mime_type.to_ascii_lowercase(),
            params,
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn charset(&self) -> Option<&str> {
        self.param("charset")
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

fn unquote(value: &str) -> String {
    match value.strip_prefix('"').and_then(|it| it.strip_suffix('"')) {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => value.to_owned(),
    }
}

fn quote_if_needed(value: &str) -> String {
    if value.is_empty() || value.contains(|c: char| c.is_whitespace() || ";,\"=".contains(c)) {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_owned()
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        write!(f, "{}", self.mime_type)?;
        if !self.params.is_empty() {
            let params = self.params.iter()
                .map(|(name, value)| format!("{}={}", name, quote_if_needed(value)))
                .join("; ");
            write!(f, "; {}", params)?;
        }
        Ok(())
    }
}

impl FromStr for ContentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ContentType::parse(s)
    }
}
