use std::str::FromStr;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};

use crate::body::BodyType;

mod structured;

/// How a request was issued. Shared read-only by every [`Outcome`](crate::Outcome)
/// built for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<String>,
    body_type: BodyType,
}

impl RequestOptions {
    pub fn new(
        method: Method,
        url: &str,
    ) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("Invalid URL: '{}'", url))?;

        Ok(RequestOptions {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            body_type: BodyType::default(),
        })
    }

    pub fn get(url: &str) -> Result<Self> {
        Self::new(Method::GET, url)
    }

    pub fn with_header(
        mut self,
        name: &str,
        value: &str,
    ) -> Result<Self> {
        let name = HeaderName::from_str(name)
            .with_context(|| format!("invalid header name '{}'", name))?;
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("invalid value for header '{}'", name))?;
        self.headers.append(name, value);

        Ok(self)
    }

    pub fn with_body<S: Into<String>>(
        mut self,
        body: S,
    ) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_body_type(
        mut self,
        body_type: BodyType,
    ) -> Self {
        self.body_type = body_type;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Builds a request for these options. Sending it is up to the caller.
    pub fn prepare(&self, client: &Client) -> RequestBuilder {
        let builder = client.request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone());
        match &self.body {
            Some(body) => builder.body(body.clone()),
            None => builder,
        }
    }
}
