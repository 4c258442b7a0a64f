use std::collections::HashMap;
use std::sync::Arc;

use crate::body::ResponseBody;
use crate::content_type::ContentType;
use crate::errors::StatusError;
use crate::request_options::RequestOptions;

/// Response headers, keyed by name exactly as the producer stored them.
pub type Headers = HashMap<String, String>;

/// The result of exactly one HTTP request attempt.
///
/// Either the server answered ([`Success`]) or the attempt terminally failed
/// ([`Failure`]). Both variants carry the [`RequestOptions`] that produced them.
/// Accessors for fields that don't apply to the current variant return `None`.
#[derive(Debug)]
pub enum Outcome<B = ResponseBody> {
    Success(Success<B>),
    Failure(Failure),
}

#[derive(Debug)]
pub struct Success<B = ResponseBody> {
    options: Arc<RequestOptions>,
    original_content_encoding: Option<String>,
    body: Option<B>,
    headers: Headers,
    status: u16,
    reason_phrase: Option<String>,
    content_type: Option<ContentType>,
}

#[derive(Debug)]
pub struct Failure {
    options: Arc<RequestOptions>,
    error: anyhow::Error,
}

impl<B> Outcome<B> {
    pub fn failure<O, E>(
        options: O,
        error: E,
    ) -> Self
        where O: Into<Arc<RequestOptions>>,
              E: Into<anyhow::Error>,
    {
        Outcome::Failure(Failure {
            options: options.into(),
            error: error.into(),
        })
    }

    pub fn success<O: Into<Arc<RequestOptions>>>(
        options: O,
        original_content_encoding: Option<String>,
        body: Option<B>,
        headers: Headers,
        status: u16,
        reason_phrase: Option<String>,
        content_type: Option<ContentType>,
    ) -> Self {
        Outcome::Success(Success {
            options: options.into(),
            original_content_encoding,
            body,
            headers,
            status,
            reason_phrase,
            content_type,
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    pub fn options(&self) -> &Arc<RequestOptions> {
        match self {
            Outcome::Success(success) => &success.options,
            Outcome::Failure(failure) => &failure.options,
        }
    }

    pub fn error(&self) -> Option<&anyhow::Error> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(&failure.error),
        }
    }

    pub fn body(&self) -> Option<&B> {
        self.as_success().and_then(Success::body)
    }

    pub fn headers(&self) -> Option<&Headers> {
        self.as_success().map(Success::headers)
    }

    pub fn status(&self) -> Option<u16> {
        self.as_success().map(Success::status)
    }

    pub fn reason_phrase(&self) -> Option<&str> {
        self.as_success().and_then(Success::reason_phrase)
    }

    pub fn content_type(&self) -> Option<&ContentType> {
        self.as_success().and_then(Success::content_type)
    }

    pub fn original_content_encoding(&self) -> Option<&str> {
        self.as_success().and_then(Success::original_content_encoding)
    }

    pub fn as_success(&self) -> Option<&Success<B>> {
        match self {
            Outcome::Success(success) => Some(success),
            Outcome::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> Result<Success<B>, Failure> {
        match self {
            Outcome::Success(success) => Ok(success),
            Outcome::Failure(failure) => Err(failure),
        }
    }

    /// Converts the payload, keeping every other recorded attribute.
    pub fn map_body<C, F>(self, f: F) -> Outcome<C>
        where F: FnOnce(B) -> C
    {
        match self {
            Outcome::Success(success) => Outcome::Success(Success {
                options: success.options,
                original_content_encoding: success.original_content_encoding,
                body: success.body.map(f),
                headers: success.headers,
                status: success.status,
                reason_phrase: success.reason_phrase,
                content_type: success.content_type,
            }),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Turns a response with a status outside `200..=399` into a failure.
    ///
    /// The failure keeps only status, reason phrase and URL (in [`StatusError`]);
    /// body and headers are dropped. Inspect [`Outcome::status`] first when an
    /// error payload is needed.
    pub fn error_for_status(self) -> Self {
        match self {
            Outcome::Success(success) if !(200..400).contains(&success.status) => {
                let error = StatusError::new(
                    success.status,
                    success.reason_phrase.clone(),
                    success.options.url().as_str(),
                );
                Outcome::Failure(Failure {
                    options: success.options,
                    error: error.into(),
                })
            }
            other => other,
        }
    }
}

impl<B> Success<B> {
    pub fn options(&self) -> &Arc<RequestOptions> {
        &self.options
    }

    pub fn original_content_encoding(&self) -> Option<&str> {
        self.original_content_encoding.as_deref()
    }

    pub fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    pub fn into_body(self) -> Option<B> {
        self.body
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn reason_phrase(&self) -> Option<&str> {
        self.reason_phrase.as_deref()
    }

    pub fn content_type(&self) -> Option<&ContentType> {
        self.content_type.as_ref()
    }
}

impl Failure {
    pub fn options(&self) -> &Arc<RequestOptions> {
        &self.options
    }

    pub fn error(&self) -> &anyhow::Error {
        &self.error
    }

    pub fn into_error(self) -> anyhow::Error {
        self.error
    }
}
