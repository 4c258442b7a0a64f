use std::fmt::{self, Display, Formatter};

/// Raised by [`Outcome::error_for_status`](crate::Outcome::error_for_status)
/// when the server answered with a client or server error status.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StatusError {
    status: u16,
    reason_phrase: Option<String>,
    url: String,
}

impl StatusError {
    pub fn new<S: Into<String>>(
        status: u16,
        reason_phrase: Option<String>,
        url: S,
    ) -> Self {
        StatusError {
            status,
            reason_phrase,
            url: url.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn reason_phrase(&self) -> Option<&str> {
        self.reason_phrase.as_deref()
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Display for StatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        match &self.reason_phrase {
            Some(reason) => write!(f, "{} {} for url ({})", self.status, reason, self.url),
            None => write!(f, "{} for url ({})", self.status, self.url),
        }
    }
}

impl std::error::Error for StatusError {}
