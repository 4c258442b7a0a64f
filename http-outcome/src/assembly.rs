use std::sync::Arc;

use itertools::Itertools;
use reqwest::blocking::Response;
use reqwest::header::{HeaderMap, CONTENT_ENCODING, CONTENT_TYPE};

use crate::body::ResponseBody;
use crate::config::{Config, DETAIL};
use crate::content_type::ContentType;
use crate::outcome::{Headers, Outcome};
use crate::request_options::RequestOptions;

/// Raw attributes of a response, before body decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseParts {
    pub status: u16,
    pub reason_phrase: Option<String>,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

/// Producer-side helper that turns finished responses into [`Outcome`]s,
/// decoding the body the way the request options ask for.
#[derive(Debug, Default)]
pub struct ResponseAssembler {
    config: Config,
}

impl ResponseAssembler {
    pub fn new(config: Config) -> Self {
        ResponseAssembler { config }
    }

    pub fn assemble(
        &self,
        options: Arc<RequestOptions>,
        parts: ResponseParts,
    ) -> Outcome {
        let ResponseParts { status, reason_phrase, headers, body } = parts;

        let content_type = header_value(&headers, CONTENT_TYPE.as_str())
            .and_then(|raw| match ContentType::parse(raw) {
                Ok(content_type) => Some(content_type),
                Err(e) => {
                    self.config.logln(DETAIL, format!("ignoring content type: {}", e));
                    None
                }
            });
        let original_content_encoding = header_value(&headers, CONTENT_ENCODING.as_str())
            .map(str::to_owned);

        let body_type = options.body_type();
        let charset = content_type.as_ref().and_then(ContentType::charset);
        let body = match body.filter(|raw| !raw.is_empty()) {
            Some(raw) => {
                if self.config.shows_details() {
                    self.config.logln(DETAIL, format!("decoding {} byte body as {:?}", raw.len(), body_type));
                }
                match ResponseBody::decode(raw, body_type, charset) {
                    Ok(decoded) => Some(decoded),
                    Err(e) => {
                        let error = e.context(format!("malformed response from {}", options.url()));
                        self.config.logln(DETAIL, format!("{:#}", error));
                        return Outcome::failure(options, error);
                    }
                }
            }
            None => None,
        };

        Outcome::success(
            options,
            original_content_encoding,
            body,
            headers,
            status,
            reason_phrase,
            content_type,
        )
    }

    /// Converts the result of sending a blocking request. The response body is
    /// read to the end before the outcome is built.
    pub fn from_blocking(
        &self,
        options: Arc<RequestOptions>,
        response: reqwest::Result<Response>,
    ) -> Outcome {
        self.config.log(DETAIL, format!("{} {}... ", options.method(), options.url()));
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                self.config.logln(DETAIL, &e);
                return Outcome::failure(options, e);
            }
        };

        let status = response.status();
        self.config.logln(DETAIL, status);
        let headers = flatten_headers(response.headers());
        let body = match response.bytes() {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                let error = anyhow::Error::new(e).context("error reading response body");
                self.config.logln(DETAIL, format!("{:#}", error));
                return Outcome::failure(options, error);
            }
        };

        self.assemble(
            options,
            ResponseParts {
                status: status.as_u16(),
                reason_phrase: status.canonical_reason().map(str::to_owned),
                headers,
                body: Some(body),
            },
        )
    }
}

/// Exact-case match first; among case variants the lexicographically smallest key wins.
fn header_value<'a>(
    headers: &'a Headers,
    name: &str,
) -> Option<&'a str> {
    headers.get(name)
        .or_else(|| headers.iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .min_by_key(|(key, _)| key.as_str())
            .map(|(_, value)| value))
        .map(String::as_str)
}

fn flatten_headers(headers: &HeaderMap) -> Headers {
    headers.keys()
        .map(|name| {
            let value = headers.get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .join(", ");
            (name.as_str().to_owned(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use maplit::hashmap;
    use serde_json::json;

    use crate::body::BodyType;
    use crate::test_utils::options;

    use super::*;

    fn json_options() -> Arc<RequestOptions> {
        Arc::new(
            RequestOptions::get("http://x/").unwrap()
                .with_body_type(BodyType::Json)
        )
    }

    #[test]
    fn should_decode_the_body_per_options() {
        let opts = json_options();
        let parts = ResponseParts {
            status: 200,
            reason_phrase: Some("OK".to_string()),
            headers: hashmap! {
                "Content-Type".to_string() => "application/json; charset=utf-8".to_string(),
                "Content-Encoding".to_string() => "gzip".to_string(),
            },
            body: Some(br#"{"id": 7}"#.to_vec()),
        };

        let outcome = ResponseAssembler::default().assemble(opts.clone(), parts);

        assert_eq!(outcome.status(), Some(200));
        assert_eq!(outcome.body(), Some(&ResponseBody::Json(json!({ "id": 7 }))));
        assert_eq!(outcome.content_type().unwrap().mime_type(), "application/json");
        assert_eq!(outcome.original_content_encoding(), Some("gzip"));
        assert_eq!(outcome.headers().unwrap().len(), 2);
        assert!(Arc::ptr_eq(outcome.options(), &opts));
    }

    #[test]
    fn should_use_the_charset_of_the_content_type() {
        let parts = ResponseParts {
            status: 200,
            headers: hashmap! {
                "content-type".to_string() => "text/plain; charset=iso-8859-1".to_string(),
            },
            body: Some(vec![0x66, 0xfc, 0x72]),
            ..ResponseParts::default()
        };

        let outcome = ResponseAssembler::default().assemble(options("GET", "http://x/"), parts);

        assert_eq!(outcome.body().and_then(ResponseBody::as_text), Some("für"));
    }

    #[test]
    fn should_decode_windows_1252_pages() {
        let parts = ResponseParts {
            status: 200,
            headers: hashmap! {
                "Content-Type".to_string() => "text/html; charset=windows-1252".to_string(),
            },
            body: Some(b"<p>hello</p>".to_vec()),
            ..ResponseParts::default()
        };

        let outcome = ResponseAssembler::default().assemble(options("GET", "http://x/"), parts);

        assert!(outcome.is_success());
        assert_eq!(outcome.status(), Some(200));
        assert_eq!(outcome.body().and_then(ResponseBody::as_text), Some("<p>hello</p>"));
    }

    #[test]
    fn exact_case_header_should_win_over_case_variants() {
        let headers = hashmap! {
            "Content-Type".to_string() => "text/plain; charset=us-ascii".to_string(),
            "content-type".to_string() => "application/json".to_string(),
        };

        for _ in 0..10 {
            assert_eq!(header_value(&headers, "content-type"), Some("application/json"));
        }
    }

    #[test]
    fn case_variant_lookup_should_be_stable() {
        let headers = hashmap! {
            "Content-Type".to_string() => "text/plain".to_string(),
            "CONTENT-TYPE".to_string() => "text/html".to_string(),
        };

        for _ in 0..10 {
            assert_eq!(header_value(&headers, "content-type"), Some("text/html"));
        }
        assert_eq!(header_value(&headers, "content-length"), None);
    }

    #[test]
    fn empty_bodies_should_be_absent() {
        let parts = ResponseParts {
            status: 204,
            body: Some(vec![]),
            ..ResponseParts::default()
        };

        let outcome = ResponseAssembler::default().assemble(json_options(), parts);

        assert!(outcome.is_success());
        assert_eq!(outcome.body(), None);
        assert_eq!(outcome.headers(), Some(&Headers::new()));
        assert_eq!(outcome.content_type(), None);
    }

    #[test]
    fn malformed_bodies_should_become_failures() {
        let parts = ResponseParts {
            status: 200,
            body: Some(vec![0xc3, 0x28]),
            ..ResponseParts::default()
        };

        let outcome = ResponseAssembler::new(Config::new(0, true))
            .assemble(options("GET", "http://x/"), parts);

        assert!(outcome.is_failure());
        assert_eq!(outcome.status(), None);
        assert_eq!(
            format!("{:#}", outcome.error().unwrap()),
            "malformed response from http://x/: response body is not valid UTF-8"
        );
    }

    #[test]
    fn unparseable_content_types_should_be_ignored() {
        let parts = ResponseParts {
            status: 200,
            headers: hashmap! { "Content-Type".to_string() => "garbage".to_string() },
            body: Some(b"hi".to_vec()),
            ..ResponseParts::default()
        };

        let outcome = ResponseAssembler::default().assemble(options("GET", "http://x/"), parts);

        assert_eq!(outcome.content_type(), None);
        assert_eq!(outcome.body().and_then(ResponseBody::as_text), Some("hi"));
        assert_eq!(outcome.headers().unwrap()["Content-Type"], "garbage");
    }

    #[test]
    fn should_join_repeated_headers() {
        let mut headers = HeaderMap::new();
        headers.append("vary", "accept".parse().unwrap());
        headers.append("vary", "origin".parse().unwrap());
        headers.insert("etag", "\"abc\"".parse().unwrap());

        let result = flatten_headers(&headers);

        assert_eq!(result, hashmap! {
            "vary".to_string() => "accept, origin".to_string(),
            "etag".to_string() => "\"abc\"".to_string(),
        });
    }
}
