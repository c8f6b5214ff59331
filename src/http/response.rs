//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::StatusCode;
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

/// An outgoing HTTP response.
///
/// ```rust
/// use http::header::{CONTENT_TYPE, HeaderValue};
/// use http::StatusCode;
/// use vitibrasil::http::Response;
///
/// Response::text("ok");
/// Response::status(StatusCode::NOT_FOUND);
/// Response::builder()
///     .status(StatusCode::UNPROCESSABLE_ENTITY)
///     .json(br#"{"error":"Validation failed"}"#.to_vec());
/// ```
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: Bytes,
}

impl Response {
    /// `200 OK`, `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().text(body)
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self::builder().status(code).no_body()
    }

    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { status: StatusCode::OK }
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Converts into the hyper response written to the connection.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(self.body));
        *res.status_mut() = self.status;
        if let Some(content_type) = self.content_type {
            res.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        res
    }
}

/// Fluent builder for [`Response`]. Defaults to `200 OK`.
pub struct ResponseBuilder {
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn json(self, body: Vec<u8>) -> Response {
        self.finish(JSON, body.into())
    }

    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish(TEXT, body.into().into())
    }

    pub fn no_body(self) -> Response {
        Response { status: self.status, content_type: None, body: Bytes::new() }
    }

    fn finish(self, content_type: &'static str, body: Bytes) -> Response {
        Response { status: self.status, content_type: Some(content_type), body }
    }
}

/// Conversion into an HTTP [`Response`].
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::status(self) }
}

/// A serializable body sent as JSON with the given status.
///
/// `pretty` selects indented output. Serialization failures become a bare
/// `500`.
pub struct Json<T> {
    pub status: StatusCode,
    pub body: T,
    pub pretty: bool,
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&self.body)
        } else {
            serde_json::to_vec(&self.body)
        };
        match bytes {
            Ok(bytes) => Response::builder().status(self.status).json(bytes),
            Err(e) => {
                error!("response serialization failed: {e}");
                Response::status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_sets_content_type() {
        let res = Response::text("ok");
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"ok");
        assert_eq!(res.into_inner().headers()[CONTENT_TYPE], TEXT);
    }

    #[test]
    fn json_status_reaches_the_wire() {
        let res = Response::builder()
            .status(StatusCode::UNPROCESSABLE_ENTITY)
            .json(b"{}".to_vec())
            .into_inner();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(res.headers()[CONTENT_TYPE], JSON);
    }

    #[test]
    fn bare_status_has_no_content_type() {
        let res = Response::status(StatusCode::NOT_FOUND).into_inner();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(res.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn json_respects_pretty_flag() {
        let body = serde_json::json!({ "a": 1 });
        let compact = Json { status: StatusCode::OK, body: &body, pretty: false }.into_response();
        assert_eq!(compact.body(), br#"{"a":1}"#);

        let pretty = Json { status: StatusCode::OK, body: &body, pretty: true }.into_response();
        assert_eq!(pretty.body(), b"{\n  \"a\": 1\n}");
    }
}
