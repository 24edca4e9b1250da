//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Build a [`Response`] in your handler and return it, or return anything
//! that implements [`IntoResponse`]: a [`Status`], or a `Result` whose both
//! sides convert.

use bytes::Bytes;
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

use crate::status::Status;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Content-type values the service emits.
#[derive(Clone, Copy, Debug)]
enum ContentType {
    HalJson, // application/hal+json
    Text,    // text/plain; charset=utf-8
}

impl ContentType {
    fn as_str(self) -> &'static str {
        match self {
            Self::HalJson => "application/hal+json",
            Self::Text    => "text/plain; charset=utf-8",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use todos::{Response, Status};
///
/// Response::text("ok");
/// Response::status(Status::NoContent);
///
/// Response::builder()
///     .status(Status::Created)
///     .header("location", "/api/v1/todos/65f1c0a2e4b0a1b2c3d4e5f6")
///     .hal(&serde_json::json!({ "title": "x" }));
/// ```
#[derive(Debug)]
pub struct Response {
    body: Vec<u8>,
    headers: Vec<(String, String)>,
    status: u16,
}

impl Response {
    /// `200 OK` with `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().text(body)
    }

    /// Response with no body.
    pub fn status(code: Status) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code.into() }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok.into() }
    }

    pub fn status_code(&self) -> u16 { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Converts into the hyper-facing response. A header that `http` rejects
    /// turns the whole response into a bare 500.
    pub(crate) fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(Full::new(Bytes::from(self.body))).unwrap_or_else(|e| {
            error!("invalid response: {e}");
            let mut res = http::Response::new(Full::default());
            *res.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
            res
        })
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
/// Terminated by a typed body method.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: u16,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code.into();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish(ContentType::Text, body.into().into_bytes())
    }

    /// Terminate with `value` serialized as `application/hal+json`.
    ///
    /// Serialization failure is a bug in the representation type, not in the
    /// request, so it yields a 500.
    pub fn hal<T: Serialize>(self, value: &T) -> Response {
        match serde_json::to_vec(value) {
            Ok(body) => self.finish(ContentType::HalJson, body),
            Err(e) => {
                error!("failed to serialize representation: {e}");
                Response::status(Status::InternalServerError)
            }
        }
    }

    fn finish(self, content_type: ContentType, body: Vec<u8>) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.as_str().to_owned())];
        headers.extend(self.headers);
        Response { body, headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers. Error
/// enums implement it too, so handlers can be written with `?` and return
/// `Result<Response, MyError>`.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

/// Return a [`Status`] directly from a handler: `return Status::NotFound`
impl IntoResponse for Status {
    fn into_response(self) -> Response { Response::status(self) }
}

impl<T: IntoResponse, E: IntoResponse> IntoResponse for Result<T, E> {
    fn into_response(self) -> Response {
        match self {
            Ok(v) => v.into_response(),
            Err(e) => e.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_puts_content_type_first() {
        let res = Response::builder()
            .status(Status::Created)
            .header("location", "/todos/1")
            .text("made");

        assert_eq!(res.status_code(), 201);
        assert_eq!(res.header("Content-Type"), Some("text/plain; charset=utf-8"));
        assert_eq!(res.header("LOCATION"), Some("/todos/1"));
    }

    #[test]
    fn hal_serializes_value() {
        let res = Response::builder().hal(&serde_json::json!({ "title": "a" }));

        assert_eq!(res.status_code(), 200);
        assert_eq!(res.header("content-type"), Some("application/hal+json"));
        assert_eq!(res.body(), br#"{"title":"a"}"#);
    }

    #[test]
    fn result_converts_either_side() {
        let ok: Result<Status, Status> = Ok(Status::NoContent);
        let err: Result<Status, Status> = Err(Status::NotFound);

        assert_eq!(ok.into_response().status_code(), 204);
        assert_eq!(err.into_response().status_code(), 404);
    }

    #[test]
    fn into_http_keeps_status_and_headers() {
        let res = Response::builder().status(Status::Created).header("location", "/x").text("hi");
        let http = res.into_http();

        assert_eq!(http.status(), http::StatusCode::CREATED);
        assert_eq!(http.headers()["location"], "/x");
    }

    #[test]
    fn invalid_header_becomes_500() {
        let res = Response::builder().header("bad header", "x").text("hi");

        assert_eq!(res.into_http().status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
