//! Incoming HTTP request type.

/// An incoming request, reduced to what the endpoints read.
///
/// Every route is a `GET` addressed by a fixed path, so the router has
/// already consumed the method and path, and bodies are never collected.
pub struct Request {
    query: Option<String>,
}

impl Request {
    pub(crate) fn from_parts(parts: &http::request::Parts) -> Self {
        Self { query: parts.uri.query().map(str::to_owned) }
    }

    /// Raw query string without the leading `?`. Empty when there is none.
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
pub(crate) fn test_request(uri: &str) -> Request {
    let (parts, ()) = http::Request::builder().uri(uri).body(()).unwrap().into_parts();
    Request::from_parts(&parts)
}
