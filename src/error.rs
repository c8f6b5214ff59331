//! Unified error type.

use std::time::Duration;

use thiserror::Error;

/// Infrastructure failures: the socket, the portal, the portal's page.
///
/// Bad query parameters are not an `Error`; they are a
/// [`ValidationError`](crate::params::ValidationError) and end up as a `422`
/// response.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid portal url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: http::uri::InvalidUri,
    },

    #[error("portal request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    #[error("portal response could not be read: {0}")]
    Body(#[from] hyper::Error),

    #[error("portal answered with status {0}")]
    UpstreamStatus(http::StatusCode),

    #[error("portal did not answer within {0:?}")]
    Timeout(Duration),

    #[error("portal page has no `{0}` element")]
    MissingTable(&'static str),
}
