//! Client for the Vitibrasil portal.

use std::time::Duration;

use bytes::Bytes;
use http::Uri;
use http_body_util::{BodyExt, Empty};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::debug;

use crate::error::Error;
use crate::params::ResolvedParameters;

pub const DEFAULT_PORTAL_URL: &str = "http://vitibrasil.cnpuv.embrapa.br/index.php";

/// Builds the page URL for a resolved request: `<base>?opcao=..&ano=..`.
pub fn full_url(base: &str, params: &ResolvedParameters) -> String {
    format!("{base}?{}", params.to_query())
}

/// Fetches pages from the portal over plain HTTP/1.1.
///
/// Cheap to share: the underlying client pools connections.
#[derive(Clone, Debug)]
pub struct Portal {
    base_url: String,
    timeout: Duration,
    client: Client<HttpConnector, Empty<Bytes>>,
}

impl Portal {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self { base_url: base_url.into(), timeout, client }
    }

    pub fn url_for(&self, params: &ResolvedParameters) -> String {
        full_url(&self.base_url, params)
    }

    /// Downloads the page for `params` and returns it as text.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub async fn fetch(&self, params: &ResolvedParameters) -> Result<String, Error> {
        let url = self.url_for(params);
        let uri: Uri = url
            .parse()
            .map_err(|source| Error::InvalidUrl { url: url.clone(), source })?;

        debug!(%uri, "fetching portal page");

        let body = tokio::time::timeout(self.timeout, self.get(uri))
            .await
            .map_err(|_| Error::Timeout(self.timeout))??;

        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    async fn get(&self, uri: Uri) -> Result<Bytes, Error> {
        let res = self.client.get(uri).await?;
        if !res.status().is_success() {
            return Err(Error::UpstreamStatus(res.status()));
        }
        Ok(res.into_body().collect().await?.to_bytes())
    }
}
