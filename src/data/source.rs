use std::future::Future;

use reqwest::Client;
use tracing::debug;

use crate::error::DataError;

/// Raw HTTP response: status code and body bytes
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Fetched {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Something that can GET a URL
///
/// Only transport failures are errors; any HTTP status is returned as-is.
pub trait DataSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Fetched, DataError>> + Send;
}

/// [`DataSource`] backed by a reqwest client
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl DataSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<Fetched, DataError> {
        debug!("GET {}", url);
        let network = |e: reqwest::Error| DataError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(network)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network)?;

        debug!("{} -> {} ({} bytes)", url, status, body.len());
        Ok(Fetched {
            status,
            body: body.to_vec(),
        })
    }
}
