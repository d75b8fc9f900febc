use crate::config::ApiConfig;
use crate::endpoint::Endpoint;
use crate::error::{FetchError, Result};
use crate::fetcher::DataFetcher;
use log::debug;
use reqwest::Client;

/// `DataFetcher` over HTTP. Works natively and on `wasm32`, where reqwest
/// delegates to the browser's fetch API.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
    config: ApiConfig,
}

impl HttpFetcher {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout());
        let client = builder.build().map_err(|e| FetchError::Network {
            url: config.base_url.clone(),
            message: format!("failed to build HTTP client: {e}"),
        })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

impl DataFetcher for HttpFetcher {
    async fn get_text(&self, endpoint: &Endpoint) -> Result<String> {
        let url = self.config.url_for(&endpoint.path());
        debug!("GET {url}");

        let mut request = self.client.get(&url);
        if endpoint.is_chart_request() {
            request = request.header("X-Requested-With", "XMLHttpRequest");
        }

        let response = request.send().await.map_err(|e| FetchError::Network {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network {
                url,
                message: format!("HTTP {status}"),
            });
        }

        response.text().await.map_err(|e| FetchError::Network {
            url,
            message: format!("failed to read body: {e}"),
        })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[tokio::test]
    async fn test_unreachable_server_is_a_network_error() {
        let mut config = ApiConfig::new("http://127.0.0.1:9");
        config.timeout_secs = 2;
        let fetcher = HttpFetcher::new(config).unwrap();

        let err = fetcher.list_stations().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Network);
        assert_eq!(err.url(), "http://127.0.0.1:9/api/stations/");
    }
}
