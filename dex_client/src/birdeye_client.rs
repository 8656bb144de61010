use async_trait::async_trait;
use config_manager::BirdEyeConfig;
use std::collections::HashMap;
use tracing::{debug, error, info};

use crate::address::{validate_address, validate_addresses};
use crate::error::{PriceClientError, Result};
use crate::normalizer::{normalize_prices, normalize_token_overview, unwrap_envelope};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::types::{PriceInfo, TokenOverview};
use crate::PriceClient;

/// BirdEye API client
#[derive(Debug, Clone)]
pub struct BirdEyeClient<T = ReqwestTransport> {
    config: BirdEyeConfig,
    transport: T,
}

impl BirdEyeClient<ReqwestTransport> {
    pub fn new(config: BirdEyeConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.request_timeout_seconds)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> BirdEyeClient<T> {
    pub fn with_transport(config: BirdEyeConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Get the BirdEye client configuration
    pub fn config(&self) -> &BirdEyeConfig {
        &self.config
    }

    fn request(&self, path: &str) -> HttpRequest {
        HttpRequest::get(format!("{}{}", self.config.api_base_url, path))
            .header("accept", "application/json")
            .header("x-chain", self.config.chain.as_str())
            .header("X-API-KEY", self.config.api_key.as_str())
    }

    async fn call(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            error!("BirdEye request to {} failed with HTTP {}", url, response.status);
            return Err(PriceClientError::invalid_tokens(format!(
                "BirdEye returned HTTP {}",
                response.status
            )));
        }

        Ok(response)
    }

    /// Prices and liquidity for every address via the multi-price endpoint.
    /// Fails as a whole if any token comes back without both figures.
    pub async fn fetch_prices(&self, token_addresses: &[String]) -> Result<HashMap<String, PriceInfo>> {
        validate_addresses(token_addresses)?;

        debug!("Fetching BirdEye prices for {} tokens", token_addresses.len());

        let request = self
            .request("/defi/multi_price")
            .query("list_address", token_addresses.join(","));
        let response = self.call(request).await?;

        let prices = normalize_prices(unwrap_envelope(&response.body)?, token_addresses)?;

        info!("Retrieved BirdEye prices for {} tokens", prices.len());
        Ok(prices)
    }

    pub async fn fetch_token_overview(&self, address: &str) -> Result<TokenOverview> {
        validate_address(address)?;

        debug!("Fetching BirdEye token overview for {}", address);

        let request = self.request("/defi/token_overview").query("address", address);
        let response = self.call(request).await?;

        let overview = normalize_token_overview(unwrap_envelope(&response.body)?)?;

        info!("Retrieved BirdEye overview for {} ({})", address, overview.symbol);
        Ok(overview)
    }
}

#[async_trait]
impl<T: HttpTransport> PriceClient for BirdEyeClient<T> {
    fn source_name(&self) -> &'static str {
        "birdeye"
    }

    async fn fetch_prices(&self, token_addresses: &[String]) -> Result<HashMap<String, PriceInfo>> {
        BirdEyeClient::fetch_prices(self, token_addresses).await
    }

    async fn fetch_token_overview(&self, address: &str) -> Result<TokenOverview> {
        BirdEyeClient::fetch_token_overview(self, address).await
    }
}
