use async_trait::async_trait;
use config_manager::DexScreenerConfig;
use std::collections::HashMap;
use tracing::{debug, error, info};

use crate::address::{is_valid_address, validate_address, validate_addresses};
use crate::error::{PriceClientError, Result};
use crate::normalizer::{normalize_prices, normalize_token_overview};
use crate::pool::{extract_pairs, select_best_pool};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::types::{PriceInfo, TokenOverview, TradingPair};
use crate::PriceClient;

/// DexScreener API client. No API key is needed.
#[derive(Debug, Clone)]
pub struct DexScreenerClient<T = ReqwestTransport> {
    config: DexScreenerConfig,
    transport: T,
}

impl DexScreenerClient<ReqwestTransport> {
    /// Create a new DexScreener client
    pub fn new(config: DexScreenerConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.request_timeout_seconds)?;
        Self::with_transport(config, transport)
    }
}

impl<T: HttpTransport> DexScreenerClient<T> {
    /// Fails with `InvalidAddress` if the configured reference mint is not a
    /// valid address.
    pub fn with_transport(config: DexScreenerConfig, transport: T) -> Result<Self> {
        if !is_valid_address(&config.reference_mint) {
            return Err(PriceClientError::InvalidAddress {
                address: config.reference_mint.clone(),
            });
        }

        Ok(Self { config, transport })
    }

    /// Get configuration
    pub fn config(&self) -> &DexScreenerConfig {
        &self.config
    }

    fn tokens_url(&self, joined_addresses: &str) -> String {
        format!(
            "{}/latest/dex/tokens/{}",
            self.config.api_base_url, joined_addresses
        )
    }

    async fn call(&self, url: String) -> Result<HttpResponse> {
        debug!("🔍 Querying DexScreener: {}", url);

        let response = self.transport.send(HttpRequest::get(url.as_str())).await?;

        if !response.is_success() {
            error!("DexScreener request to {} failed with HTTP {}", url, response.status);
            return Err(PriceClientError::invalid_tokens(format!(
                "DexScreener returned HTTP {}",
                response.status
            )));
        }

        Ok(response)
    }

    /// Single-token lookup
    async fn call_api(&self, token_address: &str) -> Result<HttpResponse> {
        validate_address(token_address)?;
        self.call(self.tokens_url(token_address)).await
    }

    /// Multi-token lookup, addresses joined into the path
    async fn call_api_bulk(&self, token_addresses: &[String]) -> Result<HttpResponse> {
        validate_addresses(token_addresses)?;
        self.call(self.tokens_url(&token_addresses.join(","))).await
    }

    /// Prices and liquidity for every address in one bulk request.
    /// Fails as a whole if any token comes back without both figures.
    pub async fn fetch_prices(&self, token_addresses: &[String]) -> Result<HashMap<String, PriceInfo>> {
        let response = self.call_api_bulk(token_addresses).await?;
        let prices = normalize_prices(&response.body, token_addresses)?;

        info!("📊 Retrieved DexScreener prices for {} tokens", prices.len());
        Ok(prices)
    }

    pub async fn fetch_token_overview(&self, address: &str) -> Result<TokenOverview> {
        let response = self.call_api(address).await?;
        let overview = normalize_token_overview(&response.body)?;

        info!("📊 Retrieved DexScreener overview for {} ({})", address, overview.symbol);
        Ok(overview)
    }

    /// Deepest pool trading `address` against the configured reference mint.
    /// `Ok(None)` means the token has no such pool.
    pub async fn fetch_best_pool(&self, address: &str) -> Result<Option<TradingPair>> {
        let response = self.call_api(address).await?;
        let pairs = extract_pairs(&response.body, address)?;

        debug!("DexScreener returned {} pairs for {}", pairs.len(), address);

        Ok(select_best_pool(&pairs, address, &self.config.reference_mint).cloned())
    }
}

#[async_trait]
impl<T: HttpTransport> PriceClient for DexScreenerClient<T> {
    fn source_name(&self) -> &'static str {
        "dexscreener"
    }

    async fn fetch_prices(&self, token_addresses: &[String]) -> Result<HashMap<String, PriceInfo>> {
        DexScreenerClient::fetch_prices(self, token_addresses).await
    }

    async fn fetch_token_overview(&self, address: &str) -> Result<TokenOverview> {
        DexScreenerClient::fetch_token_overview(self, address).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_url() {
        let client = DexScreenerClient::new(DexScreenerConfig::default()).unwrap();
        assert_eq!(
            client.tokens_url("a,b"),
            "https://api.dexscreener.com/latest/dex/tokens/a,b"
        );
    }

    #[test]
    fn test_rejects_invalid_reference_mint() {
        let config = DexScreenerConfig {
            reference_mint: "SOL".to_string(),
            ..DexScreenerConfig::default()
        };
        assert!(matches!(
            DexScreenerClient::new(config),
            Err(PriceClientError::InvalidAddress { .. })
        ));
    }
}
