// Price clients for BirdEye and DexScreener
// Normalizes both APIs into exact-decimal price, liquidity and overview records

pub mod address;
pub mod birdeye_client;
pub mod dexscreener_client;
pub mod error;
pub mod normalizer;
pub mod pool;
pub mod transport;
pub mod types;

// Re-export configs from config_manager
pub use config_manager::{BirdEyeConfig, DexScreenerConfig, SOL_MINT};

pub use address::{is_valid_address, validate_address, validate_addresses};
pub use birdeye_client::BirdEyeClient;
pub use dexscreener_client::DexScreenerClient;
pub use error::{PriceClientError, Result, TransportError};
pub use pool::select_best_pool;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{PairLiquidity, PairToken, PriceInfo, RawNumber, TokenOverview, TradingPair};

use async_trait::async_trait;
use std::collections::HashMap;

/// Common surface of every price source
#[async_trait]
pub trait PriceClient: Send + Sync {
    fn source_name(&self) -> &'static str;

    /// Prices for all addresses, or an error; never a partial map.
    async fn fetch_prices(&self, token_addresses: &[String]) -> Result<HashMap<String, PriceInfo>>;

    async fn fetch_token_overview(&self, address: &str) -> Result<TokenOverview>;
}
