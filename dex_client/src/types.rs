use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current price and liquidity of one token as reported by one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceInfo {
    pub price: Decimal,
    pub liquidity: Decimal,
}

impl PriceInfo {
    pub fn new(price: Decimal, liquidity: Decimal) -> Self {
        Self { price, liquidity }
    }
}

/// Snapshot of a token's market state at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOverview {
    pub price: Decimal,
    pub symbol: String,
    pub decimals: u8,
    #[serde(rename = "lastTradeUnixTime")]
    pub last_trade_unix_time: i64,
    pub liquidity: Decimal,
    pub supply: Decimal,
}

impl TokenOverview {
    pub fn last_trade_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.last_trade_unix_time, 0).single()
    }
}

/// A number that the APIs send either as a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Text(String),
    Number(serde_json::Number),
}

impl RawNumber {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawNumber::Text(text) => text.trim().parse::<f64>().ok(),
            RawNumber::Number(number) => number.as_f64(),
        }
    }
}

impl std::fmt::Display for RawNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawNumber::Text(text) => write!(f, "{}", text),
            RawNumber::Number(number) => write!(f, "{}", number),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairToken {
    pub address: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairLiquidity {
    pub usd: Option<RawNumber>,
    pub base: Option<RawNumber>,
    pub quote: Option<RawNumber>,
}

/// Trading pair as returned by DexScreener, reduced to what pool selection needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingPair {
    #[serde(rename = "pairAddress")]
    pub pair_address: Option<String>,
    #[serde(rename = "dexId")]
    pub dex_id: Option<String>,
    #[serde(rename = "baseToken")]
    pub base_token: PairToken,
    #[serde(rename = "quoteToken")]
    pub quote_token: PairToken,
    #[serde(rename = "priceUsd")]
    pub price_usd: Option<RawNumber>,
    pub liquidity: Option<PairLiquidity>,
}

impl TradingPair {
    /// Raw USD liquidity figure, if the pair reports one
    pub fn raw_liquidity_usd(&self) -> Option<&RawNumber> {
        self.liquidity.as_ref().and_then(|liquidity| liquidity.usd.as_ref())
    }

    /// USD liquidity used for ranking pools. A missing or null figure counts
    /// as zero, an unparsable one as `None`.
    pub fn liquidity_usd(&self) -> Option<f64> {
        match self.raw_liquidity_usd() {
            Some(raw) => raw.as_f64(),
            None => Some(0.0),
        }
    }
}
