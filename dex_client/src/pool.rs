use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{PriceClientError, Result};
use crate::types::TradingPair;

/// Picks the pair with the deepest USD liquidity among pairs whose base token
/// is `target_address` and quote token is `reference_address`.
///
/// The running maximum starts below zero so a matching pair with zero
/// liquidity still wins over no pair at all. Ties go to the first pair seen.
/// Returns `None` when nothing matches.
pub fn select_best_pool<'a>(
    pairs: &'a [TradingPair],
    target_address: &str,
    reference_address: &str,
) -> Option<&'a TradingPair> {
    let mut best: Option<&TradingPair> = None;
    let mut max_liquidity_usd = -1.0_f64;

    for pair in pairs {
        if pair.base_token.address != target_address
            || pair.quote_token.address != reference_address
        {
            continue;
        }

        let Some(liquidity_usd) = pair.liquidity_usd() else {
            if let Some(raw) = pair.raw_liquidity_usd() {
                warn!(
                    "Skipping pair {:?} with unparsable USD liquidity {}",
                    pair.pair_address, raw
                );
            }
            continue;
        };

        if liquidity_usd > max_liquidity_usd {
            max_liquidity_usd = liquidity_usd;
            best = Some(pair);
        }
    }

    match best {
        Some(pair) => debug!(
            "Best pool for {} against {}: {:?} (${})",
            target_address, reference_address, pair.pair_address, max_liquidity_usd
        ),
        None => debug!(
            "No pool for {} against {} among {} pairs",
            target_address,
            reference_address,
            pairs.len()
        ),
    }

    best
}

/// Finds the trading-pair list in a DexScreener body: a `pairs` member at
/// the top level, a `pairs` member under the token's own entry, or a bare
/// array. `pairs: null` reads as an empty list. Entries that do not decode
/// as a trading pair are skipped.
pub fn extract_pairs(body: &Value, address: &str) -> Result<Vec<TradingPair>> {
    let list = match body {
        Value::Array(_) => body,
        Value::Object(object) => object
            .get("pairs")
            .or_else(|| object.get(address).and_then(|entry| entry.get("pairs")))
            .ok_or_else(|| PriceClientError::invalid_tokens("response carries no pair list"))?,
        _ => {
            return Err(PriceClientError::invalid_tokens(
                "pair payload is not an object or array",
            ))
        }
    };

    let entries = match list {
        Value::Null => return Ok(Vec::new()),
        Value::Array(entries) => entries,
        _ => return Err(PriceClientError::invalid_tokens("pair list is not an array")),
    };

    let pairs: Vec<TradingPair> = entries
        .iter()
        .filter_map(|entry| match TradingPair::deserialize(entry) {
            Ok(pair) => Some(pair),
            Err(e) => {
                warn!("Skipping undecodable pair for {}: {}", address, e);
                None
            }
        })
        .collect();

    Ok(pairs)
}
