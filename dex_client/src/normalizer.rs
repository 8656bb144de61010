//! Turns untyped API payloads into `PriceInfo` / `TokenOverview` records.
//!
//! Absent or null fields are `MissingField`, numeric fields of the wrong
//! shape are `MalformedNumber`, a non-string `symbol` is `WrongType`. Bulk price maps are all-or-nothing: one bad entry fails
//! the whole call with `InvalidTokens`.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{PriceClientError, Result};
use crate::types::{PriceInfo, TokenOverview};

/// Typed accessors over one JSON object
pub struct FieldReader<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> FieldReader<'a> {
    /// Non-objects read as an object with no fields.
    pub fn new(value: &'a Value) -> Self {
        Self {
            fields: value.as_object(),
        }
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        match self.fields.and_then(|fields| fields.get(field)) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    pub fn has(&self, field: &str) -> bool {
        self.present(field).is_some()
    }

    pub fn decimal(&self, field: &str) -> Result<Decimal> {
        let value = self
            .present(field)
            .ok_or_else(|| PriceClientError::missing_field(field))?;
        parse_decimal(value).ok_or_else(|| PriceClientError::malformed_number(field, value))
    }

    pub fn string(&self, field: &str) -> Result<String> {
        match self.present(field) {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(other) => Err(PriceClientError::wrong_type(field, other)),
            None => Err(PriceClientError::missing_field(field)),
        }
    }

    pub fn integer(&self, field: &str) -> Result<i64> {
        let value = self
            .present(field)
            .ok_or_else(|| PriceClientError::missing_field(field))?;
        let parsed = match value {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| PriceClientError::malformed_number(field, value))
    }

    pub fn small_unsigned(&self, field: &str) -> Result<u8> {
        let value = self.integer(field)?;
        u8::try_from(value).map_err(|_| PriceClientError::malformed_number(field, value))
    }
}

/// Exact decimal from a JSON string or number. Numbers go through their
/// textual form, never through f64 arithmetic.
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };

    if text.is_empty() {
        return None;
    }

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Strips a `{"success": .., "data": ..}` envelope when present.
pub fn unwrap_envelope(body: &Value) -> Result<&Value> {
    let Some(object) = body.as_object() else {
        return Ok(body);
    };

    if let Some(data) = object.get("data") {
        if object.get("success").and_then(Value::as_bool) == Some(false) {
            let message = object
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("API returned success=false");
            return Err(PriceClientError::invalid_tokens(message));
        }
        return Ok(data);
    }

    Ok(body)
}

pub fn normalize_token_overview(payload: &Value) -> Result<TokenOverview> {
    let reader = FieldReader::new(payload);

    let overview = TokenOverview {
        price: reader.decimal("price")?,
        symbol: reader.string("symbol")?,
        decimals: reader.small_unsigned("decimals")?,
        last_trade_unix_time: reader.integer("lastTradeUnixTime")?,
        liquidity: reader.decimal("liquidity")?,
        supply: reader.decimal("supply")?,
    };

    debug!(
        "Normalized overview for {}: price={} liquidity={}",
        overview.symbol, overview.price, overview.liquidity
    );
    Ok(overview)
}

/// Price info for a single bulk entry. `value` is accepted for the price
/// when `price` is absent.
pub fn normalize_price_entry(address: &str, entry: &Value) -> Result<PriceInfo> {
    if !entry.is_object() {
        return Err(PriceClientError::invalid_tokens(format!(
            "entry for {} is not an object",
            address
        )));
    }

    let reader = FieldReader::new(entry);
    let price_field = if reader.has("price") { "price" } else { "value" };

    let to_invalid = |e: PriceClientError| {
        PriceClientError::invalid_tokens(format!("token {}: {}", address, e))
    };

    let price = reader.decimal(price_field).map_err(|e| match e {
        PriceClientError::MissingField { .. } => {
            PriceClientError::invalid_tokens(format!("token {}: missing price", address))
        }
        other => to_invalid(other),
    })?;
    let liquidity = reader.decimal("liquidity").map_err(to_invalid)?;

    Ok(PriceInfo::new(price, liquidity))
}

/// Normalizes a body keyed by token address. Every requested address must
/// be present and every entry must carry both price and liquidity.
pub fn normalize_prices(body: &Value, requested: &[String]) -> Result<HashMap<String, PriceInfo>> {
    let entries = body
        .as_object()
        .ok_or_else(|| PriceClientError::invalid_tokens("price payload is not an object"))?;

    let mut prices = HashMap::with_capacity(entries.len());
    for (address, entry) in entries {
        let info = normalize_price_entry(address, entry).map_err(|e| {
            warn!("Rejecting price batch: {}", e);
            e
        })?;
        prices.insert(address.clone(), info);
    }

    if let Some(missing) = requested.iter().find(|a| !prices.contains_key(a.as_str())) {
        warn!("Rejecting price batch: no entry returned for {}", missing);
        return Err(PriceClientError::invalid_tokens(format!(
            "no price returned for {}",
            missing
        )));
    }

    debug!("Normalized {} price entries", prices.len());
    Ok(prices)
}
