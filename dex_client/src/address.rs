use crate::error::{PriceClientError, Result};

/// Length in bytes of a decoded Solana public key.
pub const ADDRESS_BYTES: usize = 32;

/// Structural check only: the string must be base-58 and decode to exactly
/// 32 bytes. Says nothing about whether the account exists on chain.
pub fn is_valid_address(candidate: &str) -> bool {
    match bs58::decode(candidate).into_vec() {
        Ok(bytes) => bytes.len() == ADDRESS_BYTES,
        Err(_) => false,
    }
}

/// Fails with `NoPositions` on an empty list, then with `InvalidAddress`
/// for the first address that does not validate.
pub fn validate_addresses(addresses: &[String]) -> Result<()> {
    if addresses.is_empty() {
        return Err(PriceClientError::NoPositions);
    }

    for address in addresses {
        validate_address(address)?;
    }

    Ok(())
}

pub fn validate_address(address: &str) -> Result<()> {
    if address.is_empty() {
        return Err(PriceClientError::NoPositions);
    }

    if !is_valid_address(address) {
        return Err(PriceClientError::InvalidAddress {
            address: address.to_string(),
        });
    }

    Ok(())
}
