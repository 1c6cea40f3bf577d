use std::str::FromStr;
use num_bigint::BigInt;
use crate::rsa::keys::{Key, KeyError};

/// Renders `"<exponent>,<modulus>"` in decimal, then base64 for transport.
pub fn encode(key: &Key) -> Vec<u8> {
    let plain = format!("{},{}", key.exponent, key.modulus);
    base64::encode(plain).into_bytes()
}

pub fn decode(data: &[u8]) -> Result<Key, KeyError> {
    let trimmed = data
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect::<Vec<_>>();
    let plain = base64::decode(&trimmed)
        .map_err(|e| KeyError::Malformed(format!("transport decoding failed: {}", e)))?;
    let plain = String::from_utf8(plain)
        .map_err(|_| KeyError::Malformed("key text is not UTF-8".to_string()))?;
    let (exponent, modulus) = plain
        .split_once(',')
        .ok_or_else(|| KeyError::Malformed("missing `,' separator".to_string()))?;
    Ok(Key {
        exponent: parse_decimal(exponent)?,
        modulus: parse_decimal(modulus)?,
    })
}

fn parse_decimal(field: &str) -> Result<BigInt, KeyError> {
    BigInt::from_str(field)
        .map_err(|_| KeyError::Malformed(format!("not a decimal integer: {:?}", field)))
}
