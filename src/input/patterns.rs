//! Fixed-length hex shapes accepted by the simulated scan

use once_cell::sync::Lazy;
use regex::Regex;

/// `0x` followed by 40 hex characters
pub const ADDRESS_PATTERN: &str = r"^0x[0-9a-fA-F]{40}$";

/// `0x` followed by 64 hex characters
pub const TX_HASH_PATTERN: &str = r"^0x[0-9a-fA-F]{64}$";

static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(ADDRESS_PATTERN).expect("address pattern"));
static TX_HASH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(TX_HASH_PATTERN).expect("tx hash pattern"));

pub fn is_address(value: &str) -> bool {
    ADDRESS_RE.is_match(value)
}

pub fn is_tx_hash(value: &str) -> bool {
    TX_HASH_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_shape() {
        assert!(is_address(&format!("0x{}", "f".repeat(40))));
        assert!(is_address("0xA1077a294dDE1B09bB078844df40758a5D0f9a27"));
        assert!(!is_address(&format!("0x{}", "f".repeat(39))));
        assert!(!is_address(&format!("0X{}", "f".repeat(40))));
        assert!(!is_address(&format!("0x{}g", "f".repeat(39))));
    }

    #[test]
    fn test_tx_hash_shape() {
        assert!(is_tx_hash(&format!("0x{}", "ab".repeat(32))));
        assert!(!is_tx_hash(&format!("0x{}", "f".repeat(40))));
        assert!(!is_tx_hash(&"f".repeat(66)));
    }
}
