//! IPv4 prefix type with canonical network encoding.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// An IPv4 network prefix in CIDR notation (e.g. `10.0.0.0/24`).
///
/// The address is held in canonical form: bits beyond the mask length are
/// cleared on construction, so two values compare equal exactly when they
/// denote the same network.
///
/// # Examples
///
/// ```
/// use peering_types::Ipv4Prefix;
///
/// let prefix: Ipv4Prefix = "10.1.2.3/16".parse().unwrap();
/// assert_eq!(prefix.to_string(), "10.1.0.0/16");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ipv4Prefix {
    address: Ipv4Addr,
    prefix_len: u8,
}

impl Ipv4Prefix {
    /// Maximum mask length for an IPv4 prefix.
    pub const MAX_PREFIX_LEN: u8 = 32;

    /// Creates a new prefix, truncating the address to the mask length.
    ///
    /// # Errors
    ///
    /// Returns an error if the mask length exceeds 32.
    pub fn new(address: Ipv4Addr, prefix_len: u8) -> Result<Self, ParseError> {
        if prefix_len > Self::MAX_PREFIX_LEN {
            return Err(ParseError::InvalidPrefixLength(prefix_len));
        }
        Ok(Ipv4Prefix {
            address: Ipv4Addr::from(u32::from(address) & Self::mask(prefix_len)),
            prefix_len,
        })
    }

    /// Returns the network address of this prefix.
    pub const fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// Returns the mask length in bits.
    pub const fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Returns true if this is the default route (0.0.0.0/0).
    pub const fn is_default(&self) -> bool {
        self.prefix_len == 0
    }

    /// Returns true if `addr` falls within this prefix.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & Self::mask(self.prefix_len) == u32::from(self.address)
    }

    /// Canonical binary-string key for exact-prefix storage.
    ///
    /// The key is the first `prefix_len` address bits rendered as `0`/`1`
    /// characters, so the same address under different mask lengths maps
    /// to distinct keys and equal keys mean "same prefix".
    pub fn bit_key(&self) -> String {
        let bits = u32::from(self.address);
        (0..u32::from(self.prefix_len))
            .map(|i| if bits & (1 << (31 - i)) != 0 { '1' } else { '0' })
            .collect()
    }

    fn mask(prefix_len: u8) -> u32 {
        match prefix_len {
            0 => 0,
            len => u32::MAX << (32 - u32::from(len)),
        }
    }
}

impl fmt::Display for Ipv4Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl FromStr for Ipv4Prefix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr_str, len_str) = s
            .rsplit_once('/')
            .ok_or_else(|| ParseError::InvalidPrefix(s.to_string()))?;

        let address: Ipv4Addr = addr_str
            .parse()
            .map_err(|_| ParseError::InvalidPrefix(s.to_string()))?;
        let prefix_len: u8 = len_str
            .parse()
            .map_err(|_| ParseError::InvalidPrefix(s.to_string()))?;

        Ipv4Prefix::new(address, prefix_len)
    }
}

impl TryFrom<String> for Ipv4Prefix {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Ipv4Prefix> for String {
    fn from(prefix: Ipv4Prefix) -> Self {
        prefix.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_and_display() {
        let prefix: Ipv4Prefix = "192.168.0.0/16".parse().unwrap();
        assert_eq!(prefix.address(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(prefix.prefix_len(), 16);
        assert_eq!(prefix.to_string(), "192.168.0.0/16");
    }

    #[test]
    fn test_canonical_truncation() {
        let prefix: Ipv4Prefix = "10.1.2.3/8".parse().unwrap();
        assert_eq!(prefix.to_string(), "10.0.0.0/8");

        let canonical: Ipv4Prefix = "10.0.0.0/8".parse().unwrap();
        assert_eq!(prefix, canonical);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!("10.0.0.0".parse::<Ipv4Prefix>().is_err());
        assert!("10.0.0.0/33".parse::<Ipv4Prefix>().is_err());
        assert!("10.0.0/24".parse::<Ipv4Prefix>().is_err());
        assert!("10.0.0.0/x".parse::<Ipv4Prefix>().is_err());
    }

    #[test]
    fn test_bit_key_length_and_content() {
        let prefix: Ipv4Prefix = "10.0.0.0/8".parse().unwrap();
        // 10 = 00001010
        assert_eq!(prefix.bit_key(), "00001010");

        let default: Ipv4Prefix = "0.0.0.0/0".parse().unwrap();
        assert_eq!(default.bit_key(), "");
        assert!(default.is_default());
    }

    #[test]
    fn test_bit_key_distinguishes_mask_lengths() {
        let short: Ipv4Prefix = "10.0.0.0/8".parse().unwrap();
        let long: Ipv4Prefix = "10.0.0.0/16".parse().unwrap();
        assert_ne!(short.bit_key(), long.bit_key());
        assert!(long.bit_key().starts_with(&short.bit_key()));
    }

    #[test]
    fn test_contains() {
        let prefix: Ipv4Prefix = "10.0.1.0/24".parse().unwrap();
        assert!(prefix.contains(Ipv4Addr::new(10, 0, 1, 99)));
        assert!(!prefix.contains(Ipv4Addr::new(10, 0, 2, 1)));

        let default: Ipv4Prefix = "0.0.0.0/0".parse().unwrap();
        assert!(default.contains(Ipv4Addr::new(203, 0, 113, 1)));
    }

    #[test]
    fn test_serde_round_trip() {
        let prefix: Ipv4Prefix = "172.16.0.0/12".parse().unwrap();
        let json = serde_json::to_string(&prefix).unwrap();
        assert_eq!(json, "\"172.16.0.0/12\"");
        let back: Ipv4Prefix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefix);
    }
}
