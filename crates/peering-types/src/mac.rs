//! MAC address type with safe parsing and formatting.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 48-bit Ethernet MAC address.
///
/// # Examples
///
/// ```
/// use peering_types::MacAddress;
///
/// let mac: MacAddress = "00:11:22:33:44:55".parse().unwrap();
/// assert_eq!(mac.to_string(), "00:11:22:33:44:55");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// The broadcast MAC address (FF:FF:FF:FF:FF:FF).
    pub const BROADCAST: MacAddress = MacAddress([0xff; 6]);

    /// The zero/null MAC address (00:00:00:00:00:00).
    pub const ZERO: MacAddress = MacAddress([0; 6]);

    /// Creates a new MAC address from raw bytes.
    pub const fn new(bytes: [u8; 6]) -> Self {
        MacAddress(bytes)
    }

    /// Returns the raw bytes of the MAC address.
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Returns true if this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0; 6]
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Support both colon and hyphen separators
        let separator = if s.contains(':') { ':' } else { '-' };

        let parts: Vec<&str> = s.split(separator).collect();
        if parts.len() != 6 {
            return Err(ParseError::InvalidMacAddress(s.to_string()));
        }

        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            bytes[i] = u8::from_str_radix(part, 16)
                .map_err(|_| ParseError::InvalidMacAddress(s.to_string()))?;
        }

        Ok(MacAddress(bytes))
    }
}

impl TryFrom<String> for MacAddress {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colon_and_hyphen() {
        let mac: MacAddress = "00:1b:21:3a:4c:5d".parse().unwrap();
        assert_eq!(mac.octets(), [0x00, 0x1b, 0x21, 0x3a, 0x4c, 0x5d]);

        let hyphen: MacAddress = "00-1b-21-3a-4c-5d".parse().unwrap();
        assert_eq!(mac, hyphen);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("00:11:22:33:44".parse::<MacAddress>().is_err());
        assert!("00:11:22:33:44:zz".parse::<MacAddress>().is_err());
        assert!("".parse::<MacAddress>().is_err());
    }

    #[test]
    fn test_display_lower_hex() {
        let mac = MacAddress::new([0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);
        assert_eq!(mac.to_string(), "de:ad:be:ef:00:01");
    }

    #[test]
    fn test_constants() {
        assert!(MacAddress::ZERO.is_zero());
        assert!(!MacAddress::BROADCAST.is_zero());
    }
}
