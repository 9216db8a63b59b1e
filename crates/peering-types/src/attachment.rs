//! Attachment point type: a switch/port pair at the network border.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A logical switch/port pair where traffic enters or leaves the managed
/// network.
///
/// Rendered as `device/port`, e.g. `of:0000000000000001/3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AttachmentPoint {
    device: String,
    port: u32,
}

impl AttachmentPoint {
    /// Creates a new attachment point.
    pub fn new(device: impl Into<String>, port: u32) -> Self {
        AttachmentPoint {
            device: device.into(),
            port,
        }
    }

    /// Returns the device identifier.
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Returns the port number on the device.
    pub const fn port(&self) -> u32 {
        self.port
    }
}

impl fmt::Display for AttachmentPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.device, self.port)
    }
}

impl FromStr for AttachmentPoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (device, port_str) = s
            .rsplit_once('/')
            .ok_or_else(|| ParseError::InvalidAttachmentPoint(s.to_string()))?;
        if device.is_empty() {
            return Err(ParseError::InvalidAttachmentPoint(s.to_string()));
        }
        let port: u32 = port_str
            .parse()
            .map_err(|_| ParseError::InvalidAttachmentPoint(s.to_string()))?;
        Ok(AttachmentPoint::new(device, port))
    }
}

impl TryFrom<String> for AttachmentPoint {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AttachmentPoint> for String {
    fn from(point: AttachmentPoint) -> Self {
        point.to_string()
    }
}
