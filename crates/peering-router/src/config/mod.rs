//! Peering configuration: BGP peers, border interfaces, and the lookup
//! services the intent synthesizer consults.
//!
//! Loading configuration from files belongs to the surrounding
//! application; this module provides the typed config structures
//! (serde-deserializable) and in-memory lookup implementations.

use peering_types::{AttachmentPoint, Ipv4Prefix};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::Ipv4Addr;

/// A configured external BGP peer and the border attachment point it is
/// reached through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgpPeer {
    /// The peer's IPv4 address.
    pub address: Ipv4Addr,
    /// The attachment point the peer is connected at.
    pub attachment: AttachmentPoint,
}

impl BgpPeer {
    /// Creates a new peer description.
    pub fn new(address: Ipv4Addr, attachment: AttachmentPoint) -> Self {
        BgpPeer {
            address,
            attachment,
        }
    }
}

/// A border interface: an attachment point plus the IPv4 networks
/// configured on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    /// Interface name, e.g. `sw1-eth1`.
    pub name: String,
    /// The switch/port this interface attaches to.
    pub attachment: AttachmentPoint,
    /// Networks configured on this interface.
    pub networks: Vec<Ipv4Prefix>,
}

impl Interface {
    /// Creates a new interface description.
    pub fn new(
        name: impl Into<String>,
        attachment: AttachmentPoint,
        networks: Vec<Ipv4Prefix>,
    ) -> Self {
        Interface {
            name: name.into(),
            attachment,
            networks,
        }
    }
}

/// Lookup service for configured BGP peers.
pub trait PeeringConfigService: Send + Sync {
    /// Returns the peer configured with this address, if any.
    fn peer(&self, address: Ipv4Addr) -> Option<BgpPeer>;

    /// Returns all configured peers.
    fn peers(&self) -> Vec<BgpPeer>;
}

/// Lookup service for border interfaces.
pub trait InterfaceService: Send + Sync {
    /// Returns all configured interfaces.
    fn interfaces(&self) -> Vec<Interface>;

    /// Returns the interface configured at this attachment point, if any.
    fn interface_at(&self, point: &AttachmentPoint) -> Option<Interface>;

    /// Returns the interface whose configured network best (longest
    /// prefix) matches `address`, if any.
    fn matching_interface(&self, address: Ipv4Addr) -> Option<Interface>;
}

/// In-memory peer table.
#[derive(Debug, Clone, Default)]
pub struct PeerTable {
    peers: HashMap<Ipv4Addr, BgpPeer>,
}

impl PeerTable {
    /// Builds a peer table from a list of peers. A later peer with the
    /// same address replaces an earlier one.
    pub fn new(peers: impl IntoIterator<Item = BgpPeer>) -> Self {
        PeerTable {
            peers: peers.into_iter().map(|p| (p.address, p)).collect(),
        }
    }
}

impl PeeringConfigService for PeerTable {
    fn peer(&self, address: Ipv4Addr) -> Option<BgpPeer> {
        self.peers.get(&address).cloned()
    }

    fn peers(&self) -> Vec<BgpPeer> {
        self.peers.values().cloned().collect()
    }
}

/// In-memory interface table.
#[derive(Debug, Clone, Default)]
pub struct InterfaceTable {
    interfaces: Vec<Interface>,
}

impl InterfaceTable {
    /// Builds an interface table from a list of interfaces.
    pub fn new(interfaces: impl IntoIterator<Item = Interface>) -> Self {
        InterfaceTable {
            interfaces: interfaces.into_iter().collect(),
        }
    }
}

impl InterfaceService for InterfaceTable {
    fn interfaces(&self) -> Vec<Interface> {
        self.interfaces.clone()
    }

    fn interface_at(&self, point: &AttachmentPoint) -> Option<Interface> {
        self.interfaces
            .iter()
            .find(|intf| intf.attachment == *point)
            .cloned()
    }

    fn matching_interface(&self, address: Ipv4Addr) -> Option<Interface> {
        let mut best: Option<(&Interface, u8)> = None;
        for intf in &self.interfaces {
            for network in &intf.networks {
                if !network.contains(address) {
                    continue;
                }
                if best.map_or(true, |(_, len)| network.prefix_len() > len) {
                    best = Some((intf, network.prefix_len()));
                }
            }
        }
        best.map(|(intf, _)| intf.clone())
    }
}
