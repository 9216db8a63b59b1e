//! Route entry and route update types.

use peering_types::Ipv4Prefix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// A single route learned from the routing protocol: a destination
/// prefix and the next hop traffic for it should be forwarded toward.
///
/// Immutable value; equality is by (prefix, next hop). Two entries with
/// the same prefix but different next hops are a replacement, not a
/// duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteEntry {
    prefix: Ipv4Prefix,
    next_hop: Ipv4Addr,
}

impl RouteEntry {
    /// Creates a new route entry.
    pub const fn new(prefix: Ipv4Prefix, next_hop: Ipv4Addr) -> Self {
        RouteEntry { prefix, next_hop }
    }

    /// Returns the destination prefix.
    pub const fn prefix(&self) -> Ipv4Prefix {
        self.prefix
    }

    /// Returns the next-hop address.
    pub const fn next_hop(&self) -> Ipv4Addr {
        self.next_hop
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} via {}", self.prefix, self.next_hop)
    }
}

/// The kind of a route update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateKind {
    /// Announce or replace the route for a prefix.
    Update,
    /// Withdraw the route for a prefix.
    Delete,
}

/// A route update pushed by the external route source.
///
/// Batches of these (`Vec<RouteUpdate>`) are the unit of queued work in
/// the update pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteUpdate {
    kind: UpdateKind,
    entry: RouteEntry,
}

impl RouteUpdate {
    /// Creates a new route update.
    pub const fn new(kind: UpdateKind, entry: RouteEntry) -> Self {
        RouteUpdate { kind, entry }
    }

    /// Convenience constructor for an announce/replace update.
    pub const fn update(entry: RouteEntry) -> Self {
        Self::new(UpdateKind::Update, entry)
    }

    /// Convenience constructor for a withdraw update.
    pub const fn delete(entry: RouteEntry) -> Self {
        Self::new(UpdateKind::Delete, entry)
    }

    /// Returns the update kind.
    pub const fn kind(&self) -> UpdateKind {
        self.kind
    }

    /// Returns the route entry this update carries.
    pub const fn entry(&self) -> RouteEntry {
        self.entry
    }
}

impl fmt::Display for RouteUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            UpdateKind::Update => write!(f, "update {}", self.entry),
            UpdateKind::Delete => write!(f, "delete {}", self.entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(prefix: &str, next_hop: &str) -> RouteEntry {
        RouteEntry::new(prefix.parse().unwrap(), next_hop.parse().unwrap())
    }

    #[test]
    fn test_equality_by_prefix_and_next_hop() {
        let a = entry("10.0.0.0/24", "192.168.1.1");
        let b = entry("10.0.0.0/24", "192.168.1.1");
        let c = entry("10.0.0.0/24", "192.168.1.2");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let e = entry("10.0.0.0/24", "192.168.1.1");
        assert_eq!(e.to_string(), "10.0.0.0/24 via 192.168.1.1");
        assert_eq!(RouteUpdate::update(e).to_string(), "update 10.0.0.0/24 via 192.168.1.1");
        assert_eq!(RouteUpdate::delete(e).to_string(), "delete 10.0.0.0/24 via 192.168.1.1");
    }
}
