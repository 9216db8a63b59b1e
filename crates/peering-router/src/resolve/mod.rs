//! Pending-resolution index and next-hop address cache.
//!
//! Routes whose next hop has no known link-layer address are parked here
//! until the host subsystem reports a binding. The index also caches the
//! last observed MAC per next hop so later updates resolve immediately.

use crate::route::RouteEntry;
use peering_types::MacAddress;
use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;

/// Multi-valued map from next-hop address to the routes blocked on it,
/// plus the resolved-address cache.
///
/// Invariant maintained by the router: an entry is parked on next hop N
/// only while the route table's current entry for its prefix still has
/// next hop N. Entries are unparked on supersession and deletion, not
/// only on resolution.
#[derive(Debug, Default)]
pub struct PendingResolutions {
    waiting: HashMap<Ipv4Addr, HashSet<RouteEntry>>,
    mac_cache: HashMap<Ipv4Addr, MacAddress>,
}

impl PendingResolutions {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks a route entry until its next hop resolves.
    pub fn park(&mut self, entry: RouteEntry) {
        self.waiting.entry(entry.next_hop()).or_default().insert(entry);
    }

    /// Removes a specific parked entry, keyed by its own next hop.
    /// Idempotent if the entry is not parked.
    pub fn unpark(&mut self, entry: &RouteEntry) {
        if let Some(set) = self.waiting.get_mut(&entry.next_hop()) {
            set.remove(entry);
            if set.is_empty() {
                self.waiting.remove(&entry.next_hop());
            }
        }
    }

    /// Removes and returns every entry parked on `next_hop`.
    pub fn take_waiting(&mut self, next_hop: Ipv4Addr) -> HashSet<RouteEntry> {
        self.waiting.remove(&next_hop).unwrap_or_default()
    }

    /// Returns the number of entries parked on `next_hop`.
    pub fn waiting_on(&self, next_hop: Ipv4Addr) -> usize {
        self.waiting.get(&next_hop).map_or(0, HashSet::len)
    }

    /// Returns the cached MAC for a next hop, if any.
    pub fn cached_mac(&self, next_hop: Ipv4Addr) -> Option<MacAddress> {
        self.mac_cache.get(&next_hop).copied()
    }

    /// Records the last observed MAC for a next hop.
    pub fn cache_mac(&mut self, next_hop: Ipv4Addr, mac: MacAddress) {
        self.mac_cache.insert(next_hop, mac);
    }

    /// Drops the cached MAC for a next hop. Idempotent if absent.
    pub fn evict_mac(&mut self, next_hop: Ipv4Addr) {
        self.mac_cache.remove(&next_hop);
    }

    /// Resets the index to empty.
    pub fn clear(&mut self) {
        self.waiting.clear();
        self.mac_cache.clear();
    }
}
