//! Host/address-resolution boundary.
//!
//! The address-resolution subsystem is external; this module defines the
//! snapshot/lookup surface the engine consumes and the typed
//! subscription interface its events arrive on. Dispatch is ordinary
//! synchronous invocation on the event producer's thread, so listeners
//! acquire their own locking internally.

use peering_types::MacAddress;
use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// A host known to the address-resolution subsystem: one MAC and the
/// IPv4 addresses bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// The host's MAC address.
    pub mac: MacAddress,
    /// IPv4 addresses bound to the host.
    pub addresses: Vec<Ipv4Addr>,
}

impl Host {
    /// Creates a new host description.
    pub fn new(mac: MacAddress, addresses: Vec<Ipv4Addr>) -> Self {
        Host { mac, addresses }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} addresses)", self.mac, self.addresses.len())
    }
}

/// The kind of a host event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEventKind {
    /// A new host binding appeared.
    Added,
    /// An existing host binding changed (e.g. new MAC).
    Updated,
    /// The host binding disappeared.
    Removed,
}

/// An asynchronous event from the address-resolution subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEvent {
    /// What happened.
    pub kind: HostEventKind,
    /// The host the event concerns.
    pub host: Host,
}

impl HostEvent {
    /// Creates a new host event.
    pub fn new(kind: HostEventKind, host: Host) -> Self {
        HostEvent { kind, host }
    }
}

/// Token identifying a registered [`HostListener`], used to deregister.
pub type ListenerId = u64;

/// Receives host add/update/remove events.
pub trait HostListener: Send + Sync {
    /// Called for every host event, on the event producer's thread.
    fn on_host_event(&self, event: &HostEvent);
}

/// The address-resolution service surface the engine consumes.
pub trait HostService: Send + Sync {
    /// Asks the service to (keep) resolving this address; idempotent.
    fn start_monitoring(&self, address: Ipv4Addr);

    /// Best-effort synchronous snapshot of the hosts currently bound to
    /// an address. May be empty; never blocks on network I/O.
    fn hosts_by_ip(&self, address: Ipv4Addr) -> Vec<Host>;

    /// Registers a listener for host events.
    fn add_listener(&self, listener: Arc<dyn HostListener>) -> ListenerId;

    /// Deregisters a previously registered listener. Idempotent.
    fn remove_listener(&self, id: ListenerId);
}
