//! Route-to-forwarding-intent synthesis engine for SDN BGP peering.
//!
//! This crate is the core of the peering application's control plane: it
//! consumes external route updates (prefix/next-hop pairs), maintains
//! the authoritative exact-prefix route table for the network border,
//! resolves next hops to MAC addresses — possibly asynchronously — and
//! emits or withdraws forwarding intents describing how border switches
//! treat traffic per prefix.
//!
//! # Architecture
//!
//! ```text
//! [route source] ──update()──> [queue] ──> [worker] ──┐
//!                                                     ├──> RouteTable
//! [host events]  ──listener──> [resolution handler] ──┤    PendingResolutions
//!                                                     │    (one lock)
//!                                                     └──> IntentSink
//! ```
//!
//! The update pipeline and the resolution callback share one
//! mutual-exclusion domain; the intent sink is invoked under it so the
//! route table and the submission stream stay consistent.
//!
//! # Boundaries
//!
//! The BGP session layer, the intent compiler/installer, the
//! address-resolution subsystem and configuration loading are external.
//! They meet this crate at the [`intent::IntentSink`],
//! [`host::HostService`], [`config::PeeringConfigService`] and
//! [`config::InterfaceService`] traits.

pub mod config;
pub mod error;
pub mod host;
pub mod intent;
pub mod resolve;
pub mod route;
pub mod router;

pub use config::{
    BgpPeer, Interface, InterfaceService, InterfaceTable, PeerTable, PeeringConfigService,
};
pub use error::RouterError;
pub use host::{Host, HostEvent, HostEventKind, HostListener, HostService, ListenerId};
pub use intent::{IntentSink, IntentSynthesizer, RouteIntent, TrafficSelector, TrafficTreatment};
pub use resolve::PendingResolutions;
pub use route::{RouteEntry, RouteTable, RouteUpdate, UpdateKind};
pub use router::{Router, RouterConfig};
