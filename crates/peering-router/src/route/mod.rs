//! Route storage for the peering border.
//!
//! The route table is the single source of truth for which forwarding
//! behavior is currently installed or pending per prefix. Keys are the
//! canonical binary encoding of the prefix, giving exact-prefix `put`,
//! lookup and removal semantics.

mod table;
mod types;

pub use table::RouteTable;
pub use types::{RouteEntry, RouteUpdate, UpdateKind};
