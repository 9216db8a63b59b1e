//! Forwarding intents and the intent-synchronization boundary.

mod synth;
mod types;

pub use synth::IntentSynthesizer;
pub use types::{RouteIntent, TrafficSelector, TrafficTreatment};

use peering_types::Ipv4Prefix;

/// The engine's only write path to the rest of the system.
///
/// Implemented by the external intent synchronizer, which owns the
/// submit/withdraw/replace state machine. Called at most once per
/// processed update batch and per resolution event, atomically bundling
/// the submissions and withdrawals produced by that unit of work. The
/// call is made under the router's lock and must not block on I/O.
pub trait IntentSink: Send + Sync {
    /// Applies a batch of intent submissions and prefix withdrawals.
    fn update_route_intents(
        &self,
        submissions: Vec<(Ipv4Prefix, RouteIntent)>,
        withdrawals: Vec<Ipv4Prefix>,
    );
}
