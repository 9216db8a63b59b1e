//! Intent synthesis: turning a resolved route into a forwarding intent.

use super::types::{RouteIntent, TrafficSelector, TrafficTreatment};
use crate::config::{InterfaceService, PeeringConfigService};
use log::{debug, warn};
use peering_types::{AttachmentPoint, Ipv4Prefix, MacAddress};
use std::collections::BTreeSet;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Builds forwarding intents from a prefix, its resolved next hop and
/// the next hop's MAC address.
///
/// Synthesis is a pure function of its inputs plus the peer/interface
/// configuration; it performs no mutation.
pub struct IntentSynthesizer {
    peering: Arc<dyn PeeringConfigService>,
    interfaces: Arc<dyn InterfaceService>,
}

impl IntentSynthesizer {
    /// Creates a synthesizer over the given configuration services.
    pub fn new(
        peering: Arc<dyn PeeringConfigService>,
        interfaces: Arc<dyn InterfaceService>,
    ) -> Self {
        IntentSynthesizer {
            peering,
            interfaces,
        }
    }

    /// Builds the intent for a route, or `None` if no egress attachment
    /// point can be determined.
    ///
    /// The egress is the configured attachment point when the next hop
    /// is a BGP peer, otherwise the best-matching local interface for
    /// the next hop's network. Ingress points are every other configured
    /// attachment point; the egress is never a member of the ingress
    /// set.
    pub fn synthesize(
        &self,
        prefix: Ipv4Prefix,
        next_hop: Ipv4Addr,
        next_hop_mac: MacAddress,
    ) -> Option<RouteIntent> {
        let egress = match self.peering.peer(next_hop) {
            Some(peer) => {
                debug!("Route to peer {}", next_hop);
                match self.interfaces.interface_at(&peer.attachment) {
                    Some(intf) => intf,
                    None => {
                        warn!(
                            "No interface at peer attachment point {} for {}",
                            peer.attachment, next_hop
                        );
                        return None;
                    }
                }
            }
            None => {
                debug!("Route to non-peer {}", next_hop);
                match self.interfaces.matching_interface(next_hop) {
                    Some(intf) => intf,
                    None => {
                        warn!("No outgoing interface found for {}", next_hop);
                        return None;
                    }
                }
            }
        };

        let egress_point = egress.attachment;
        let ingress_points: BTreeSet<AttachmentPoint> = self
            .interfaces
            .interfaces()
            .into_iter()
            .map(|intf| intf.attachment)
            .filter(|point| *point != egress_point)
            .collect();

        debug!(
            "Generating intent for prefix {}, next hop mac {}",
            prefix, next_hop_mac
        );
        Some(RouteIntent::new(
            TrafficSelector::ipv4_dst(prefix),
            TrafficTreatment::rewrite_eth_dst(next_hop_mac),
            ingress_points,
            egress_point,
        ))
    }
}
