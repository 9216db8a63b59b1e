//! Forwarding-intent description types.

use peering_types::{AttachmentPoint, Ipv4Prefix, MacAddress};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Match criteria for a route intent: EtherType plus destination prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficSelector {
    /// EtherType matched at ingress.
    pub eth_type: u16,
    /// Destination prefix matched at ingress.
    pub ip_dst: Ipv4Prefix,
}

impl TrafficSelector {
    /// EtherType for IPv4.
    pub const ETH_TYPE_IPV4: u16 = 0x0800;

    /// Selector matching IPv4 traffic destined within `prefix`.
    pub const fn ipv4_dst(prefix: Ipv4Prefix) -> Self {
        TrafficSelector {
            eth_type: Self::ETH_TYPE_IPV4,
            ip_dst: prefix,
        }
    }
}

/// Treatment applied to matched traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficTreatment {
    /// Destination MAC the packet is rewritten to.
    pub eth_dst: MacAddress,
}

impl TrafficTreatment {
    /// Treatment rewriting the destination MAC to `mac`.
    pub const fn rewrite_eth_dst(mac: MacAddress) -> Self {
        TrafficTreatment { eth_dst: mac }
    }
}

/// A many-ingress-to-one-egress forwarding intent for one prefix.
///
/// Traffic entering at any ingress attachment point that matches the
/// selector has its destination MAC rewritten and is delivered to the
/// egress attachment point. At most one intent exists per prefix in the
/// downstream store; this engine only produces submit/withdraw
/// instructions and does not track installed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteIntent {
    selector: TrafficSelector,
    treatment: TrafficTreatment,
    ingress_points: BTreeSet<AttachmentPoint>,
    egress_point: AttachmentPoint,
}

impl RouteIntent {
    /// Creates a new route intent.
    pub fn new(
        selector: TrafficSelector,
        treatment: TrafficTreatment,
        ingress_points: BTreeSet<AttachmentPoint>,
        egress_point: AttachmentPoint,
    ) -> Self {
        RouteIntent {
            selector,
            treatment,
            ingress_points,
            egress_point,
        }
    }

    /// Returns the match criteria.
    pub const fn selector(&self) -> &TrafficSelector {
        &self.selector
    }

    /// Returns the treatment.
    pub const fn treatment(&self) -> &TrafficTreatment {
        &self.treatment
    }

    /// Returns the matched destination prefix.
    pub const fn match_prefix(&self) -> Ipv4Prefix {
        self.selector.ip_dst
    }

    /// Returns the rewritten destination MAC.
    pub const fn rewrite_dst_mac(&self) -> MacAddress {
        self.treatment.eth_dst
    }

    /// Returns the ingress attachment points.
    pub const fn ingress_points(&self) -> &BTreeSet<AttachmentPoint> {
        &self.ingress_points
    }

    /// Returns the egress attachment point.
    pub const fn egress_point(&self) -> &AttachmentPoint {
        &self.egress_point
    }
}

impl fmt::Display for RouteIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} via {} ({} ingress points)",
            self.selector.ip_dst,
            self.treatment.eth_dst,
            self.egress_point,
            self.ingress_points.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accessors() {
        let prefix: Ipv4Prefix = "10.0.0.0/24".parse().unwrap();
        let mac: MacAddress = "00:11:22:33:44:55".parse().unwrap();
        let egress = AttachmentPoint::new("s1", 1);
        let ingress: BTreeSet<_> =
            [AttachmentPoint::new("s2", 1), AttachmentPoint::new("s3", 1)].into();

        let intent = RouteIntent::new(
            TrafficSelector::ipv4_dst(prefix),
            TrafficTreatment::rewrite_eth_dst(mac),
            ingress.clone(),
            egress.clone(),
        );

        assert_eq!(intent.match_prefix(), prefix);
        assert_eq!(intent.rewrite_dst_mac(), mac);
        assert_eq!(intent.selector().eth_type, TrafficSelector::ETH_TYPE_IPV4);
        assert_eq!(intent.ingress_points(), &ingress);
        assert_eq!(intent.egress_point(), &egress);
    }
}
