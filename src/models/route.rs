use crate::models::AttrValue;
use indexmap::IndexMap;
use ipnet::IpNet;
use std::str::FromStr;

/// Route attributes keyed by the name BIRD prints (`Type`, `BGP.as_path`, ...).
pub type Attributes = IndexMap<String, AttrValue>;

/// One row of `show route [all]`.
///
/// Rows printed without a network (further paths for the same prefix) carry the network of
/// the closest preceding row that had one.
///
/// Inline next-hop layout (BIRD 1.x):
/// ```text
/// 184.164.240.0/24   via 10.100.0.122 on eth1 [up_2_65002 20:07:01] * (100) [AS65002i]
///         Type: BGP unicast univ
/// ```
///
/// Separate next-hop layout (BIRD 2.x):
/// ```text
/// 184.164.240.0/24     unicast [up_2_65002 2024-03-05 20:07:01] * (100) [AS65002i]
///         via 10.100.0.122 on eth1
///         Type: BGP univ
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Destination network; `None` only if no row before this one named a network.
    pub network: Option<String>,
    /// Route type token of the separate next-hop layout (`unicast`, `blackhole`, ...).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub rtype: Option<String>,
    /// Next hop: the whole descriptor in the inline layout (`via 10.0.0.1 on eth1`,
    /// `dev eth0`, `unreachable`), the gateway address in the separate layout.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub via: Option<String>,
    /// Outgoing interface of the separate next-hop layout.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub iface: Option<String>,
    /// Protocol the route was learned from.
    pub proto: String,
    pub since: String,
    /// Host of the `from <host>` suffix inside the brackets.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub from: Option<String>,
    /// The route is the selected (`*`) route for its network.
    pub primary: bool,
    /// The route is marked `!` (selected, but failed to sync to the kernel).
    pub sync_error: bool,
    /// Trailing text after the brackets, e.g. `(100) [AS65002i]`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub info: Option<String>,
    pub attributes: Attributes,
}

impl Route {
    /// Network parsed as a prefix; `None` when missing or not a valid CIDR.
    pub fn prefix(&self) -> Option<IpNet> {
        self.network
            .as_deref()
            .and_then(|n| IpNet::from_str(n).ok())
    }

    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// Decoded `BGP.as_path`, if present and free of AS-SETs.
    pub fn as_path(&self) -> Option<&[i64]> {
        self.attributes
            .get("BGP.as_path")
            .and_then(AttrValue::as_int_list)
    }

    /// Last AS of the decoded `BGP.as_path`.
    pub fn origin_asn(&self) -> Option<i64> {
        self.as_path().and_then(|p| p.last().copied())
    }
}
