use crate::models::{Value, ValueMap};

/// Protocol kinds whose detail blocks are extracted.
pub const SUPPORTED_PROTOCOLS: &[&str] = &["BGP"];

/// One row of `show protocols [all]`.
///
/// The summary columns are kept as printed (trimmed); `since` is the daemon's timestamp
/// string and is not reparsed. `details` holds the indented block that follows the summary
/// line in `show protocols all` output, and is empty when there is none.
///
/// Example row:
/// ```text
/// up_2_65002 BGP      bt_up2   up     20:07:01    Established
///   Description:    upstream2
///   Preference:     100
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Protocol {
    /// Protocol instance name, e.g. `up_2_65002`.
    pub name: String,
    /// Protocol kind, e.g. `BGP`, `Pipe`, `Device`.
    pub proto: String,
    /// Routing table the protocol is connected to.
    pub table: String,
    /// Protocol state, e.g. `up`, `down`, `start`.
    pub state: String,
    /// Time of the last state change, as printed.
    pub since: String,
    /// Free-text info column, possibly empty.
    pub info: String,
    /// Decoded detail block.
    pub details: ValueMap,
}

impl Protocol {
    pub fn is_bgp(&self) -> bool {
        self.proto == "BGP"
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }

    /// BGP session state (`Established`, `Active`, ...).
    ///
    /// Works for both detail layouts: the dispatch-table layout stores it under
    /// `bgp` / `BGP state`, the indentation tree under `BGP state` (as a scalar, or as the
    /// carried-forward entry of a promoted map).
    pub fn bgp_state(&self) -> Option<&str> {
        if let Some(state) = self
            .details
            .get("bgp")
            .and_then(|v| v.get("BGP state"))
            .and_then(Value::as_str)
        {
            return Some(state);
        }
        match self.details.get("BGP state")? {
            Value::Str(s) => Some(s.as_str()),
            Value::Map(m) => m.get("BGP state").and_then(Value::as_str),
            _ => None,
        }
    }
}

pub fn is_supported_protocol(proto: &str) -> bool {
    SUPPORTED_PROTOCOLS.contains(&proto)
}
