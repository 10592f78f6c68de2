//! Shared driver-facing types.

use serde::{Deserialize, Serialize};

/// Name prefix of program-scoped tags (`Program:Main.Foo`).
pub const PROGRAM_PREFIX: &str = "Program:";

/// Route to a controller: IP address plus backplane slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Controller IP address, or a scheme-prefixed pseudo-address
    /// (`sim:<catalog.json>`) selecting an alternate backend.
    pub ip: String,

    /// Slot of the Ethernet module in the backplane.
    pub eth_slot: u16,

    /// Slot of the CPU module in the backplane.
    pub cpu_slot: u16,
}

impl ConnectionParams {
    /// CIP-style route string, `ip/eth_slot/cpu_slot`.
    pub fn route(&self) -> String {
        format!("{}/{}/{}", self.ip, self.eth_slot, self.cpu_slot)
    }
}

/// Which part of the controller's tag catalog to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagScope {
    /// Controller-scoped tags only.
    ControllerOnly,

    /// Controller-scoped and program-scoped tags.
    All,
}

/// One entry from the controller's tag catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagDescriptor {
    /// Base tag name. Program-scoped tags carry the `Program:` prefix.
    pub name: String,

    /// Declared type name (atomic type or UDT name).
    pub data_type: String,

    /// Array dimensions as reported by the catalog. May have fewer than
    /// three entries; see [`TagDescriptor::normalized_dims`].
    #[serde(default)]
    pub dimensions: Vec<u32>,
}

impl TagDescriptor {
    /// Dimensions as the catalog's fixed rank-3 list, right-padded with
    /// zeros and truncated past three entries.
    pub fn normalized_dims(&self) -> [u32; 3] {
        let mut dims = [0u32; 3];
        for (slot, dim) in dims.iter_mut().zip(self.dimensions.iter()) {
            *slot = *dim;
        }
        dims
    }

    /// Whether this tag lives in a program scope.
    pub fn is_program_scoped(&self) -> bool {
        self.name.starts_with(PROGRAM_PREFIX)
    }
}

/// Outcome of reading one element address within a batch.
///
/// Backends always produce one item per requested address, in request
/// order, even for singleton batches.
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// The element address echoed back by the backend.
    pub address: String,

    /// Decoded element value; `None` when the read failed.
    pub value: Option<serde_json::Value>,

    /// Backend-reported error for this element, if any.
    pub error: Option<String>,
}

impl BatchItem {
    /// An item carrying a successfully read value.
    pub fn ok(address: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            address: address.into(),
            value: Some(value),
            error: None,
        }
    }

    /// An item carrying a per-element error.
    pub fn failed(address: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            value: None,
            error: Some(error.into()),
        }
    }
}
