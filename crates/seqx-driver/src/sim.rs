//! In-memory controller simulator.
//!
//! Stands in for the wire backend in tests and during commissioning. The
//! simulated controller exposes a fixed tag set, either built up in code or
//! loaded from a JSON catalog file:
//!
//! ```json
//! {
//!   "tags": [
//!     {
//!       "name": "SeqMaster",
//!       "data_type": "SEQ",
//!       "dimensions": [100],
//!       "elements": [{"step": 1}, {"step": 2}]
//!     }
//!   ]
//! }
//! ```
//!
//! Unknown addresses and out-of-range indices come back as per-item errors,
//! mirroring how a wire driver reports element faults.

use crate::address;
use crate::connection::{Connection, Connector};
use crate::error::DriverError;
use crate::types::{BatchItem, ConnectionParams, TagDescriptor, TagScope};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Address scheme prefix that routes to the simulator.
pub const SIM_SCHEME: &str = "sim:";

/// One simulated tag: its catalog entry plus element values.
#[derive(Debug, Clone, Deserialize)]
pub struct SimTag {
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub dimensions: Vec<u32>,
    #[serde(default)]
    pub elements: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct SimCatalog {
    tags: Vec<SimTag>,
}

/// A simulated controller holding a fixed tag set.
#[derive(Debug, Clone, Default)]
pub struct SimController {
    tags: Vec<SimTag>,
}

impl SimController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the tag set from a JSON catalog file.
    pub fn from_catalog_file(path: &Path) -> Result<Self, DriverError> {
        let text = std::fs::read_to_string(path)?;
        let catalog: SimCatalog = serde_json::from_str(&text)?;
        debug!(path = %path.display(), tags = catalog.tags.len(), "simulator catalog loaded");
        Ok(Self { tags: catalog.tags })
    }

    /// Add a tag to the simulated controller.
    pub fn with_tag(mut self, tag: SimTag) -> Self {
        self.tags.push(tag);
        self
    }
}

impl Connector for SimController {
    fn connect(&self, params: &ConnectionParams) -> Result<Box<dyn Connection>, DriverError> {
        debug!(route = %params.route(), tags = self.tags.len(), "simulator session opened");
        Ok(Box::new(SimConnection {
            tags: self.tags.clone(),
        }))
    }
}

/// An open session against a [`SimController`].
#[derive(Debug)]
pub struct SimConnection {
    tags: Vec<SimTag>,
}

impl SimConnection {
    fn read_one(&self, address: &str) -> BatchItem {
        let Some((base, index)) = address::split_element(address) else {
            return BatchItem::failed(address, "malformed element address");
        };
        let Some(tag) = self.tags.iter().find(|t| t.name == base) else {
            return BatchItem::failed(address, format!("path segment error: unknown tag {base}"));
        };
        match tag.elements.get(index) {
            Some(value) => BatchItem::ok(address, value.clone()),
            None => BatchItem::failed(address, format!("element index {index} out of range")),
        }
    }
}

impl Connection for SimConnection {
    fn list_tags(&mut self, scope: TagScope) -> Result<Vec<TagDescriptor>, DriverError> {
        Ok(self
            .tags
            .iter()
            .map(|t| TagDescriptor {
                name: t.name.clone(),
                data_type: t.data_type.clone(),
                dimensions: t.dimensions.clone(),
            })
            .filter(|t| scope == TagScope::All || !t.is_program_scoped())
            .collect())
    }

    fn read_batch(&mut self, addresses: &[String]) -> Result<Vec<BatchItem>, DriverError> {
        Ok(addresses.iter().map(|a| self.read_one(a)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seq_tag(name: &str, len: usize) -> SimTag {
        SimTag {
            name: name.to_string(),
            data_type: "SEQ".to_string(),
            dimensions: vec![len as u32],
            elements: (0..len).map(|i| json!({"step": i})).collect(),
        }
    }

    fn params() -> ConnectionParams {
        ConnectionParams {
            ip: "sim:".to_string(),
            eth_slot: 1,
            cpu_slot: 0,
        }
    }

    #[test]
    fn controller_scope_hides_program_tags() {
        let controller = SimController::new()
            .with_tag(seq_tag("SeqMaster", 4))
            .with_tag(seq_tag("Program:Main.SeqLocal", 4));
        let mut conn = controller.connect(&params()).unwrap();

        let controller_only = conn.list_tags(TagScope::ControllerOnly).unwrap();
        assert_eq!(controller_only.len(), 1);
        assert_eq!(controller_only[0].name, "SeqMaster");

        let all = conn.list_tags(TagScope::All).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn read_batch_echoes_addresses_in_order() {
        let controller = SimController::new().with_tag(seq_tag("SeqMaster", 4));
        let mut conn = controller.connect(&params()).unwrap();

        let addresses = vec!["SeqMaster[2]".to_string(), "SeqMaster[0]".to_string()];
        let items = conn.read_batch(&addresses).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].address, "SeqMaster[2]");
        assert_eq!(items[0].value, Some(json!({"step": 2})));
        assert_eq!(items[1].address, "SeqMaster[0]");
    }

    #[test]
    fn unknown_tag_is_a_per_item_error() {
        let controller = SimController::new().with_tag(seq_tag("SeqMaster", 4));
        let mut conn = controller.connect(&params()).unwrap();

        let items = conn
            .read_batch(&["Ghost[0]".to_string()])
            .unwrap();
        assert!(items[0].value.is_none());
        assert!(items[0].error.as_deref().unwrap().contains("unknown tag"));
    }

    #[test]
    fn out_of_range_index_is_a_per_item_error() {
        let controller = SimController::new().with_tag(seq_tag("SeqMaster", 2));
        let mut conn = controller.connect(&params()).unwrap();

        let items = conn.read_batch(&["SeqMaster[9]".to_string()]).unwrap();
        assert!(items[0].error.as_deref().unwrap().contains("out of range"));
    }

    #[test]
    fn catalog_file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"tags":[{"name":"SeqA","data_type":"SEQ","dimensions":[100],"elements":[{"step":0}]}]}"#,
        )
        .unwrap();

        let controller = SimController::from_catalog_file(&path).unwrap();
        let mut conn = controller.connect(&params()).unwrap();
        let tags = conn.list_tags(TagScope::All).unwrap();
        assert_eq!(tags[0].normalized_dims(), [100, 0, 0]);
    }
}
