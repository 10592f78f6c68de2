//! The controller connection port.

use crate::error::DriverError;
use crate::sim::{SimController, SIM_SCHEME};
use crate::types::{BatchItem, ConnectionParams, TagDescriptor, TagScope};
use std::path::Path;

/// An open session with a controller.
///
/// Calls are blocking; the export pipeline is strictly sequential and relies
/// on whatever timeouts the backend enforces.
pub trait Connection {
    /// Fetch the tag catalog.
    fn list_tags(&mut self, scope: TagScope) -> Result<Vec<TagDescriptor>, DriverError>;

    /// Read a batch of element addresses in one round trip.
    ///
    /// Returns one [`BatchItem`] per outcome, in backend order. Backends
    /// whose wire API reports a single bare result for singleton batches
    /// must wrap it into a one-element vector here, so callers always see a
    /// sequence.
    fn read_batch(&mut self, addresses: &[String]) -> Result<Vec<BatchItem>, DriverError>;
}

/// Opens sessions with a controller.
///
/// The export orchestrator reconnects on every attempt, so implementations
/// must be reusable across `connect` calls.
pub trait Connector {
    fn connect(&self, params: &ConnectionParams) -> Result<Box<dyn Connection>, DriverError>;
}

/// Backend dispatch by address scheme.
///
/// `sim:<catalog.json>` routes to the in-memory simulator, reloading the
/// catalog file on each connect so every attempt sees fresh state. Plain IP
/// addresses need a wire backend, which is an out-of-tree integration point.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteConnector;

impl Connector for RouteConnector {
    fn connect(&self, params: &ConnectionParams) -> Result<Box<dyn Connection>, DriverError> {
        if let Some(catalog) = params.ip.strip_prefix(SIM_SCHEME) {
            let controller = SimController::from_catalog_file(Path::new(catalog))?;
            return controller.connect(params);
        }
        Err(DriverError::NoBackend {
            route: params.route(),
            reason: "this build carries no EtherNet/IP backend; link one via the Connector trait"
                .to_string(),
        })
    }
}
