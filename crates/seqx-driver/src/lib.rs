//! Controller connection port for seqx.
//!
//! The wire protocol is an external collaborator. This crate defines the
//! session interface the export pipeline consumes:
//!
//! - [`Connector`]: opens sessions for a set of [`ConnectionParams`]
//! - [`Connection`]: tag catalog listing and batched element reads
//! - [`RouteConnector`]: picks a backend from the address scheme
//!
//! The only in-tree backend is the [`sim`] module, an in-memory controller
//! used by tests and for commissioning (`--ip sim:<catalog.json>`). A wire
//! backend (EtherNet/IP) plugs in by implementing [`Connector`] downstream.

pub mod address;
mod connection;
mod error;
pub mod sim;
mod types;

pub use connection::{Connection, Connector, RouteConnector};
pub use error::DriverError;
pub use types::{BatchItem, ConnectionParams, TagDescriptor, TagScope, PROGRAM_PREFIX};
