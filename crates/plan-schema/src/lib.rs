//! Migration plan schema for evacplan.
//!
//! This crate defines the plan document consumed by the evacuation
//! script, the entity records plans are built from, and the canonical
//! YAML codec for the document.

pub mod codec;
pub mod plan;
pub mod records;

pub use codec::{from_yaml, to_yaml};
pub use plan::{
    ConnectionConfig, ControllerCredential, HostDescriptor, Plan, PowerTimingConfig,
    ServerPlanEntry, VmOrderEntry, REDACTED_PLACEHOLDER,
};
pub use records::{index_controllers, ControllerRecord, ServerRecord, VmRecord};
