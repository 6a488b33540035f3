//! Entity records supplied by the application layer.
//!
//! These are the already-validated rows a plan is built from. They are
//! input only and never appear in a serialized plan.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::plan::ControllerCredential;

/// A physical server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub management_id: Option<String>,
    /// Key into the controller credential lookup.
    #[serde(default)]
    pub controller_ref: Option<String>,
}

/// A virtual machine hosted on a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmRecord {
    pub server_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub management_id: Option<String>,
    /// Lower values migrate first.
    pub priority: i32,
}

/// A stored management controller, as the application persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerRecord {
    pub id: String,
    pub ip: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl ServerRecord {
    /// Management id with the empty-string default applied.
    pub fn management_id_or_empty(&self) -> &str {
        self.management_id.as_deref().unwrap_or_default()
    }
}

impl From<&ControllerRecord> for ControllerCredential {
    fn from(record: &ControllerRecord) -> Self {
        ControllerCredential {
            address: record.ip.clone(),
            user: record.username.clone(),
            password: record.password.clone(),
        }
    }
}

impl From<ControllerRecord> for ControllerCredential {
    fn from(record: ControllerRecord) -> Self {
        ControllerCredential {
            address: record.ip,
            user: record.username,
            password: record.password,
        }
    }
}

/// Build the id-keyed credential lookup from stored controller records.
///
/// Later records win when ids repeat.
pub fn index_controllers<'a, I>(records: I) -> HashMap<String, ControllerCredential>
where
    I: IntoIterator<Item = &'a ControllerRecord>,
{
    records
        .into_iter()
        .map(|r| (r.id.clone(), ControllerCredential::from(r)))
        .collect()
}
