//! Inventory documents - builder inputs bundled in one file.
//!
//! An inventory is YAML (or JSON, which the same parser accepts) holding
//! the connection and power settings, servers, VMs, controllers and
//! failover pairings. Controllers may be written either as the stored
//! entity (`ip`/`username`) or as a plain credential (`address`/`user`);
//! both are normalized to [`ControllerCredential`] on load.

use std::collections::HashMap;
use std::path::Path;

use evacplan_common::{Error, Result};
use evacplan_schema::{
    ConnectionConfig, ControllerCredential, ControllerRecord, Plan, PowerTimingConfig,
    ServerRecord, VmRecord,
};
use serde::Deserialize;
use tracing::debug;

use crate::builder;

/// Parsed inventory with controllers already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    pub connection: ConnectionConfig,
    pub power: PowerTimingConfig,
    pub servers: Vec<ServerRecord>,
    pub vms: Vec<VmRecord>,
    pub controllers: HashMap<String, ControllerCredential>,
    pub destinations: Option<HashMap<String, ServerRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInventory {
    connection: ConnectionConfig,
    power: PowerTimingConfig,
    #[serde(default)]
    servers: Vec<ServerRecord>,
    #[serde(default)]
    vms: Vec<VmRecord>,
    #[serde(default)]
    controllers: HashMap<String, ControllerShape>,
    #[serde(default)]
    destinations: Option<HashMap<String, ServerRecord>>,
}

/// The two accepted controller layouts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ControllerShape {
    Plain(ControllerCredential),
    Stored(StoredController),
}

/// [`ControllerRecord`] without its id, which is the map key here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct StoredController {
    ip: String,
    username: String,
    password: String,
    #[serde(default)]
    label: Option<String>,
}

impl ControllerShape {
    fn normalize(self, id: String) -> ControllerCredential {
        match self {
            ControllerShape::Plain(cred) => cred,
            ControllerShape::Stored(s) => ControllerCredential::from(ControllerRecord {
                id,
                ip: s.ip,
                username: s.username,
                password: s.password,
                label: s.label,
            }),
        }
    }
}

impl Inventory {
    /// Parse inventory text.
    pub fn parse(text: &str) -> Result<Self> {
        let raw: RawInventory = serde_yaml::from_str(text)
            .map_err(|e| Error::PlanFormat(format!("inventory: {}", e)))?;

        let controllers = raw
            .controllers
            .into_iter()
            .map(|(id, shape)| {
                let cred = shape.normalize(id.clone());
                (id, cred)
            })
            .collect();

        Ok(Self {
            connection: raw.connection,
            power: raw.power,
            servers: raw.servers,
            vms: raw.vms,
            controllers,
            destinations: raw.destinations,
        })
    }

    /// Read and parse an inventory file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let inventory = Self::parse(&text)?;
        debug!(
            "Loaded inventory {:?}: {} servers, {} VMs, {} controllers",
            path,
            inventory.servers.len(),
            inventory.vms.len(),
            inventory.controllers.len()
        );
        Ok(inventory)
    }

    /// Feed this inventory to the plan builder.
    pub fn build_plan(&self) -> Plan {
        builder::build_plan(
            &self.servers,
            &self.vms,
            &self.controllers,
            &self.connection,
            &self.power,
            self.destinations.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVENTORY: &str = "\
connection:
  address: vcenter.local
  user: administrator
  password: pw
  port: 443
power:
  shutdownGraceSeconds: 120
  restartGraceSeconds: 300
servers:
  - id: s1
    name: esx-01
    managementId: host-1
    controllerRef: ilo-1
  - id: s2
    name: esx-02
    controllerRef: ilo-2
vms:
  - serverId: s1
    managementId: vm-low
    priority: 5
  - serverId: s1
    managementId: vm-high
    priority: 1
controllers:
  ilo-1:
    ip: 10.0.0.5
    username: admin
    password: x
    label: rack A
  ilo-2:
    address: 10.0.0.6
    user: root
    password: y
destinations:
  s1:
    id: s9
    name: esx-spare
    managementId: host-9
    controllerRef: ilo-2
";

    #[test]
    fn test_parse_normalizes_both_controller_shapes() {
        let inventory = Inventory::parse(INVENTORY).unwrap();
        assert_eq!(inventory.controllers.len(), 2);
        assert_eq!(inventory.controllers["ilo-1"].address, "10.0.0.5");
        assert_eq!(inventory.controllers["ilo-1"].user, "admin");
        assert_eq!(inventory.controllers["ilo-2"].address, "10.0.0.6");
        assert_eq!(inventory.controllers["ilo-2"].user, "root");
    }

    #[test]
    fn test_build_plan_from_inventory() {
        let plan = Inventory::parse(INVENTORY).unwrap().build_plan();
        assert_eq!(plan.servers.len(), 2);

        let first = &plan.servers[0];
        let order: Vec<&str> = first
            .vm_order
            .iter()
            .map(|v| v.vm_management_id.as_str())
            .collect();
        assert_eq!(order, vec!["vm-high", "vm-low"]);
        let dest = first.destination.as_ref().unwrap();
        assert_eq!(dest.name, "esx-spare");
        assert_eq!(dest.controller.as_ref().unwrap().address, "10.0.0.6");

        let second = &plan.servers[1];
        assert_eq!(second.host.management_id, "");
        assert!(second.destination.is_none());
        assert!(second.vm_order.is_empty());
    }

    #[test]
    fn test_json_inventory_accepted() {
        let json = serde_json::json!({
            "connection": {"address": "a", "user": "u", "password": "p", "port": 443},
            "power": {"shutdownGraceSeconds": 1, "restartGraceSeconds": 2},
            "servers": [{"id": "s1", "name": "n1"}]
        });
        let inventory = Inventory::parse(&json.to_string()).unwrap();
        assert_eq!(inventory.servers.len(), 1);
        assert!(inventory.vms.is_empty());
        assert!(inventory.destinations.is_none());
    }

    #[test]
    fn test_malformed_controller_rejected() {
        let text = "\
connection: {address: a, user: u, password: p, port: 1}
power: {shutdownGraceSeconds: 1, restartGraceSeconds: 2}
controllers:
  broken:
    host: 10.0.0.1
";
        assert!(matches!(Inventory::parse(text), Err(Error::PlanFormat(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Inventory::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
