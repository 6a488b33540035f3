//! Plan types - the document handed to the evacuation script.

use serde::{Deserialize, Serialize};

/// Placeholder written over passwords by [`Plan::redacted`].
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

/// The complete migration plan.
///
/// Field order here is the key order of the serialized document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    /// Management endpoint that drives the migration.
    pub connection: ConnectionConfig,
    /// UPS timing parameters.
    pub power: PowerTimingConfig,
    /// One entry per source server, in input order.
    pub servers: Vec<ServerPlanEntry>,
}

/// Management endpoint credential (vCenter or equivalent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    pub address: String,
    pub user: String,
    pub password: String,
    pub port: u16,
}

/// UPS timing parameters, copied verbatim into the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PowerTimingConfig {
    pub shutdown_grace_seconds: u32,
    pub restart_grace_seconds: u32,
}

/// Out-of-band management controller login (iLO or equivalent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerCredential {
    pub address: String,
    pub user: String,
    pub password: String,
}

/// A physical host as the evacuation script addresses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HostDescriptor {
    pub name: String,
    /// Empty when the server has no management id; never null.
    pub management_id: String,
    /// Omitted entirely when no credential could be resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerCredential>,
}

/// One VM in a host's migration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VmOrderEntry {
    pub vm_management_id: String,
}

/// Everything the script needs to evacuate one server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServerPlanEntry {
    pub host: HostDescriptor,
    /// Failover host, omitted when none is paired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<HostDescriptor>,
    /// VMs ordered by ascending priority.
    pub vm_order: Vec<VmOrderEntry>,
}

impl Plan {
    /// Number of hosts (sources and destinations) in the plan.
    pub fn host_count(&self) -> usize {
        self.servers
            .iter()
            .map(|s| 1 + usize::from(s.destination.is_some()))
            .sum()
    }

    /// Number of VMs scheduled for migration.
    pub fn vm_count(&self) -> usize {
        self.servers.iter().map(|s| s.vm_order.len()).sum()
    }

    /// Copy of the plan with every password masked.
    pub fn redacted(&self) -> Plan {
        let mut plan = self.clone();
        plan.connection.password = REDACTED_PLACEHOLDER.to_string();
        for server in &mut plan.servers {
            server.host.redact();
            if let Some(dest) = server.destination.as_mut() {
                dest.redact();
            }
        }
        plan
    }
}

impl HostDescriptor {
    fn redact(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            controller.password = REDACTED_PLACEHOLDER.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(name: &str, with_controller: bool) -> HostDescriptor {
        HostDescriptor {
            name: name.to_string(),
            management_id: format!("host-{}", name),
            controller: with_controller.then(|| ControllerCredential {
                address: "10.0.0.5".to_string(),
                user: "admin".to_string(),
                password: "secret".to_string(),
            }),
        }
    }

    fn sample_plan() -> Plan {
        Plan {
            connection: ConnectionConfig {
                address: "vcenter.local".to_string(),
                user: "administrator".to_string(),
                password: "hunter2".to_string(),
                port: 443,
            },
            power: PowerTimingConfig {
                shutdown_grace_seconds: 120,
                restart_grace_seconds: 300,
            },
            servers: vec![
                ServerPlanEntry {
                    host: host("a", true),
                    destination: Some(host("b", true)),
                    vm_order: vec![
                        VmOrderEntry {
                            vm_management_id: "vm-1".to_string(),
                        },
                        VmOrderEntry {
                            vm_management_id: "vm-2".to_string(),
                        },
                    ],
                },
                ServerPlanEntry {
                    host: host("c", false),
                    destination: None,
                    vm_order: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_counts() {
        let plan = sample_plan();
        assert_eq!(plan.host_count(), 3);
        assert_eq!(plan.vm_count(), 2);
    }

    #[test]
    fn test_redacted_masks_every_password() {
        let redacted = sample_plan().redacted();
        assert_eq!(redacted.connection.password, REDACTED_PLACEHOLDER);
        let first = &redacted.servers[0];
        assert_eq!(
            first.host.controller.as_ref().unwrap().password,
            REDACTED_PLACEHOLDER
        );
        assert_eq!(
            first.destination.as_ref().unwrap().controller.as_ref().unwrap().password,
            REDACTED_PLACEHOLDER
        );
        assert!(redacted.servers[1].host.controller.is_none());
        // Non-secret fields survive.
        assert_eq!(redacted.connection.user, "administrator");
    }
}
