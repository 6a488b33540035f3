//! Migration plan construction from inventory entities.

use std::collections::HashMap;

use evacplan_schema::{
    ConnectionConfig, ControllerCredential, HostDescriptor, Plan, PowerTimingConfig,
    ServerPlanEntry, ServerRecord, VmOrderEntry, VmRecord,
};
use tracing::debug;

/// Build a migration plan.
///
/// Servers keep their input order. Each server's VMs are stably sorted by
/// ascending priority. Controller credentials are resolved through
/// `controllers` by each server's `controller_ref`; unresolved refs leave
/// the `controller` key out. A destination from `destinations` (keyed by
/// source server id) is attached only when it has a non-empty management
/// id, with its own controller resolved the same way.
///
/// Never fails. VMs whose `server_id` matches no server are dropped.
pub fn build_plan(
    servers: &[ServerRecord],
    vms: &[VmRecord],
    controllers: &HashMap<String, ControllerCredential>,
    connection: &ConnectionConfig,
    power: &PowerTimingConfig,
    destinations: Option<&HashMap<String, ServerRecord>>,
) -> Plan {
    let mut vms_by_server: HashMap<&str, Vec<&VmRecord>> = HashMap::new();
    for vm in vms {
        vms_by_server.entry(vm.server_id.as_str()).or_default().push(vm);
    }

    let entries: Vec<ServerPlanEntry> = servers
        .iter()
        .map(|server| {
            let vm_order = vms_by_server
                .get(server.id.as_str())
                .map(|owned| order_vms(owned.clone()))
                .unwrap_or_default();

            let destination = destinations
                .and_then(|d| d.get(&server.id))
                .filter(|dest| !dest.management_id_or_empty().is_empty())
                .map(|dest| describe_host(dest, controllers));

            ServerPlanEntry {
                host: describe_host(server, controllers),
                destination,
                vm_order,
            }
        })
        .collect();

    let orphans: usize = vms_by_server
        .iter()
        .filter(|(id, _)| !servers.iter().any(|s| s.id == **id))
        .map(|(_, owned)| owned.len())
        .sum();
    if orphans > 0 {
        debug!("Excluded {} VMs referencing unknown servers", orphans);
    }

    Plan {
        connection: connection.clone(),
        power: *power,
        servers: entries,
    }
}

fn order_vms(mut vms: Vec<&VmRecord>) -> Vec<VmOrderEntry> {
    // sort_by_key is stable: equal priorities keep input order.
    vms.sort_by_key(|vm| vm.priority);
    vms.into_iter()
        .map(|vm| VmOrderEntry {
            vm_management_id: vm.management_id.clone().unwrap_or_default(),
        })
        .collect()
}

fn describe_host(
    server: &ServerRecord,
    controllers: &HashMap<String, ControllerCredential>,
) -> HostDescriptor {
    HostDescriptor {
        name: server.name.clone(),
        management_id: server.management_id_or_empty().to_string(),
        controller: server
            .controller_ref
            .as_ref()
            .and_then(|id| controllers.get(id))
            .cloned(),
    }
}
