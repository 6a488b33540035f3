//! Plan service - the entry point the rest of the application uses.
//!
//! Composes the builder, the YAML codec and a [`PlanStore`] without
//! adding rules of its own. The builder and codec never see the store.

use std::collections::HashMap;
use std::path::PathBuf;

use evacplan_common::Result;
use evacplan_schema::{
    codec, ConnectionConfig, ControllerCredential, Plan, PowerTimingConfig, ServerRecord,
    VmRecord,
};
use tracing::info;

use crate::builder;
use crate::store::PlanStore;

/// Facade over plan building, encoding and storage.
#[derive(Debug, Clone)]
pub struct PlanService<S> {
    store: S,
}

impl<S: PlanStore> PlanService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Build a plan from entities. See [`builder::build_plan`].
    pub fn build_plan(
        &self,
        servers: &[ServerRecord],
        vms: &[VmRecord],
        controllers: &HashMap<String, ControllerCredential>,
        connection: &ConnectionConfig,
        power: &PowerTimingConfig,
        destinations: Option<&HashMap<String, ServerRecord>>,
    ) -> Plan {
        let plan = builder::build_plan(servers, vms, controllers, connection, power, destinations);
        info!(
            "Built plan: {} servers, {} hosts, {} VMs",
            plan.servers.len(),
            plan.host_count(),
            plan.vm_count()
        );
        plan
    }

    /// Build a plan and return its canonical text in one step.
    pub fn build_yaml(
        &self,
        servers: &[ServerRecord],
        vms: &[VmRecord],
        controllers: &HashMap<String, ControllerCredential>,
        connection: &ConnectionConfig,
        power: &PowerTimingConfig,
        destinations: Option<&HashMap<String, ServerRecord>>,
    ) -> Result<String> {
        let plan = self.build_plan(servers, vms, controllers, connection, power, destinations);
        self.serialize(&plan)
    }

    pub fn serialize(&self, plan: &Plan) -> Result<String> {
        codec::to_yaml(plan)
    }

    pub fn parse(&self, text: &str) -> Result<Plan> {
        codec::from_yaml(text)
    }

    pub async fn write(&self, name: &str, text: &str) -> Result<PathBuf> {
        self.store.write(name, text).await
    }

    pub async fn read(&self, name: &str) -> Result<String> {
        self.store.read(name).await
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        self.store.delete(name).await
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        self.store.list().await
    }

    /// Serialize `plan` and store it under `name`.
    pub async fn save_plan(&self, name: &str, plan: &Plan) -> Result<PathBuf> {
        let text = self.serialize(plan)?;
        self.write(name, &text).await
    }

    /// Read and parse the plan stored under `name`.
    pub async fn load_plan(&self, name: &str) -> Result<Plan> {
        let text = self.read(name).await?;
        self.parse(&text)
    }
}
