//! Evacplan Planner - build, persist and retrieve migration plans.

pub mod builder;
pub mod inventory;
pub mod service;
pub mod store;

pub use builder::build_plan;
pub use inventory::Inventory;
pub use service::PlanService;
pub use store::{FileStore, PlanStore, PLAN_EXTENSIONS};
