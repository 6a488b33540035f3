//! Common utilities and types shared across evacplan crates.

pub mod config;
pub mod error;

pub use config::StoreConfig;
pub use error::{Error, Result};
