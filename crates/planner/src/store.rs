//! Plan file storage.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use evacplan_common::{Error, Result, StoreConfig};
use tracing::{debug, info, warn};

/// File extensions recognized as plan files by [`PlanStore::list`].
pub const PLAN_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Named storage for serialized plans.
///
/// Concurrent writes to the same name are not coordinated; the last
/// completed write wins.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Store `text` under `name`, replacing any previous content.
    async fn write(&self, name: &str, text: &str) -> Result<PathBuf>;

    /// Fetch the text stored under `name`.
    async fn read(&self, name: &str) -> Result<String>;

    /// Remove the plan stored under `name`.
    async fn delete(&self, name: &str) -> Result<()>;

    /// Names of all stored plans, sorted.
    async fn list(&self) -> Result<Vec<String>>;
}

/// Stores each plan as one file directly under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.plan_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `name` to a path inside the root.
    ///
    /// Only a single plain file name is accepted, so the result can never
    /// escape the root directory.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(file)), None) if !name.contains(['/', '\\']) => {
                Ok(self.root.join(file))
            }
            _ => Err(Error::InvalidPlanName(name.to_string())),
        }
    }

    async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }
}

fn has_plan_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PLAN_EXTENSIONS.contains(&ext))
}

#[async_trait]
impl PlanStore for FileStore {
    async fn write(&self, name: &str, text: &str) -> Result<PathBuf> {
        let path = self.resolve(name)?;
        let write_err = |source: std::io::Error| Error::WritePlan {
            name: name.to_string(),
            source,
        };

        self.ensure_root().await.map_err(write_err)?;
        tokio::fs::write(&path, text).await.map_err(write_err)?;

        info!("Plan {} written to {:?}", name, path);
        Ok(path)
    }

    async fn read(&self, name: &str) -> Result<String> {
        let path = self.resolve(name)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) => {
                debug!("Reading {:?} failed: {}", path, e);
                Err(Error::PlanNotFound(name.to_string()))
            }
        }
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let path = self.resolve(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("Plan {} deleted", name);
                Ok(())
            }
            Err(e) => {
                debug!("Deleting {:?} failed: {}", path, e);
                Err(Error::PlanNotFound(name.to_string()))
            }
        }
    }

    async fn list(&self) -> Result<Vec<String>> {
        if let Err(e) = self.ensure_root().await {
            warn!("Cannot create plan directory {:?}: {}", self.root, e);
            return Err(Error::ListPlans(e));
        }

        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::ListPlans(e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(Error::ListPlans)? {
            let path = entry.path();
            if !has_plan_extension(&path) {
                continue;
            }
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }

        names.sort();
        debug!("Found {} plans in {:?}", names.len(), self.root);
        Ok(names)
    }
}
