use crate::error::StoreError;
use core_types::TeamMemberShare;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Every project's saved shares, keyed by project id.
pub type ShareSnapshot = BTreeMap<String, Vec<TeamMemberShare>>;

/// The persistence port for profit shares.
///
/// Implementations replace a project's shares as a whole: after a successful
/// call the project holds exactly the given shares, and after a failed call it
/// holds exactly what it held before.
pub trait ShareRepository: Send + Sync {
    /// The shares currently saved for a project (empty if none).
    fn project_shares(&self, project_id: &str) -> Result<Vec<TeamMemberShare>, StoreError>;

    /// Drops every saved share of the project and stores `shares` instead.
    fn replace_project_shares(
        &self,
        project_id: &str,
        shares: Vec<TeamMemberShare>,
    ) -> Result<(), StoreError>;

    /// A consistent view of all saved shares.
    fn snapshot(&self) -> Arc<ShareSnapshot>;
}

/// Keeps the share snapshot in memory.
#[derive(Debug, Default)]
pub struct InMemoryShareRepository {
    current: RwLock<Arc<ShareSnapshot>>,
}

impl InMemoryShareRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: ShareSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Builds the next snapshot, hands it to `persist`, and only installs it
    /// once `persist` succeeds.
    fn swap_with<F>(
        &self,
        project_id: &str,
        shares: Vec<TeamMemberShare>,
        persist: F,
    ) -> Result<(), StoreError>
    where
        F: FnOnce(&ShareSnapshot) -> Result<(), StoreError>,
    {
        let mut current = self.current.write();
        let mut next = (**current).clone();
        next.insert(project_id.to_string(), shares);
        persist(&next)?;
        *current = Arc::new(next);
        Ok(())
    }
}

impl ShareRepository for InMemoryShareRepository {
    fn project_shares(&self, project_id: &str) -> Result<Vec<TeamMemberShare>, StoreError> {
        Ok(self.snapshot().get(project_id).cloned().unwrap_or_default())
    }

    fn replace_project_shares(
        &self,
        project_id: &str,
        shares: Vec<TeamMemberShare>,
    ) -> Result<(), StoreError> {
        self.swap_with(project_id, shares, |_| Ok(()))
    }

    fn snapshot(&self) -> Arc<ShareSnapshot> {
        self.current.read().clone()
    }
}

/// An in-memory snapshot mirrored to a JSON file on every save.
///
/// The file is written next to its final location and renamed into place, so
/// a failed write leaves both the previous file and the in-memory state.
#[derive(Debug)]
pub struct JsonFileShareRepository {
    path: PathBuf,
    inner: InMemoryShareRepository,
}

impl JsonFileShareRepository {
    /// Loads the file at `path`, or starts empty when it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            if raw.trim().is_empty() {
                ShareSnapshot::new()
            } else {
                serde_json::from_str(&raw).map_err(|source| StoreError::Json {
                    path: path.clone(),
                    source,
                })?
            }
        } else {
            ShareSnapshot::new()
        };

        tracing::debug!(path = %path.display(), projects = snapshot.len(), "Opened profit share file.");

        Ok(Self {
            inner: InMemoryShareRepository::with_snapshot(snapshot),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ShareRepository for JsonFileShareRepository {
    fn project_shares(&self, project_id: &str) -> Result<Vec<TeamMemberShare>, StoreError> {
        self.inner.project_shares(project_id)
    }

    fn replace_project_shares(
        &self,
        project_id: &str,
        shares: Vec<TeamMemberShare>,
    ) -> Result<(), StoreError> {
        self.inner
            .swap_with(project_id, shares, |next| write_snapshot(&self.path, next))
    }

    fn snapshot(&self) -> Arc<ShareSnapshot> {
        self.inner.snapshot()
    }
}

fn write_snapshot(path: &Path, snapshot: &ShareSnapshot) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let json = serde_json::to_string_pretty(snapshot).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, json).map_err(io_err)?;
    fs::rename(&staging, path).map_err(io_err)?;
    Ok(())
}
