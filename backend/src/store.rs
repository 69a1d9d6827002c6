use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;
use shared::models::VoteSubmission;

pub type VoteSnapshot = BTreeMap<String, VoteSubmission>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Vote store lock poisoned")]
    LockPoisoned,
    #[error("Failed to access vote file {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Malformed vote file {}: {source}", .path.display())]
    Malformed { path: PathBuf, source: serde_json::Error },
}

/// Storage for one submission per participant. Implementations must make
/// each call atomic with respect to the others.
pub trait VoteStore: Send + Sync {
    fn get(&self, participant: &str) -> Result<Option<VoteSubmission>, StoreError>;

    fn put(&self, participant: &str, submission: VoteSubmission) -> Result<(), StoreError>;

    fn remove(&self, participant: &str) -> Result<bool, StoreError>;

    fn all(&self) -> Result<Vec<(String, VoteSubmission)>, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryVoteStore {
    votes: Mutex<VoteSnapshot>,
}

impl MemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, VoteSnapshot>, StoreError> {
        self.votes.lock().map_err(|_| {
            error!("Failed to acquire vote store lock");
            StoreError::LockPoisoned
        })
    }
}

impl VoteStore for MemoryVoteStore {
    fn get(&self, participant: &str) -> Result<Option<VoteSubmission>, StoreError> {
        Ok(self.lock()?.get(participant).cloned())
    }

    fn put(&self, participant: &str, submission: VoteSubmission) -> Result<(), StoreError> {
        self.lock()?.insert(participant.to_string(), submission);
        Ok(())
    }

    fn remove(&self, participant: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.remove(participant).is_some())
    }

    fn all(&self) -> Result<Vec<(String, VoteSubmission)>, StoreError> {
        Ok(self.lock()?.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

/// Keeps every submission in one pretty-printed JSON document. The file is
/// read on every call and rewritten in full on every change.
#[derive(Debug)]
pub struct JsonFileVoteStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileVoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        error!("Vote file I/O failed on {}: {}", self.path.display(), source);
        StoreError::Io { path: self.path.clone(), source }
    }

    fn load(&self) -> Result<VoteSnapshot, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(VoteSnapshot::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if contents.trim().is_empty() {
            return Ok(VoteSnapshot::new());
        }

        serde_json::from_str(&contents).map_err(|source| {
            error!("Vote file {} is malformed: {}", self.path.display(), source);
            StoreError::Malformed { path: self.path.clone(), source }
        })
    }

    fn save(&self, votes: &VoteSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(votes).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "votes.json".into());
        let tmp = self.path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            self.io_error(e)
        })?;

        debug!("Wrote {} submissions to {}", votes.len(), self.path.display());
        Ok(())
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.lock.lock().map_err(|_| {
            error!("Failed to acquire vote file lock");
            StoreError::LockPoisoned
        })
    }
}

impl VoteStore for JsonFileVoteStore {
    fn get(&self, participant: &str) -> Result<Option<VoteSubmission>, StoreError> {
        let _guard = self.guard()?;
        Ok(self.load()?.remove(participant))
    }

    fn put(&self, participant: &str, submission: VoteSubmission) -> Result<(), StoreError> {
        let _guard = self.guard()?;
        let mut votes = self.load()?;
        votes.insert(participant.to_string(), submission);
        self.save(&votes)
    }

    fn remove(&self, participant: &str) -> Result<bool, StoreError> {
        let _guard = self.guard()?;
        let mut votes = self.load()?;
        if votes.remove(participant).is_none() {
            return Ok(false);
        }
        self.save(&votes)?;
        Ok(true)
    }

    fn all(&self) -> Result<Vec<(String, VoteSubmission)>, StoreError> {
        let _guard = self.guard()?;
        Ok(self.load()?.into_iter().collect())
    }
}
