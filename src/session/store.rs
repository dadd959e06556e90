// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Persistence of authenticated session data between restarts.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::SessionData;

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("session store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Where the host keeps authenticated data so it can be restored later.
pub trait SessionStore: Send + Sync {
    /// Previously persisted data, or `None` when nothing was persisted.
    fn load(&self) -> SessionStoreResult<Option<SessionData>>;

    fn persist(&self, data: &SessionData) -> SessionStoreResult<()>;

    /// Forget persisted data. Clearing an empty store succeeds.
    fn clear(&self) -> SessionStoreResult<()>;
}

/// Keeps data for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct EphemeralSessionStore {
    data: Mutex<Option<SessionData>>,
}

impl EphemeralSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poisoning is recovered: the slot is plain data a panicking writer
    /// cannot leave half-updated.
    fn slot(&self) -> MutexGuard<'_, Option<SessionData>> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for EphemeralSessionStore {
    fn load(&self) -> SessionStoreResult<Option<SessionData>> {
        Ok(self.slot().clone())
    }

    fn persist(&self, data: &SessionData) -> SessionStoreResult<()> {
        *self.slot() = Some(data.clone());
        Ok(())
    }

    fn clear(&self) -> SessionStoreResult<()> {
        *self.slot() = None;
        Ok(())
    }
}

/// Persists data as a JSON file.
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a crash never leaves a half-written session behind.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> SessionStoreResult<Option<SessionData>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let data = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(data))
    }

    fn persist(&self, data: &SessionData) -> SessionStoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, data)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> SessionStoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
