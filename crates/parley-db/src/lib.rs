pub mod models;
pub mod queries;
pub mod seed;
pub mod writer;

use anyhow::{Context, Result, anyhow};
use parley_types::models::{Document, Message};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::models::NewMessage;
use crate::writer::{StoreWriter, WriterHandle};

/// In-memory document mirrored to a JSON file.
///
/// `None` means the store has never been initialized. The snapshot is
/// authoritative while the process runs: the file is only read on open and
/// only the writer task replaces it.
pub struct Database {
    path: PathBuf,
    data: RwLock<Option<Document>>,
}

impl Database {
    pub async fn open(path: &Path) -> Result<Self> {
        let data = load(path).await?;

        info!(
            "Store opened at {} ({})",
            path.display(),
            if data.is_some() { "populated" } else { "empty" }
        );
        Ok(Self {
            path: path.to_path_buf(),
            data: RwLock::new(data),
        })
    }

    /// Write the whole snapshot back to disk.
    ///
    /// Goes through a sibling temp file, synced to disk before it is renamed
    /// over the store, so the file is never half-written and a returned
    /// write survives a crash.
    pub async fn persist(&self) -> Result<()> {
        let bytes = {
            let data = self.data.read().map_err(|e| anyhow!("Store lock poisoned: {}", e))?;
            match data.as_ref() {
                Some(doc) => serde_json::to_vec_pretty(doc)?,
                None => return Ok(()),
            }
        };

        let tmp = self.path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&tmp)
            .await
            .with_context(|| format!("creating {}", tmp.display()))?;
        file.write_all(&bytes)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        file.sync_all()
            .await
            .with_context(|| format!("syncing {}", tmp.display()))?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;

        debug!("Persisted {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    /// Run `f` against the snapshot. Fails if the store is uninitialized.
    pub fn with_data<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Document) -> Result<T>,
    {
        let data = self.data.read().map_err(|e| anyhow!("Store lock poisoned: {}", e))?;
        let doc = data.as_ref().ok_or_else(|| anyhow!("Store is not initialized"))?;
        f(doc)
    }

    /// Mutable access to the snapshot. Only the writer task calls this.
    pub(crate) fn with_data_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Option<Document>) -> Result<T>,
    {
        let mut data = self.data.write().map_err(|e| anyhow!("Store lock poisoned: {}", e))?;
        f(&mut data)
    }
}

async fn load(path: &Path) -> Result<Option<Document>> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };

    if raw.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Handle passed to every operation: shared reads plus the single writer.
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
    writer: WriterHandle,
}

impl Store {
    /// Open the store file and start its writer task. Must be called from
    /// within a tokio runtime.
    pub async fn open(path: &Path) -> Result<Self> {
        let db = Arc::new(Database::open(path).await?);
        let (writer, handle) = StoreWriter::new(db.clone());
        tokio::spawn(writer.run());

        Ok(Self { db, writer: handle })
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Populate an empty store from the seed dataset. Returns whether
    /// anything was written.
    pub async fn seed_if_empty(&self) -> Result<bool> {
        self.writer.seed().await
    }

    pub async fn append_message(&self, message: NewMessage) -> Result<Message> {
        self.writer.append_message(message).await
    }
}
