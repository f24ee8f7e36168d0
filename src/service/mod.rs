use chrono::{DateTime, SubsecRound, Utc};
use tokio::sync::Mutex;

use crate::{
    error::Result,
    models::{Note, NoteDraft},
    repository::{Backend, MemoryBackend},
};

/// Backend-agnostic note CRUD.
///
/// Every operation holds one store-wide lock for its whole body, backend
/// I/O included, so concurrent callers see a strictly serialized history.
/// The lock is only taken at this public surface; anything composed inside
/// an operation works on the already-held backend.
pub struct NoteStore {
    backend: Mutex<Backend>,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl NoteStore {
    pub fn new(backend: Backend) -> Self {
        tracing::info!("Note store using {} backend", backend.kind());
        Self {
            backend: Mutex::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Backend::Memory(MemoryBackend::new()))
    }

    /// Opens a store for `location`: blank or absent means in-memory,
    /// otherwise a PostgreSQL DSN.
    ///
    /// # Errors
    ///
    /// Fails if the persistent backend cannot be reached or initialized.
    pub async fn open(location: Option<&str>) -> Result<Self> {
        Backend::open(location).await.map(Self::new)
    }

    pub async fn backend_kind(&self) -> &'static str {
        self.backend.lock().await.kind()
    }

    /// Stores a new note and returns it with its id and timestamps.
    ///
    /// # Errors
    ///
    /// Propagates backend I/O failures.
    pub async fn add(&self, draft: NoteDraft) -> Result<Note> {
        let mut backend = self.backend.lock().await;
        let note = backend.create_note(draft, now()).await?;
        tracing::debug!("Created note {}", note.id);

        Ok(note)
    }

    /// # Errors
    ///
    /// Propagates backend I/O failures.
    pub async fn get(&self, id: i64) -> Result<Option<Note>> {
        let backend = self.backend.lock().await;
        tracing::debug!("Fetching note {}", id);

        backend.get_one_note(id).await
    }

    /// All notes, ascending by id.
    ///
    /// # Errors
    ///
    /// Propagates backend I/O failures.
    pub async fn list(&self) -> Result<Vec<Note>> {
        let backend = self.backend.lock().await;
        let notes = backend.get_all_notes().await?;
        tracing::debug!("Listed {} notes", notes.len());

        Ok(notes)
    }

    /// Replaces title and content, keeping `id` and `created_at`.
    ///
    /// # Errors
    ///
    /// Propagates backend I/O failures.
    pub async fn update(&self, id: i64, draft: NoteDraft) -> Result<Option<Note>> {
        let mut backend = self.backend.lock().await;
        let note = backend.update_note(id, draft, now()).await?;

        match &note {
            Some(_) => tracing::debug!("Updated note {}", id),
            None => tracing::debug!("Update skipped, note {} not found", id),
        }

        Ok(note)
    }

    /// Returns whether a note with `id` existed and was removed.
    ///
    /// # Errors
    ///
    /// Propagates backend I/O failures.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let mut backend = self.backend.lock().await;
        let removed = backend.delete_note(id).await?;
        tracing::debug!("Delete note {}: removed={}", id, removed);

        Ok(removed)
    }
}

// Microsecond precision matches what the persistent backend can round-trip.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
