mod embedded;
pub mod memory;
pub mod postgres;

use chrono::{DateTime, Utc};

pub use memory::MemoryBackend;
pub use postgres::PostgresBackend;

use crate::{
    error::Result,
    models::{Note, NoteDraft},
};

/// The storage strategy behind a `NoteStore`, chosen once at construction.
pub enum Backend {
    Memory(MemoryBackend),
    Postgres(PostgresBackend),
}

impl Backend {
    /// A missing or blank location selects the in-memory backend; anything
    /// else is treated as a PostgreSQL connection string.
    ///
    /// # Errors
    ///
    /// Fails if the persistent backend cannot connect or create its table.
    pub async fn open(location: Option<&str>) -> Result<Self> {
        match location.map(str::trim).filter(|dsn| !dsn.is_empty()) {
            Some(dsn) => Ok(Self::Postgres(PostgresBackend::new(dsn).await?)),
            None => Ok(Self::Memory(MemoryBackend::new())),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }

    pub async fn create_note(&mut self, draft: NoteDraft, now: DateTime<Utc>) -> Result<Note> {
        match self {
            Self::Memory(backend) => Ok(backend.create_note(draft, now)),
            Self::Postgres(backend) => backend.create_note(draft, now).await,
        }
    }

    pub async fn update_note(
        &mut self,
        id: i64,
        draft: NoteDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Note>> {
        match self {
            Self::Memory(backend) => Ok(backend.update_note(id, draft, now)),
            Self::Postgres(backend) => backend.update_note(id, draft, now).await,
        }
    }

    pub async fn delete_note(&mut self, id: i64) -> Result<bool> {
        match self {
            Self::Memory(backend) => Ok(backend.delete_note(id)),
            Self::Postgres(backend) => backend.delete_note(id).await,
        }
    }

    pub async fn get_one_note(&self, id: i64) -> Result<Option<Note>> {
        match self {
            Self::Memory(backend) => Ok(backend.get_one_note(id)),
            Self::Postgres(backend) => backend.get_one_note(id).await,
        }
    }

    pub async fn get_all_notes(&self) -> Result<Vec<Note>> {
        match self {
            Self::Memory(backend) => Ok(backend.get_all_notes()),
            Self::Postgres(backend) => backend.get_all_notes().await,
        }
    }
}
