use chrono::{DateTime, SecondsFormat, Utc};
use tokio_postgres::{Client, NoTls, Row};

use super::embedded::migrations;
use crate::{
    error::{Result, StoreError},
    models::{Note, NoteDraft},
};

/// PostgreSQL-backed storage. Holds only the DSN: each operation opens its
/// own connection and drops it before returning.
pub struct PostgresBackend {
    dsn: String,
}

impl PostgresBackend {
    /// Connects once to create the `notes` table if it is missing.
    ///
    /// # Errors
    ///
    /// Fails if the database is unreachable or the schema cannot be created.
    pub async fn new(dsn: impl Into<String>) -> Result<Self> {
        let backend = Self { dsn: dsn.into() };
        backend.migrate().await?;

        Ok(backend)
    }

    async fn connect(&self) -> Result<Client> {
        let (client, con) = tokio_postgres::connect(&self.dsn, NoTls).await?;

        // Driver task finishes once `client` is dropped.
        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(client)
    }

    async fn migrate(&self) -> Result<()> {
        let mut client = self.connect().await?;
        let migrations_report = migrations::runner().run_async(&mut client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }

    pub async fn create_note(&self, draft: NoteDraft, now: DateTime<Utc>) -> Result<Note> {
        let client = self.connect().await?;
        let stamp = format_timestamp(now);

        let row = client
            .query_one(
                "INSERT INTO notes (title, content, created_at, updated_at) \
                 VALUES ($1, $2, $3, $3) RETURNING id",
                &[&draft.title, &draft.content, &stamp],
            )
            .await?;

        Ok(Note {
            id: row.get("id"),
            title: draft.title,
            content: draft.content,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn update_note(
        &self,
        id: i64,
        draft: NoteDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Note>> {
        let client = self.connect().await?;
        let stamp = format_timestamp(now);

        // Stamps share one fixed-width format, so text order is time order.
        let row = client
            .query_opt(
                "UPDATE notes SET title = $1, content = $2, updated_at = GREATEST(updated_at, $3) \
                 WHERE id = $4 RETURNING id, title, content, created_at, updated_at",
                &[&draft.title, &draft.content, &stamp, &id],
            )
            .await?;

        row.as_ref().map(note_from_row).transpose()
    }

    pub async fn delete_note(&self, id: i64) -> Result<bool> {
        let client = self.connect().await?;
        let rows = client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows > 0)
    }

    pub async fn get_one_note(&self, id: i64) -> Result<Option<Note>> {
        let client = self.connect().await?;
        let row = client
            .query_opt(
                "SELECT id, title, content, created_at, updated_at FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        row.as_ref().map(note_from_row).transpose()
    }

    pub async fn get_all_notes(&self) -> Result<Vec<Note>> {
        let client = self.connect().await?;
        let rows = client
            .query(
                "SELECT id, title, content, created_at, updated_at FROM notes ORDER BY id",
                &[],
            )
            .await?;

        rows.iter().map(note_from_row).collect()
    }
}

fn note_from_row(row: &Row) -> Result<Note> {
    Ok(Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
    })
}

/// UTC, microsecond precision, `Z` suffix: `2024-05-01T12:00:00.000000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|source| StoreError::Timestamp {
            value: value.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn timestamps_are_fixed_width_utc() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        assert_eq!(format_timestamp(at), "2024-05-01T12:00:00.000000Z");
    }

    #[test]
    fn timestamps_parse_back() {
        let at = Utc.timestamp_micros(1_714_564_800_123_456).unwrap();

        assert_eq!(parse_timestamp(&format_timestamp(at)).unwrap(), at);
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let parsed = parse_timestamp("2024-05-01T14:00:00+02:00").unwrap();

        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn text_order_matches_time_order() {
        let earlier = format_timestamp(Utc.timestamp_micros(1_714_564_800_000_001).unwrap());
        let later = format_timestamp(Utc.timestamp_micros(1_714_564_800_100_000).unwrap());

        assert!(earlier < later);
    }

    #[test]
    fn garbage_timestamp_is_an_error() {
        let err = parse_timestamp("yesterday").unwrap_err();

        assert!(matches!(err, StoreError::Timestamp { ref value, .. } if value == "yesterday"));
    }
}
