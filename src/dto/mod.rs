use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Note, NoteDraft};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

/// Body of create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteDraftRequest {
    /// Note title, must not be blank
    pub title: String,
    /// Note content, may be empty
    pub content: String,
}

impl NoteDraftRequest {
    /// # Errors
    ///
    /// Returns a client-facing message when the title is blank.
    pub fn validate(self) -> Result<NoteDraft, String> {
        if self.title.trim().is_empty() {
            return Err("title must not be empty".to_string());
        }

        Ok(NoteDraft {
            title: self.title,
            content: self.content,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// What went wrong
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    pub fn note_not_found(id: i64) -> Self {
        Self::new(format!("Note {id} not found"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, content: &str) -> NoteDraftRequest {
        NoteDraftRequest {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn blank_titles_are_rejected() {
        assert!(request("", "body").validate().is_err());
        assert!(request("  \t", "body").validate().is_err());
    }

    #[test]
    fn empty_content_is_allowed() {
        let draft = request("Title", "").validate().unwrap();

        assert_eq!(draft, NoteDraft::new("Title", ""));
    }

    #[test]
    fn title_is_kept_verbatim() {
        let draft = request("  padded ", "x").validate().unwrap();

        assert_eq!(draft.title, "  padded ");
    }

    #[test]
    fn not_found_message_names_the_id() {
        assert_eq!(ErrorResponse::note_not_found(12).detail, "Note 12 not found");
    }
}
