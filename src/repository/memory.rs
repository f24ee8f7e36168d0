use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::{Note, NoteDraft};

/// Process-lifetime note storage. Ids start at 1 and are never reused,
/// so iterating the map yields insertion order.
#[derive(Debug)]
pub struct MemoryBackend {
    notes: BTreeMap<i64, Note>,
    next_id: i64,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub const fn new() -> Self {
        Self {
            notes: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn create_note(&mut self, draft: NoteDraft, now: DateTime<Utc>) -> Note {
        let note = Note {
            id: self.next_id,
            title: draft.title,
            content: draft.content,
            created_at: now,
            updated_at: now,
        };
        self.notes.insert(note.id, note.clone());
        self.next_id += 1;

        note
    }

    pub fn update_note(&mut self, id: i64, draft: NoteDraft, now: DateTime<Utc>) -> Option<Note> {
        let note = self.notes.get_mut(&id)?;

        note.title = draft.title;
        note.content = draft.content;
        note.updated_at = now.max(note.updated_at);

        Some(note.clone())
    }

    pub fn delete_note(&mut self, id: i64) -> bool {
        self.notes.remove(&id).is_some()
    }

    pub fn get_one_note(&self, id: i64) -> Option<Note> {
        self.notes.get(&id).cloned()
    }

    pub fn get_all_notes(&self) -> Vec<Note> {
        self.notes.values().cloned().collect()
    }
}
