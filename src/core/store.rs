use crate::domain::model::Note;
use crate::utils::error::Result;
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_RECENT_LIMIT: usize = 15;

#[derive(Debug, Deserialize)]
struct NotesFile {
    notes: Vec<Note>,
}

/// In-memory, read-only note collection.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it
/// afterwards, so readers need no locking.
#[derive(Debug, Clone, Default)]
pub struct NoteRepository {
    notes: Vec<Note>,
    index: HashMap<String, usize>,
}

impl NoteRepository {
    pub fn from_notes(notes: Vec<Note>) -> Self {
        let mut repo = Self::default();
        for note in notes {
            // 重複 ID 以後出現的為準
            match repo.index.get(&note.id) {
                Some(&pos) => repo.notes[pos] = note,
                None => {
                    repo.index.insert(note.id.clone(), repo.notes.len());
                    repo.notes.push(note);
                }
            }
        }
        repo
    }

    /// Loads `{"notes": [...]}` from `path`, or the seed note if the file is missing.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let file: NotesFile = serde_json::from_str(&content)?;
                tracing::info!("📚 Loaded {} notes from {}", file.notes.len(), path.display());
                Ok(Self::from_notes(file.notes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    "Notes file {} not found, falling back to seed note",
                    path.display()
                );
                Ok(Self::seeded())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn seeded() -> Self {
        Self::from_notes(vec![Note {
            id: "note-1".to_string(),
            title: None,
            content: "Python is a high-level programming language.".to_string(),
            tags: vec!["programming".to_string(), "python".to_string()],
            created_at: Utc::now(),
        }])
    }

    pub fn get_by_id(&self, note_id: &str) -> Option<&Note> {
        self.index.get(note_id).map(|&pos| &self.notes[pos])
    }

    /// All notes in load order.
    pub fn list_all(&self) -> &[Note] {
        &self.notes
    }

    /// Newest first, at most `limit` notes.
    pub fn recent(&self, limit: usize) -> Vec<Note> {
        let mut notes = self.notes.clone();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notes.truncate(limit);
        notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::NoteError;
    use chrono::{Duration, TimeZone};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn note(id: &str, days_ago: i64) -> Note {
        Note {
            id: id.to_string(),
            title: None,
            content: format!("content of {}", id),
            tags: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
                - Duration::days(days_ago),
        }
    }

    #[test]
    fn test_get_by_id() {
        let repo = NoteRepository::from_notes(vec![note("a", 1), note("b", 2)]);
        assert_eq!(repo.get_by_id("b").unwrap().content, "content of b");
        assert!(repo.get_by_id("zzz").is_none());
    }

    #[test]
    fn test_recent_sorts_descending_and_truncates() {
        let repo = NoteRepository::from_notes(vec![
            note("old", 10),
            note("newest", 0),
            note("middle", 5),
        ]);

        let ids: Vec<String> = repo.recent(2).into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["newest", "middle"]);
        assert_eq!(repo.recent(DEFAULT_RECENT_LIMIT).len(), 3);
        assert!(repo.recent(0).is_empty());
    }

    #[test]
    fn test_duplicate_ids_keep_last() {
        let mut dup = note("a", 3);
        dup.content = "second".to_string();
        let repo = NoteRepository::from_notes(vec![note("a", 1), dup]);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get_by_id("a").unwrap().content, "second");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"notes": [
                {{"id": "n1", "title": "First", "content": "one", "tags": ["x"], "created_at": "2024-01-01T08:00:00Z"}},
                {{"id": "n2", "content": "two", "tags": [], "created_at": "2024-01-02T08:00:00Z"}}
            ]}}"#
        )
        .unwrap();

        let repo = NoteRepository::load(file.path()).unwrap();
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.list_all()[0].id, "n1");
        assert_eq!(repo.get_by_id("n1").unwrap().title.as_deref(), Some("First"));
    }

    #[test]
    fn test_missing_file_falls_back_to_seed() {
        let dir = tempfile::tempdir().unwrap();
        let repo = NoteRepository::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(repo.len(), 1);
        let seed = repo.get_by_id("note-1").unwrap();
        assert_eq!(seed.tags, vec!["programming", "python"]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(
            NoteRepository::load(file.path()),
            Err(NoteError::SerializationError(_))
        ));
    }
}
