use crate::error::{MoodError, Result};
use crate::mood_entry::{local_timestamp, MoodEntry, NewMood};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What `load` does when the backing file exists but cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailurePolicy {
    EmptyCollection,
    PropagateError,
}

pub struct MoodStore {
    path: PathBuf,
    on_parse_failure: ParseFailurePolicy,
}

impl MoodStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        MoodStore {
            path: path.into(),
            on_parse_failure: ParseFailurePolicy::EmptyCollection,
        }
    }

    pub fn with_parse_failure_policy(mut self, policy: ParseFailurePolicy) -> Self {
        self.on_parse_failure = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<MoodEntry>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(MoodError::Io(e)),
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => match self.on_parse_failure {
                ParseFailurePolicy::EmptyCollection => {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "mood file is not valid JSON, treating as empty"
                    );
                    Ok(Vec::new())
                }
                ParseFailurePolicy::PropagateError => Err(MoodError::Corrupt(e)),
            },
        }
    }

    // Read-modify-write over the whole file with no isolation: two concurrent
    // appends can interleave and the last full write wins.
    pub fn append(&self, new: NewMood) -> Result<MoodEntry> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(MoodError::InvalidInput("name must not be empty".into()));
        }
        if new.mood.is_empty() {
            return Err(MoodError::InvalidInput("mood must not be empty".into()));
        }

        let entry = MoodEntry {
            name: name.to_string(),
            mood: new.mood,
            timestamp: new.timestamp.unwrap_or_else(local_timestamp),
        };

        let mut entries = self.load()?;
        entries.push(entry.clone());
        self.save(&entries)?;

        Ok(entry)
    }

    fn save(&self, entries: &[MoodEntry]) -> Result<()> {
        let serialized = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> MoodStore {
        MoodStore::new(dir.path().join("moods.json"))
    }

    #[test]
    fn append_then_load_yields_stored_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let stored = store.append(NewMood::new("  Alice  ", "😊")).unwrap();

        assert_eq!(stored.name, "Alice");
        assert_eq!(stored.mood, "😊");
        assert!(!stored.timestamp.is_empty());

        let entries = store.load().unwrap();
        assert_eq!(entries.last(), Some(&stored));
    }

    #[test]
    fn append_keeps_caller_supplied_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut new = NewMood::new("Bob", "🚀");
        new.timestamp = Some("2024-02-01T00:00:00".to_string());

        let stored = store.append(new).unwrap();
        assert_eq!(stored.timestamp, "2024-02-01T00:00:00");
    }

    #[test]
    fn blank_name_is_rejected_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append(NewMood::new("Alice", "😊")).unwrap();

        let err = store.append(NewMood::new("   ", "😊")).unwrap_err();
        assert!(matches!(err, MoodError::InvalidInput(_)));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn empty_mood_is_rejected_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let err = store.append(NewMood::new("Alice", "")).unwrap_err();
        assert!(matches!(err, MoodError::InvalidInput(_)));
        assert!(store.load().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn load_on_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_follows_parse_failure_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moods.json");
        fs::write(&path, "not json at all").unwrap();

        let lenient = MoodStore::new(&path);
        assert!(lenient.load().unwrap().is_empty());

        let strict =
            MoodStore::new(&path).with_parse_failure_policy(ParseFailurePolicy::PropagateError);
        let err = strict.load().unwrap_err();
        assert!(matches!(err, MoodError::Corrupt(_)));
    }

    #[test]
    fn persisted_sequence_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.append(NewMood::new("Alice", "😊")).unwrap();
        store.append(NewMood::new("Bob", "😐")).unwrap();
        let first = store.load().unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(first, reloaded);
        assert_eq!(reloaded[0].name, "Alice");
        assert_eq!(reloaded[1].mood, "😐");
    }
}
