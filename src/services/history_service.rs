use std::fs;
use std::path::PathBuf;
use crate::models::HistoryEntry;
use chrono::Utc;

/// Most recent exchanges kept in the query history.
const HISTORY_CAPACITY: usize = 50;

pub fn get_app_data_dir() -> Result<PathBuf, String> {
    let data_dir = dirs::data_dir()
        .ok_or("Could not find data directory")?
        .join("Parley");

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir).map_err(|e| e.to_string())?;
    }

    Ok(data_dir)
}

fn get_history_path() -> Result<PathBuf, String> {
    Ok(get_app_data_dir()?.join("history.json"))
}

/// The persisted query history: a single JSON array of entries, newest
/// first, capped at `HISTORY_CAPACITY`.
///
/// Persistence failures never propagate; the in-memory entries stay
/// authoritative for the session and problems are only logged.
pub struct HistoryStore {
    path: Option<PathBuf>,
    entries: Vec<HistoryEntry>,
    seq: u64,
}

impl HistoryStore {
    /// Load the history persisted at `path`. A missing file is an empty
    /// history; an unreadable payload is deleted so it cannot fail again on
    /// the next launch.
    pub fn load(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("Discarding unreadable history file {:?}: {}", path, e);
                    let _ = fs::remove_file(&path);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self {
            path: Some(path),
            entries,
            seq: 0,
        }
    }

    /// Load from the default location in the app data directory. If that
    /// directory cannot be resolved the store still works for the session,
    /// it just never persists.
    pub fn load_default() -> Self {
        match get_history_path() {
            Ok(path) => Self::load(path),
            Err(e) => {
                log::error!("History persistence disabled: {}", e);
                Self {
                    path: None,
                    entries: Vec::new(),
                    seq: 0,
                }
            }
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Record a completed exchange. The new entry goes in front, anything
    /// past the capacity falls off the end, and the whole array is
    /// rewritten on disk.
    pub fn append(&mut self, query: &str, response: &str) -> &[HistoryEntry] {
        let now = Utc::now();
        self.seq += 1;
        let entry = HistoryEntry {
            id: format!("{}-{}", now.timestamp_millis(), self.seq),
            query: query.to_string(),
            response: response.to_string(),
            timestamp: now,
        };

        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist();

        &self.entries
    }

    /// Drop every entry and delete the persisted file.
    pub fn clear(&mut self) -> &[HistoryEntry] {
        self.entries.clear();

        if let Some(path) = &self.path {
            if path.exists() {
                if let Err(e) = fs::remove_file(path) {
                    log::warn!("Failed to remove history file {:?}: {}", path, e);
                }
            }
        }

        &self.entries
    }

    fn persist(&self) {
        let path = match &self.path {
            Some(path) => path,
            None => return,
        };

        let content = match serde_json::to_string_pretty(&self.entries) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Failed to serialize history: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(path, content) {
            log::warn!("Failed to write history file {:?}: {}", path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_at(dir: &std::path::Path) -> HistoryStore {
        HistoryStore::load(dir.join("history.json"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(dir.path());
        assert!(store.entries().is_empty());
    }

    #[test]
    fn appends_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(dir.path());

        store.append("first question", "first answer");
        store.append("second question", "second answer");

        let entries = store.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].query, "second question");
        assert_eq!(entries[0].response, "second answer");
        assert_eq!(entries[1].query, "first question");
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(dir.path());

        for i in 0..55 {
            store.append(&format!("q{}", i), &format!("a{}", i));
        }

        let entries = store.entries();
        assert_eq!(entries.len(), 50);
        assert_eq!(entries[0].query, "q54");
        assert_eq!(entries[49].query, "q5");
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut store = HistoryStore::load(path.clone());
        store.append("alpha", "one");
        store.append("beta", "two");

        let reloaded = HistoryStore::load(path);
        assert_eq!(reloaded.entries().len(), 2);
        for (a, b) in store.entries().iter().zip(reloaded.entries()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.query, b.query);
            assert_eq!(a.response, b.response);
            assert_eq!(a.timestamp, b.timestamp);
        }
    }

    #[test]
    fn corrupt_payload_is_discarded_and_store_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "definitely not json").unwrap();

        let mut store = HistoryStore::load(path.clone());
        assert!(store.entries().is_empty());
        // The unreadable payload is gone, not left to fail again.
        assert!(!path.exists());

        store.append("fresh", "start");
        assert_eq!(store.entries().len(), 1);
        assert_eq!(HistoryStore::load(path).entries().len(), 1);
    }

    #[test]
    fn non_array_payload_is_treated_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"{"entries": []}"#).unwrap();

        let store = HistoryStore::load(path.clone());
        assert!(store.entries().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn clear_empties_memory_and_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut store = HistoryStore::load(path.clone());
        store.append("question", "answer");
        assert!(path.exists());

        store.clear();
        assert!(store.entries().is_empty());
        assert!(!path.exists());
        assert!(HistoryStore::load(path).entries().is_empty());
    }

    #[test]
    fn memory_is_updated_even_when_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist, so every write fails.
        let path = dir.path().join("missing").join("history.json");

        let mut store = HistoryStore::load(path);
        store.append("question", "answer");
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].query, "question");
    }
}
