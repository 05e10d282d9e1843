//! Record destinations.
//!
//! # Responsibilities
//! - Persist formatted lines (file sink)
//! - Capture records in memory for inspection (memory sink)
//!
//! # Design Decisions
//! - One `write_all` per record under a mutex, so each line is atomic
//! - The file is opened lazily in append mode; parent directories are created
//!   on first write, so building a logger never touches the filesystem

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::logging::record::Record;

/// A destination for formatted records.
pub trait Sink: Send + Sync {
    /// Short description used in diagnostics.
    fn describe(&self) -> String;

    /// Persist one record. `line` is the formatted text, newline included.
    fn write(&self, record: &Record, line: &str) -> io::Result<()>;
}

/// Appends lines to a file.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> io::Result<File> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(&self.path)
    }
}

impl Sink for FileSink {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn write(&self, _record: &Record, line: &str) -> io::Result<()> {
        let mut guard = lock(&self.file);
        if guard.is_none() {
            *guard = Some(self.open()?);
        }
        match guard.as_mut() {
            Some(file) => file.write_all(line.as_bytes()),
            None => Ok(()),
        }
    }
}

/// A record captured by [`MemorySink`].
#[derive(Debug, Clone)]
pub struct CapturedRecord {
    pub record: Record,
    pub line: String,
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<CapturedRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured records in emission order.
    pub fn records(&self) -> Vec<CapturedRecord> {
        lock(&self.records).clone()
    }

    /// Messages of all captured records in emission order.
    pub fn messages(&self) -> Vec<String> {
        lock(&self.records)
            .iter()
            .map(|captured| captured.record.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        lock(&self.records).clear();
    }
}

impl Sink for MemorySink {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn write(&self, record: &Record, line: &str) -> io::Result<()> {
        lock(&self.records).push(CapturedRecord {
            record: record.clone(),
            line: line.to_string(),
        });
        Ok(())
    }
}

// Poisoning is ignored: records are pushed or written whole.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::level::Level;
    use crate::logging::record::Fields;
    use std::panic::Location;

    fn record(message: &str) -> Record {
        Record::new(None, Level::Info, message, Fields::new(), Location::caller())
    }

    #[test]
    fn test_file_sink_creates_parents_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("access.log");

        let sink = FileSink::new(&path);
        assert!(!path.exists());

        sink.write(&record("one"), "one\n").unwrap();
        sink.write(&record("two"), "two\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");

        // a second sink on the same file appends rather than truncates
        let again = FileSink::new(&path);
        again.write(&record("three"), "three\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\nthree\n");
    }

    #[test]
    fn test_file_sink_reports_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        // the parent "directory" is a regular file
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let sink = FileSink::new(blocker.join("access.log"));
        assert!(sink.write(&record("lost"), "lost\n").is_err());
    }

    #[test]
    fn test_memory_sink_captures_in_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.write(&record("a"), "a\n").unwrap();
        sink.write(&record("b"), "b\n").unwrap();

        assert_eq!(sink.messages(), vec!["a", "b"]);
        assert_eq!(sink.records()[1].line, "b\n");

        sink.clear();
        assert_eq!(sink.len(), 0);
    }
}
