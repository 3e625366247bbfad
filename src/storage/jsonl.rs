//! Typed JSONL file access.
//!
//! Each line is one JSON document. Unparseable lines are logged and
//! skipped on read rather than failing the whole collection.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::StorageError;

/// One JSONL-backed collection of documents of type `T`.
pub struct JsonlFile<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonlFile<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl<T: Serialize> JsonlFile<T> {
    /// Append a single document.
    pub fn append(&self, doc: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", serde_json::to_string(doc)?)?;
        writer.flush()?;

        debug!("Appended document to {:?}", self.path);
        Ok(())
    }

    /// Replace the file with the given documents.
    pub fn write_all(&self, docs: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;
        for doc in docs {
            writeln!(writer, "{}", serde_json::to_string(doc)?)?;
            count += 1;
        }
        writer.flush()?;

        debug!("Wrote {} documents to {:?}", count, self.path);
        Ok(count)
    }
}

impl<T: DeserializeOwned> JsonlFile<T> {
    /// Read every parseable document. A missing file is an empty collection.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut docs = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(doc) => docs.push(doc),
                Err(e) => {
                    warn!("Skipping malformed line {} in {:?}: {}", idx + 1, self.path, e);
                }
            }
        }

        debug!("Read {} documents from {:?}", docs.len(), self.path);
        Ok(docs)
    }

    /// Count parseable documents in the file.
    pub fn count(&self) -> Result<usize, StorageError> {
        Ok(self.read_all()?.len())
    }
}
