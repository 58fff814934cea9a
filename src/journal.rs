//! Composition journal
//!
//! One JSON object per line, one line per iteration. The first write of a run
//! overwrites any previous journal; later iterations append.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::sim::CompositionRow;

/// How a journal write treats the existing file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
    /// Truncate and start a new journal
    Overwrite,
    /// Add to the end of the journal
    Append,
}

/// A single journal line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub iteration: u32,
    pub composition: Vec<CompositionRow>,
}

/// Per-iteration composition record on disk
#[derive(Debug, Clone)]
pub struct CompositionJournal {
    path: PathBuf,
}

impl CompositionJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one iteration's composition
    pub fn record(
        &self,
        rows: &[CompositionRow],
        mode: JournalMode,
        iteration: u32,
    ) -> SimResult<()> {
        let mut file = match mode {
            JournalMode::Overwrite => File::create(&self.path)?,
            JournalMode::Append => OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?,
        };

        let entry = JournalEntry {
            iteration,
            composition: rows.to_vec(),
        };
        let line = serde_json::to_string(&entry)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Read every entry back in order
    pub fn read_all(&self) -> SimResult<Vec<JournalEntry>> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            entries.push(serde_json::from_str(&line)?);
        }
        Ok(entries)
    }
}
