//! Durable result recorder.
//!
//! Results are written as newline-delimited JSON, one record per line. Every
//! record is flushed and synced to storage before `record` returns, so a
//! record that was acknowledged survives a crash of the rest of the process.

use crate::errors::StorageError;
use crate::simulation::Config;
use crate::sweep::JobResult;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Statistics about what the recorder has written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecorderStats {
    /// Records durably written.
    pub records_written: usize,
    /// Bytes durably written, including newlines.
    pub bytes_written: usize,
}

/// Append-only writer of [`JobResult`] records.
///
/// The file is closed when the recorder is dropped, on every exit path.
#[derive(Debug)]
pub struct ResultRecorder {
    path: PathBuf,
    writer: BufWriter<File>,
    stats: RecorderStats,
}

impl ResultRecorder {
    /// Create (or truncate) the output file, creating parent directories.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        create_parent(&path)?;
        let file = File::create(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
            stats: RecorderStats::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stats(&self) -> RecorderStats {
        self.stats
    }

    /// Append one record and sync it to storage.
    pub fn record(&mut self, result: &JobResult) -> Result<(), StorageError> {
        let mut line = serde_json::to_vec(result)?;
        line.push(b'\n');
        self.writer.write_all(&line)?;
        self.writer.flush()?;
        self.writer.get_ref().sync_data()?;

        self.stats.records_written += 1;
        self.stats.bytes_written += line.len();
        Ok(())
    }
}

/// Write a configuration array as one JSON document.
pub fn write_config_set(path: impl AsRef<Path>, configs: &[Config]) -> Result<(), StorageError> {
    write_json(path.as_ref(), configs)
}

/// Read a configuration array written by [`write_config_set`].
///
/// Every configuration is validated while it is read.
pub fn read_config_set(path: impl AsRef<Path>) -> Result<Vec<Config>, StorageError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Read back every complete record of a result file.
///
/// A trailing partial line, as left by a crash in the middle of a write, is
/// ignored. Any other malformed line is an error.
pub fn read_results(path: impl AsRef<Path>) -> Result<Vec<JobResult>, StorageError> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut results = Vec::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if !line.ends_with('\n') {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        results.push(serde_json::from_str(&line)?);
    }
    Ok(results)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    create_parent(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

fn create_parent(path: &Path) -> Result<(), StorageError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}
