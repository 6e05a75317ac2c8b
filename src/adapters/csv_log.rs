//! CSV sample log with generational rotation.
//!
//! On open, the previous two runs are kept beside the fresh file:
//!
//! ```text
//!  file.save2  (deleted)
//!  file.save1 ─▶ file.save2
//!  file       ─▶ file.save1
//!  (new)      ─▶ file
//! ```
//!
//! Missing generations are skipped.  Every record is flushed before
//! `append` returns so a power cut loses at most the record being written.

use std::ffi::OsString;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::app::ports::{LogError, LogPort, LogRecord};

/// `path` with `suffix` appended to the file name (`run.csv` → `run.csv.save1`).
pub fn generation_path(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

fn skip_missing(res: std::io::Result<()>) -> std::io::Result<()> {
    match res {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Shift `path` and `path.save1` back one generation, dropping `path.save2`.
pub fn rotate(path: &Path) -> Result<(), LogError> {
    let save1 = generation_path(path, ".save1");
    let save2 = generation_path(path, ".save2");

    skip_missing(std::fs::remove_file(&save2)).map_err(LogError::Rotate)?;
    skip_missing(std::fs::rename(&save1, &save2)).map_err(LogError::Rotate)?;
    skip_missing(std::fs::rename(path, &save1)).map_err(LogError::Rotate)?;
    debug!("csv log: rotated generations of {}", path.display());
    Ok(())
}

pub struct CsvLog {
    path: PathBuf,
    writer: Option<csv::Writer<File>>,
    records: u64,
}

impl CsvLog {
    /// Rotate the old generations and create a fresh, empty log.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LogError> {
        let path = path.into();
        rotate(&path)?;
        let file = File::create(&path).map_err(LogError::Open)?;
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        info!("csv log: writing {}", path.display());
        Ok(Self {
            path,
            writer: Some(writer),
            records: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records written since open.
    pub fn records(&self) -> u64 {
        self.records
    }
}

impl LogPort for CsvLog {
    fn append(&mut self, record: &LogRecord) -> Result<(), LogError> {
        let writer = self.writer.as_mut().ok_or(LogError::Closed)?;
        writer
            .write_record(record.fields())
            .map_err(|e| LogError::Write(e.into()))?;
        writer.flush().map_err(LogError::Write)?;
        self.records += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), LogError> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        writer.flush().map_err(LogError::Write)?;
        info!("csv log: closed after {} records", self.records);
        Ok(())
    }
}
