// CSV dataset: create-with-header, append-only rows, whole-file reads.
// Rows are appended with a single write each; there is no cross-request lock.

mod export;

use crate::error::StorageError;
use crate::models::{FIELD_NAMES, ResultRecord};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::instrument;

pub use export::to_csv;

pub struct ResultsRepo {
    path: PathBuf,
}

impl ResultsRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file with only the header row if it does not exist.
    /// Returns true when the file was created. Existing contents are left untouched.
    #[instrument(skip(self), fields(repo = "results", operation = "ensure_initialized"))]
    pub fn ensure_initialized(&self) -> Result<bool, StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        let mut wtr = csv::Writer::from_writer(file);
        wtr.write_record(FIELD_NAMES)?;
        wtr.flush()?;
        Ok(true)
    }

    /// Appends one row in column order. The row is encoded up front and written in one call.
    #[instrument(skip(self, record), fields(repo = "results", operation = "append"))]
    pub fn append(&self, record: &ResultRecord) -> Result<(), StorageError> {
        let row = encode_row(record)?;
        let mut file = match OpenOptions::new().append(true).open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::Missing(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(&row)?;
        Ok(())
    }

    /// Every row after the header, in file order.
    #[instrument(skip(self), fields(repo = "results", operation = "read_all"))]
    pub fn read_all(&self) -> Result<Vec<ResultRecord>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::Missing(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
        let header_ok = rdr.headers()?.iter().eq(FIELD_NAMES.iter().copied());
        if !header_ok {
            return Err(StorageError::MalformedHeader(self.path.clone()));
        }
        let mut out = Vec::new();
        for row in rdr.deserialize() {
            let record: ResultRecord = row?;
            out.push(record);
        }
        Ok(out)
    }
}

fn encode_row(record: &ResultRecord) -> Result<Vec<u8>, StorageError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.serialize(record)?;
    wtr.into_inner()
        .map_err(|e| StorageError::Io(std::io::Error::other(e.to_string())))
}
