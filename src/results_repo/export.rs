// Re-serialize records as a complete CSV document (header + rows)

use crate::error::StorageError;
use crate::models::{FIELD_NAMES, ResultRecord};

/// Header line always present, even with zero records.
pub fn to_csv(records: &[ResultRecord]) -> Result<Vec<u8>, StorageError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(FIELD_NAMES)?;
    for r in records {
        wtr.serialize(r)?;
    }
    wtr.into_inner()
        .map_err(|e| StorageError::Io(std::io::Error::other(e.to_string())))
}
