//! Synchronous CSV reader with iterator interface
//!
//! Streams purchase requests out of a CSV file one row at a time, so the
//! pipeline's memory use is bounded by the passes it issues rather than
//! by the input size. Row shape and conversion live in `csv_format`;
//! this reader only handles the file, the streaming, and the line-number
//! context on errors.
//!
//! ```no_run
//! use transit_pass_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("purchases.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Processing purchase: {:?}", record),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! A file that cannot be opened fails `new()`; a row that cannot be
//! parsed or converted is yielded as an `Err` item and iteration
//! continues with the next row.

use crate::io::csv_format::{convert_purchase_record, PurchaseCsvRecord};
use crate::types::PurchaseRecord;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming reader over a purchase-request CSV file
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    rows_read: usize,
}

impl SyncReader {
    /// Open a purchase-request CSV file for streaming iteration
    ///
    /// The reader trims every field, tolerates flexible field counts
    /// (short rows surface as per-row errors, not a global failure), and
    /// reads through an 8KB buffer.
    ///
    /// # Errors
    ///
    /// Returns a message naming the path if the file cannot be opened.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            rows_read: 0,
        })
    }

    /// File line of the row just read, counting the header as line 1
    fn current_line(&self) -> usize {
        self.rows_read + 1
    }
}

impl Iterator for SyncReader {
    type Item = Result<PurchaseRecord, String>;

    /// Read and convert the next purchase row
    ///
    /// Yields `Some(Err(..))` with line-number context when a row fails
    /// to parse or convert, and `None` at end of file.
    fn next(&mut self) -> Option<Self::Item> {
        let mut rows = self.reader.deserialize::<PurchaseCsvRecord>();

        match rows.next()? {
            Ok(csv_record) => {
                self.rows_read += 1;
                let line = self.current_line();
                Some(
                    convert_purchase_record(csv_record)
                        .map_err(|e| format!("Line {}: {}", line, e)),
                )
            }
            Err(e) => {
                self.rows_read += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.current_line(),
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InstrumentTab;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "owner_id,owner_name,owner_email,pass_type,home_zone,destination_zone,method,instrument\n";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_reader_new_opens_file() {
        let content = format!(
            "{}u01,Asha Verma,asha@example.com,Basic Pass,Rajiv Chowk,Hauz Khas,upi,asha@okhdfcbank\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let result = SyncReader::new(file.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_sync_reader_new_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_reader_iterates_valid_purchase() {
        let content = format!(
            "{}u01,Asha Verma,asha@example.com,Basic Pass,Rajiv Chowk,Hauz Khas,upi,asha@okhdfcbank\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 1);
        let record = records[0].as_ref().unwrap();
        assert_eq!(record.owner_id, "u01");
        assert_eq!(record.tab, InstrumentTab::Upi);
        assert_eq!(record.instrument, "asha@okhdfcbank");
    }

    #[test]
    fn test_sync_reader_iterates_multiple_records() {
        let content = format!(
            "{}\
             u01,Asha Verma,asha@example.com,Basic Pass,Rajiv Chowk,Hauz Khas,upi,asha@okhdfcbank\n\
             u02,,,Basic Pass,Hauz Khas,Hauz Khas,card,4111111111111111\n\
             u03,Ravi Iyer,,Premium Pass,Rajiv Chowk,Hauz Khas,wallet,PhonePe\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|record| record.is_ok()));
    }

    #[test]
    fn test_sync_reader_yields_error_for_unknown_method() {
        let content = format!(
            "{}u01,Asha Verma,asha@example.com,Basic Pass,Rajiv Chowk,Hauz Khas,paylater,x\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 1);
        let error = records[0].as_ref().unwrap_err();
        assert!(error.contains("Line 2"));
        assert!(error.contains("Invalid payment method"));
    }

    #[test]
    fn test_sync_reader_yields_error_for_short_row() {
        let content = format!("{}u01,Asha Verma\n", HEADER);
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 1);
        assert!(records[0].is_err());
    }

    #[test]
    fn test_sync_reader_continues_after_error() {
        let content = format!(
            "{}\
             u01,Asha Verma,asha@example.com,Basic Pass,Rajiv Chowk,Hauz Khas,paylater,x\n\
             u02,Ravi Iyer,ravi@example.com,Basic Pass,Rajiv Chowk,Hauz Khas,upi,ravi@oksbi\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 2);
        assert!(records[0].is_err());
        assert!(records[1].is_ok());
    }

    #[test]
    fn test_sync_reader_empty_file_yields_nothing() {
        let file = create_temp_csv(HEADER);

        let reader = SyncReader::new(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert!(records.is_empty());
    }
}
