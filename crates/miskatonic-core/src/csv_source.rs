use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, Trim};

use crate::error::ImportError;
use crate::models::RawRow;

/// Columns every question CSV must declare. `remark` is optional.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "question",
    "subject",
    "use",
    "correct",
    "responseA",
    "responseB",
    "responseC",
    "responseD",
];

/// Check a header row, reporting every missing required column at once.
pub fn validate_headers<'a, I>(headers: I) -> Result<(), ImportError>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().collect();
    if present.iter().all(|h| h.is_empty()) {
        return Err(ImportError::MissingHeaders);
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !present.contains(*col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ImportError::MissingColumns(missing))
    }
}

/// Question rows read from CSV, with the header already validated.
pub struct CsvSource<R> {
    reader: Reader<R>,
}

impl CsvSource<File> {
    /// Open a CSV file and validate its header row.
    pub fn open(path: &Path) -> Result<Self, ImportError> {
        Self::new(File::open(path)?)
    }
}

impl<R: Read> CsvSource<R> {
    /// Wrap a reader and validate its header row before any record is read.
    pub fn new(input: R) -> Result<Self, ImportError> {
        let mut reader = ReaderBuilder::new()
            .flexible(true) // Short rows leave trailing columns empty
            .trim(Trim::Headers)
            .from_reader(input);

        let headers = reader
            .headers()
            .map_err(|source| ImportError::Csv { record: 0, source })?;
        validate_headers(headers.iter())?;

        Ok(Self { reader })
    }

    /// Decode the remaining records. Record numbers in errors are 1-based
    /// and do not count the header.
    pub fn rows(self) -> impl Iterator<Item = Result<RawRow, ImportError>> {
        self.reader
            .into_deserialize::<RawRow>()
            .enumerate()
            .map(|(idx, result)| {
                result.map_err(|source| ImportError::Csv {
                    record: idx as u64 + 1,
                    source,
                })
            })
    }
}
