use std::{
    fs,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, WriterBuilder};

use crate::store::{Row, SheetError, Worksheet};

/// Worksheet backed by a local CSV file.
///
/// Every write rewrites the file through a temporary one, so a failed write leaves the previous
/// contents in place.
#[derive(Clone, Debug)]
pub struct CsvWorksheet {
    path: PathBuf,
}

impl CsvWorksheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn replace_all(&self, rows: &[Row]) -> Result<(), SheetError> {
        let temporary_path = self.path.with_extension("csv.tmp");
        let mut writer = WriterBuilder::new().flexible(true).from_path(&temporary_path)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        drop(writer);
        fs::rename(&temporary_path, &self.path)?;
        Ok(())
    }
}

impl Worksheet for CsvWorksheet {
    /// A missing file reads as an empty worksheet.
    fn all_values(&self) -> Result<Vec<Row>, SheetError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = ReaderBuilder::new().has_headers(false).flexible(true).from_path(&self.path)?;
        reader
            .records()
            .map(|record| -> Result<Row, SheetError> { Ok(record?.iter().map(str::to_owned).collect()) })
            .collect()
    }

    fn write_row(&mut self, index: usize, row: Row) -> Result<(), SheetError> {
        let mut rows = self.all_values()?;
        match index {
            _ if index < rows.len() => rows[index] = row,
            _ if index == rows.len() => rows.push(row),
            _ => return Err(SheetError::OutOfRange { index, n_rows: rows.len() }),
        }
        self.replace_all(&rows)
    }

    fn delete_row(&mut self, index: usize) -> Result<(), SheetError> {
        let mut rows = self.all_values()?;
        if index >= rows.len() {
            return Err(SheetError::OutOfRange { index, n_rows: rows.len() });
        }
        rows.remove(index);
        self.replace_all(&rows)
    }
}
