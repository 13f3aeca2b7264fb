use std::cell::Cell;

use crate::store::{Row, SheetError, Worksheet};

/// Worksheet kept in memory.
///
/// It can be switched offline or read-only to rehearse the store outages.
#[derive(Clone, Debug, Default)]
pub struct MemoryWorksheet {
    rows: Vec<Row>,
    is_offline: bool,
    is_read_only: bool,
    n_reads: Cell<usize>,
}

impl MemoryWorksheet {
    #[must_use]
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows, ..Self::default() }
    }

    #[must_use]
    pub fn from_cells(rows: &[&[&str]]) -> Self {
        Self::new(rows.iter().map(|row| row.iter().map(|cell| (*cell).to_owned()).collect()).collect())
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub const fn set_offline(&mut self, is_offline: bool) {
        self.is_offline = is_offline;
    }

    pub const fn set_read_only(&mut self, is_read_only: bool) {
        self.is_read_only = is_read_only;
    }

    /// Number of the successful [`Worksheet::all_values`] calls.
    #[must_use]
    pub fn n_reads(&self) -> usize {
        self.n_reads.get()
    }

    const fn ensure_writable(&self) -> Result<(), SheetError> {
        if self.is_offline {
            Err(SheetError::Offline)
        } else if self.is_read_only {
            Err(SheetError::ReadOnly)
        } else {
            Ok(())
        }
    }
}

impl Worksheet for MemoryWorksheet {
    fn all_values(&self) -> Result<Vec<Row>, SheetError> {
        if self.is_offline {
            return Err(SheetError::Offline);
        }
        self.n_reads.set(self.n_reads.get() + 1);
        Ok(self.rows.clone())
    }

    fn write_row(&mut self, index: usize, row: Row) -> Result<(), SheetError> {
        self.ensure_writable()?;
        match index {
            _ if index < self.rows.len() => self.rows[index] = row,
            _ if index == self.rows.len() => self.rows.push(row),
            _ => return Err(SheetError::OutOfRange { index, n_rows: self.rows.len() }),
        }
        Ok(())
    }

    fn delete_row(&mut self, index: usize) -> Result<(), SheetError> {
        self.ensure_writable()?;
        if index >= self.rows.len() {
            return Err(SheetError::OutOfRange { index, n_rows: self.rows.len() });
        }
        self.rows.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_append() {
        let mut sheet = MemoryWorksheet::from_cells(&[&["a"]]);
        sheet.write_row(1, vec!["1".to_owned()]).unwrap();
        sheet.write_row(1, vec!["2".to_owned()]).unwrap();
        assert_eq!(sheet.rows(), &[vec!["a".to_owned()], vec!["2".to_owned()]]);
        assert!(matches!(
            sheet.write_row(5, vec![]),
            Err(SheetError::OutOfRange { index: 5, n_rows: 2 }),
        ));
    }

    #[test]
    fn test_offline() {
        let mut sheet = MemoryWorksheet::from_cells(&[&["a"]]);
        sheet.set_offline(true);
        assert!(matches!(sheet.all_values(), Err(SheetError::Offline)));
        assert!(matches!(sheet.delete_row(0), Err(SheetError::Offline)));
        assert_eq!(sheet.n_reads(), 0);
    }

    #[test]
    fn test_read_only() {
        let mut sheet = MemoryWorksheet::from_cells(&[&["a"], &["1"]]);
        sheet.set_read_only(true);
        assert!(matches!(sheet.delete_row(1), Err(SheetError::ReadOnly)));
        assert_eq!(sheet.all_values().unwrap().len(), 2);
    }
}
