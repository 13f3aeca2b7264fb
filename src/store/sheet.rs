/// Row of string cells, as the tabular store returns them.
pub type Row = Vec<String>;

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("the worksheet is offline")]
    Offline,

    #[error("the worksheet is read-only")]
    ReadOnly,

    #[error("row #{index} is out of range, the worksheet has {n_rows} rows")]
    OutOfRange { index: usize, n_rows: usize },

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),
}

/// Row-oriented access to the remote tabular store.
///
/// Row `0` is the header.
pub trait Worksheet {
    /// All rows, including the header.
    fn all_values(&self) -> Result<Vec<Row>, SheetError>;

    /// Overwrite the row at the index. Writing right past the last row appends.
    fn write_row(&mut self, index: usize, row: Row) -> Result<(), SheetError>;

    fn delete_row(&mut self, index: usize) -> Result<(), SheetError>;
}
