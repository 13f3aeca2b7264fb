//! Period store: the shared, row-oriented record of the operator inputs.

mod cache;
mod csv;
mod memory;
mod sheet;

use std::rc::Rc;

use chrono::{FixedOffset, NaiveDateTime, Utc};

pub use self::{
    cache::ReadCache,
    csv::CsvWorksheet,
    memory::MemoryWorksheet,
    sheet::{Row, SheetError, Worksheet},
};
use crate::{
    aggregate::{self, CompletionStatus, Sales},
    autofill::PriceHistory,
    component::Fuel,
    numeric::encode_cell,
    period::{Column, Fields, PeriodRecord, TIMESTAMP_FORMAT},
    prelude::*,
    quantity::RupiahPerKilogram,
    settings::Settings,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("the period store is unavailable")]
    Unavailable(#[source] SheetError),

    #[error("failed to write to the period store")]
    WriteFailure(#[source] SheetError),
}

/// Period records over a worksheet, with a time-boxed read cache in front of it.
///
/// Writers go through read-merge-write of the current row. There is no locking: concurrent
/// writers of the same row race, and the last one wins.
pub struct PeriodStore<W> {
    sheet: W,
    settings: Settings,
    utc_offset: FixedOffset,
    cache: ReadCache<Vec<PeriodRecord>>,
}

impl<W: Worksheet> PeriodStore<W> {
    pub fn new(sheet: W, settings: Settings) -> Result<Self> {
        let utc_offset = settings.utc_offset()?;
        let cache = ReadCache::new(settings.cache_ttl);
        Ok(Self { sheet, settings, utc_offset, cache })
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub const fn sheet(&self) -> &W {
        &self.sheet
    }

    /// Direct access to the worksheet, bypassing the cache.
    pub const fn sheet_mut(&mut self) -> &mut W {
        &mut self.sheet
    }

    /// All records, oldest first.
    pub fn records(&self) -> Result<Rc<Vec<PeriodRecord>>, StoreError> {
        self.cache.get_or_try_load(|| {
            let rows = self.sheet.all_values().map_err(StoreError::Unavailable)?;
            let records = decode(&rows);
            debug!(n_records = records.len(), "read the period store");
            Ok(records)
        })
    }

    /// The most recent record, or a zero-filled one if the store is empty.
    pub fn current_period(&self) -> Result<PeriodRecord, StoreError> {
        Ok(self.records()?.last().cloned().unwrap_or_default())
    }

    pub fn latest_complete(&self) -> Result<Option<PeriodRecord>, StoreError> {
        Ok(aggregate::latest_complete(&self.records()?).cloned())
    }

    pub fn completion_status(&self) -> Result<CompletionStatus, StoreError> {
        Ok(CompletionStatus::of(&self.current_period()?))
    }

    pub fn sales(&self) -> Result<Sales, StoreError> {
        Ok(aggregate::aggregate(&self.records()?))
    }

    /// Merge the fields into the current row and stamp it, starting a new row if there is none.
    #[instrument(skip_all, fields(n_fields = fields.len()))]
    pub fn save_fields(&mut self, fields: &Fields) -> Result<(), StoreError> {
        let timestamp = Utc::now().with_timezone(&self.utc_offset).naive_local();
        self.save_fields_at(fields, timestamp)
    }

    fn save_fields_at(&mut self, fields: &Fields, timestamp: NaiveDateTime) -> Result<(), StoreError> {
        let rows = self.sheet.all_values().map_err(StoreError::WriteFailure)?;

        let (header, is_header_extended) = extend_header(rows.first().map(Vec::as_slice).unwrap_or_default());
        if is_header_extended {
            info!(n_columns = header.len(), "extending the header");
            self.sheet.write_row(0, header.clone()).map_err(StoreError::WriteFailure)?;
        }

        let (index, existing) = match rows.len() {
            0 | 1 => (1, &[][..]),
            n_rows => (n_rows - 1, rows[n_rows - 1].as_slice()),
        };
        let row = merge_row(&header, existing, fields, timestamp);
        self.sheet.write_row(index, row).map_err(StoreError::WriteFailure)?;
        self.cache.invalidate();

        info!(index, %timestamp, "saved the fields");
        Ok(())
    }

    /// Remove the current period row.
    ///
    /// Returns `false` when there are no data rows.
    #[instrument(skip_all)]
    pub fn delete_current_period(&mut self) -> Result<bool, StoreError> {
        let n_rows = self.sheet.all_values().map_err(StoreError::WriteFailure)?.len();
        if n_rows <= 1 {
            info!("nothing to delete");
            return Ok(false);
        }
        self.sheet.delete_row(n_rows - 1).map_err(StoreError::WriteFailure)?;
        self.cache.invalidate();
        info!(index = n_rows - 1, "deleted the current period");
        Ok(true)
    }
}

impl<W: Worksheet> PriceHistory for PeriodStore<W> {
    fn last_valid_price(&self, fuel: Fuel) -> Result<Option<RupiahPerKilogram>, StoreError> {
        Ok(self
            .records()?
            .iter()
            .rev()
            .map(|record| RupiahPerKilogram(record.get(fuel.price_column())))
            .find(|price| price.is_positive()))
    }
}

fn decode(rows: &[Row]) -> Vec<PeriodRecord> {
    let Some((header, data)) = rows.split_first() else {
        return Vec::new();
    };
    data.iter().map(|cells| PeriodRecord::from_row(header, cells)).collect()
}

/// Append the schema columns the header lacks.
fn extend_header(header: &[String]) -> (Row, bool) {
    let mut extended = header.to_vec();
    for column in Column::ALL {
        if !header.iter().any(|name| Column::from_header(name) == Some(column)) {
            extended.push(column.as_str().to_owned());
        }
    }
    let is_extended = extended.len() != header.len();
    (extended, is_extended)
}

/// Merge the fields over the existing cells of the row.
///
/// Cells of other columns are kept verbatim. The timestamp is always replaced.
fn merge_row(header: &[String], existing: &[String], fields: &Fields, timestamp: NaiveDateTime) -> Row {
    header
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let kept = || existing.get(i).cloned().unwrap_or_else(|| String::from("0"));
            match Column::from_header(name) {
                Some(Column::Timestamp) => timestamp.format(TIMESTAMP_FORMAT).to_string(),
                Some(column) => fields.get(&column).map_or_else(kept, |value| encode_cell(*value)),
                None => existing.get(i).cloned().unwrap_or_default(),
            }
        })
        .collect()
}
