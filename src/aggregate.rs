//! Total sales of the current period, with the fallback to the last complete one.

use chrono::NaiveDateTime;
use enumset::EnumSet;
use serde::Serialize;

use crate::{
    component::Component,
    notice::Notice,
    period::{ComponentTotals, PeriodRecord},
    prelude::*,
    quantity::Rupiah,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PeriodState {
    /// The store has no data rows.
    NoData,

    /// At least one component total of the current period is not positive.
    CurrentIncomplete,

    CurrentComplete,
}

impl PeriodState {
    /// Classify the records, the last one being the current period.
    pub fn classify(records: &[PeriodRecord]) -> Self {
        match records.last() {
            None => Self::NoData,
            Some(current) if current.is_complete() => Self::CurrentComplete,
            Some(_) => Self::CurrentIncomplete,
        }
    }
}

/// Which period the total sales come from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum SalesSource {
    #[display("none")]
    None,

    #[display("current")]
    Current,

    #[display("last_complete")]
    LastComplete,
}

/// Total sales fed into the prediction.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Sales {
    pub total: Rupiah,
    pub source: SalesSource,
    pub components: ComponentTotals,
    pub is_current_complete: bool,
    pub timestamp: Option<NaiveDateTime>,
}

impl Sales {
    pub const NONE: Self = Self {
        total: Rupiah::ZERO,
        source: SalesSource::None,
        components: ComponentTotals {
            a: Rupiah::ZERO,
            b: Rupiah::ZERO,
            coal: Rupiah::ZERO,
            biomass: Rupiah::ZERO,
            d: Rupiah::ZERO,
        },
        is_current_complete: false,
        timestamp: None,
    };

    fn from_record(record: &PeriodRecord, source: SalesSource) -> Self {
        let components = record.totals();
        Self {
            total: components.total(),
            source,
            components,
            is_current_complete: source == SalesSource::Current,
            timestamp: record.timestamp,
        }
    }

    /// Notice to show the operator when the figure is not from the current period.
    #[must_use]
    pub const fn notice(&self) -> Option<Notice> {
        match self.source {
            SalesSource::LastComplete => Some(Notice::LastCompletePeriod { timestamp: self.timestamp }),
            SalesSource::None | SalesSource::Current => None,
        }
    }
}

/// Most recent record with all five component totals positive.
#[must_use]
pub fn latest_complete(records: &[PeriodRecord]) -> Option<&PeriodRecord> {
    records.iter().rev().find(|record| record.is_complete())
}

/// Total sales over the records, oldest first.
///
/// Totals never mix periods: they come either from the current record or from one complete
/// historical record.
#[instrument(skip_all, fields(n_records = records.len()))]
pub fn aggregate(records: &[PeriodRecord]) -> Sales {
    let sales = match PeriodState::classify(records) {
        PeriodState::NoData => Sales::NONE,
        PeriodState::CurrentComplete => {
            records.last().map_or(Sales::NONE, |current| Sales::from_record(current, SalesSource::Current))
        }
        PeriodState::CurrentIncomplete => latest_complete(records)
            .map_or(Sales::NONE, |record| Sales::from_record(record, SalesSource::LastComplete)),
    };
    debug!(total = sales.total.0, source = %sales.source, "aggregated");
    sales
}

/// Which components of the current period are filled in.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletionStatus(EnumSet<Component>);

impl CompletionStatus {
    /// Evaluated against the current period only, never against the fallback.
    pub fn of(current: &PeriodRecord) -> Self {
        let totals = current.totals();
        Self(totals.iter().filter(|(_, total)| total.is_positive()).map(|(component, _)| component).collect())
    }

    #[must_use]
    pub fn is_complete(&self, component: Component) -> bool {
        self.0.contains(component)
    }

    #[must_use]
    pub fn is_all_complete(&self) -> bool {
        self.0 == EnumSet::all()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, bool)> + '_ {
        Component::ALL.into_iter().map(move |component| (component, self.is_complete(component)))
    }

    #[must_use]
    pub fn missing(&self) -> EnumSet<Component> {
        self.0.complement()
    }
}
