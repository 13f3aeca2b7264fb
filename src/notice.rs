use chrono::NaiveDateTime;

use crate::{
    component::{Component, Fuel},
    prelude::*,
    quantity::{Rupiah, RupiahPerKilogram},
    settings::DayCount,
};

/// Non-blocking message about a value that was substituted rather than typed.
#[derive(Clone, Debug, PartialEq, derive_more::Display)]
pub enum Notice {
    #[display("no {fuel} price entered, using {source}: {price}")]
    PriceAutoFilled { fuel: Fuel, price: RupiahPerKilogram, source: PriceSource },

    #[display(
        "{component}: day counts not entered, using {} / {} days",
        days.in_month,
        days.in_year
    )]
    DaysDefaulted { component: Component, days: DayCount },

    #[display("no {fuel} coefficient entered, using the default {coefficient}")]
    CoefficientDefaulted { fuel: Fuel, coefficient: f64 },

    #[display(
        "the current period is incomplete, using the last complete period from {}",
        timestamp.map_or_else(|| "an unknown time".to_owned(), |timestamp| timestamp.to_string())
    )]
    LastCompletePeriod { timestamp: Option<NaiveDateTime> },

    #[display("the store is unavailable, using the manually entered sales: {sales}")]
    ManualSales { sales: Rupiah },
}

impl Notice {
    /// Log the notice, the caller still shows it to the operator.
    pub fn emit(self) -> Self {
        warn!(notice = %self);
        self
    }
}

/// Where an auto-filled price came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum PriceSource {
    #[display("the last valid price")]
    History,

    #[display("the reference price")]
    Fallback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let notice = Notice::PriceAutoFilled {
            fuel: Fuel::Biomass,
            price: RupiahPerKilogram(615.0),
            source: PriceSource::Fallback,
        };
        assert_eq!(notice.to_string(), "no biomass price entered, using the reference price: Rp 615,00/kg");
    }

    #[test]
    fn test_unknown_timestamp() {
        let notice = Notice::LastCompletePeriod { timestamp: None };
        assert!(notice.to_string().ends_with("from an unknown time"));
    }
}
