//! Cost component formulas.

use crate::{
    quantity::{
        Kilograms,
        KilowattHours,
        Kilowatts,
        Rupiah,
        RupiahPerKilogram,
        RupiahPerKilowattHour,
        RupiahPerKilowattYear,
    },
    settings::DayCount,
};

/// Inputs of [`crate::component::Component::A`] and [`crate::component::Component::B`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CapacityCharge {
    pub price: RupiahPerKilowattYear,

    /// Equivalent availability factor, a ratio.
    pub availability: f64,

    pub net_capacity: Kilowatts,
    pub days_in_month: f64,
    pub days_in_year: f64,
}

impl CapacityCharge {
    /// Day counts with zero or unset ones replaced by the defaults.
    pub fn resolved_days(&self, defaults: DayCount) -> DayCount {
        DayCount {
            in_month: if self.days_in_month > 0.0 { self.days_in_month } else { defaults.in_month },
            in_year: if self.days_in_year > 0.0 { self.days_in_year } else { defaults.in_year },
        }
    }

    /// `price × availability × capacity × days in month / days in year`.
    pub fn total(&self, defaults: DayCount) -> Rupiah {
        let days = self.resolved_days(defaults);
        self.price * self.net_capacity * self.availability * (days.in_month / days.in_year)
    }
}

/// Inputs of the fuel components.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FuelCharge {
    pub volume: Kilograms,
    pub price: RupiahPerKilogram,
    pub coefficient: f64,
}

impl FuelCharge {
    /// `volume × price × coefficient`.
    pub fn total(&self) -> Rupiah {
        self.volume * self.price * self.coefficient
    }
}

/// Inputs of [`crate::component::Component::D`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExportCharge {
    pub price: RupiahPerKilowattHour,
    pub exported: KilowattHours,
}

impl ExportCharge {
    pub fn total(&self) -> Rupiah {
        self.price * self.exported
    }
}
