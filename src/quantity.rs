#[macro_use]
mod macros;

pub mod cost;
pub mod energy;
pub mod mass;
pub mod power;
pub mod rate;

pub use self::{
    cost::Rupiah,
    energy::KilowattHours,
    mass::Kilograms,
    power::Kilowatts,
    rate::{RupiahPerKilogram, RupiahPerKilowattHour, RupiahPerKilowattYear},
};
