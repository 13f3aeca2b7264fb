use crate::quantity::{Kilograms, KilowattHours, Kilowatts, Rupiah};

quantity!(
    /// Fuel unit price.
    RupiahPerKilogram, display: "Rp {}/kg", precision: 2
);

quantity!(
    /// Energy export price.
    RupiahPerKilowattHour, display: "Rp {}/kWh", precision: 2
);

quantity!(
    /// Annual capacity price.
    ///
    /// Multiplying by a capacity gives the annual charge, which the caller prorates to the period.
    RupiahPerKilowattYear, display: "Rp {}/kW-year", precision: 0
);

implement_mul!(RupiahPerKilogram, Kilograms, Rupiah);
implement_mul!(RupiahPerKilowattHour, KilowattHours, Rupiah);
implement_mul!(RupiahPerKilowattYear, Kilowatts, Rupiah);
