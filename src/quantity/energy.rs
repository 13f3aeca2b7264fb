quantity!(
    /// Exported energy.
    KilowattHours, display: "{} kWh", precision: 0
);
