quantity!(
    /// Fuel volume, as weighed at the coal yard.
    Kilograms, display: "{} kg", precision: 0
);
