quantity!(
    /// Net (contracted) capacity.
    Kilowatts, display: "{} kW", precision: 0
);
