quantity!(
    /// Indonesian rupiah.
    Rupiah, display: "Rp {}", precision: 0
);

impl Rupiah {
    /// Whole rupiah, truncated toward zero.
    pub fn whole(self) -> Self {
        Self(self.0.trunc())
    }
}
