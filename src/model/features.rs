use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{period::ComponentTotals, prelude::*, quantity::Rupiah};

/// Number of the model inputs: fifteen cost components and the total sales.
pub const N_FEATURES: usize = 16;

/// Model input vector, in the fixed order the models were trained with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostFeatures {
    pub ptl: f64,
    pub rent: f64,
    pub biodiesel: f64,
    pub coal: f64,
    pub biomass: f64,
    pub chemicals: f64,
    pub lubricants: f64,
    pub maintenance: f64,
    pub personnel: f64,
    pub depreciation: f64,
    pub depreciation_s: f64,
    pub administration: f64,
    pub emission: f64,
    pub fee: f64,
    pub other: f64,
    pub sales: f64,
}

impl CostFeatures {
    pub const NAMES: [&'static str; N_FEATURES] = [
        "ptl",
        "rent",
        "biodiesel",
        "coal",
        "biomass",
        "chemicals",
        "lubricants",
        "maintenance",
        "personnel",
        "depreciation",
        "depreciation_s",
        "administration",
        "emission",
        "fee",
        "other",
        "sales",
    ];

    /// Read the cost components from a TOML file.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the costs from `{}`", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse the costs from `{}`", path.display()))
    }

    pub const fn with_sales(mut self, sales: Rupiah) -> Self {
        self.sales = sales.0;
        self
    }

    /// Take the coal and biomass costs from the stored fuel components where those are filled in.
    pub fn with_stored_fuel_costs(mut self, stored: &ComponentTotals) -> Self {
        if stored.coal.is_positive() {
            self.coal = stored.coal.0;
        }
        if stored.biomass.is_positive() {
            self.biomass = stored.biomass.0;
        }
        debug!(coal = self.coal, biomass = self.biomass, "fuel costs");
        self
    }

    #[must_use]
    pub const fn to_vector(&self) -> [f64; N_FEATURES] {
        [
            self.ptl,
            self.rent,
            self.biodiesel,
            self.coal,
            self.biomass,
            self.chemicals,
            self.lubricants,
            self.maintenance,
            self.personnel,
            self.depreciation,
            self.depreciation_s,
            self.administration,
            self.emission,
            self.fee,
            self.other,
            self.sales,
        ]
    }

    /// Named values, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        Self::NAMES.into_iter().zip(self.to_vector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order() {
        let features = CostFeatures { ptl: 1.0, other: 15.0, sales: 16.0, ..CostFeatures::default() };
        let vector = features.to_vector();
        assert_eq!(vector[0], 1.0);
        assert_eq!(vector[14], 15.0);
        assert_eq!(vector[15], 16.0);
        assert_eq!(features.iter().last(), Some(("sales", 16.0)));
    }

    #[test]
    fn test_stored_fuel_costs() {
        let features = CostFeatures { coal: 1.0, biomass: 2.0, fee: 3.0, ..CostFeatures::default() };
        let stored =
            ComponentTotals { coal: Rupiah(995_580.0), biomass: Rupiah::ZERO, ..ComponentTotals::default() };
        let features = features.with_stored_fuel_costs(&stored);
        assert_eq!(features.coal, 995_580.0);
        assert_eq!(features.biomass, 2.0);
        assert_eq!(features.fee, 3.0);
    }

    #[test]
    fn test_partial_toml() -> Result {
        let features: CostFeatures = toml::from_str("coal = 1250.5\nfee = 3.0")?;
        assert_eq!(features, CostFeatures { coal: 1250.5, fee: 3.0, ..CostFeatures::default() });
        assert!(toml::from_str::<CostFeatures>("gas = 1.0").is_err());
        Ok(())
    }
}
