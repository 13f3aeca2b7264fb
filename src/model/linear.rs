use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;

use crate::{
    model::{Attribution, CostFeatures, Explainer, Predictor},
    prelude::*,
};

/// Exported linear model: `intercept + Σ coefficient × feature`.
///
/// Features without a coefficient do not contribute.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: BTreeMap<String, f64>,
}

impl LinearModel {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the model from `{}`", path.display()))?;
        let model: Self = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse the model from `{}`", path.display()))?;
        model.validate()?;
        info!(n_coefficients = model.coefficients.len(), "loaded the model");
        Ok(model)
    }

    fn validate(&self) -> Result {
        if let Some(name) = self.coefficients.keys().find(|name| !CostFeatures::NAMES.contains(&name.as_str())) {
            bail!("unknown feature `{name}`");
        }
        Ok(())
    }

    fn coefficient(&self, feature: &str) -> f64 {
        self.coefficients.get(feature).copied().unwrap_or_default()
    }
}

impl Predictor for LinearModel {
    fn predict(&self, features: &CostFeatures) -> Result<f64> {
        Ok(self.intercept
            + features.iter().map(|(name, value)| self.coefficient(name) * value).sum::<f64>())
    }
}

impl Explainer for LinearModel {
    fn explain(&self, features: &CostFeatures) -> Result<Vec<Attribution>> {
        Ok(features
            .iter()
            .map(|(feature, value)| Attribution {
                feature,
                value,
                contribution: self.coefficient(feature) * value,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn model() -> LinearModel {
        serde_json::from_str(r#"{"intercept": 100.0, "coefficients": {"coal": 0.5, "sales": -0.001}}"#)
            .unwrap()
    }

    #[test]
    fn test_predict() -> Result {
        let features = CostFeatures { coal: 20.0, sales: 1_000.0, fee: 7.0, ..CostFeatures::default() };
        assert_abs_diff_eq!(model().predict(&features)?, 109.0);
        Ok(())
    }

    #[test]
    fn test_explain() -> Result {
        let features = CostFeatures { coal: 20.0, ..CostFeatures::default() };
        let attributions = model().explain(&features)?;
        assert_eq!(attributions.len(), CostFeatures::NAMES.len());
        assert_eq!(attributions[3].feature, "coal");
        assert_abs_diff_eq!(attributions[3].contribution, 10.0);
        assert_abs_diff_eq!(attributions[0].contribution, 0.0);
        Ok(())
    }

    #[test]
    fn test_unknown_feature() {
        let model = LinearModel { intercept: 0.0, coefficients: BTreeMap::from([("gas".to_owned(), 1.0)]) };
        assert!(model.validate().is_err());
        assert!(self::model().validate().is_ok());
    }
}
