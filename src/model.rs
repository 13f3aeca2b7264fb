//! Boundary to the prediction models and their explainers.

mod features;
mod linear;

use std::fmt::{Display, Formatter};

use serde::Serialize;

pub use self::{
    features::{CostFeatures, N_FEATURES},
    linear::LinearModel,
};
use crate::{
    aggregate::Sales,
    notice::Notice,
    prelude::*,
    quantity::Rupiah,
    store::StoreError,
};

/// Trained model to estimate BPP with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, clap::ValueEnum, Serialize, derive_more::Display)]
pub enum ModelKind {
    #[display("Neural Network")]
    NeuralNetwork,

    #[display("Elastic Net")]
    Elastic,

    #[display("Ridge Regression")]
    Ridge,

    /// K-nearest neighbours.
    #[display("KNN")]
    Knn,
}

impl ModelKind {
    /// Accuracy measured on the test set, in percent.
    #[must_use]
    pub const fn accuracy_percent(self) -> f64 {
        match self {
            Self::NeuralNetwork => 94.40,
            Self::Elastic => 93.88,
            Self::Ridge => 93.16,
            Self::Knn => 92.04,
        }
    }

    /// Typical absolute error of an estimate.
    #[must_use]
    pub const fn error_margin(self) -> f64 {
        match self {
            Self::NeuralNetwork => 63.14,
            Self::Elastic => 68.52,
            Self::Ridge => 73.91,
            Self::Knn => 85.59,
        }
    }
}

pub trait Predictor {
    fn predict(&self, features: &CostFeatures) -> Result<f64>;
}

pub trait Explainer {
    /// Contribution of every feature to the prediction, in the feature order.
    fn explain(&self, features: &CostFeatures) -> Result<Vec<Attribution>>;
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Attribution {
    pub feature: &'static str,
    pub value: f64,
    pub contribution: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Estimate {
    pub value: f64,
    pub margin: f64,
}

impl Estimate {
    /// Predict and round to cents.
    #[instrument(skip_all, fields(kind = %kind))]
    pub fn new(kind: ModelKind, predictor: &impl Predictor, features: &CostFeatures) -> Result<Self> {
        let value = (predictor.predict(features)? * 100.0).round() / 100.0;
        info!(value, "estimated");
        Ok(Self { value, margin: kind.error_margin() })
    }
}

impl Display for Estimate {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "~ {} ± {}", self.value, self.margin)
    }
}

/// Total sales the prediction takes, with the notice to show next to it.
#[derive(Clone, Debug, PartialEq)]
pub struct SalesInput {
    pub sales: Rupiah,
    pub notice: Option<Notice>,
}

impl SalesInput {
    /// Take the aggregated sales when the store is reachable, otherwise the manually entered ones.
    pub fn resolve(stored: Result<Sales, StoreError>, manual: Option<f64>) -> Result<Self> {
        match stored {
            Ok(sales) => Ok(Self { sales: sales.total, notice: sales.notice().map(Notice::emit) }),
            Err(error) => {
                warn!(%error, "falling back to the manual sales");
                let Some(manual) = manual else {
                    return Err(Error::from(error)
                        .context("the store is unavailable, enter the total sales manually"));
                };
                let sales = Rupiah(manual);
                Ok(Self { sales, notice: Some(Notice::ManualSales { sales }.emit()) })
            }
        }
    }
}
