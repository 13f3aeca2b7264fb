use std::path::PathBuf;

use bpp::{
    model::{CostFeatures, Estimate, Explainer, LinearModel, ModelKind, SalesInput},
    numeric,
    prelude::*,
};
use clap::Parser;

use crate::{cli::StoreArgs, tables::build_attribution_table};

#[derive(Parser)]
pub struct PredictArgs {
    #[clap(long, value_enum, env = "BPP_MODEL", default_value = "neural-network")]
    model: ModelKind,

    /// Exported model, JSON with `intercept` and `coefficients`.
    #[clap(long = "model-path", env = "BPP_MODEL_PATH")]
    model_path: PathBuf,

    /// TOML file with the fifteen cost components, coal and biomass are taken from the current
    /// period instead when it has them.
    #[clap(long)]
    costs: PathBuf,

    /// Total sales, used only when the store is unavailable.
    #[clap(long, allow_hyphen_values = true)]
    sales: Option<String>,

    #[clap(flatten)]
    store: StoreArgs,
}

impl PredictArgs {
    pub fn run(self) -> Result {
        let predictor = LinearModel::read_from(&self.model_path)?;
        let costs = CostFeatures::read_from(&self.costs)?;
        let manual_sales = self
            .sales
            .as_deref()
            .map(numeric::parse)
            .transpose()
            .context("invalid manual sales")?
            .flatten();

        let store = self.store.open()?;
        let sales = SalesInput::resolve(store.sales(), manual_sales)?;
        if let Some(notice) = &sales.notice {
            println!("{notice}");
        }
        let costs = match store.current_period() {
            Ok(current) => costs.with_stored_fuel_costs(&current.totals()),
            Err(error) => {
                warn!(%error, "using the fuel costs from the file");
                costs
            }
        };

        let features = costs.with_sales(sales.sales);
        let estimate = Estimate::new(self.model, &predictor, &features)?;
        println!("{}", build_attribution_table(&predictor.explain(&features)?));
        println!(
            "{model}: {estimate} (accuracy {accuracy}%)",
            model = self.model,
            accuracy = self.model.accuracy_percent(),
        );
        Ok(())
    }
}
