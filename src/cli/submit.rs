use bpp::{
    component::PerFuel,
    prelude::*,
    workflow::{self, CapacityForm, ExportForm, FuelForm, Submission},
};
use clap::{Parser, Subcommand};

use crate::{cli::StoreArgs, tables::build_outcome_table};

#[derive(Parser)]
pub struct SubmitArgs {
    #[clap(flatten)]
    store: StoreArgs,

    /// Compute and show the component without saving it.
    #[clap(long)]
    dry_run: bool,

    #[command(subcommand)]
    form: FormCommand,
}

impl SubmitArgs {
    pub fn run(self) -> Result {
        let mut store = self.store.open()?;
        let submission = Submission::from(self.form);
        let outcome = if self.dry_run {
            workflow::preview(&submission, &store.current_period()?, store.settings(), &store)?
        } else {
            workflow::submit(&mut store, &submission)?
        };
        println!("{}", build_outcome_table(&outcome));
        for notice in &outcome.notices {
            println!("{notice}");
        }
        Ok(())
    }
}

/// Empty fields are not provided.
#[derive(Subcommand)]
enum FormCommand {
    /// Capacity charge A.
    A(CapacityArgs),

    /// Capacity charge B.
    B(CapacityArgs),

    /// Fuel charges, coal and biomass.
    C(FuelArgs),

    /// Energy export charge.
    D(ExportArgs),
}

impl From<FormCommand> for Submission {
    fn from(command: FormCommand) -> Self {
        match command {
            FormCommand::A(args) => Self::A(args.into()),
            FormCommand::B(args) => Self::B(args.into()),
            FormCommand::C(args) => Self::C(args.into()),
            FormCommand::D(args) => Self::D(args.into()),
        }
    }
}

#[derive(Parser)]
struct CapacityArgs {
    /// Rp/kW-year.
    #[clap(long, default_value = "")]
    price: String,

    /// Equivalent availability factor.
    #[clap(long = "eaf", default_value = "")]
    availability: String,

    /// kW.
    #[clap(long, default_value = "")]
    net_capacity: String,

    #[clap(long, default_value = "")]
    days_in_month: String,

    #[clap(long, default_value = "")]
    days_in_year: String,
}

impl From<CapacityArgs> for CapacityForm {
    fn from(args: CapacityArgs) -> Self {
        Self {
            price: args.price,
            availability: args.availability,
            net_capacity: args.net_capacity,
            days_in_month: args.days_in_month,
            days_in_year: args.days_in_year,
        }
    }
}

#[derive(Parser)]
struct FuelArgs {
    /// kg.
    #[clap(long, default_value = "")]
    coal_volume: String,

    /// Rp/kg, the last valid price is used when empty.
    #[clap(long, default_value = "")]
    coal_price: String,

    #[clap(long, default_value = "")]
    coal_coefficient: String,

    /// kg.
    #[clap(long, default_value = "")]
    biomass_volume: String,

    /// Rp/kg, the last valid price is used when empty.
    #[clap(long, default_value = "")]
    biomass_price: String,

    #[clap(long, default_value = "")]
    biomass_coefficient: String,
}

impl From<FuelArgs> for FuelForm {
    fn from(args: FuelArgs) -> Self {
        Self {
            volumes: PerFuel { coal: args.coal_volume, biomass: args.biomass_volume },
            prices: PerFuel { coal: args.coal_price, biomass: args.biomass_price },
            coefficients: PerFuel { coal: args.coal_coefficient, biomass: args.biomass_coefficient },
        }
    }
}

#[derive(Parser)]
struct ExportArgs {
    /// Rp/kWh.
    #[clap(long, default_value = "")]
    price: String,

    /// kWh.
    #[clap(long, default_value = "")]
    exported: String,
}

impl From<ExportArgs> for ExportForm {
    fn from(args: ExportArgs) -> Self {
        Self { price: args.price, exported: args.exported }
    }
}
