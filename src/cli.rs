mod predict;
mod store;
mod submit;

use bpp::prelude::*;
use clap::{Parser, Subcommand};

pub use self::{predict::PredictArgs, store::StoreArgs, submit::SubmitArgs};
use crate::tables::{build_parse_table, build_sales_table, build_status_table};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show how the numbers are read.
    Parse(ParseArgs),

    /// Fill in one cost component of the current period.
    Submit(Box<SubmitArgs>),

    /// Show the current period and the total sales.
    Status(StatusArgs),

    /// Delete the current period.
    Reset(ResetArgs),

    /// Estimate BPP.
    Predict(Box<PredictArgs>),
}

#[derive(Parser)]
pub struct ParseArgs {
    /// Numbers as an operator would type them, for example `1.234,56`.
    #[clap(required = true, allow_hyphen_values = true)]
    raw: Vec<String>,
}

impl ParseArgs {
    pub fn run(self) {
        let results: Vec<_> = self
            .raw
            .into_iter()
            .map(|raw| {
                let result = bpp::numeric::parse(&raw);
                (raw, result)
            })
            .collect();
        println!("{}", build_parse_table(&results));
    }
}

#[derive(Parser)]
pub struct StatusArgs {
    #[clap(flatten)]
    store: StoreArgs,
}

impl StatusArgs {
    pub fn run(self) -> Result {
        let store = self.store.open()?;
        let current = store.current_period()?;
        println!("{}", build_status_table(&current));
        let sales = store.sales()?;
        if let Some(notice) = sales.notice() {
            warn!(%notice);
        }
        println!("{}", build_sales_table(&sales));
        Ok(())
    }
}

#[derive(Parser)]
pub struct ResetArgs {
    #[clap(flatten)]
    store: StoreArgs,
}

impl ResetArgs {
    pub fn run(self) -> Result {
        if self.store.open()?.delete_current_period()? {
            info!("the current period is deleted");
        } else {
            warn!("there is no period to delete");
        }
        Ok(())
    }
}
