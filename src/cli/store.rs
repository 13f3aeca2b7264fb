use std::path::PathBuf;

use bpp::{
    prelude::*,
    settings::Settings,
    store::{CsvWorksheet, PeriodStore},
};
use clap::Parser;

#[derive(Parser)]
pub struct StoreArgs {
    /// CSV file with the period rows.
    #[clap(long = "store-path", env = "BPP_STORE_PATH", default_value = "periods.csv")]
    path: PathBuf,

    /// TOML file with the defaults, the built-in ones are used when omitted.
    #[clap(long = "settings", env = "BPP_SETTINGS")]
    settings: Option<PathBuf>,

    /// Override the read cache time-to-live, for example `30s`.
    #[clap(long = "cache-ttl", env = "BPP_CACHE_TTL")]
    cache_ttl: Option<humantime::Duration>,
}

impl StoreArgs {
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => Settings::read_from(path)?,
            None => Settings::default(),
        };
        if let Some(cache_ttl) = &self.cache_ttl {
            settings.cache_ttl = **cache_ttl;
        }
        Ok(settings)
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn open(&self) -> Result<PeriodStore<CsvWorksheet>> {
        PeriodStore::new(CsvWorksheet::new(&self.path), self.settings()?)
    }
}
