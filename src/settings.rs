use std::{fs, path::Path, time::Duration};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{component::PerFuel, prelude::*, quantity::RupiahPerKilogram};

/// Defaults the dialogs and the store fall back to.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub days: DayCount,

    /// Fuel share coefficients, used when the operator leaves them blank or zero.
    pub coefficients: PerFuel<f64>,

    /// Reference fuel prices, used when there is no valid price in the history.
    pub fallback_prices: PerFuel<RupiahPerKilogram>,

    /// How long the store rows are reused before they are read again.
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub cache_ttl: Duration,

    /// Offset of the local time the rows are stamped in: WIB is UTC+7.
    pub utc_offset_hours: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            days: DayCount::default(),
            coefficients: PerFuel { coal: 0.99558, biomass: 0.00442 },
            fallback_prices: PerFuel {
                coal: RupiahPerKilogram(1000.0),
                biomass: RupiahPerKilogram(615.0),
            },
            cache_ttl: Duration::from_secs(10),
            utc_offset_hours: 7,
        }
    }
}

impl Settings {
    /// Read the settings from the TOML file, missing keys take the defaults.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the settings from `{}`", path.display()))?;
        let settings: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse the settings from `{}`", path.display()))?;
        settings.validate()?;
        info!(?settings, "loaded the settings");
        Ok(settings)
    }

    fn validate(&self) -> Result {
        ensure!(self.days.in_month > 0.0, "default days in a month must be positive");
        ensure!(self.days.in_year > 0.0, "default days in a year must be positive");
        ensure!(
            (-12..=14).contains(&self.utc_offset_hours),
            "UTC offset of {} hours is out of range",
            self.utc_offset_hours,
        );
        Ok(())
    }

    pub fn utc_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .with_context(|| format!("invalid UTC offset: {} hours", self.utc_offset_hours))
    }
}

/// Day counts that prorate the annual capacity price.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayCount {
    pub in_month: f64,
    pub in_year: f64,
}

impl Default for DayCount {
    fn default() -> Self {
        Self { in_month: 30.0, in_year: 365.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml() -> Result {
        let settings: Settings = toml::from_str(
            r"
            cache_ttl = 30

            [fallback_prices]
            coal = 1250.0
            biomass = 600.0
            ",
        )?;
        assert_eq!(settings.cache_ttl, Duration::from_secs(30));
        assert_eq!(settings.fallback_prices.coal, RupiahPerKilogram(1250.0));
        assert_eq!(settings.days, DayCount::default());
        assert_eq!(settings.coefficients, Settings::default().coefficients);
        Ok(())
    }

    #[test]
    fn test_invalid_days() -> Result {
        let settings: Settings = toml::from_str("[days]\nin_year = 0.0")?;
        assert!(settings.validate().is_err());
        Ok(())
    }

    #[test]
    fn test_utc_offset() -> Result {
        assert_eq!(Settings::default().utc_offset()?, FixedOffset::east_opt(7 * 3600).unwrap());
        Ok(())
    }
}
