use crate::{
    component::{Fuel, PerFuel},
    notice::{Notice, PriceSource},
    prelude::*,
    quantity::{Kilograms, RupiahPerKilogram},
    store::StoreError,
};

/// Past fuel prices.
pub trait PriceHistory {
    /// Most recent strictly positive price of the fuel, if any.
    fn last_valid_price(&self, fuel: Fuel) -> Result<Option<RupiahPerKilogram>, StoreError>;
}

/// Fixed history, also used when there is no store at hand.
impl PriceHistory for PerFuel<Option<RupiahPerKilogram>> {
    fn last_valid_price(&self, fuel: Fuel) -> Result<Option<RupiahPerKilogram>, StoreError> {
        Ok(self.get(fuel))
    }
}

/// Fills in a missing fuel price when a volume is entered.
pub struct PriceAutoFill<'a, H> {
    history: &'a H,
    fallback_prices: PerFuel<RupiahPerKilogram>,
}

impl<'a, H: PriceHistory> PriceAutoFill<'a, H> {
    pub const fn new(history: &'a H, fallback_prices: PerFuel<RupiahPerKilogram>) -> Self {
        Self { history, fallback_prices }
    }

    /// Price to compute the fuel component with, and the notice if it was substituted.
    ///
    /// The history is only queried when a substitution is needed. An unreachable history falls
    /// back to the reference price.
    #[instrument(skip_all, fields(fuel = %fuel, volume = volume.0, price = price.0))]
    pub fn apply(
        &self,
        fuel: Fuel,
        volume: Kilograms,
        price: RupiahPerKilogram,
    ) -> (RupiahPerKilogram, Option<Notice>) {
        if !volume.is_positive() || price.is_positive() {
            return (price, None);
        }
        let history = self.history.last_valid_price(fuel).unwrap_or_else(|error| {
            warn!(%error, "failed to look up the last valid price");
            None
        });
        let (price, source) = match history {
            Some(price) if price.is_positive() => (price, PriceSource::History),
            _ => (self.fallback_prices.get(fuel), PriceSource::Fallback),
        };
        (price, Some(Notice::PriceAutoFilled { fuel, price, source }.emit()))
    }
}
