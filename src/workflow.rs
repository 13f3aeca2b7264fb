//! Component forms as synchronous commands: parse, default, compute, then save.

use itertools::Itertools;

use crate::{
    autofill::{PriceAutoFill, PriceHistory},
    calculator::{CapacityCharge, ExportCharge, FuelCharge},
    component::{Component, Fuel, PerFuel},
    notice::Notice,
    numeric::{self, ParseError},
    period::{Column, Fields, PeriodRecord},
    prelude::*,
    quantity::{
        Kilograms,
        KilowattHours,
        Kilowatts,
        Rupiah,
        RupiahPerKilogram,
        RupiahPerKilowattHour,
        RupiahPerKilowattYear,
    },
    settings::Settings,
    store::{PeriodStore, StoreError, Worksheet},
};

/// Free-text fields of the [`Component::A`] and [`Component::B`] forms.
#[derive(Clone, Debug, Default)]
pub struct CapacityForm {
    pub price: String,
    pub availability: String,
    pub net_capacity: String,
    pub days_in_month: String,
    pub days_in_year: String,
}

/// Free-text fields of the fuel form, both fuels at once.
#[derive(Clone, Debug, Default)]
pub struct FuelForm {
    pub volumes: PerFuel<String>,
    pub prices: PerFuel<String>,
    pub coefficients: PerFuel<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ExportForm {
    pub price: String,
    pub exported: String,
}

#[derive(Clone, Debug, derive_more::Display)]
pub enum Submission {
    #[display("A")]
    A(CapacityForm),

    #[display("B")]
    B(CapacityForm),

    #[display("C")]
    C(FuelForm),

    #[display("D")]
    D(ExportForm),
}

#[derive(Debug, thiserror::Error)]
#[error("`{}`: {error}", column.as_str())]
pub struct FieldError {
    pub column: Column,

    #[source]
    pub error: ParseError,
}

/// Every invalid field of one submission.
#[derive(Debug, Default, thiserror::Error)]
#[error("{}", .0.iter().join("; "))]
pub struct FieldErrors(pub Vec<FieldError>);

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("invalid input: {0}")]
    Invalid(#[from] FieldErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a submission computes and would persist.
#[must_use]
#[derive(Clone, Debug)]
pub struct Outcome {
    pub fields: Fields,
    pub totals: Vec<(Component, Rupiah)>,
    pub notices: Vec<Notice>,
}

/// Parse and compute the submission without saving it.
///
/// Blank capacity and export fields keep the value stored in the current period, and so does a
/// blank fuel coefficient. Invalid fields block the whole submission. Fuel prices may be looked up
/// in the history.
#[instrument(skip_all, fields(submission = %submission))]
pub fn preview(
    submission: &Submission,
    current: &PeriodRecord,
    settings: &Settings,
    history: &impl PriceHistory,
) -> Result<Outcome, FieldErrors> {
    let mut outcome = Outcome { fields: Fields::new(), totals: Vec::new(), notices: Vec::new() };
    match submission {
        Submission::A(form) => outcome.apply_capacity(Component::A, form, current, settings)?,
        Submission::B(form) => outcome.apply_capacity(Component::B, form, current, settings)?,
        Submission::C(form) => outcome.apply_fuel(form, current, settings, history)?,
        Submission::D(form) => outcome.apply_export(form, current)?,
    }
    for (component, total) in &outcome.totals {
        info!(%component, %total, "computed");
    }
    Ok(outcome)
}

/// Parse, compute, and merge the submission into the current period.
#[instrument(skip_all, fields(submission = %submission))]
pub fn submit<W: Worksheet>(
    store: &mut PeriodStore<W>,
    submission: &Submission,
) -> Result<Outcome, SubmitError> {
    let current = store.current_period()?;
    let outcome = preview(submission, &current, store.settings(), &*store)?;
    store.save_fields(&outcome.fields)?;
    Ok(outcome)
}

impl Outcome {
    fn apply_capacity(
        &mut self,
        component: Component,
        form: &CapacityForm,
        current: &PeriodRecord,
        settings: &Settings,
    ) -> Result<(), FieldErrors> {
        let (price_column, availability_column) = match component {
            Component::B => (Column::PriceB, Column::AvailabilityB),
            _ => (Column::PriceA, Column::AvailabilityA),
        };
        let mut reader = FieldReader::new(current);
        let charge = CapacityCharge {
            price: RupiahPerKilowattYear(reader.value_or_stored(price_column, &form.price)),
            availability: reader.value_or_stored(availability_column, &form.availability),
            net_capacity: Kilowatts(reader.value_or_stored(Column::NetCapacity, &form.net_capacity)),
            days_in_month: reader.value_or_stored(Column::DaysInMonth, &form.days_in_month),
            days_in_year: reader.value_or_stored(Column::DaysInYear, &form.days_in_year),
        };
        reader.finish()?;

        let days = charge.resolved_days(settings.days);
        if charge.days_in_month <= 0.0 || charge.days_in_year <= 0.0 {
            self.notices.push(Notice::DaysDefaulted { component, days }.emit());
        }
        let total = charge.total(settings.days).whole();
        self.totals.push((component, total));
        self.fields.extend([
            (component.column(), total.0),
            (price_column, charge.price.0),
            (availability_column, charge.availability),
            (Column::NetCapacity, charge.net_capacity.0),
            (Column::DaysInMonth, days.in_month),
            (Column::DaysInYear, days.in_year),
        ]);
        Ok(())
    }

    fn apply_fuel(
        &mut self,
        form: &FuelForm,
        current: &PeriodRecord,
        settings: &Settings,
        history: &impl PriceHistory,
    ) -> Result<(), FieldErrors> {
        let mut reader = FieldReader::new(current);
        let inputs = Fuel::ALL.map(|fuel| {
            let volume = reader.value(fuel.volume_column(), form.volumes.get_ref(fuel));
            let price = reader.value(fuel.price_column(), form.prices.get_ref(fuel));
            let coefficient = reader.optional(fuel.coefficient_column(), form.coefficients.get_ref(fuel));
            (fuel, Kilograms(volume), RupiahPerKilogram(price), coefficient)
        });
        reader.finish()?;

        let auto_fill = PriceAutoFill::new(history, settings.fallback_prices);
        for (fuel, volume, price, coefficient) in inputs {
            let (price, notice) = auto_fill.apply(fuel, volume, price);
            self.notices.extend(notice);
            let stored_coefficient = current.get(fuel.coefficient_column());
            let coefficient = match coefficient {
                Some(coefficient) if coefficient != 0.0 => coefficient,
                _ if stored_coefficient > 0.0 => stored_coefficient,
                _ => {
                    let coefficient = settings.coefficients.get(fuel);
                    self.notices.push(Notice::CoefficientDefaulted { fuel, coefficient }.emit());
                    coefficient
                }
            };
            let total = FuelCharge { volume, price, coefficient }.total().whole();
            self.totals.push((fuel.component(), total));
            self.fields.extend([
                (fuel.component().column(), total.0),
                (fuel.volume_column(), volume.0),
                (fuel.price_column(), price.0),
                (fuel.coefficient_column(), coefficient),
            ]);
        }
        self.fields.extend([
            (Column::CoalHeatingValue, 0.0),
            (Column::BiomassHeatingValue, 0.0),
            (Column::EnergyInputOutput, 0.0),
        ]);
        Ok(())
    }

    fn apply_export(&mut self, form: &ExportForm, current: &PeriodRecord) -> Result<(), FieldErrors> {
        let mut reader = FieldReader::new(current);
        let charge = ExportCharge {
            price: RupiahPerKilowattHour(reader.value_or_stored(Column::PriceD, &form.price)),
            exported: KilowattHours(reader.value_or_stored(Column::ExportedEnergy, &form.exported)),
        };
        reader.finish()?;

        let total = charge.total().whole();
        self.totals.push((Component::D, total));
        self.fields.extend([
            (Component::D.column(), total.0),
            (Column::PriceD, charge.price.0),
            (Column::ExportedEnergy, charge.exported.0),
        ]);
        Ok(())
    }
}

/// Collects the parse errors so that they are reported all at once.
struct FieldReader<'a> {
    current: &'a PeriodRecord,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    const fn new(current: &'a PeriodRecord) -> Self {
        Self { current, errors: Vec::new() }
    }

    fn optional(&mut self, column: Column, raw: &str) -> Option<f64> {
        numeric::parse(raw).unwrap_or_else(|error| {
            self.errors.push(FieldError { column, error });
            None
        })
    }

    /// Not provided reads as zero.
    fn value(&mut self, column: Column, raw: &str) -> f64 {
        self.optional(column, raw).unwrap_or_default()
    }

    /// Not provided reads as the value stored in the current period.
    fn value_or_stored(&mut self, column: Column, raw: &str) -> f64 {
        let current = self.current;
        self.optional(column, raw).unwrap_or_else(|| current.get(column))
    }

    fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            warn!(n_errors = self.errors.len(), "invalid fields");
            Err(FieldErrors(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        aggregate::SalesSource,
        notice::PriceSource,
        settings::DayCount,
        store::{MemoryWorksheet, SheetError},
    };

    const NO_HISTORY: PerFuel<Option<RupiahPerKilogram>> = PerFuel { coal: None, biomass: None };

    fn strings(coal: &str, biomass: &str) -> PerFuel<String> {
        PerFuel { coal: coal.to_owned(), biomass: biomass.to_owned() }
    }

    fn preview_empty(submission: &Submission) -> Result<Outcome, FieldErrors> {
        preview(submission, &PeriodRecord::default(), &Settings::default(), &NO_HISTORY)
    }

    fn capacity_form(days_in_month: &str, days_in_year: &str) -> CapacityForm {
        CapacityForm {
            price: "1.250.000".to_owned(),
            availability: "0,85".to_owned(),
            net_capacity: "625000".to_owned(),
            days_in_month: days_in_month.to_owned(),
            days_in_year: days_in_year.to_owned(),
        }
    }

    #[test]
    fn test_capacity_with_default_days() {
        let outcome = preview_empty(&Submission::A(capacity_form("", "0"))).unwrap();
        let expected = (1_250_000.0 * 0.85 * 625_000.0 * 30.0 / 365.0_f64).trunc();
        assert_eq!(outcome.totals, [(Component::A, Rupiah(expected))]);
        assert_abs_diff_eq!(outcome.fields[&Column::ComponentA], expected);
        assert_abs_diff_eq!(outcome.fields[&Column::DaysInMonth], 30.0);
        assert_abs_diff_eq!(outcome.fields[&Column::DaysInYear], 365.0);
        assert_abs_diff_eq!(outcome.fields[&Column::AvailabilityA], 0.85);
        assert_eq!(
            outcome.notices,
            [Notice::DaysDefaulted { component: Component::A, days: DayCount::default() }],
        );
    }

    #[test]
    fn test_capacity_b_columns() {
        let outcome = preview_empty(&Submission::B(capacity_form("31", "365"))).unwrap();
        assert!(outcome.notices.is_empty());
        assert!(outcome.fields.contains_key(&Column::ComponentB));
        assert!(outcome.fields.contains_key(&Column::PriceB));
        assert!(!outcome.fields.contains_key(&Column::ComponentA));
        assert_abs_diff_eq!(outcome.fields[&Column::DaysInMonth], 31.0);
    }

    #[test]
    fn test_fuel_auto_fill_without_history() {
        let form = FuelForm {
            volumes: strings("1.000", "0"),
            prices: strings("", ""),
            coefficients: strings("0,99558", "0,00442"),
        };
        let outcome = preview_empty(&Submission::C(form)).unwrap();
        assert_eq!(
            outcome.notices,
            [Notice::PriceAutoFilled {
                fuel: Fuel::Coal,
                price: RupiahPerKilogram(1000.0),
                source: PriceSource::Fallback,
            }],
        );
        assert_abs_diff_eq!(outcome.fields[&Column::CoalPrice], 1000.0);
        assert_abs_diff_eq!(outcome.fields[&Column::ComponentCoal], 995_580.0, epsilon = 1.0);
        assert_abs_diff_eq!(outcome.fields[&Column::BiomassPrice], 0.0);
        assert_abs_diff_eq!(outcome.fields[&Column::ComponentBiomass], 0.0);
        assert_abs_diff_eq!(outcome.fields[&Column::EnergyInputOutput], 0.0);
    }

    #[test]
    fn test_fuel_default_coefficients() {
        let form = FuelForm {
            volumes: strings("100", "100"),
            prices: strings("10", "10"),
            coefficients: strings("", "0"),
        };
        let outcome = preview_empty(&Submission::C(form)).unwrap();
        assert_abs_diff_eq!(outcome.fields[&Column::CoalCoefficient], 0.99558);
        assert_abs_diff_eq!(outcome.fields[&Column::BiomassCoefficient], 0.00442);
        assert_eq!(outcome.notices.len(), 2);
        assert!(
            outcome.notices.iter().all(|notice| matches!(notice, Notice::CoefficientDefaulted { .. }))
        );
    }

    #[test]
    fn test_invalid_fields_are_all_reported() {
        let form = ExportForm { price: "12a3".to_owned(), exported: "1-2".to_owned() };
        let FieldErrors(errors) = preview_empty(&Submission::D(form)).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].column, Column::PriceD);
        assert!(matches!(errors[0].error, ParseError::IllegalCharacter { .. }));
        assert!(matches!(errors[1].error, ParseError::ParseFailure { .. }));
    }

    #[test]
    fn test_export_total_is_whole() {
        let form = ExportForm { price: "1.234,56".to_owned(), exported: "10,5".to_owned() };
        let outcome = preview_empty(&Submission::D(form)).unwrap();
        assert_eq!(outcome.totals, [(Component::D, Rupiah((1_234.56 * 10.5_f64).trunc()))]);
    }

    fn store() -> PeriodStore<MemoryWorksheet> {
        PeriodStore::new(MemoryWorksheet::default(), Settings::default()).unwrap()
    }

    #[test]
    fn test_submit_all_components() {
        let mut store = store();
        let submissions = [
            Submission::A(capacity_form("30", "365")),
            Submission::B(capacity_form("30", "365")),
            Submission::C(FuelForm {
                volumes: strings("250.000", "1.000"),
                prices: strings("1.023,82", "615"),
                coefficients: strings("", ""),
            }),
            Submission::D(ExportForm { price: "12,5".to_owned(), exported: "1.000.000".to_owned() }),
        ];
        for submission in &submissions {
            submit(&mut store, submission).unwrap();
        }
        assert_eq!(store.sheet().rows().len(), 2);
        let sales = store.sales().unwrap();
        assert_eq!(sales.source, SalesSource::Current);
        assert_eq!(sales.components.d, Rupiah(12_500_000.0));
        assert!(store.completion_status().unwrap().is_all_complete());
    }

    #[test]
    fn test_submit_uses_price_history() {
        let mut store = store();
        let form = |price: &str| FuelForm {
            volumes: strings("10", "0"),
            prices: strings(price, ""),
            coefficients: strings("1", "1"),
        };
        submit(&mut store, &Submission::C(form("1.100"))).unwrap();
        let outcome = submit(&mut store, &Submission::C(form(""))).unwrap();
        assert_abs_diff_eq!(outcome.fields[&Column::CoalPrice], 1_100.0);
        assert_abs_diff_eq!(outcome.fields[&Column::ComponentCoal], 11_000.0);
    }

    #[test]
    fn test_blank_capacity_fields_keep_stored_values() {
        let mut store = store();
        submit(&mut store, &Submission::A(capacity_form("31", "365"))).unwrap();
        let form = CapacityForm {
            price: "1.000.000".to_owned(),
            availability: "0,9".to_owned(),
            ..CapacityForm::default()
        };
        let outcome = submit(&mut store, &Submission::B(form)).unwrap();

        let expected = (1_000_000.0 * 0.9 * 625_000.0 * 31.0 / 365.0_f64).trunc();
        assert_eq!(outcome.totals, [(Component::B, Rupiah(expected))]);
        assert!(outcome.notices.is_empty());
        let current = store.current_period().unwrap();
        assert_abs_diff_eq!(current.get(Column::NetCapacity), 625_000.0);
        assert_abs_diff_eq!(current.get(Column::DaysInMonth), 31.0);
        assert_abs_diff_eq!(current.get(Column::ComponentB), expected);
        assert!(current.get(Column::ComponentA) > 0.0);
    }

    #[test]
    fn test_typed_zero_overrides_stored_value() {
        let mut store = store();
        submit(&mut store, &Submission::A(capacity_form("30", "365"))).unwrap();
        let form = CapacityForm { net_capacity: "0".to_owned(), ..CapacityForm::default() };
        let outcome = submit(&mut store, &Submission::A(form)).unwrap();
        assert_eq!(outcome.totals, [(Component::A, Rupiah::ZERO)]);
        assert_abs_diff_eq!(store.current_period().unwrap().get(Column::NetCapacity), 0.0);
    }

    #[test]
    fn test_blank_export_fields_keep_stored_values() {
        let mut store = store();
        let form = ExportForm { price: "12,5".to_owned(), exported: "1.000".to_owned() };
        submit(&mut store, &Submission::D(form)).unwrap();
        let form = ExportForm { price: "13".to_owned(), exported: String::new() };
        let outcome = submit(&mut store, &Submission::D(form)).unwrap();
        assert_eq!(outcome.totals, [(Component::D, Rupiah(13_000.0))]);
    }

    #[test]
    fn test_blank_coefficient_keeps_stored_one() {
        let mut store = store();
        let form = |coal_coefficient: &str| FuelForm {
            volumes: strings("100", "100"),
            prices: strings("10", "10"),
            coefficients: strings(coal_coefficient, ""),
        };
        submit(&mut store, &Submission::C(form("0,5"))).unwrap();
        let outcome = submit(&mut store, &Submission::C(form(""))).unwrap();
        assert_abs_diff_eq!(outcome.fields[&Column::CoalCoefficient], 0.5);
        assert_abs_diff_eq!(outcome.fields[&Column::ComponentCoal], 500.0);
        assert!(outcome.notices.is_empty());
        assert_abs_diff_eq!(store.current_period().unwrap().get(Column::CoalCoefficient), 0.5);
    }

    #[test]
    fn test_invalid_submission_is_not_saved() {
        let mut store = store();
        let form = ExportForm { price: "Rp x".to_owned(), exported: "1".to_owned() };
        assert!(matches!(submit(&mut store, &Submission::D(form)), Err(SubmitError::Invalid(_))));
        assert!(store.sheet().rows().is_empty());
    }

    #[test]
    fn test_write_failure() {
        let mut store = store();
        store.sheet_mut().set_read_only(true);
        let form = ExportForm { price: "1".to_owned(), exported: "1".to_owned() };
        assert!(matches!(
            submit(&mut store, &Submission::D(form)),
            Err(SubmitError::Store(StoreError::WriteFailure(SheetError::ReadOnly))),
        ));
    }
}
