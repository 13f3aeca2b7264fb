use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{component::Component, numeric, prelude::*, quantity::Rupiah};

/// Format of the `timestamp` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column of the period sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Timestamp,
    ComponentA,
    PriceA,
    AvailabilityA,
    ComponentB,
    PriceB,
    AvailabilityB,
    NetCapacity,
    DaysInMonth,
    DaysInYear,
    ComponentCoal,
    ComponentBiomass,
    CoalVolume,
    BiomassVolume,
    CoalPrice,
    BiomassPrice,
    CoalHeatingValue,
    BiomassHeatingValue,
    CoalCoefficient,
    BiomassCoefficient,
    EnergyInputOutput,
    ComponentD,
    PriceD,
    ExportedEnergy,
}

impl Column {
    /// Sheet schema, in order.
    pub const ALL: [Self; 24] = [
        Self::Timestamp,
        Self::ComponentA,
        Self::PriceA,
        Self::AvailabilityA,
        Self::ComponentB,
        Self::PriceB,
        Self::AvailabilityB,
        Self::NetCapacity,
        Self::DaysInMonth,
        Self::DaysInYear,
        Self::ComponentCoal,
        Self::ComponentBiomass,
        Self::CoalVolume,
        Self::BiomassVolume,
        Self::CoalPrice,
        Self::BiomassPrice,
        Self::CoalHeatingValue,
        Self::BiomassHeatingValue,
        Self::CoalCoefficient,
        Self::BiomassCoefficient,
        Self::EnergyInputOutput,
        Self::ComponentD,
        Self::PriceD,
        Self::ExportedEnergy,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::ComponentA => "komponen_a",
            Self::PriceA => "price_a",
            Self::AvailabilityA => "eaf_a",
            Self::ComponentB => "komponen_b",
            Self::PriceB => "price_b",
            Self::AvailabilityB => "eaf_b",
            Self::NetCapacity => "daya_netto",
            Self::DaysInMonth => "jum_hari_bln",
            Self::DaysInYear => "jum_hari_thn",
            Self::ComponentCoal => "komponen_c_batubara",
            Self::ComponentBiomass => "komponen_c_biomassa",
            Self::CoalVolume => "vol_batubara_kg",
            Self::BiomassVolume => "vol_biomassa_kg",
            Self::CoalPrice => "harga_batubara_rp",
            Self::BiomassPrice => "harga_biomassa_rp",
            Self::CoalHeatingValue => "hhv_batubara",
            Self::BiomassHeatingValue => "hhv_biomassa",
            Self::CoalCoefficient => "koef_batubara",
            Self::BiomassCoefficient => "koef_biomassa",
            Self::EnergyInputOutput => "eio_val",
            Self::ComponentD => "komponen_d",
            Self::PriceD => "price_d",
            Self::ExportedEnergy => "kwh_export",
        }
    }

    #[must_use]
    pub fn from_header(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|column| column.as_str() == name)
    }

    /// Header row of the sheet schema.
    #[must_use]
    pub fn header() -> Vec<String> {
        Self::ALL.iter().map(|column| column.as_str().to_owned()).collect()
    }
}

/// Partial set of numeric fields submitted in one go.
pub type Fields = BTreeMap<Column, f64>;

/// One row of the period sheet: the operator inputs and the component totals computed from them.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeriodRecord {
    pub timestamp: Option<NaiveDateTime>,
    values: Fields,
}

impl PeriodRecord {
    /// Decode the row by the header names.
    ///
    /// Unknown columns are ignored, missing cells read as zero. Unreadable cells are logged and
    /// read as zero too, so that one broken cell does not take the whole period down.
    pub fn from_row(header: &[String], cells: &[String]) -> Self {
        let mut record = Self::default();
        for (name, cell) in header.iter().zip(cells) {
            match Column::from_header(name) {
                Some(Column::Timestamp) => {
                    record.timestamp = parse_timestamp(cell);
                }
                Some(column) => match numeric::parse(cell) {
                    Ok(value) => {
                        record.values.insert(column, value.unwrap_or_default());
                    }
                    Err(error) => {
                        warn!(column = column.as_str(), %cell, %error, "unreadable cell");
                    }
                },
                None => {}
            }
        }
        record
    }

    #[must_use]
    pub fn get(&self, column: Column) -> f64 {
        self.values.get(&column).copied().unwrap_or_default()
    }

    pub fn set(&mut self, column: Column, value: f64) -> &mut Self {
        self.values.insert(column, value);
        self
    }

    pub fn totals(&self) -> ComponentTotals {
        ComponentTotals {
            a: Rupiah(self.get(Column::ComponentA)),
            b: Rupiah(self.get(Column::ComponentB)),
            coal: Rupiah(self.get(Column::ComponentCoal)),
            biomass: Rupiah(self.get(Column::ComponentBiomass)),
            d: Rupiah(self.get(Column::ComponentD)),
        }
    }

    /// All five component totals are strictly positive.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.totals().is_complete()
    }
}

fn parse_timestamp(cell: &str) -> Option<NaiveDateTime> {
    let cell = cell.trim();
    if cell.is_empty() || cell == "0" {
        return None;
    }
    NaiveDateTime::parse_from_str(cell, TIMESTAMP_FORMAT)
        .inspect_err(|error| warn!(cell, %error, "unreadable timestamp"))
        .ok()
}

/// Monetary totals of the five cost components of one period.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ComponentTotals {
    pub a: Rupiah,
    pub b: Rupiah,
    pub coal: Rupiah,
    pub biomass: Rupiah,
    pub d: Rupiah,
}

impl ComponentTotals {
    pub const fn get(&self, component: Component) -> Rupiah {
        match component {
            Component::A => self.a,
            Component::B => self.b,
            Component::CoalFuel => self.coal,
            Component::BiomassFuel => self.biomass,
            Component::D => self.d,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, Rupiah)> + '_ {
        Component::ALL.into_iter().map(move |component| (component, self.get(component)))
    }

    pub fn total(&self) -> Rupiah {
        self.iter().map(|(_, value)| value).sum()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.iter().all(|(_, value)| value.is_positive())
    }
}
