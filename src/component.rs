use std::str::FromStr;

use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};

use crate::{period::Column, prelude::*};

/// Cost component that adds up to the total sales.
#[derive(Debug, Hash, EnumSetType, derive_more::Display, Serialize, Deserialize)]
pub enum Component {
    /// Capacity charge, like [`Component::B`] with its own price and availability factor.
    #[display("Komponen A")]
    #[serde(rename = "komponen_a")]
    A,

    #[display("Komponen B")]
    #[serde(rename = "komponen_b")]
    B,

    #[display("Komponen C (Batubara)")]
    #[serde(rename = "komponen_c_batubara")]
    CoalFuel,

    #[display("Komponen C (Biomassa)")]
    #[serde(rename = "komponen_c_biomassa")]
    BiomassFuel,

    /// Energy export charge.
    #[display("Komponen D")]
    #[serde(rename = "komponen_d")]
    D,
}

impl Component {
    pub const ALL: [Self; 5] = [Self::A, Self::B, Self::CoalFuel, Self::BiomassFuel, Self::D];

    /// Column that stores the component total.
    #[must_use]
    pub const fn column(self) -> Column {
        match self {
            Self::A => Column::ComponentA,
            Self::B => Column::ComponentB,
            Self::CoalFuel => Column::ComponentCoal,
            Self::BiomassFuel => Column::ComponentBiomass,
            Self::D => Column::ComponentD,
        }
    }

    #[must_use]
    pub fn all() -> EnumSet<Self> {
        EnumSet::all()
    }
}

impl FromStr for Component {
    type Err = Error;

    /// Accepts the stored column name, for example `komponen_d`.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|component| component.column().as_str() == s)
            .with_context(|| format!("`{s}` is not a cost component"))
    }
}

/// Solid fuel burnt in the boiler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fuel {
    #[display("coal")]
    Coal,

    #[display("biomass")]
    Biomass,
}

impl Fuel {
    pub const ALL: [Self; 2] = [Self::Coal, Self::Biomass];

    #[must_use]
    pub const fn component(self) -> Component {
        match self {
            Self::Coal => Component::CoalFuel,
            Self::Biomass => Component::BiomassFuel,
        }
    }

    #[must_use]
    pub const fn volume_column(self) -> Column {
        match self {
            Self::Coal => Column::CoalVolume,
            Self::Biomass => Column::BiomassVolume,
        }
    }

    #[must_use]
    pub const fn price_column(self) -> Column {
        match self {
            Self::Coal => Column::CoalPrice,
            Self::Biomass => Column::BiomassPrice,
        }
    }

    #[must_use]
    pub const fn coefficient_column(self) -> Column {
        match self {
            Self::Coal => Column::CoalCoefficient,
            Self::Biomass => Column::BiomassCoefficient,
        }
    }
}

/// Pair of values, one per fuel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PerFuel<T> {
    pub coal: T,
    pub biomass: T,
}

impl<T> PerFuel<T> {
    pub const fn get_ref(&self, fuel: Fuel) -> &T {
        match fuel {
            Fuel::Coal => &self.coal,
            Fuel::Biomass => &self.biomass,
        }
    }
}

impl<T: Copy> PerFuel<T> {
    pub fn get(&self, fuel: Fuel) -> T {
        *self.get_ref(fuel)
    }
}
