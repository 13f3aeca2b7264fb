#![doc = include_str!("../README.md")]

pub mod aggregate;
pub mod autofill;
pub mod calculator;
pub mod component;
pub mod model;
pub mod notice;
pub mod numeric;
pub mod period;
pub mod prelude;
pub mod quantity;
pub mod settings;
pub mod store;
pub mod workflow;
