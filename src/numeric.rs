//! Operator-typed and sheet-stored numbers.
//!
//! Operators type numbers in either the Indonesian (`1.234,56`) or the English (`1,234.56`)
//! convention, with no locale flag. The same disambiguation is used for every value read back
//! from the period store, so both contexts agree on what a string means.

mod format;
mod parse;

pub use self::{
    format::{encode_cell, format_id},
    parse::{ParseError, parse, parse_or_zero},
};
