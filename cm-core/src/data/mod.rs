//! Data types and validation modules
//!
//! Contains the configuration records and the bound checks used to build them.

mod types;
mod validation;

pub use types::{ChamberFanConfig, ChamberHeaterConfig, ControlMode};
pub use validation::{check_bounds, check_finite, Bounds};
