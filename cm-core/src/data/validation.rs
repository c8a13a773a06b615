//! Numeric bound validation for settings options
//!
//! Every bounded option is checked when it is read. A violation produces
//! `ChamberError::OutOfRange` naming the section, the option, the value and
//! the first bound it broke.

use crate::error::{Bound, ChamberError, Result};

/// Inclusive (`minval`/`maxval`) and exclusive (`above`/`below`) limits
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub minval: Option<f64>,
    pub maxval: Option<f64>,
    pub above: Option<f64>,
    pub below: Option<f64>,
}

impl Bounds {
    /// No limits at all
    pub const NONE: Bounds = Bounds {
        minval: None,
        maxval: None,
        above: None,
        below: None,
    };

    /// `value >= 0`
    pub const NON_NEGATIVE: Bounds = Bounds {
        minval: Some(0.0),
        maxval: None,
        above: None,
        below: None,
    };

    /// `0 <= value <= 1`
    pub const UNIT: Bounds = Bounds {
        minval: Some(0.0),
        maxval: Some(1.0),
        above: None,
        below: None,
    };

    /// `0 < value <= 1`, the range of a power fraction
    pub const POWER: Bounds = Bounds {
        minval: None,
        maxval: Some(1.0),
        above: Some(0.0),
        below: None,
    };

    pub fn min(mut self, minval: f64) -> Self {
        self.minval = Some(minval);
        self
    }

    pub fn max(mut self, maxval: f64) -> Self {
        self.maxval = Some(maxval);
        self
    }

    pub fn above(mut self, above: f64) -> Self {
        self.above = Some(above);
        self
    }

    pub fn below(mut self, below: f64) -> Self {
        self.below = Some(below);
        self
    }

    /// The first bound `value` violates, checked in min, max, above, below order
    pub fn violation(&self, value: f64) -> Option<Bound> {
        if let Some(min) = self.minval {
            if value < min {
                return Some(Bound::Minimum(min));
            }
        }
        if let Some(max) = self.maxval {
            if value > max {
                return Some(Bound::Maximum(max));
            }
        }
        if let Some(above) = self.above {
            if value <= above {
                return Some(Bound::Above(above));
            }
        }
        if let Some(below) = self.below {
            if value >= below {
                return Some(Bound::Below(below));
            }
        }
        None
    }

    pub fn contains(&self, value: f64) -> bool {
        self.violation(value).is_none()
    }
}

/// Validates `value` against `bounds` for `option` in `section`
pub fn check_bounds(section: &str, option: &str, value: f64, bounds: &Bounds) -> Result<f64> {
    match bounds.violation(value) {
        Some(bound) => Err(ChamberError::out_of_range(section, option, value, bound)),
        None => Ok(value),
    }
}

/// Validates that `value` is a usable number (not NaN or infinite)
pub fn check_finite(section: &str, option: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(ChamberError::invalid_value(
            section,
            option,
            format!("'{}' is not a finite number", value),
        ));
    }
    Ok(value)
}
