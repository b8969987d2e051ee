use std::fmt;

use pvtmix_core::constraint::ConstraintError;
use thiserror::Error;

/// Identifies one field of a PVT request.
///
/// [`Field::name`] returns the name the field carries on the wire, which is
/// also what error messages report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Pressure,
    Temperature,
    GammaOil,
    GammaGas,
    GammaWat,
    WaterCut,
    GasOilRatio,
    LiquidRate,
}

impl Field {
    /// All fields in request order.
    pub const ALL: [Field; 8] = [
        Field::Pressure,
        Field::Temperature,
        Field::GammaOil,
        Field::GammaGas,
        Field::GammaWat,
        Field::WaterCut,
        Field::GasOilRatio,
        Field::LiquidRate,
    ];

    /// Returns the wire name of the field.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Field::Pressure => "P",
            Field::Temperature => "T",
            Field::GammaOil => "GammaOil",
            Field::GammaGas => "GammaGas",
            Field::GammaWat => "GammaWat",
            Field::WaterCut => "Wct",
            Field::GasOilRatio => "Rp",
            Field::LiquidRate => "QLiq",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An input field violates its declared constraint.
///
/// Raised before the correlation pipeline runs, so no part of the
/// calculation has been performed when this error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid `{field}`: {source}")]
pub struct ValidationError {
    pub field: Field,
    pub source: ConstraintError,
}

impl ValidationError {
    pub(crate) fn new(field: Field, source: ConstraintError) -> Self {
        Self { field, source }
    }
}

/// The correlation pipeline produced a value outside its physical domain.
///
/// Inputs that pass validation can still leave the range where the empirical
/// correlations are defined, for example a temperature low enough that the
/// oil formation volume factor raises a negative base to a fractional power.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum ComputationError {
    /// An intermediate or output quantity evaluated to `NaN` or infinity.
    #[error("`{quantity}` evaluated to a non-finite value ({value})")]
    NonFinite { quantity: &'static str, value: f64 },

    /// An output quantity that must be positive was zero or negative.
    #[error("`{quantity}` must be positive, got {value}")]
    NonPositive { quantity: &'static str, value: f64 },
}

impl ComputationError {
    /// Returns the name of the quantity that failed.
    #[must_use]
    pub fn quantity(&self) -> &'static str {
        match self {
            Self::NonFinite { quantity, .. } | Self::NonPositive { quantity, .. } => *quantity,
        }
    }
}
