//! Type-level numeric constraints with zero runtime cost.
//!
//! Every value that enters the correlation pipeline has a physical domain:
//! pressures and temperatures are strictly positive, water cut lies in the
//! unit interval. This module expresses those domains at the type level so
//! that a value which made it past validation never needs checking again.
//!
//! # Provided Constraints
//!
//! - [`StrictlyPositive`]: Greater than zero
//! - [`UnitInterval`]: Within the closed interval `[0, 1]`
//!
//! Each marker can be used with the generic [`Constrained<T, C>`] wrapper,
//! where `C` is the marker type implementing [`Constraint<T>`].
//! Each also provides an associated `new()` constructor for convenience.
//!
//! # Extending
//!
//! You can define custom numeric invariants by implementing [`Constraint<T>`]
//! for your own zero-sized marker types.

mod strictly_positive;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use strictly_positive::StrictlyPositive;
pub use unit_interval::UnitInterval;

/// A trait for enforcing numeric invariants at construction time.
///
/// Implement this trait for any marker type representing a numeric constraint,
/// such as [`StrictlyPositive`] or [`UnitInterval`].
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a numeric value fails validation.
///
/// This enum is marked `#[non_exhaustive]` and may include additional variants
/// in future releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value must be finite")]
    NotFinite,
    #[error("value must be a whole number")]
    NotIntegral,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A wrapper enforcing a numeric constraint at construction time.
///
/// Combine this with one of the provided marker types (such as [`StrictlyPositive`])
/// or your own [`Constraint<T>`] implementation.
///
/// # Example
///
/// ```
/// use pvtmix_core::constraint::{Constrained, StrictlyPositive};
///
/// let n = Constrained::<_, StrictlyPositive>::new(42).unwrap();
/// assert_eq!(n.into_inner(), 42);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> ConstraintResult<Self> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Copy, C: Constraint<T>> Constrained<T, C> {
    /// Returns a copy of the inner value.
    pub fn get(&self) -> T {
        self.value
    }
}

/// Returns a reference to the inner unconstrained value.
impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Checks that a float is neither `NaN` nor infinite.
///
/// Constraints such as [`StrictlyPositive`] accept `+∞`, so inputs that must
/// be usable in arithmetic run through this check first.
///
/// # Errors
///
/// Returns [`ConstraintError::NotANumber`] for `NaN` and
/// [`ConstraintError::NotFinite`] for either infinity.
pub fn finite(value: f64) -> ConstraintResult<f64> {
    if value.is_nan() {
        Err(ConstraintError::NotANumber)
    } else if value.is_infinite() {
        Err(ConstraintError::NotFinite)
    } else {
        Ok(value)
    }
}

/// Converts a finite float into a whole number that fits in a `u32`.
///
/// # Errors
///
/// Fails with [`ConstraintError::NotIntegral`] if the value has a fractional
/// part, [`ConstraintError::Negative`] if it is below zero, and
/// [`ConstraintError::AboveMaximum`] if it exceeds `u32::MAX`.
pub fn whole_number(value: f64) -> ConstraintResult<u32> {
    let value = finite(value)?;
    if value.fract() != 0.0 {
        return Err(ConstraintError::NotIntegral);
    }
    if value < 0.0 {
        return Err(ConstraintError::Negative);
    }
    if value > f64::from(u32::MAX) {
        return Err(ConstraintError::AboveMaximum);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(value as u32)
}
