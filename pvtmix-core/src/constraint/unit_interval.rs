use std::cmp::Ordering;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value lies in the closed unit interval: `0 ≤ x ≤ 1`.
///
/// Used for proportions such as water cut.
///
/// # Examples
///
/// ```
/// use pvtmix_core::constraint::{Constrained, UnitInterval};
///
/// let wct = UnitInterval::new(0.5).unwrap();
/// assert_eq!(wct.into_inner(), 0.5);
///
/// assert!(Constrained::<f64, UnitInterval>::new(1.0).is_ok());
/// assert!(UnitInterval::new(1.01).is_err());
/// assert!(UnitInterval::new(-0.01).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitInterval;

impl UnitInterval {
    /// Constructs `Constrained<f64, UnitInterval>` if `0 ≤ value ≤ 1`.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than one.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn new(value: f64) -> Result<Constrained<f64, UnitInterval>, ConstraintError> {
        Constrained::<f64, UnitInterval>::new(value)
    }
}

impl Constraint<f64> for UnitInterval {
    fn check(value: &f64) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&0.0), value.partial_cmp(&1.0)) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_included() {
        assert!(UnitInterval::new(0.0).is_ok());
        assert!(UnitInterval::new(1.0).is_ok());
        assert!(UnitInterval::new(-0.0).is_ok());
    }

    #[test]
    fn out_of_range() {
        assert_eq!(
            UnitInterval::new(-0.01),
            Err(ConstraintError::BelowMinimum)
        );
        assert_eq!(UnitInterval::new(1.01), Err(ConstraintError::AboveMaximum));
        assert_eq!(
            UnitInterval::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }
}
