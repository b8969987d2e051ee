use pvtmix_core::constraint::{Constrained, StrictlyPositive};
use uom::si::{
    dynamic_viscosity::centipoise,
    f64::{DynamicViscosity, MassDensity, Volume},
    mass_density::kilogram_per_cubic_meter,
    volume::cubic_meter,
};

use crate::ComputationError;

/// Mixture properties produced by the correlation pipeline.
///
/// Each value is guaranteed to be finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvtOutput {
    mixture_rate: Constrained<f64, StrictlyPositive>,
    mixture_density: Constrained<f64, StrictlyPositive>,
    mixture_viscosity: Constrained<f64, StrictlyPositive>,
}

impl PvtOutput {
    /// Creates an output from a rate in m³, a density in kg/m³, and a
    /// viscosity in cP.
    ///
    /// # Errors
    ///
    /// Returns a [`ComputationError`] naming the first value that is not
    /// finite or not strictly positive.
    pub fn new(
        mixture_rate: f64,
        mixture_density: f64,
        mixture_viscosity: f64,
    ) -> Result<Self, ComputationError> {
        Ok(Self {
            mixture_rate: positive("mixture flow rate", mixture_rate)?,
            mixture_density: positive("mixture density", mixture_density)?,
            mixture_viscosity: positive("mixture viscosity", mixture_viscosity)?,
        })
    }

    /// Returns the mixture flow rate.
    #[must_use]
    pub fn mixture_rate(&self) -> Volume {
        Volume::new::<cubic_meter>(self.mixture_rate.get())
    }

    /// Returns the mixture density.
    #[must_use]
    pub fn mixture_density(&self) -> MassDensity {
        MassDensity::new::<kilogram_per_cubic_meter>(self.mixture_density.get())
    }

    /// Returns the mixture viscosity.
    #[must_use]
    pub fn mixture_viscosity(&self) -> DynamicViscosity {
        DynamicViscosity::new::<centipoise>(self.mixture_viscosity.get())
    }

    /// Returns `(rate m³, density kg/m³, viscosity cP)` as plain numbers,
    /// exactly as computed.
    #[must_use]
    pub fn values(&self) -> (f64, f64, f64) {
        (
            self.mixture_rate.get(),
            self.mixture_density.get(),
            self.mixture_viscosity.get(),
        )
    }
}

fn positive(
    quantity: &'static str,
    value: f64,
) -> Result<Constrained<f64, StrictlyPositive>, ComputationError> {
    if !value.is_finite() {
        return Err(ComputationError::NonFinite { quantity, value });
    }
    StrictlyPositive::new(value).map_err(|_| ComputationError::NonPositive { quantity, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn accessors_carry_units() {
        let output = PvtOutput::new(4590.0, 17.6, 0.078).unwrap();

        assert_relative_eq!(output.mixture_rate().get::<cubic_meter>(), 4590.0);
        assert_relative_eq!(
            output.mixture_density().get::<kilogram_per_cubic_meter>(),
            17.6
        );
        assert_relative_eq!(
            output.mixture_viscosity().get::<centipoise>(),
            0.078,
            max_relative = 1e-12
        );
        assert_eq!(output.values(), (4590.0, 17.6, 0.078));
    }

    #[test]
    fn rejects_non_positive_values() {
        assert_eq!(
            PvtOutput::new(1.0, 0.0, 1.0),
            Err(ComputationError::NonPositive {
                quantity: "mixture density",
                value: 0.0
            })
        );
        assert!(matches!(
            PvtOutput::new(1.0, 1.0, -0.5),
            Err(ComputationError::NonPositive {
                quantity: "mixture viscosity",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(matches!(
            PvtOutput::new(f64::INFINITY, 1.0, 1.0),
            Err(ComputationError::NonFinite {
                quantity: "mixture flow rate",
                ..
            })
        ));
        assert!(matches!(
            PvtOutput::new(1.0, 1.0, f64::NAN),
            Err(ComputationError::NonFinite { .. })
        ));
    }
}
