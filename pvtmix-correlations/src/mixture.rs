use pvtmix_core::Component;
use tracing::{debug, warn};
use uom::si::{pressure::pascal, thermodynamic_temperature::kelvin, volume::cubic_meter};

use crate::{ComputationError, PvtInput, PvtOutput, density, phase, units, viscosity};

/// Computes mixture flow rate, density and viscosity from PVT inputs.
///
/// This is the whole correlation pipeline behind one call. It keeps no
/// state, so a single value can serve any number of concurrent callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MixtureProperties;

/// Every quantity computed during one evaluation of the pipeline.
///
/// Rates are in m³, densities in kg/m³, viscosities in cP. The oilfield-unit
/// fields are the values the viscosity correlations consume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixtureState {
    pub oil_rate: f64,
    pub gas_rate: f64,
    pub gas_fraction: f64,
    pub gas_fvf: f64,
    pub gas_density: f64,
    pub solution_gor: f64,
    pub oil_fvf: f64,
    pub oil_density: f64,
    pub liquid_density: f64,
    pub t_fahrenheit: f64,
    pub solution_gor_scf_per_bbl: f64,
    pub api: f64,
    pub gas_viscosity: f64,
    pub oil_viscosity: f64,
    pub liquid_viscosity: f64,
    pub mixture_rate: f64,
    pub mixture_density: f64,
    pub mixture_viscosity: f64,
}

impl MixtureProperties {
    /// Runs the pipeline and returns every intermediate quantity.
    ///
    /// The outputs in the returned state are checked for finiteness only.
    /// Use [`compute_mixture_properties`] to also enforce positivity.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationError::NonFinite`] as soon as any quantity
    /// evaluates to `NaN` or infinity.
    pub fn evaluate_detailed(&self, input: &PvtInput) -> Result<MixtureState, ComputationError> {
        let p = input.pressure().get::<pascal>();
        let t = input.temperature().get::<kelvin>();
        let gamma_oil = input.gamma_oil();
        let gamma_gas = input.gamma_gas();
        let water_cut = input.water_cut();
        let gas_oil_ratio = f64::from(input.gas_oil_ratio());
        let liquid_rate = input.liquid_rate().get::<cubic_meter>();

        let oil_rate = phase::oil_rate(liquid_rate, water_cut);
        let gas_rate = finite("gas rate", phase::gas_rate(oil_rate, gas_oil_ratio))?;
        let gas_fraction = finite("gas fraction", phase::gas_fraction(gas_rate, liquid_rate))?;

        let gas_fvf = finite(
            "gas formation volume factor",
            density::gas_formation_volume_factor(t, p),
        )?;
        let gas_density = finite("gas density", density::gas_density(gamma_gas, gas_fvf))?;

        let solution_gor = finite(
            "solution gas-oil ratio",
            density::solution_gas_oil_ratio(gamma_gas, gamma_oil, t, p),
        )?;
        let oil_fvf = finite(
            "oil formation volume factor",
            density::oil_formation_volume_factor(gamma_gas, gamma_oil, solution_gor, t),
        )?;
        let oil_density = finite(
            "oil density",
            density::oil_density(gamma_gas, gamma_oil, solution_gor, oil_fvf),
        )?;
        let liquid_density = density::liquid_density(oil_density, water_cut);
        let mixture_density = finite(
            "mixture density",
            density::mixture_density(liquid_density, gas_density, gas_fraction),
        )?;

        let t_fahrenheit = units::kelvin_to_fahrenheit(t);
        let solution_gor_scf_per_bbl = units::m3_per_m3_to_scf_per_bbl(solution_gor);
        let api = units::relative_density_to_api(gamma_oil);

        let gas_viscosity = finite(
            "gas viscosity",
            viscosity::gas_viscosity(gamma_gas, gas_density, t),
        )?;
        let oil_viscosity = finite(
            "oil viscosity",
            viscosity::live_oil_viscosity(solution_gor_scf_per_bbl, t_fahrenheit, api),
        )?;
        let liquid_viscosity = viscosity::liquid_viscosity(oil_viscosity, water_cut);
        let mixture_viscosity = finite(
            "mixture viscosity",
            viscosity::mixture_viscosity(liquid_viscosity, gas_viscosity, gas_fraction),
        )?;

        let mixture_rate = finite("mixture flow rate", phase::mixture_rate(liquid_rate, gas_rate))?;

        Ok(MixtureState {
            oil_rate,
            gas_rate,
            gas_fraction,
            gas_fvf,
            gas_density,
            solution_gor,
            oil_fvf,
            oil_density,
            liquid_density,
            t_fahrenheit,
            solution_gor_scf_per_bbl,
            api,
            gas_viscosity,
            oil_viscosity,
            liquid_viscosity,
            mixture_rate,
            mixture_density,
            mixture_viscosity,
        })
    }
}

impl Component for MixtureProperties {
    type Input = PvtInput;
    type Output = PvtOutput;
    type Error = ComputationError;

    fn call(&self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        compute_mixture_properties(&input)
    }
}

/// Computes mixture flow rate, density and viscosity for a validated input.
///
/// # Errors
///
/// Returns a [`ComputationError`] if any intermediate quantity is not finite,
/// or if an output is not strictly positive.
pub fn compute_mixture_properties(input: &PvtInput) -> Result<PvtOutput, ComputationError> {
    let result = MixtureProperties.evaluate_detailed(input).and_then(|state| {
        debug!(?state, "evaluated mixture state");
        PvtOutput::new(
            state.mixture_rate,
            state.mixture_density,
            state.mixture_viscosity,
        )
    });

    if let Err(error) = &result {
        warn!(%error, ?input, "mixture properties are outside the physical domain");
    }

    result
}

fn finite(quantity: &'static str, value: f64) -> Result<f64, ComputationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ComputationError::NonFinite { quantity, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use uom::si::{dynamic_viscosity::centipoise, mass_density::kilogram_per_cubic_meter};

    use crate::RawPvtInput;

    fn input(raw: RawPvtInput) -> PvtInput {
        PvtInput::new(raw).expect("test input must be valid")
    }

    fn sample() -> RawPvtInput {
        RawPvtInput::default()
    }

    #[test]
    fn documented_sample() {
        let output = compute_mixture_properties(&input(sample())).unwrap();

        assert_relative_eq!(output.mixture_rate().get::<cubic_meter>(), 4590.0);
        assert_relative_eq!(
            output.mixture_density().get::<kilogram_per_cubic_meter>(),
            17.634_741_584_814_247,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            output.mixture_viscosity().get::<centipoise>(),
            0.078_844_464_895_310_93,
            max_relative = 1e-9
        );
    }

    #[test]
    fn reservoir_conditions() {
        let raw = RawPvtInput {
            pressure: 1.0e7,
            temperature: 350.0,
            gamma_oil: 0.85,
            water_cut: 0.3,
            gas_oil_ratio: 120.0,
            liquid_rate: 100.0,
            ..sample()
        };
        let (rate, rho, mu) = compute_mixture_properties(&input(raw)).unwrap().values();

        assert_relative_eq!(rate, 8500.0);
        assert_relative_eq!(rho, 77.622_325_212_081_85, max_relative = 1e-9);
        assert_relative_eq!(mu, 0.024_948_833_000_045_172, max_relative = 1e-9);
    }

    #[test]
    fn cold_branch_below_seventy_fahrenheit() {
        let raw = RawPvtInput {
            pressure: 101_325.0,
            temperature: 260.0,
            ..sample()
        };
        let state = MixtureProperties.evaluate_detailed(&input(raw)).unwrap();

        assert!(state.t_fahrenheit < viscosity::DEAD_OIL_REFERENCE_LOW);
        assert_relative_eq!(state.oil_viscosity, 1_678.581_159_698_585, max_relative = 1e-9);
        assert_relative_eq!(state.mixture_viscosity, 16.475_688_230_076_855, max_relative = 1e-9);
    }

    #[test]
    fn detailed_state_matches_output() {
        let input = input(sample());
        let state = MixtureProperties.evaluate_detailed(&input).unwrap();
        let output = compute_mixture_properties(&input).unwrap();

        assert_eq!(
            output.values(),
            (
                state.mixture_rate,
                state.mixture_density,
                state.mixture_viscosity
            )
        );
        assert_relative_eq!(state.gas_fraction, 4500.0 / 4590.0);
        assert_relative_eq!(state.t_fahrenheit, 73.13, epsilon = 1e-12);
    }

    #[test]
    fn component_call_matches_free_function() {
        let input = input(sample());
        assert_eq!(
            MixtureProperties.call(input),
            compute_mixture_properties(&input)
        );
    }

    #[test]
    fn too_cold_for_the_oil_fvf_correlation() {
        let raw = RawPvtInput {
            temperature: 200.0,
            ..sample()
        };
        let error = compute_mixture_properties(&input(raw)).unwrap_err();

        assert!(matches!(error, ComputationError::NonFinite { .. }));
        assert_eq!(error.quantity(), "oil formation volume factor");
    }

    #[test]
    fn all_water_is_water() {
        let raw = RawPvtInput {
            water_cut: 1.0,
            ..sample()
        };
        let (rate, rho, mu) = compute_mixture_properties(&input(raw)).unwrap().values();

        assert_relative_eq!(rate, 90.0);
        assert_relative_eq!(rho, density::WATER_DENSITY);
        assert_relative_eq!(mu, viscosity::WATER_VISCOSITY);
    }

    #[test]
    fn water_cut_pushes_mixture_toward_water() {
        for raw in [
            sample(),
            RawPvtInput {
                pressure: 1.0e7,
                temperature: 350.0,
                gamma_oil: 0.85,
                gas_oil_ratio: 120.0,
                liquid_rate: 100.0,
                ..sample()
            },
        ] {
            let mut previous: Option<(f64, f64)> = None;

            for step in 0..=20 {
                let water_cut = f64::from(step) / 20.0;
                let (_, rho, mu) =
                    compute_mixture_properties(&input(RawPvtInput { water_cut, ..raw }))
                        .unwrap()
                        .values();

                let density_gap = (density::WATER_DENSITY - rho).abs();
                let viscosity_gap = (viscosity::WATER_VISCOSITY - mu).abs();

                if let Some((last_density_gap, last_viscosity_gap)) = previous {
                    assert!(density_gap < last_density_gap, "Wct = {water_cut}");
                    assert!(viscosity_gap < last_viscosity_gap, "Wct = {water_cut}");
                }
                previous = Some((density_gap, viscosity_gap));
            }
        }
    }

    #[test]
    fn continuous_across_seventy_fahrenheit() {
        let seventy_f = units::fahrenheit_to_kelvin(viscosity::DEAD_OIL_REFERENCE_LOW);

        let evaluate = |temperature| {
            let raw = RawPvtInput {
                temperature,
                ..sample()
            };
            MixtureProperties
                .evaluate_detailed(&input(raw))
                .unwrap()
        };

        let below = evaluate(seventy_f - 1e-7);
        let above = evaluate(seventy_f + 1e-7);

        assert!(below.t_fahrenheit <= viscosity::DEAD_OIL_REFERENCE_LOW);
        assert!(above.t_fahrenheit > viscosity::DEAD_OIL_REFERENCE_LOW);
        assert_relative_eq!(below.oil_viscosity, above.oil_viscosity, max_relative = 1e-3);
        assert_relative_eq!(
            below.mixture_viscosity,
            above.mixture_viscosity,
            max_relative = 1e-3
        );
    }

    fn valid_input() -> impl Strategy<Value = RawPvtInput> {
        (
            1.0e3_f64..5.0e7,
            280.0_f64..420.0,
            0.7_f64..0.95,
            0.55_f64..1.2,
            0.0_f64..=1.0,
            1_u32..500,
            0.1_f64..1.0e4,
        )
            .prop_map(
                |(pressure, temperature, gamma_oil, gamma_gas, water_cut, rp, liquid_rate)| {
                    RawPvtInput {
                        pressure,
                        temperature,
                        gamma_oil,
                        gamma_gas,
                        gamma_wat: 1.0,
                        water_cut,
                        gas_oil_ratio: f64::from(rp),
                        liquid_rate,
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn outputs_are_positive(raw in valid_input()) {
            let (rate, rho, mu) = compute_mixture_properties(&input(raw)).unwrap().values();

            prop_assert!(rate > 0.0);
            prop_assert!(rho > 0.0);
            prop_assert!(mu > 0.0);
        }

        #[test]
        fn repeated_calls_are_bit_identical(raw in valid_input()) {
            let input = input(raw);
            let first = compute_mixture_properties(&input).unwrap().values();
            let second = compute_mixture_properties(&input).unwrap().values();

            prop_assert_eq!(first.0.to_bits(), second.0.to_bits());
            prop_assert_eq!(first.1.to_bits(), second.1.to_bits());
            prop_assert_eq!(first.2.to_bits(), second.2.to_bits());
        }
    }
}
