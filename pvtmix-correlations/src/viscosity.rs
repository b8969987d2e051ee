//! Gas, oil, liquid and mixture viscosities.
//!
//! Viscosities are in cP. The oil correlations were fitted in oilfield
//! units, so they take temperature in °F, dissolved gas in scf/bbl and oil
//! gravity in °API (see [`crate::units`]).

/// Lower reference temperature of the dead-oil fit, in °F.
pub const DEAD_OIL_REFERENCE_LOW: f64 = 70.0;

/// Upper reference temperature used to extrapolate below [`DEAD_OIL_REFERENCE_LOW`], in °F.
pub const DEAD_OIL_REFERENCE_HIGH: f64 = 80.0;

/// Viscosity of water, in cP.
pub const WATER_VISCOSITY: f64 = 1.0;

/// Gas viscosity by the Lee–Gonzalez–Eakin correlation.
///
/// Takes the gas relative density, gas density in kg/m³, and temperature in K.
#[must_use]
pub fn gas_viscosity(gamma_gas: f64, gas_density: f64, temperature: f64) -> f64 {
    let t_rankine = 1.8 * temperature;
    let b = 2.57 + (1914.5 / t_rankine) + 0.275 * gamma_gas;

    1e-4 * (7.77 + 0.183 * gamma_gas)
        * (t_rankine.powf(1.5) / (122.4 + 373.6 * gamma_gas + t_rankine))
        * (b * (gas_density / 1000.0).powf(1.11 + 0.04 * b)).exp()
}

/// Dead (gas-free) oil viscosity at `t_fahrenheit` for an oil of `api` gravity.
///
/// `μ_dead = 10^(T^-1.163 · 10^(3.0324 − 0.02023·API)) − 1`
#[must_use]
pub fn dead_oil_viscosity(t_fahrenheit: f64, api: f64) -> f64 {
    let d = t_fahrenheit.powf(-1.163) * 10_f64.powf(3.0324 - 0.02023 * api);
    10_f64.powf(d) - 1.0
}

/// Live oil viscosity with `solution_gor` scf/bbl of dissolved gas.
///
/// Above 70 °F this is the Beggs–Robinson correction applied to the dead-oil
/// viscosity at `t_fahrenheit`. At or below 70 °F the dead-oil curve is
/// replaced by the power law through its values at 70 °F and 80 °F,
/// evaluated at `t_fahrenheit` with no dissolved-gas correction.
#[must_use]
pub fn live_oil_viscosity(solution_gor: f64, t_fahrenheit: f64, api: f64) -> f64 {
    if t_fahrenheit > DEAD_OIL_REFERENCE_LOW {
        let mu_dead = dead_oil_viscosity(t_fahrenheit, api);
        let a = 10.715 * (solution_gor + 100.0).powf(-0.515);
        let b = 5.44 * (solution_gor + 150.0).powf(-0.338);

        a * mu_dead.powf(b)
    } else {
        let mu_low = dead_oil_viscosity(DEAD_OIL_REFERENCE_LOW, api);
        let mu_high = dead_oil_viscosity(DEAD_OIL_REFERENCE_HIGH, api);

        let slope = (mu_low / mu_high).log10()
            / (DEAD_OIL_REFERENCE_HIGH / DEAD_OIL_REFERENCE_LOW).log10();
        let coefficient = DEAD_OIL_REFERENCE_LOW.powf(slope) * mu_low;
        let d = coefficient.log10() - slope * t_fahrenheit.log10();

        10_f64.powf(d)
    }
}

/// Liquid viscosity as the water-cut weighted blend of oil and water.
#[must_use]
pub fn liquid_viscosity(oil_viscosity: f64, water_cut: f64) -> f64 {
    oil_viscosity * (1.0 - water_cut) + WATER_VISCOSITY * water_cut
}

/// Mixture viscosity as the gas-fraction weighted blend of liquid and gas.
#[must_use]
pub fn mixture_viscosity(liquid_viscosity: f64, gas_viscosity: f64, gas_fraction: f64) -> f64 {
    liquid_viscosity * (1.0 - gas_fraction) + gas_viscosity * gas_fraction
}
