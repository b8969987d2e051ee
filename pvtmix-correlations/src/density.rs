//! Formation volume factors, gas solubility and phase densities.
//!
//! Pressure is in Pa, temperature in K, and densities in kg/m³. Relative
//! densities are referenced to air for gas and to water for oil.

/// Density of fresh water at standard conditions, in kg/m³.
pub const WATER_DENSITY: f64 = 1000.0;

/// Gas formation volume factor, `b_g = 350.958·T/P`.
#[must_use]
pub fn gas_formation_volume_factor(temperature: f64, pressure: f64) -> f64 {
    350.958 * (temperature / pressure)
}

/// Gas density from its relative density and formation volume factor.
///
/// `28.97` is the molar mass of air and `24.04220577350111` the molar volume
/// at standard conditions that pairs with the `b_g` constant.
#[must_use]
pub fn gas_density(gamma_gas: f64, gas_fvf: f64) -> f64 {
    (28.97 * gamma_gas) / (24.042_205_773_501_11 * gas_fvf)
}

/// Solution gas-oil ratio `r_s` in m³/m³, Standing-style.
///
/// ```text
/// y_g = 1.2254503 + 0.001638·T − 1.76875/γo
/// r_s = γg · (1.9243101395421235e-6 · P / 10^y_g)^1.2048192771084338
/// ```
#[must_use]
pub fn solution_gas_oil_ratio(gamma_gas: f64, gamma_oil: f64, temperature: f64, pressure: f64) -> f64 {
    let y_g = 1.225_450_3 + 0.001_638 * temperature - (1.768_75 / gamma_oil);
    let base = 1.924_310_139_542_123_5e-6 * (pressure / 10_f64.powf(y_g));

    gamma_gas * base.powf(1.204_819_277_108_433_8)
}

/// Oil formation volume factor, Standing-style.
///
/// The bracketed term goes negative for temperatures below roughly 255 K
/// with little dissolved gas, in which case the result is `NaN`.
#[must_use]
pub fn oil_formation_volume_factor(
    gamma_gas: f64,
    gamma_oil: f64,
    solution_gor: f64,
    temperature: f64,
) -> f64 {
    let term = 5.614_58 * solution_gor * (gamma_gas / gamma_oil).sqrt() + 2.25 * temperature
        - 574.5875;

    0.972 + 147e-6 * term.powf(1.175)
}

/// Live oil density from its relative density, dissolved gas and shrinkage.
#[must_use]
pub fn oil_density(gamma_gas: f64, gamma_oil: f64, solution_gor: f64, oil_fvf: f64) -> f64 {
    WATER_DENSITY * ((gamma_oil + 1.2217e-3 * solution_gor * gamma_gas) / oil_fvf)
}

/// Liquid density as the water-cut weighted blend of oil and water.
#[must_use]
pub fn liquid_density(oil_density: f64, water_cut: f64) -> f64 {
    oil_density * (1.0 - water_cut) + WATER_DENSITY * water_cut
}

/// Mixture density as the gas-fraction weighted blend of liquid and gas.
#[must_use]
pub fn mixture_density(liquid_density: f64, gas_density: f64, gas_fraction: f64) -> f64 {
    liquid_density * (1.0 - gas_fraction) + gas_density * gas_fraction
}
