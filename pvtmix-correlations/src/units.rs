//! Conversions between SI inputs and the oilfield units the viscosity
//! correlations were fitted in.

/// Volume of one standard cubic foot of gas per barrel of oil, in m³/m³.
pub const M3_PER_M3_PER_SCF_PER_BBL: f64 = 0.178_107_606_679_035_22;

/// Converts an absolute temperature in kelvin to degrees Fahrenheit.
#[must_use]
pub fn kelvin_to_fahrenheit(t_kelvin: f64) -> f64 {
    1.8 * (t_kelvin - 273.15) + 32.0
}

/// Converts a temperature in degrees Fahrenheit to kelvin.
#[must_use]
pub fn fahrenheit_to_kelvin(t_fahrenheit: f64) -> f64 {
    (t_fahrenheit - 32.0) / 1.8 + 273.15
}

/// Converts a gas-oil ratio from m³/m³ to scf/bbl.
#[must_use]
pub fn m3_per_m3_to_scf_per_bbl(ratio: f64) -> f64 {
    ratio / M3_PER_M3_PER_SCF_PER_BBL
}

/// Converts a gas-oil ratio from scf/bbl to m³/m³.
#[must_use]
pub fn scf_per_bbl_to_m3_per_m3(ratio: f64) -> f64 {
    ratio * M3_PER_M3_PER_SCF_PER_BBL
}

/// Converts an oil relative density to degrees API.
///
/// Uses the `145.5 / γ − 135.5` form the viscosity fits were built with,
/// not the `141.5 / γ − 131.5` standard definition.
#[must_use]
pub fn relative_density_to_api(gamma_oil: f64) -> f64 {
    145.5 / gamma_oil - 135.5
}

/// Converts degrees API back to an oil relative density.
///
/// Inverse of [`relative_density_to_api`].
#[must_use]
pub fn api_to_relative_density(api: f64) -> f64 {
    145.5 / (api + 135.5)
}
