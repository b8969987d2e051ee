//! Volumetric split of the produced stream into oil, water and free gas.
//!
//! All rates are in m³ and the gas-oil ratio in m³/t, matching how the
//! request reports them.

/// Oil volume in the produced liquid.
#[must_use]
pub fn oil_rate(liquid_rate: f64, water_cut: f64) -> f64 {
    liquid_rate * (1.0 - water_cut)
}

/// Gas volume produced alongside `oil_rate`.
#[must_use]
pub fn gas_rate(oil_rate: f64, gas_oil_ratio: f64) -> f64 {
    oil_rate * gas_oil_ratio
}

/// Share of the mixture volume taken by gas.
#[must_use]
pub fn gas_fraction(gas_rate: f64, liquid_rate: f64) -> f64 {
    gas_rate / (liquid_rate + gas_rate)
}

/// Total mixture flow rate of liquid and gas.
#[must_use]
pub fn mixture_rate(liquid_rate: f64, gas_rate: f64) -> f64 {
    liquid_rate + gas_rate
}
