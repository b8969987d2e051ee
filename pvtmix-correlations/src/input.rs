use pvtmix_core::constraint::{
    Constrained, ConstraintError, ConstraintResult, StrictlyPositive, UnitInterval, finite,
    whole_number,
};
use uom::si::{
    f64::{Pressure, ThermodynamicTemperature, Volume},
    pressure::pascal,
    thermodynamic_temperature::kelvin,
    volume::cubic_meter,
};

use crate::{Field, ValidationError};

type Positive<T = f64> = Constrained<T, StrictlyPositive>;

/// Unvalidated PVT inputs as plain numbers.
///
/// This is the shape a request arrives in. Convert it into a [`PvtInput`]
/// with [`PvtInput::new`] before running any correlation.
///
/// Units:
/// - `pressure` in Pa
/// - `temperature` in K
/// - `gamma_oil`, `gamma_gas`, `gamma_wat` as relative densities
/// - `water_cut` as a fraction of the liquid
/// - `gas_oil_ratio` in m³/t, must be a whole number
/// - `liquid_rate` in m³
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPvtInput {
    pub pressure: f64,
    pub temperature: f64,
    pub gamma_oil: f64,
    pub gamma_gas: f64,
    pub gamma_wat: f64,
    pub water_cut: f64,
    pub gas_oil_ratio: f64,
    pub liquid_rate: f64,
}

impl RawPvtInput {
    /// Returns the value supplied for `field`.
    #[must_use]
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Pressure => self.pressure,
            Field::Temperature => self.temperature,
            Field::GammaOil => self.gamma_oil,
            Field::GammaGas => self.gamma_gas,
            Field::GammaWat => self.gamma_wat,
            Field::WaterCut => self.water_cut,
            Field::GasOilRatio => self.gas_oil_ratio,
            Field::LiquidRate => self.liquid_rate,
        }
    }

    /// Returns a mutable reference to the value supplied for `field`.
    pub fn value_mut(&mut self, field: Field) -> &mut f64 {
        match field {
            Field::Pressure => &mut self.pressure,
            Field::Temperature => &mut self.temperature,
            Field::GammaOil => &mut self.gamma_oil,
            Field::GammaGas => &mut self.gamma_gas,
            Field::GammaWat => &mut self.gamma_wat,
            Field::WaterCut => &mut self.water_cut,
            Field::GasOilRatio => &mut self.gas_oil_ratio,
            Field::LiquidRate => &mut self.liquid_rate,
        }
    }
}

/// The documented sample request.
impl Default for RawPvtInput {
    fn default() -> Self {
        Self {
            pressure: 40.5,
            temperature: 296.0,
            gamma_oil: 0.8,
            gamma_gas: 0.7,
            gamma_wat: 1.0,
            water_cut: 0.5,
            gas_oil_ratio: 100.0,
            liquid_rate: 90.0,
        }
    }
}

/// Validated inputs to the correlation pipeline.
///
/// Every field is guaranteed to be finite and within its physical domain:
/// strictly positive for all fields except water cut, which lies in `[0, 1]`,
/// and a whole-number gas-oil ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvtInput {
    pressure: Positive,
    temperature: Positive,
    gamma_oil: Positive,
    gamma_gas: Positive,
    gamma_wat: Positive,
    water_cut: Constrained<f64, UnitInterval>,
    gas_oil_ratio: Positive<u32>,
    liquid_rate: Positive,
}

impl PvtInput {
    /// Validates raw inputs field by field, in request order.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first field that violates
    /// its constraint.
    pub fn new(raw: RawPvtInput) -> Result<Self, ValidationError> {
        Ok(Self {
            pressure: positive(Field::Pressure, raw.pressure)?,
            temperature: positive(Field::Temperature, raw.temperature)?,
            gamma_oil: positive(Field::GammaOil, raw.gamma_oil)?,
            gamma_gas: positive(Field::GammaGas, raw.gamma_gas)?,
            gamma_wat: positive(Field::GammaWat, raw.gamma_wat)?,
            water_cut: fraction(Field::WaterCut, raw.water_cut)?,
            gas_oil_ratio: positive_whole(Field::GasOilRatio, raw.gas_oil_ratio)?,
            liquid_rate: positive(Field::LiquidRate, raw.liquid_rate)?,
        })
    }

    /// Validates raw inputs and reports every failing field at once.
    ///
    /// # Errors
    ///
    /// Returns one [`ValidationError`] per offending field, in request order.
    pub fn validate_all(raw: RawPvtInput) -> Result<Self, Vec<ValidationError>> {
        let errors: Vec<_> = Field::ALL
            .into_iter()
            .filter_map(|field| {
                field
                    .check(raw.value(field))
                    .err()
                    .map(|source| ValidationError::new(field, source))
            })
            .collect();

        if errors.is_empty() {
            Self::new(raw).map_err(|error| vec![error])
        } else {
            Err(errors)
        }
    }

    /// Returns the pressure.
    #[must_use]
    pub fn pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.pressure.get())
    }

    /// Returns the absolute temperature.
    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(self.temperature.get())
    }

    /// Returns the oil relative density.
    #[must_use]
    pub fn gamma_oil(&self) -> f64 {
        self.gamma_oil.get()
    }

    /// Returns the gas relative density (air = 1).
    #[must_use]
    pub fn gamma_gas(&self) -> f64 {
        self.gamma_gas.get()
    }

    /// Returns the water relative density.
    ///
    /// Carried for completeness; none of the correlations depend on it.
    #[must_use]
    pub fn gamma_wat(&self) -> f64 {
        self.gamma_wat.get()
    }

    /// Returns the water cut as a fraction of the liquid.
    #[must_use]
    pub fn water_cut(&self) -> f64 {
        self.water_cut.get()
    }

    /// Returns the producing gas-oil ratio in m³/t.
    #[must_use]
    pub fn gas_oil_ratio(&self) -> u32 {
        self.gas_oil_ratio.get()
    }

    /// Returns the liquid rate.
    #[must_use]
    pub fn liquid_rate(&self) -> Volume {
        Volume::new::<cubic_meter>(self.liquid_rate.get())
    }
}

impl TryFrom<RawPvtInput> for PvtInput {
    type Error = ValidationError;

    fn try_from(raw: RawPvtInput) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl Field {
    /// Checks a raw value against the constraint declared for this field.
    ///
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] that [`PvtInput::new`] would report
    /// for this field.
    pub fn check(self, value: f64) -> ConstraintResult<()> {
        match self {
            Field::WaterCut => UnitInterval::new(finite(value)?).map(drop),
            Field::GasOilRatio => StrictlyPositive::new(whole_number(value)?).map(drop),
            _ => StrictlyPositive::new(finite(value)?).map(drop),
        }
    }
}

fn positive(field: Field, value: f64) -> Result<Positive, ValidationError> {
    finite(value)
        .and_then(StrictlyPositive::new)
        .map_err(|source| ValidationError::new(field, source))
}

fn fraction(field: Field, value: f64) -> Result<Constrained<f64, UnitInterval>, ValidationError> {
    finite(value)
        .and_then(UnitInterval::new)
        .map_err(|source| ValidationError::new(field, source))
}

fn positive_whole(field: Field, value: f64) -> Result<Positive<u32>, ValidationError> {
    whole_number(value)
        .and_then(StrictlyPositive::new)
        .map_err(|source: ConstraintError| ValidationError::new(field, source))
}
