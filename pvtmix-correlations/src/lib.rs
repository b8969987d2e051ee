//! Empirical PVT correlations for multiphase oil, gas and water mixtures.
//!
//! The entry point is [`compute_mixture_properties`] (or the equivalent
//! [`MixtureProperties`] component), which turns a validated [`PvtInput`]
//! into the mixture flow rate, density and viscosity of a [`PvtOutput`].
//!
//! The individual correlations are grouped by physical quantity in the
//! [`phase`], [`density`] and [`viscosity`] modules, with the oilfield unit
//! conversions they rely on in [`units`]. They are plain functions of `f64`
//! values in the units documented on each function and can be used on their
//! own.

mod error;
mod input;
mod mixture;
mod output;

pub mod density;
pub mod phase;
pub mod units;
pub mod viscosity;

pub use error::{ComputationError, Field, ValidationError};
pub use input::{PvtInput, RawPvtInput};
pub use mixture::{MixtureProperties, MixtureState, compute_mixture_properties};
pub use output::PvtOutput;
