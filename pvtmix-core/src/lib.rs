//! Core building blocks shared by the pvtmix crates.
//!
//! This crate provides the [`Component`] trait used to expose a calculation
//! behind a uniform `call` interface, and the [`constraint`] module used to
//! carry validated numeric values through the correlation pipeline.

mod component;
pub mod constraint;

pub use component::Component;
