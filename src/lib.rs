//! Constructive-solid-geometry engine for a fixed-target assembly and its
//! scattering chambers.
//!
//! A [`builder::TargetBuilder`] picks the recipe for the configured
//! experiment, which combines [`solid`] primitives through booleans and
//! rigid [`transform`]s, derives the dimensions that make neighbouring
//! parts meet ([`derive`]), and places the resulting volumes into a
//! [`scene::GeometryStore`].

pub mod builder;
pub mod config;
pub mod derive;
pub mod error;
pub mod material;
pub mod math;
pub mod recipes;
pub mod registry;
pub mod scene;
pub mod solid;
pub mod transform;
pub mod units;

pub use builder::TargetBuilder;
pub use error::{BuildError, Result};
