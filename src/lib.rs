//! # Aerostat Models
//!
//! Opinionated engineering models for stratospheric balloon design, built
//! for [Twine](https://github.com/isentropic-dev/twine).
//!
//! Two model families are provided:
//!
//! - [`models::origami`]: Yoshimura bloom fold patterns for deployable
//!   balloon envelopes: vertex/crease/facet construction, crease
//!   classification, and the transform pipeline producing plot coordinates.
//! - [`models::thermal`]: a six-node lumped-parameter thermal network for a
//!   crewed stratospheric capsule, integrated over an
//!   ascent/float/descent flight profile.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models, including the ISA
//!   atmosphere, typed numeric constraints, and [`uom`] extensions.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
