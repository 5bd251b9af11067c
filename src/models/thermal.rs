//! Thermal systems models.
//!
//! This module contains lumped-parameter thermal models for crewed
//! stratospheric flight hardware.

pub mod capsule;
