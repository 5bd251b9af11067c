//! Supporting utilities used by models.
//!
//! Modules here are part of the public API because they're useful on their
//! own, but their APIs are not stable. Breaking changes may occur as needed.

pub mod atmosphere;
pub mod constraint;
pub mod units;
