//! Yoshimura bloom pattern generation.
//!
//! A bloom pattern is a Yoshimura-type origami crease pattern that folds a
//! flat sheet into a radially symmetric dome: a small central M-gon
//! surrounded by H concentric rings of triangular facets. The full pattern
//! is built from a single angular wedge (one M-th of the sheet) which is
//! duplicated radially and rotated into place.
//!
//! The [`Bloom`] model takes validated [`BloomParams`] and produces a
//! [`Pattern`]: the vertex, crease, and facet sets plus a 2D coordinate for
//! every vertex, ready for any plotting or file-export backend. Creases are
//! classified into boundary edges, orthogonal creases, and diagonal creases;
//! the orthogonal/diagonal split carries the mountain/valley fold
//! assignment.

pub(crate) mod core;

pub use self::core::{
    ClassifyError, CoordinateMap, Crease, CreaseClass, Facet, FoldDirection, Pattern, PlotPoint,
    PointId,
};

use thiserror::Error;
use twine_core::Model;

use crate::support::constraint::{ConstraintError, StrictlyPositive};

/// Validated bloom pattern parameters.
///
/// `sides` is the number of sides of the central polygon (`M ≥ 3`),
/// `height_order` the number of facet rings from the central polygon to the
/// pattern boundary (`H ≥ 0`), and `scale` a strictly positive factor
/// applied to the unit-side-length pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomParams {
    sides: u32,
    height_order: u32,
    scale: f64,
}

/// Errors from [`BloomParams::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BloomParamsError {
    /// The central polygon needs at least three sides.
    #[error("central polygon needs at least 3 sides, got {sides}")]
    TooFewSides { sides: u32 },

    /// The scale factor must be strictly positive.
    #[error("invalid scale factor: {0}")]
    Scale(#[from] ConstraintError),
}

impl BloomParams {
    /// Validates and constructs bloom pattern parameters.
    ///
    /// # Errors
    ///
    /// Returns [`BloomParamsError`] if `sides < 3` or `scale` is not
    /// strictly positive.
    pub fn new(sides: u32, height_order: u32, scale: f64) -> Result<Self, BloomParamsError> {
        if sides < 3 {
            return Err(BloomParamsError::TooFewSides { sides });
        }
        StrictlyPositive::new(scale)?;

        Ok(Self {
            sides,
            height_order,
            scale,
        })
    }

    /// Number of sides of the central polygon.
    #[must_use]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Number of facet rings per wedge.
    #[must_use]
    pub fn height_order(&self) -> u32 {
        self.height_order
    }

    /// Uniform scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

/// Bloom pattern generator.
///
/// A stateless [`Model`] adapter over the pattern construction core.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bloom;

impl Model for Bloom {
    type Input = BloomParams;
    type Output = Pattern;
    type Error = ClassifyError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        core::generate(input)
    }
}
