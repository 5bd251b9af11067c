//! Type-level numeric constraints checked at construction time.
//!
//! Model configuration is full of values that are only meaningful on part of
//! the number line: a shell thickness must be strictly positive, a view
//! factor must lie in the unit interval, a heating power must not be
//! negative. The [`Constrained<T, C>`] wrapper encodes these invariants in
//! the type, so a value that exists is a value that was checked.
//!
//! Three marker constraints are provided, which is all this crate needs:
//!
//! - [`StrictlyPositive`]: greater than zero
//! - [`NonNegative`]: zero or greater
//! - [`UnitInterval`]: `0 ≤ x ≤ 1`
//!
//! Each marker has an associated `new()` shorthand:
//!
//! ```
//! use aerostat_models::support::constraint::{StrictlyPositive, UnitInterval};
//!
//! let thickness = StrictlyPositive::new(0.002).unwrap();
//! assert_eq!(thickness.into_inner(), 0.002);
//!
//! let emissivity = UnitInterval::new(0.9).unwrap();
//! assert!(UnitInterval::new(1.2).is_err());
//! ```
//!
//! New invariants can be added by implementing [`Constraint<T>`] for a
//! zero-sized marker type.

use std::{cmp::Ordering, marker::PhantomData};

use num_traits::{One, Zero};
use thiserror::Error;

/// A trait for enforcing numeric invariants at construction time.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A wrapper holding a value that satisfied its constraint when constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Marker type for values greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or `NaN`.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Marker type for values that are zero or greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or `NaN`.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Marker type for values in the closed unit interval `0 ≤ x ≤ 1`.
///
/// Used for dimensionless fractions such as emissivities, absorptivities,
/// view factors, and incidence factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitInterval;

impl UnitInterval {
    /// Constructs a [`Constrained<T, UnitInterval>`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative, above one, or `NaN`.
    pub fn new<T: PartialOrd + Zero + One>(
        value: T,
    ) -> Result<Constrained<T, UnitInterval>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero + One> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => {}
            Some(Ordering::Less) => return Err(ConstraintError::Negative),
            None => return Err(ConstraintError::NotANumber),
        }
        match value.partial_cmp(&T::one()) {
            Some(Ordering::Less | Ordering::Equal) => Ok(()),
            Some(Ordering::Greater) => Err(ConstraintError::AboveMaximum),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Length, length::millimeter};

    #[test]
    fn strictly_positive() {
        assert!(StrictlyPositive::new(0.002).is_ok());
        assert!(StrictlyPositive::new(0.0).is_err());
        assert!(StrictlyPositive::new(-1.0).is_err());
        assert!(StrictlyPositive::new(f64::NAN).is_err());
    }

    #[test]
    fn strictly_positive_quantities() {
        let shell = Length::new::<millimeter>(2.0);
        assert!(StrictlyPositive::new(shell).is_ok());

        let degenerate = Length::new::<millimeter>(0.0);
        assert!(StrictlyPositive::new(degenerate).is_err());
    }

    #[test]
    fn non_negative() {
        assert!(NonNegative::new(0.0).is_ok());
        assert!(NonNegative::new(500.0).is_ok());
        assert_eq!(NonNegative::new(-0.1), Err(ConstraintError::Negative));
    }

    #[test]
    fn unit_interval_bounds() {
        assert!(UnitInterval::new(0.0).is_ok());
        assert!(UnitInterval::new(0.95).is_ok());
        assert!(UnitInterval::new(1.0).is_ok());
        assert_eq!(UnitInterval::new(-0.2), Err(ConstraintError::Negative));
        assert_eq!(UnitInterval::new(1.2), Err(ConstraintError::AboveMaximum));
        assert_eq!(
            UnitInterval::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }
}
