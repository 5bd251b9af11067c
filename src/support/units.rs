//! Extensions to [`uom`].
//!
//! All physical quantities in this crate are [`uom`] types. This module adds
//! the few pieces the crate needs that [`uom`] doesn't provide directly:
//! a quantity alias for the specific gas constant and an extension trait for
//! subtracting absolute temperatures.
//!
//! ## Temperature differences
//!
//! Subtracting one [`ThermodynamicTemperature`] from another should yield a
//! [`TemperatureInterval`], but [`uom`]'s kind system doesn't allow the
//! subtraction directly (see uom issues
//! [#380](https://github.com/iliekturtles/uom/issues/380) and
//! [#289](https://github.com/iliekturtles/uom/issues/289)).
//! [`TemperatureDifference::minus`] fills the gap:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::kelvin;
//! use aerostat_models::support::units::TemperatureDifference;
//!
//! let surface = ThermodynamicTemperature::new::<kelvin>(293.15);
//! let ambient = ThermodynamicTemperature::new::<kelvin>(216.65);
//! let delta = surface.minus(ambient); // a TemperatureInterval of 76.5 K
//! ```
//!
//! [`ThermodynamicTemperature`]: uom::si::f64::ThermodynamicTemperature
//! [`TemperatureInterval`]: uom::si::f64::TemperatureInterval

use uom::{
    si::{
        ISQ, Quantity, SI,
        area::square_meter,
        f64::{Area, TemperatureInterval, ThermalConductance, ThermodynamicTemperature},
        temperature_interval::kelvin as delta_kelvin,
        thermal_conductance::watt_per_kelvin,
        thermodynamic_temperature::kelvin as abs_kelvin,
    },
    typenum::{N1, N2, N3, P1, P2, Z0},
};

/// Specific gas constant, J/(kg·K) in SI.
///
/// Dimensionally identical to specific heat capacity, so units such as
/// `joule_per_kilogram_kelvin` construct it.
pub type SpecificGasConstant = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Heat transfer coefficient, W/(m²·K) in SI.
pub type HeatTransferCoefficient = Quantity<ISQ<Z0, P1, N3, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Constructs a heat transfer coefficient from a value in W/(m²·K).
#[must_use]
pub fn heat_transfer_coefficient(value: f64) -> HeatTransferCoefficient {
    ThermalConductance::new::<watt_per_kelvin>(value) / Area::new::<square_meter>(1.0)
}

/// Extension trait for subtracting absolute temperatures.
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other` as an interval.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;

    #[test]
    fn dry_air_gas_constant_constructs() {
        let r = SpecificGasConstant::new::<joule_per_kilogram_kelvin>(287.05);
        assert_relative_eq!(r.get::<joule_per_kilogram_kelvin>(), 287.05);
    }

    #[test]
    fn heat_transfer_coefficient_times_area_is_conductance() {
        let h = heat_transfer_coefficient(5.0);
        let conductance: ThermalConductance = h * Area::new::<square_meter>(2.0);
        assert_relative_eq!(conductance.get::<watt_per_kelvin>(), 10.0);
    }

    #[test]
    fn minus_is_signed() {
        let warm = ThermodynamicTemperature::new::<abs_kelvin>(288.15);
        let cold = ThermodynamicTemperature::new::<abs_kelvin>(216.65);

        assert_relative_eq!(warm.minus(cold).get::<delta_kelvin>(), 71.5, epsilon = 1e-12);
        assert_relative_eq!(cold.minus(warm).get::<delta_kelvin>(), -71.5, epsilon = 1e-12);
        assert_relative_eq!(warm.minus(warm).get::<delta_kelvin>(), 0.0);
    }
}
