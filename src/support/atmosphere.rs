//! International Standard Atmosphere (1976) lookup.
//!
//! The ISA models the atmosphere as a stack of layers, each with a base
//! altitude, a constant temperature lapse rate, and base temperature and
//! pressure values. Within a gradient layer pressure follows a power law;
//! within an isothermal layer it follows the barometric exponential.
//! Density comes from the ideal gas law with the dry-air gas constant.
//!
//! The table covers seven layers from sea level through the second
//! mesospheric layer (base 71 km). Above 71 km the last layer's law simply
//! keeps extrapolating; results there are smooth and finite but are not
//! backed by the 1976 standard. Callers working above 71 km should treat the
//! output as an extrapolation, not a lookup.
//!
//! [`standard_atmosphere`] is pure and total: every finite altitude maps to
//! a defined state, including negative altitudes (the troposphere layer
//! extrapolates below sea level).

use uom::si::{
    f64::{Length, MassDensity, Pressure, ThermodynamicTemperature},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

/// Specific gas constant of dry air, J/(kg·K).
const R_DRY_AIR: f64 = 287.05;

/// Standard gravitational acceleration, m/s².
const G0: f64 = 9.80665;

/// One ISA layer: base altitude [m], lapse rate [K/m], base temperature [K],
/// base pressure [Pa].
struct IsaLayer {
    base_altitude: f64,
    lapse_rate: f64,
    base_temperature: f64,
    base_pressure: f64,
}

/// ISA 1976 layer table, troposphere through mesosphere-2.
const ISA_LAYERS: [IsaLayer; 7] = [
    IsaLayer {
        base_altitude: 0.0,
        lapse_rate: -0.0065,
        base_temperature: 288.15,
        base_pressure: 101_325.0,
    },
    IsaLayer {
        base_altitude: 11_000.0,
        lapse_rate: 0.0,
        base_temperature: 216.65,
        base_pressure: 22_632.1,
    },
    IsaLayer {
        base_altitude: 20_000.0,
        lapse_rate: 0.001,
        base_temperature: 216.65,
        base_pressure: 5_474.89,
    },
    IsaLayer {
        base_altitude: 32_000.0,
        lapse_rate: 0.0028,
        base_temperature: 228.65,
        base_pressure: 868.019,
    },
    IsaLayer {
        base_altitude: 47_000.0,
        lapse_rate: 0.0,
        base_temperature: 270.65,
        base_pressure: 110.906,
    },
    IsaLayer {
        base_altitude: 51_000.0,
        lapse_rate: -0.0028,
        base_temperature: 270.65,
        base_pressure: 66.9389,
    },
    IsaLayer {
        base_altitude: 71_000.0,
        lapse_rate: -0.002,
        base_temperature: 214.65,
        base_pressure: 3.95642,
    },
];

/// Ambient conditions at a single altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphericState {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub density: MassDensity,
}

/// Computes ISA temperature, pressure, and density at the given altitude.
#[must_use]
pub fn standard_atmosphere(altitude: Length) -> AtmosphericState {
    let h = altitude.get::<meter>();

    let layer = ISA_LAYERS
        .iter()
        .rev()
        .find(|layer| h >= layer.base_altitude)
        .unwrap_or(&ISA_LAYERS[0]);

    let dh = h - layer.base_altitude;

    let (temperature, pressure) = if layer.lapse_rate.abs() < 1e-10 {
        // Isothermal layer: barometric exponential.
        let t = layer.base_temperature;
        let p = layer.base_pressure * (-G0 * dh / (R_DRY_AIR * t)).exp();
        (t, p)
    } else {
        // Gradient layer: power law in the temperature ratio.
        let t = layer.base_temperature + layer.lapse_rate * dh;
        let p = layer.base_pressure
            * (t / layer.base_temperature).powf(-G0 / (layer.lapse_rate * R_DRY_AIR));
        (t, p)
    };

    let density = pressure / (R_DRY_AIR * temperature);

    AtmosphericState {
        temperature: ThermodynamicTemperature::new::<kelvin>(temperature),
        pressure: Pressure::new::<pascal>(pressure),
        density: MassDensity::new::<kilogram_per_cubic_meter>(density),
    }
}
