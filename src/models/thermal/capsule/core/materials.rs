//! Shell material and finish property lookup.

use uom::si::{
    f64::{MassDensity, SpecificHeatCapacity, ThermalConductivity},
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

/// Capsule shell construction material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellMaterial {
    Polyethylene,
    Aluminum,
    CarbonFiber,
}

/// Exterior finish, which sets the shell's optical properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapsuleColor {
    /// Low solar absorptivity, high IR emissivity.
    White,
    /// High solar absorptivity and emissivity.
    Black,
    /// Medium absorptivity, low emissivity (polished metal).
    Metallic,
    /// Caller-supplied optical fractions.
    Custom {
        solar_absorptivity: f64,
        ir_emissivity: f64,
    },
}

/// Thermal and optical properties of the finished shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProps {
    pub density: MassDensity,
    pub thermal_conductivity: ThermalConductivity,
    pub specific_heat: SpecificHeatCapacity,
    /// IR emissivity.
    pub emissivity: f64,
    /// Solar-spectrum absorptivity.
    pub solar_absorptivity: f64,
}

/// Looks up shell properties for a material/finish combination.
///
/// The bulk thermal values come from the material and the optical fractions
/// from the finish. Carbon fiber uses the through-thickness conductivity,
/// which is far below in-plane.
#[must_use]
pub fn shell_properties(material: ShellMaterial, color: CapsuleColor) -> MaterialProps {
    let (density, conductivity, specific_heat) = match material {
        ShellMaterial::Polyethylene => (950.0, 0.4, 2300.0),
        ShellMaterial::Aluminum => (2700.0, 160.0, 900.0),
        ShellMaterial::CarbonFiber => (1600.0, 5.0, 1000.0),
    };

    let (solar_absorptivity, emissivity) = match color {
        CapsuleColor::White => (0.2, 0.9),
        CapsuleColor::Black => (0.95, 0.95),
        CapsuleColor::Metallic => (0.5, 0.3),
        CapsuleColor::Custom {
            solar_absorptivity,
            ir_emissivity,
        } => (solar_absorptivity, ir_emissivity),
    };

    MaterialProps {
        density: MassDensity::new::<kilogram_per_cubic_meter>(density),
        thermal_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(conductivity),
        specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(specific_heat),
        emissivity,
        solar_absorptivity,
    }
}
