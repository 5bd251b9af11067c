//! Capsule thermal configuration.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use thiserror::Error;
use uom::si::{
    f64::{Area, Length, MassDensity, Power, SpecificHeatCapacity, ThermalConductivity,
        ThermodynamicTemperature, Time, Velocity},
    length::{meter, millimeter},
    mass_density::kilogram_per_cubic_meter,
    power::watt,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
    time::second,
    velocity::meter_per_second,
};

use crate::support::constraint::{ConstraintError, NonNegative, StrictlyPositive, UnitInterval};
use crate::support::units::{HeatTransferCoefficient, heat_transfer_coefficient};

use super::materials::{CapsuleColor, ShellMaterial};
use super::profile::FlightProfile;

/// Properties of the window assembly: two polycarbonate layers separated by
/// an air gap, with a golden mirror coating setting the solar split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowProps {
    pub major_axis: Length,
    pub minor_axis: Length,
    /// Thickness of each polycarbonate layer.
    pub layer_thickness: Length,
    /// Air gap between the layers.
    pub gap_thickness: Length,
    pub thermal_conductivity: ThermalConductivity,
    pub density: MassDensity,
    pub specific_heat: SpecificHeatCapacity,
    pub emissivity: f64,
    pub solar_transmittance: f64,
    pub solar_absorptance: f64,
    pub solar_reflectance: f64,
}

impl Default for WindowProps {
    fn default() -> Self {
        Self {
            major_axis: Length::new::<meter>(1.9),
            minor_axis: Length::new::<meter>(1.19),
            layer_thickness: Length::new::<millimeter>(3.0),
            gap_thickness: Length::new::<millimeter>(10.0),
            thermal_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(0.20),
            density: MassDensity::new::<kilogram_per_cubic_meter>(1200.0),
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1250.0),
            emissivity: 0.90,
            // Mostly reflected by the golden mirror coating.
            solar_transmittance: 0.15,
            solar_absorptance: 0.10,
            solar_reflectance: 0.75,
        }
    }
}

impl WindowProps {
    /// Elliptical window area.
    #[must_use]
    pub fn area(&self) -> Area {
        PI * (self.major_axis / 2.0) * (self.minor_axis / 2.0)
    }

    /// Total thickness of the window stack.
    #[must_use]
    pub fn stack_thickness(&self) -> Length {
        2.0 * self.layer_thickness + self.gap_thickness
    }
}

/// Properties of the interior insulation (polyimide foam).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsulationProps {
    pub thickness: Length,
    pub density: MassDensity,
    pub thermal_conductivity: ThermalConductivity,
    pub specific_heat: SpecificHeatCapacity,
}

impl Default for InsulationProps {
    fn default() -> Self {
        Self {
            thickness: Length::new::<millimeter>(20.0),
            density: MassDensity::new::<kilogram_per_cubic_meter>(50.0),
            thermal_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(0.030),
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1200.0),
        }
    }
}

/// Preset avionics fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectronicsPreset {
    /// Bare minimum for controlled flight.
    Minimal,
    /// A typical crewed fit.
    Standard,
    /// Dual radios, cameras, and logging.
    Heavy,
}

/// Electronic devices and their dissipated power.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElectronicsLoad {
    devices: BTreeMap<String, Power>,
}

impl ElectronicsLoad {
    /// An empty load for custom fits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A preset device fit.
    #[must_use]
    pub fn preset(preset: ElectronicsPreset) -> Self {
        let devices: &[(&str, f64)] = match preset {
            ElectronicsPreset::Minimal => {
                &[("com_radio", 15.0), ("gps", 10.0), ("transponder", 15.0)]
            }
            ElectronicsPreset::Standard => &[
                ("com_radio", 25.0),
                ("nav_gps", 15.0),
                ("pfd_mfd", 30.0),
                ("transponder", 20.0),
                ("adsb", 15.0),
                ("audio_panel", 10.0),
                ("misc_instruments", 20.0),
            ],
            ElectronicsPreset::Heavy => &[
                ("com_radio_1", 25.0),
                ("com_radio_2", 25.0),
                ("nav_gps", 15.0),
                ("pfd_mfd", 40.0),
                ("transponder", 20.0),
                ("adsb", 15.0),
                ("audio_panel", 10.0),
                ("misc_instruments", 25.0),
                ("cameras", 30.0),
                ("datalogger", 15.0),
            ],
        };

        let mut load = Self::new();
        for (name, watts) in devices {
            load.add_device(*name, Power::new::<watt>(*watts));
        }
        load
    }

    /// Adds or replaces a device.
    pub fn add_device(&mut self, name: impl Into<String>, power: Power) {
        self.devices.insert(name.into(), power);
    }

    /// Total power dissipated by all devices.
    #[must_use]
    pub fn total_power(&self) -> Power {
        self.devices
            .values()
            .fold(Power::new::<watt>(0.0), |total, &p| total + p)
    }
}

/// Complete thermal analysis configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalConfig {
    // Geometry
    pub capsule_radius: Length,
    pub shell_thickness: Length,

    // Materials
    pub shell_material: ShellMaterial,
    pub capsule_color: CapsuleColor,
    pub insulation: InsulationProps,
    pub window: WindowProps,

    // Flight
    pub flight_profile: FlightProfile,

    // Environment
    pub sun_on: bool,
    /// Effective sun angle and orientation factor.
    pub solar_incidence_factor: f64,

    // Interior heat transfer
    pub interior_convection: HeatTransferCoefficient,

    // Internal loads
    pub occupants: u32,
    pub metabolic_heat_per_person: Power,
    pub electronics: ElectronicsLoad,
    /// Additional heating (positive) or cooling (negative).
    pub aux_heating_power: Power,

    // Initial conditions
    pub initial_interior_temperature: ThermodynamicTemperature,
    pub initial_shell_temperature: ThermodynamicTemperature,
    pub initial_window_temperature: ThermodynamicTemperature,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        let initial = ThermodynamicTemperature::new::<kelvin>(288.15);
        Self {
            capsule_radius: Length::new::<meter>(1.2),
            shell_thickness: Length::new::<millimeter>(2.0),
            shell_material: ShellMaterial::Aluminum,
            capsule_color: CapsuleColor::White,
            insulation: InsulationProps::default(),
            window: WindowProps::default(),
            flight_profile: FlightProfile::default(),
            sun_on: true,
            solar_incidence_factor: 0.3,
            interior_convection: heat_transfer_coefficient(5.0),
            occupants: 3,
            metabolic_heat_per_person: Power::new::<watt>(100.0),
            electronics: ElectronicsLoad::preset(ElectronicsPreset::Standard),
            aux_heating_power: Power::new::<watt>(0.0),
            initial_interior_temperature: initial,
            initial_shell_temperature: initial,
            initial_window_temperature: initial,
        }
    }
}

/// Errors from [`ThermalConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid {quantity}: {source}")]
    OutOfRange {
        quantity: &'static str,
        source: ConstraintError,
    },

    #[error("float altitude {float_altitude:?} is not above ground altitude {ground_altitude:?}")]
    FloatNotAboveGround {
        float_altitude: Length,
        ground_altitude: Length,
    },

    #[error("shell and insulation thickness exceed the capsule radius")]
    LayersExceedRadius {
        capsule_radius: Length,
        shell_thickness: Length,
        insulation_thickness: Length,
    },
}

fn check<T>(quantity: &'static str, result: Result<T, ConstraintError>) -> Result<(), ConfigError> {
    result
        .map(|_| ())
        .map_err(|source| ConfigError::OutOfRange { quantity, source })
}

impl ThermalConfig {
    /// Checks the configuration for values the model cannot accept.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for non-positive geometry or rates, optical
    /// fractions outside the unit interval, a float altitude at or below
    /// ground, or layers thicker than the capsule itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("capsule radius", StrictlyPositive::new(self.capsule_radius))?;
        check("shell thickness", StrictlyPositive::new(self.shell_thickness))?;
        check(
            "insulation thickness",
            StrictlyPositive::new(self.insulation.thickness),
        )?;
        check(
            "window major axis",
            StrictlyPositive::new(self.window.major_axis),
        )?;
        check(
            "window minor axis",
            StrictlyPositive::new(self.window.minor_axis),
        )?;
        check(
            "window layer thickness",
            StrictlyPositive::new(self.window.layer_thickness),
        )?;
        check(
            "window gap thickness",
            NonNegative::new(self.window.gap_thickness),
        )?;

        check(
            "window emissivity",
            UnitInterval::new(self.window.emissivity),
        )?;
        check(
            "window solar transmittance",
            UnitInterval::new(self.window.solar_transmittance),
        )?;
        check(
            "window solar absorptance",
            UnitInterval::new(self.window.solar_absorptance),
        )?;
        check(
            "window solar reflectance",
            UnitInterval::new(self.window.solar_reflectance),
        )?;
        check(
            "solar incidence factor",
            UnitInterval::new(self.solar_incidence_factor),
        )?;
        if let CapsuleColor::Custom {
            solar_absorptivity,
            ir_emissivity,
        } = self.capsule_color
        {
            check("custom solar absorptivity", UnitInterval::new(solar_absorptivity))?;
            check("custom IR emissivity", UnitInterval::new(ir_emissivity))?;
        }

        check(
            "interior convection coefficient",
            NonNegative::new(self.interior_convection),
        )?;
        check(
            "metabolic heat per person",
            NonNegative::new(self.metabolic_heat_per_person),
        )?;

        let profile = &self.flight_profile;
        check("ascent rate", StrictlyPositive::new(profile.ascent_rate))?;
        check("descent rate", StrictlyPositive::new(profile.descent_rate))?;
        check("time step", StrictlyPositive::new(profile.time_step))?;
        check("float duration", NonNegative::new(profile.float_duration))?;

        if profile.float_altitude <= profile.ground_altitude {
            return Err(ConfigError::FloatNotAboveGround {
                float_altitude: profile.float_altitude,
                ground_altitude: profile.ground_altitude,
            });
        }

        if self.shell_thickness + self.insulation.thickness >= self.capsule_radius {
            return Err(ConfigError::LayersExceedRadius {
                capsule_radius: self.capsule_radius,
                shell_thickness: self.shell_thickness,
                insulation_thickness: self.insulation.thickness,
            });
        }

        Ok(())
    }

    /// Total internal generation: occupants, electronics, and auxiliary heat.
    #[must_use]
    pub fn internal_generation(&self) -> Power {
        f64::from(self.occupants) * self.metabolic_heat_per_person
            + self.electronics.total_power()
            + self.aux_heating_power
    }

    /// Standard daytime flight: white aluminum capsule, two hours at 27 km.
    #[must_use]
    pub fn standard_day() -> Self {
        Self::default()
    }

    /// Night flight cold soak: no sun, black finish, thicker insulation,
    /// four hours at float.
    #[must_use]
    pub fn night_cold_soak() -> Self {
        let mut config = Self::default();
        config.sun_on = false;
        config.capsule_color = CapsuleColor::Black;
        config.insulation.thickness = Length::new::<millimeter>(30.0);
        config.flight_profile.float_duration = Time::new::<second>(14_400.0);
        config
    }

    /// Hot day worst case: high sun angle on a black thin polyethylene
    /// shell with an extra internal heat load.
    #[must_use]
    pub fn hot_day() -> Self {
        let mut config = Self::default();
        config.solar_incidence_factor = 0.6;
        config.capsule_color = CapsuleColor::Black;
        config.shell_material = ShellMaterial::Polyethylene;
        config.shell_thickness = Length::new::<millimeter>(1.0);
        config.insulation.thickness = Length::new::<millimeter>(15.0);
        config.flight_profile.float_altitude = Length::new::<meter>(25_000.0);
        config.flight_profile.float_duration = Time::new::<second>(3_600.0);
        config.aux_heating_power = Power::new::<watt>(500.0);
        config
    }

    /// Extended six-hour flight at 30 km in a carbon fiber capsule.
    #[must_use]
    pub fn extended_flight() -> Self {
        let mut config = Self::default();
        config.solar_incidence_factor = 0.25;
        config.shell_material = ShellMaterial::CarbonFiber;
        config.shell_thickness = Length::new::<millimeter>(3.0);
        config.insulation.thickness = Length::new::<millimeter>(25.0);
        config.flight_profile.float_altitude = Length::new::<meter>(30_000.0);
        config.flight_profile.float_duration = Time::new::<second>(21_600.0);
        config.flight_profile.ascent_rate = Velocity::new::<meter_per_second>(4.0);
        config.flight_profile.descent_rate = Velocity::new::<meter_per_second>(5.0);
        config
    }
}
