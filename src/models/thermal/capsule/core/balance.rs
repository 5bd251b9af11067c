//! Heat transfer relations and the per-step node balance.

use uom::si::{
    area::square_meter,
    dynamic_viscosity::pascal_second,
    f64::{
        Area, DynamicViscosity, Length, MassDensity, Power, TemperatureInterval,
        ThermalConductance, ThermalConductivity, ThermodynamicTemperature, Velocity,
    },
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    power::watt,
    ratio::ratio,
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::support::atmosphere::standard_atmosphere;
use crate::support::units::{
    HeatTransferCoefficient, TemperatureDifference, heat_transfer_coefficient,
};

use super::config::ThermalConfig;
use super::geometry::CapsuleGeometry;
use super::materials::{MaterialProps, shell_properties};
use super::network::{NodeTemperatures, ThermalNode};
use super::results::FluxBreakdown;

/// Stefan-Boltzmann constant, W/(m²·K⁴).
const SIGMA_SB: f64 = 5.670_374_419e-8;

/// Solar constant at Earth orbit, W/m².
const SOLAR_CONSTANT: f64 = 1360.0;

/// Prandtl number of air.
const PRANDTL_AIR: f64 = 0.71;

/// Deep space radiative temperature, K.
const SPACE_TEMPERATURE: f64 = 3.0;

/// Exterior view split: half the sphere sees space, half sees Earth.
const VIEW_SPACE: f64 = 0.5;
const VIEW_EARTH: f64 = 0.5;

/// Emissivity of the foam insulation facing the cabin.
const FOAM_EMISSIVITY: f64 = 0.8;

/// Residual wind on top of the vertical rate, m/s.
const RESIDUAL_WIND: f64 = 5.0;

/// Effective convective exchange area between cabin air and interior mass, m².
const MASS_EXCHANGE_AREA: f64 = 5.0;

fn zero_power() -> Power {
    Power::new::<watt>(0.0)
}

/// Exterior convective coefficient for a sphere moving through the ISA
/// atmosphere.
///
/// Sutherland's law gives the air viscosity, the forced-convection sphere
/// correlation `Nu = 2 + 0.6·Re^½·Pr^⅓` gives the Nusselt number (with
/// `Nu = 2` as the pure-conduction limit for `Re ≤ 1`), and the result is
/// floored at 0.1 W/(m²·K) so high-altitude near-vacuum never produces a
/// zero-convection singularity.
pub fn exterior_convection_coefficient(
    altitude: Length,
    relative_speed: Velocity,
    diameter: Length,
) -> HeatTransferCoefficient {
    let floor = heat_transfer_coefficient(0.1);
    let ambient = standard_atmosphere(altitude);

    // Negligible convection in near-vacuum.
    if ambient.density < MassDensity::new::<kilogram_per_cubic_meter>(1e-6) {
        return floor;
    }

    let t_ref = ThermodynamicTemperature::new::<kelvin>(273.15);

    // Sutherland's law for the dynamic viscosity of air.
    let sutherland = TemperatureInterval::new::<delta_kelvin>(110.4);
    let viscosity = DynamicViscosity::new::<pascal_second>(1.716e-5)
        * (ambient.temperature / t_ref).get::<ratio>().powf(1.5)
        * ((t_ref + sutherland) / (ambient.temperature + sutherland)).get::<ratio>();

    let reynolds = (ambient.density * relative_speed * diameter / viscosity).get::<ratio>();

    let air_conductivity = ThermalConductivity::new::<watt_per_meter_kelvin>(0.024)
        * (ambient.temperature / t_ref).get::<ratio>().powf(0.8);

    let nusselt = if reynolds > 1.0 {
        2.0 + 0.6 * reynolds.sqrt() * PRANDTL_AIR.powf(1.0 / 3.0)
    } else {
        2.0
    };

    let coefficient = nusselt * air_conductivity / diameter;
    if coefficient < floor { floor } else { coefficient }
}

/// Effective radiative temperature of Earth as seen from altitude.
///
/// Blends linearly from the ground temperature to the cloud-top temperature
/// over the first 15 km and stays at cloud-top above.
pub fn effective_earth_temperature(altitude: Length) -> ThermodynamicTemperature {
    const GROUND: f64 = 288.15;
    const CLOUD_TOP: f64 = 220.0;
    const TRANSITION: f64 = 15_000.0;

    let h = altitude.get::<meter>();
    let temperature = if h < TRANSITION {
        let factor = h / TRANSITION;
        GROUND * (1.0 - factor) + CLOUD_TOP * factor
    } else {
        CLOUD_TOP
    };

    ThermodynamicTemperature::new::<kelvin>(temperature)
}

/// Net radiative heat loss from a surface to an environment.
///
/// Both temperatures are clamped to [1, 1500] K before the fourth power so a
/// transiently wild node cannot overflow the balance.
fn radiative_loss(
    surface: ThermodynamicTemperature,
    environment: ThermodynamicTemperature,
    emissivity: f64,
    area: Area,
    view_factor: f64,
) -> Power {
    let t_surface = surface.get::<kelvin>().clamp(1.0, 1500.0);
    let t_environment = environment.get::<kelvin>().clamp(1.0, 1500.0);

    Power::new::<watt>(
        view_factor
            * emissivity
            * SIGMA_SB
            * area.get::<square_meter>()
            * (t_surface.powi(4) - t_environment.powi(4)),
    )
}

/// Solar power absorbed by a surface.
fn solar_gain(incidence_factor: f64, absorbed_fraction: f64, area: Area) -> Power {
    Power::new::<watt>(
        incidence_factor * SOLAR_CONSTANT * absorbed_fraction * area.get::<square_meter>(),
    )
}

/// Conductance of a planar layer, `k·A / L`.
fn plane_conductance(
    thickness: Length,
    area: Area,
    conductivity: ThermalConductivity,
) -> ThermalConductance {
    conductivity * area / thickness
}

/// Step-invariant pieces of the node balance, derived once per solve.
pub(crate) struct HeatBalance {
    sun_on: bool,
    incidence_factor: f64,
    shell: MaterialProps,
    geometry: CapsuleGeometry,
    window_emissivity: f64,
    window_absorptance: f64,
    shell_conductance: ThermalConductance,
    insulation_conductance: ThermalConductance,
    insulation_to_air: ThermalConductance,
    window_to_air: ThermalConductance,
    air_to_mass: ThermalConductance,
    internal_generation: Power,
    diameter: Length,
}

impl HeatBalance {
    pub(crate) fn new(config: &ThermalConfig) -> Self {
        let geometry = CapsuleGeometry::new(
            config.capsule_radius,
            config.shell_thickness,
            config.insulation.thickness,
            &config.window,
        );
        let shell = shell_properties(config.shell_material, config.capsule_color);

        Self {
            sun_on: config.sun_on,
            incidence_factor: config.solar_incidence_factor,
            shell,
            window_emissivity: config.window.emissivity,
            window_absorptance: config.window.solar_absorptance,
            shell_conductance: plane_conductance(
                config.shell_thickness,
                geometry.shell_inner_area,
                shell.thermal_conductivity,
            ),
            insulation_conductance: plane_conductance(
                config.insulation.thickness,
                geometry.insulation_inner_area,
                config.insulation.thermal_conductivity,
            ),
            insulation_to_air: config.interior_convection * geometry.insulation_inner_area,
            window_to_air: config.interior_convection * geometry.window_area,
            air_to_mass: config.interior_convection
                * Area::new::<square_meter>(MASS_EXCHANGE_AREA),
            internal_generation: config.internal_generation(),
            diameter: 2.0 * config.capsule_radius,
            geometry,
        }
    }

    pub(crate) fn geometry(&self) -> &CapsuleGeometry {
        &self.geometry
    }

    /// Net heat flow into every node, plus the reporting breakdown.
    pub(crate) fn node_heat_flows(
        &self,
        altitude: Length,
        vertical_speed: Velocity,
        temps: &NodeTemperatures,
    ) -> ([Power; ThermalNode::COUNT], FluxBreakdown) {
        let ambient = standard_atmosphere(altitude);

        let wind = Velocity::new::<meter_per_second>(RESIDUAL_WIND);
        let relative_speed = (vertical_speed * vertical_speed + wind * wind).sqrt();
        let h_ext = exterior_convection_coefficient(altitude, relative_speed, self.diameter);

        let t_shell_out = temps[ThermalNode::ShellOuter];
        let t_shell_in = temps[ThermalNode::ShellInner];
        let t_insulation = temps[ThermalNode::InsulationInner];
        let t_window = temps[ThermalNode::Window];
        let t_air = temps[ThermalNode::InteriorAir];
        let t_mass = temps[ThermalNode::InteriorMass];

        let t_space = ThermodynamicTemperature::new::<kelvin>(SPACE_TEMPERATURE);
        let t_earth = effective_earth_temperature(altitude);

        // Shell outer surface.
        let net_area = self.geometry.shell_outer_area_net;
        let solar_shell = if self.sun_on {
            solar_gain(self.incidence_factor, self.shell.solar_absorptivity, net_area)
        } else {
            zero_power()
        };
        let conv_ext_shell = h_ext * net_area * ambient.temperature.minus(t_shell_out);
        let rad_ext_shell =
            radiative_loss(t_shell_out, t_space, self.shell.emissivity, net_area, VIEW_SPACE)
                + radiative_loss(t_shell_out, t_earth, self.shell.emissivity, net_area, VIEW_EARTH);
        let cond_shell = self.shell_conductance * t_shell_out.minus(t_shell_in);

        // Window.
        let window_area = self.geometry.window_area;
        let solar_window = if self.sun_on {
            solar_gain(self.incidence_factor, self.window_absorptance, window_area)
        } else {
            zero_power()
        };
        let conv_ext_window = h_ext * window_area * ambient.temperature.minus(t_window);
        let rad_ext_window =
            radiative_loss(t_window, t_space, self.window_emissivity, window_area, VIEW_SPACE)
                + radiative_loss(t_window, t_earth, self.window_emissivity, window_area, VIEW_EARTH);
        let conv_window_air = self.window_to_air * t_window.minus(t_air);

        // Interior couplings.
        let cond_insulation = self.insulation_conductance * t_shell_in.minus(t_insulation);
        let conv_insulation_air = self.insulation_to_air * t_insulation.minus(t_air);
        let rad_insulation_air = radiative_loss(
            t_insulation,
            t_air,
            FOAM_EMISSIVITY,
            self.geometry.insulation_inner_area,
            0.5,
        );
        let conv_air_mass = self.air_to_mass * t_air.minus(t_mass);

        let mut flows = [zero_power(); ThermalNode::COUNT];
        flows[ThermalNode::ShellOuter.index()] =
            solar_shell + conv_ext_shell - rad_ext_shell - cond_shell;
        flows[ThermalNode::ShellInner.index()] = cond_shell - cond_insulation;
        flows[ThermalNode::InsulationInner.index()] =
            cond_insulation - conv_insulation_air - rad_insulation_air;
        flows[ThermalNode::Window.index()] =
            solar_window + conv_ext_window - rad_ext_window - conv_window_air;
        flows[ThermalNode::InteriorAir.index()] = conv_insulation_air
            + rad_insulation_air
            + conv_window_air
            - conv_air_mass
            + self.internal_generation;
        flows[ThermalNode::InteriorMass.index()] = conv_air_mass;

        let breakdown = FluxBreakdown {
            solar_shell,
            solar_window,
            exterior_convection: conv_ext_shell + conv_ext_window,
            exterior_radiation: rad_ext_shell + rad_ext_window,
            internal_generation: self.internal_generation,
            interior_convection: conv_insulation_air + conv_window_air - conv_air_mass,
        };

        (flows, breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn meters(value: f64) -> Length {
        Length::new::<meter>(value)
    }

    fn speed(value: f64) -> Velocity {
        Velocity::new::<meter_per_second>(value)
    }

    #[test]
    fn convection_weakens_with_altitude() {
        let diameter = meters(2.4);
        let v = speed(7.0);

        let sea_level = exterior_convection_coefficient(meters(0.0), v, diameter);
        let stratosphere = exterior_convection_coefficient(meters(27_000.0), v, diameter);

        assert!(sea_level > stratosphere);
        assert!(stratosphere >= heat_transfer_coefficient(0.1));
    }

    #[test]
    fn convection_floors_in_near_vacuum() {
        let h = exterior_convection_coefficient(meters(85_000.0), speed(1.0), meters(2.4));
        assert!(h >= heat_transfer_coefficient(0.1));
    }

    #[test]
    fn earth_temperature_blends_to_cloud_top() {
        assert_relative_eq!(
            effective_earth_temperature(meters(0.0)).get::<kelvin>(),
            288.15
        );
        assert_relative_eq!(
            effective_earth_temperature(meters(7_500.0)).get::<kelvin>(),
            (288.15 + 220.0) / 2.0
        );
        assert_relative_eq!(
            effective_earth_temperature(meters(27_000.0)).get::<kelvin>(),
            220.0
        );
    }

    #[test]
    fn radiation_vanishes_at_equilibrium() {
        let t = ThermodynamicTemperature::new::<kelvin>(280.0);
        let q = radiative_loss(t, t, 0.9, Area::new::<square_meter>(10.0), 0.5);
        assert_relative_eq!(q.get::<watt>(), 0.0);
    }

    #[test]
    fn radiation_to_space_is_a_loss() {
        let surface = ThermodynamicTemperature::new::<kelvin>(280.0);
        let space = ThermodynamicTemperature::new::<kelvin>(3.0);
        let q = radiative_loss(surface, space, 0.9, Area::new::<square_meter>(10.0), 0.5);
        assert!(q.get::<watt>() > 0.0);
    }

    #[test]
    fn uniform_cabin_leaves_only_generation_on_the_air_node() {
        let mut config = ThermalConfig::default();
        config.sun_on = false;
        let balance = HeatBalance::new(&config);

        let temps = NodeTemperatures::uniform(ThermodynamicTemperature::new::<kelvin>(288.15));
        let (flows, breakdown) = balance.node_heat_flows(meters(0.0), speed(0.0), &temps);

        // All couplings see zero temperature difference.
        assert_relative_eq!(
            flows[ThermalNode::InteriorAir.index()].get::<watt>(),
            config.internal_generation().get::<watt>()
        );
        assert_relative_eq!(flows[ThermalNode::InteriorMass.index()].get::<watt>(), 0.0);
        assert_relative_eq!(breakdown.solar_shell.get::<watt>(), 0.0);
    }

    #[test]
    fn interior_couplings_conserve_energy() {
        let config = ThermalConfig::default();
        let balance = HeatBalance::new(&config);

        let mut temps = NodeTemperatures::uniform(ThermodynamicTemperature::new::<kelvin>(290.0));
        temps.set(ThermalNode::ShellOuter, ThermodynamicTemperature::new::<kelvin>(250.0));
        temps.set(ThermalNode::Window, ThermodynamicTemperature::new::<kelvin>(260.0));
        temps.set(ThermalNode::InteriorMass, ThermodynamicTemperature::new::<kelvin>(285.0));

        let (flows, breakdown) = balance.node_heat_flows(meters(20_000.0), speed(5.0), &temps);

        // Every interior coupling cancels pairwise, so the network total must
        // equal the boundary terms.
        let total: f64 = flows.iter().map(|q| q.get::<watt>()).sum();
        let boundary = breakdown.solar_shell + breakdown.solar_window + breakdown.exterior_convection
            - breakdown.exterior_radiation
            + breakdown.internal_generation;

        assert_relative_eq!(total, boundary.get::<watt>(), epsilon = 1e-6);
    }
}
