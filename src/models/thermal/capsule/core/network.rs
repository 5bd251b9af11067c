//! The six-node thermal network: node identities, temperature state, and
//! per-node thermal masses.

use std::ops::Index;

use uom::si::{
    f64::{HeatCapacity, Mass, SpecificHeatCapacity, ThermodynamicTemperature},
    heat_capacity::joule_per_kelvin,
    mass::kilogram,
    specific_heat_capacity::joule_per_kilogram_kelvin,
};

use crate::support::atmosphere::standard_atmosphere;
use crate::support::units::SpecificGasConstant;

use super::config::ThermalConfig;
use super::geometry::CapsuleGeometry;
use super::materials::shell_properties;

/// Specific heat of air at constant pressure, J/(kg·K).
const CP_AIR: f64 = 1005.0;

/// Estimated interior solids: seats, floor, equipment.
const INTERIOR_SOLIDS_KG: f64 = 200.0;

/// Average specific heat of the interior solids (aluminum/composites).
const INTERIOR_SOLIDS_CP: f64 = 900.0;

/// Minimum per-node thermal mass, J/K.
///
/// Bounds the stiffness of the explicit integrator; a node lighter than this
/// would force an impractically small time step.
const MIN_NODE_HEAT_CAPACITY: f64 = 1000.0;

/// One of the six lumped nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermalNode {
    ShellOuter,
    ShellInner,
    InsulationInner,
    Window,
    InteriorAir,
    InteriorMass,
}

impl ThermalNode {
    /// Number of nodes in the network.
    pub const COUNT: usize = 6;

    /// All nodes in storage order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::ShellOuter,
        Self::ShellInner,
        Self::InsulationInner,
        Self::Window,
        Self::InteriorAir,
        Self::InteriorMass,
    ];

    /// Storage index of this node.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::ShellOuter => 0,
            Self::ShellInner => 1,
            Self::InsulationInner => 2,
            Self::Window => 3,
            Self::InteriorAir => 4,
            Self::InteriorMass => 5,
        }
    }
}

/// Per-node temperatures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTemperatures([ThermodynamicTemperature; ThermalNode::COUNT]);

impl NodeTemperatures {
    /// All nodes at the same temperature.
    #[must_use]
    pub fn uniform(temperature: ThermodynamicTemperature) -> Self {
        Self([temperature; ThermalNode::COUNT])
    }

    /// Sets one node's temperature.
    pub fn set(&mut self, node: ThermalNode, temperature: ThermodynamicTemperature) {
        self.0[node.index()] = temperature;
    }

    /// Iterates over `(node, temperature)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (ThermalNode, ThermodynamicTemperature)> + '_ {
        ThermalNode::ALL.into_iter().map(move |node| (node, self[node]))
    }
}

impl Index<ThermalNode> for NodeTemperatures {
    type Output = ThermodynamicTemperature;

    fn index(&self, node: ThermalNode) -> &Self::Output {
        &self.0[node.index()]
    }
}

/// Per-node thermal masses, J/K.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeHeatCapacities([HeatCapacity; ThermalNode::COUNT]);

impl Index<ThermalNode> for NodeHeatCapacities {
    type Output = HeatCapacity;

    fn index(&self, node: ThermalNode) -> &Self::Output {
        &self.0[node.index()]
    }
}

fn floored(mass: HeatCapacity) -> HeatCapacity {
    let floor = HeatCapacity::new::<joule_per_kelvin>(MIN_NODE_HEAT_CAPACITY);
    if mass < floor { floor } else { mass }
}

/// Computes the thermal mass of every node from geometry and materials.
///
/// Half the shell mass is apportioned to each shell surface node so the
/// network reproduces the conduction lag through the wall. The cabin air
/// mass comes from the ideal gas law at ground pressure and the initial
/// interior temperature. Every node is floored at 1000 J/K.
#[must_use]
pub fn node_heat_capacities(
    config: &ThermalConfig,
    geometry: &CapsuleGeometry,
) -> NodeHeatCapacities {
    let shell = shell_properties(config.shell_material, config.capsule_color);

    let shell_mass: Mass = shell.density * geometry.shell_volume;
    let shell_surface = 0.5 * shell_mass * shell.specific_heat;

    let insulation_mass: Mass = config.insulation.density * geometry.insulation_volume;
    let insulation = insulation_mass * config.insulation.specific_heat;

    // Two polycarbonate layers; the air gap's capacity is negligible.
    let window_volume = config.window.area() * (2.0 * config.window.layer_thickness);
    let window_mass: Mass = config.window.density * window_volume;
    let window = window_mass * config.window.specific_heat;

    let r_air = SpecificGasConstant::new::<joule_per_kilogram_kelvin>(287.05);
    let ground = standard_atmosphere(config.flight_profile.ground_altitude);
    let air_density = ground.pressure / (r_air * config.initial_interior_temperature);
    let air_mass: Mass = air_density * geometry.interior_volume;
    let air = air_mass * SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(CP_AIR);

    let interior_mass = Mass::new::<kilogram>(INTERIOR_SOLIDS_KG)
        * SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(INTERIOR_SOLIDS_CP);

    NodeHeatCapacities([
        floored(shell_surface),
        floored(shell_surface),
        floored(insulation),
        floored(window),
        floored(air),
        floored(interior_mass),
    ])
}
