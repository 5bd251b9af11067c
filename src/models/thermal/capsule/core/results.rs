//! Simulation time history and diagnostics.

use uom::si::f64::{Length, Power, ThermodynamicTemperature, Time};

use super::network::{NodeTemperatures, ThermalNode};

/// Heat flow components at one sample, for analysis and reporting.
///
/// Signs follow the exterior convention of the balance: `exterior_convection`
/// is positive into the capsule, `exterior_radiation` positive out of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxBreakdown {
    pub solar_shell: Power,
    pub solar_window: Power,
    pub exterior_convection: Power,
    pub exterior_radiation: Power,
    pub internal_generation: Power,
    pub interior_convection: Power,
}

/// Minimum and maximum of one node's trajectory, with the times they occur.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeExtremes {
    pub min: ThermodynamicTemperature,
    pub min_time: Time,
    pub max: ThermodynamicTemperature,
    pub max_time: Time,
}

/// Full time history of a capsule simulation.
///
/// All series share one index: entry `i` holds the state at `times()[i]`.
/// The clamp counters are the integrator's diagnostics: on a benign
/// configuration both stay zero, and a nonzero count means the stability
/// guards actively shaped the trajectory.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(super) times: Vec<Time>,
    pub(super) altitudes: Vec<Length>,
    pub(super) temperatures: Vec<NodeTemperatures>,
    pub(super) fluxes: Vec<FluxBreakdown>,
    pub(super) delta_clamp_steps: usize,
    pub(super) range_clamp_steps: usize,
}

impl Simulation {
    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the simulation holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sample times.
    #[must_use]
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Altitude at each sample.
    #[must_use]
    pub fn altitudes(&self) -> &[Length] {
        &self.altitudes
    }

    /// Node temperatures at each sample.
    #[must_use]
    pub fn temperatures(&self) -> &[NodeTemperatures] {
        &self.temperatures
    }

    /// Heat flux breakdown at each sample.
    #[must_use]
    pub fn fluxes(&self) -> &[FluxBreakdown] {
        &self.fluxes
    }

    /// Steps on which the per-step temperature delta clamp fired.
    #[must_use]
    pub fn delta_clamp_steps(&self) -> usize {
        self.delta_clamp_steps
    }

    /// Steps on which the absolute temperature range clamp fired.
    #[must_use]
    pub fn range_clamp_steps(&self) -> usize {
        self.range_clamp_steps
    }

    /// One node's temperature trajectory.
    pub fn node_series(
        &self,
        node: ThermalNode,
    ) -> impl Iterator<Item = ThermodynamicTemperature> + '_ {
        self.temperatures.iter().map(move |t| t[node])
    }

    /// Minimum and maximum of one node's trajectory.
    #[must_use]
    pub fn extremes(&self, node: ThermalNode) -> Option<NodeExtremes> {
        let mut samples = self.times.iter().zip(self.node_series(node));
        let (&first_time, first_temp) = samples.next()?;

        let mut extremes = NodeExtremes {
            min: first_temp,
            min_time: first_time,
            max: first_temp,
            max_time: first_time,
        };
        for (&time, temp) in samples {
            if temp < extremes.min {
                extremes.min = temp;
                extremes.min_time = time;
            }
            if temp > extremes.max {
                extremes.max = temp;
                extremes.max_time = time;
            }
        }
        Some(extremes)
    }
}
