//! Derived safety and comfort metrics for a completed simulation.

use uom::si::{
    f64::{ThermodynamicTemperature, Time},
    thermodynamic_temperature::degree_celsius,
    time::second,
};

use super::config::ThermalConfig;
use super::materials::ShellMaterial;
use super::network::ThermalNode;
use super::results::Simulation;

/// Lower edge of the cabin comfort band.
const COMFORT_MIN_C: f64 = 18.0;

/// Upper edge of the cabin comfort band.
const COMFORT_MAX_C: f64 = 26.0;

/// Polycarbonate softening point.
const WINDOW_LIMIT_C: f64 = 150.0;

/// Polyimide foam temperature rating.
const INSULATION_LIMIT_C: f64 = 200.0;

/// HDPE melting point.
const POLYETHYLENE_LIMIT_C: f64 = 130.0;

/// Partition of flight time by cabin air comfort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComfortSummary {
    pub comfortable: Time,
    pub too_cold: Time,
    pub too_hot: Time,
}

impl ComfortSummary {
    /// Total flight time covered by the partition.
    #[must_use]
    pub fn total(&self) -> Time {
        self.comfortable + self.too_cold + self.too_hot
    }
}

/// Partitions flight time by whether the cabin air sits in the 18–26 °C
/// comfort band.
///
/// Each inter-sample interval is attributed to the state at its start.
#[must_use]
pub fn comfort_summary(simulation: &Simulation) -> ComfortSummary {
    let cold_edge = ThermodynamicTemperature::new::<degree_celsius>(COMFORT_MIN_C);
    let hot_edge = ThermodynamicTemperature::new::<degree_celsius>(COMFORT_MAX_C);

    let zero = Time::new::<second>(0.0);
    let mut summary = ComfortSummary {
        comfortable: zero,
        too_cold: zero,
        too_hot: zero,
    };

    let times = simulation.times();
    let temps = simulation.temperatures();
    for i in 0..times.len().saturating_sub(1) {
        let dt = times[i + 1] - times[i];
        let air = temps[i][ThermalNode::InteriorAir];
        if air < cold_edge {
            summary.too_cold += dt;
        } else if air > hot_edge {
            summary.too_hot += dt;
        } else {
            summary.comfortable += dt;
        }
    }

    summary
}

/// One material's temperature limit against the peak it saw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub limit: ThermodynamicTemperature,
    pub peak: ThermodynamicTemperature,
}

impl Margin {
    /// Whether the peak exceeded the limit.
    #[must_use]
    pub fn exceeded(&self) -> bool {
        self.peak > self.limit
    }
}

/// Material temperature margins over the flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialMargins {
    /// Window peak against the polycarbonate softening point.
    pub window: Margin,
    /// Insulation peak against the polyimide foam rating.
    pub insulation: Margin,
    /// Shell peak against the polyethylene melting point; only present for
    /// polyethylene shells.
    pub shell: Option<Margin>,
}

/// Checks material temperature limits against the simulated peaks.
#[must_use]
pub fn material_margins(simulation: &Simulation, config: &ThermalConfig) -> MaterialMargins {
    let peak = |node| {
        simulation
            .extremes(node)
            .map_or(ThermodynamicTemperature::new::<degree_celsius>(0.0), |e| {
                e.max
            })
    };

    let shell = (config.shell_material == ShellMaterial::Polyethylene).then(|| Margin {
        limit: ThermodynamicTemperature::new::<degree_celsius>(POLYETHYLENE_LIMIT_C),
        peak: peak(ThermalNode::ShellOuter),
    });

    MaterialMargins {
        window: Margin {
            limit: ThermodynamicTemperature::new::<degree_celsius>(WINDOW_LIMIT_C),
            peak: peak(ThermalNode::Window),
        },
        insulation: Margin {
            limit: ThermodynamicTemperature::new::<degree_celsius>(INSULATION_LIMIT_C),
            peak: peak(ThermalNode::InsulationInner),
        },
        shell,
    }
}
