//! Forward Euler integration of the node network.

use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use super::balance::HeatBalance;
use super::config::{ConfigError, ThermalConfig};
use super::network::{NodeTemperatures, ThermalNode, node_heat_capacities};
use super::results::Simulation;

/// Hard physical sanity bounds on node temperatures, K.
const MIN_TEMPERATURE: f64 = 150.0;
const MAX_TEMPERATURE: f64 = 450.0;

/// Stability guard: maximum temperature change per step, K.
///
/// Not physical; it bounds how far a single explicit step can run away.
const MAX_STEP_DELTA: f64 = 5.0;

/// Validates the configuration and integrates the network over the full
/// flight profile.
///
/// The march is forward Euler with a one-step lag: each step's derivative is
/// evaluated from the previous sample's state. Each node's per-step change
/// is clamped to [`MAX_STEP_DELTA`] and its temperature to
/// [`MIN_TEMPERATURE`]..[`MAX_TEMPERATURE`]; the steps on which either clamp
/// fired are counted into the [`Simulation`] diagnostics.
///
/// # Errors
///
/// Returns [`ConfigError`] if the configuration fails validation.
pub(crate) fn solve(config: &ThermalConfig) -> Result<Simulation, ConfigError> {
    config.validate()?;

    let balance = HeatBalance::new(config);
    let capacities = node_heat_capacities(config, balance.geometry());
    let samples = config.flight_profile.sample();

    let mut temps = NodeTemperatures::uniform(config.initial_interior_temperature);
    temps.set(ThermalNode::ShellOuter, config.initial_shell_temperature);
    temps.set(ThermalNode::Window, config.initial_window_temperature);

    let mut simulation = Simulation {
        times: Vec::with_capacity(samples.len()),
        altitudes: Vec::with_capacity(samples.len()),
        temperatures: Vec::with_capacity(samples.len()),
        fluxes: Vec::with_capacity(samples.len()),
        delta_clamp_steps: 0,
        range_clamp_steps: 0,
    };

    let max_delta = TemperatureInterval::new::<delta_kelvin>(MAX_STEP_DELTA);
    let coldest = ThermodynamicTemperature::new::<kelvin>(MIN_TEMPERATURE);
    let hottest = ThermodynamicTemperature::new::<kelvin>(MAX_TEMPERATURE);

    for (i, sample) in samples.iter().enumerate() {
        let (flows, breakdown) =
            balance.node_heat_flows(sample.altitude, sample.vertical_speed, &temps);

        simulation.times.push(sample.time);
        simulation.altitudes.push(sample.altitude);
        simulation.temperatures.push(temps);
        simulation.fluxes.push(breakdown);

        let Some(next) = samples.get(i + 1) else {
            break;
        };
        let dt = next.time - sample.time;

        let mut delta_clamped = false;
        let mut range_clamped = false;
        let mut updated = temps;

        for node in ThermalNode::ALL {
            let mut delta: TemperatureInterval = flows[node.index()] * dt / capacities[node];
            if delta > max_delta {
                delta = max_delta;
                delta_clamped = true;
            } else if delta < -max_delta {
                delta = -max_delta;
                delta_clamped = true;
            }

            let mut temperature = temps[node] + delta;
            if temperature < coldest {
                temperature = coldest;
                range_clamped = true;
            } else if temperature > hottest {
                temperature = hottest;
                range_clamped = true;
            }
            updated.set(node, temperature);
        }

        if delta_clamped {
            simulation.delta_clamp_steps += 1;
        }
        if range_clamped {
            simulation.range_clamp_steps += 1;
        }
        temps = updated;
    }

    Ok(simulation)
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{Length, Power, Time},
        length::meter,
        power::watt,
        time::second,
    };

    use crate::models::thermal::capsule::core::materials::{CapsuleColor, ShellMaterial};

    fn short_flight() -> ThermalConfig {
        let mut config = ThermalConfig::default();
        config.flight_profile.float_duration = Time::new::<second>(1_800.0);
        config.flight_profile.time_step = Time::new::<second>(20.0);
        config
    }

    fn assert_sane(simulation: &Simulation) {
        for temps in simulation.temperatures() {
            for (node, temperature) in temps.iter() {
                let t = temperature.get::<kelvin>();
                assert!(t.is_finite(), "{node:?} produced a non-finite temperature");
                assert!(
                    (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&t),
                    "{node:?} left the clamp range: {t}"
                );
            }
        }
    }

    #[test]
    fn benign_flight_never_clamps() {
        let simulation = solve(&short_flight()).expect("config is valid");

        assert_sane(&simulation);
        assert_eq!(simulation.delta_clamp_steps(), 0);
        assert_eq!(simulation.range_clamp_steps(), 0);
    }

    #[test]
    fn pathological_time_step_trips_the_delta_clamp() {
        let mut config = short_flight();
        config.flight_profile.time_step = Time::new::<second>(2_000.0);

        let simulation = solve(&config).expect("config is valid");

        assert_sane(&simulation);
        assert!(simulation.delta_clamp_steps() > 0);
    }

    #[test]
    fn extreme_configurations_stay_bounded_and_finite() {
        let mut scenarios = vec![
            ThermalConfig::night_cold_soak(),
            ThermalConfig::hot_day(),
            ThermalConfig::extended_flight(),
        ];

        // Black absorber with no emission, heavy cooling, very high float.
        let mut worst = ThermalConfig::default();
        worst.capsule_color = CapsuleColor::Custom {
            solar_absorptivity: 1.0,
            ir_emissivity: 0.0,
        };
        worst.shell_material = ShellMaterial::Polyethylene;
        worst.aux_heating_power = Power::new::<watt>(-5_000.0);
        worst.flight_profile.float_altitude = Length::new::<meter>(45_000.0);
        worst.flight_profile.float_duration = Time::new::<second>(3_600.0);
        worst.flight_profile.time_step = Time::new::<second>(60.0);
        scenarios.push(worst);

        for mut config in scenarios {
            // Keep the fuzz sweep fast without changing the physics.
            if config.flight_profile.time_step < Time::new::<second>(60.0) {
                config.flight_profile.time_step = Time::new::<second>(60.0);
            }
            let simulation = solve(&config).expect("scenario configs are valid");
            assert_sane(&simulation);
        }
    }

    #[test]
    fn interior_stays_far_above_ambient_at_float() {
        let simulation = solve(&short_flight()).expect("config is valid");

        let extremes = simulation
            .extremes(ThermalNode::InteriorAir)
            .expect("simulation is not empty");

        // Stratospheric ambient is ~220 K; an occupied, insulated cabin
        // must hold well above it.
        assert!(extremes.min.get::<kelvin>() > 240.0);
        assert!(extremes.max.get::<kelvin>() < 330.0);
    }

    #[test]
    fn history_series_share_one_length() {
        let simulation = solve(&short_flight()).expect("config is valid");

        let n = simulation.len();
        assert!(n > 10);
        assert_eq!(simulation.altitudes().len(), n);
        assert_eq!(simulation.temperatures().len(), n);
        assert_eq!(simulation.fluxes().len(), n);
    }
}
