//! Flight profile generation.

use uom::si::{
    f64::{Length, ThermodynamicTemperature, Time, Velocity},
    length::meter,
    ratio::ratio,
    thermodynamic_temperature::kelvin,
    time::second,
    velocity::meter_per_second,
};

/// Definition of the flight trajectory: a constant-rate ascent to float
/// altitude, a float phase, and a constant-rate descent back to ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightProfile {
    pub ground_altitude: Length,
    pub ground_temperature: ThermodynamicTemperature,
    pub ascent_rate: Velocity,
    pub float_altitude: Length,
    pub float_duration: Time,
    pub descent_rate: Velocity,
    pub time_step: Time,
}

impl Default for FlightProfile {
    fn default() -> Self {
        Self {
            ground_altitude: Length::new::<meter>(0.0),
            ground_temperature: ThermodynamicTemperature::new::<kelvin>(288.15),
            ascent_rate: Velocity::new::<meter_per_second>(5.0),
            float_altitude: Length::new::<meter>(27_000.0),
            float_duration: Time::new::<second>(7_200.0),
            descent_rate: Velocity::new::<meter_per_second>(6.0),
            time_step: Time::new::<second>(10.0),
        }
    }
}

/// One time/altitude sample, with the vertical speed used for the exterior
/// convection correlation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSample {
    pub time: Time,
    pub altitude: Length,
    pub vertical_speed: Velocity,
}

impl FlightProfile {
    /// Time spent ascending.
    fn ascent_duration(&self) -> Time {
        (self.float_altitude - self.ground_altitude) / self.ascent_rate
    }

    /// Time spent descending.
    fn descent_duration(&self) -> Time {
        (self.float_altitude - self.ground_altitude) / self.descent_rate
    }

    /// Total flight time from launch to touchdown.
    #[must_use]
    pub fn total_duration(&self) -> Time {
        self.ascent_duration() + self.float_duration + self.descent_duration()
    }

    /// Altitude at an instant, from the piecewise closed form.
    #[must_use]
    pub fn altitude_at(&self, time: Time) -> Length {
        let ascent_end = self.ascent_duration();
        let descent_start = ascent_end + self.float_duration;

        if time < ascent_end {
            self.ground_altitude + self.ascent_rate * time
        } else if time < descent_start {
            self.float_altitude
        } else {
            let descended = self.descent_rate * (time - descent_start);
            let altitude = self.float_altitude - descended;
            if altitude < self.ground_altitude {
                self.ground_altitude
            } else {
                altitude
            }
        }
    }

    /// Vertical speed magnitude at an instant: the ascent rate, zero at
    /// float, or the descent rate.
    #[must_use]
    pub fn vertical_speed_at(&self, time: Time) -> Velocity {
        let ascent_end = self.ascent_duration();
        let descent_start = ascent_end + self.float_duration;

        if time < ascent_end {
            self.ascent_rate
        } else if time < descent_start {
            Velocity::new::<meter_per_second>(0.0)
        } else {
            self.descent_rate
        }
    }

    /// Samples the full flight on a uniform, strictly monotone time grid.
    ///
    /// The grid starts at launch, advances by `time_step`, and its last
    /// sample is the first to reach or pass touchdown.
    #[must_use]
    pub fn sample(&self) -> Vec<ProfileSample> {
        let total = self.total_duration();
        let steps = (total / self.time_step).get::<ratio>().ceil().max(0.0) as usize;

        (0..=steps)
            .map(|k| {
                let time = self.time_step * k as f64;
                ProfileSample {
                    time,
                    altitude: self.altitude_at(time),
                    vertical_speed: self.vertical_speed_at(time),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn phases_have_expected_durations() {
        let profile = FlightProfile::default();

        // 27 km at 5 m/s up and 6 m/s down, plus 2 h at float.
        assert_relative_eq!(profile.ascent_duration().get::<second>(), 5400.0);
        assert_relative_eq!(profile.descent_duration().get::<second>(), 4500.0);
        assert_relative_eq!(profile.total_duration().get::<second>(), 17_100.0);
    }

    #[test]
    fn samples_are_strictly_monotone_in_time() {
        let samples = FlightProfile::default().sample();

        assert!(samples.len() > 2);
        for pair in samples.windows(2) {
            assert!(pair[1].time > pair[0].time);
        }
    }

    #[test]
    fn altitude_covers_ascent_float_and_descent() {
        let profile = FlightProfile::default();
        let samples = profile.sample();

        assert_relative_eq!(samples[0].altitude.get::<meter>(), 0.0);

        let peak = samples
            .iter()
            .map(|s| s.altitude.get::<meter>())
            .fold(f64::MIN, f64::max);
        assert_relative_eq!(peak, 27_000.0);

        let last = samples.last().expect("profile is never empty");
        assert!(last.altitude.get::<meter>() < 100.0);
    }

    #[test]
    fn altitude_never_goes_below_ground() {
        let profile = FlightProfile::default();
        let beyond = profile.total_duration() + Time::new::<second>(500.0);
        assert_relative_eq!(profile.altitude_at(beyond).get::<meter>(), 0.0);
    }

    #[test]
    fn vertical_speed_tracks_the_phase() {
        let profile = FlightProfile::default();

        let early = Time::new::<second>(100.0);
        assert_relative_eq!(
            profile.vertical_speed_at(early).get::<meter_per_second>(),
            5.0
        );

        let at_float = Time::new::<second>(6000.0);
        assert_relative_eq!(
            profile.vertical_speed_at(at_float).get::<meter_per_second>(),
            0.0
        );

        let descending = Time::new::<second>(13_000.0);
        assert_relative_eq!(
            profile.vertical_speed_at(descending).get::<meter_per_second>(),
            6.0
        );
    }

    #[test]
    fn zero_float_duration_is_a_spike_profile() {
        let mut profile = FlightProfile::default();
        profile.float_duration = Time::new::<second>(0.0);

        let samples = profile.sample();
        let peak = samples
            .iter()
            .map(|s| s.altitude.get::<meter>())
            .fold(f64::MIN, f64::max);
        assert!(peak > 26_000.0);
    }
}
