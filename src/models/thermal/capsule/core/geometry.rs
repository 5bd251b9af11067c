//! Capsule geometry derived from the configured radii and thicknesses.

use std::f64::consts::PI;

use uom::si::f64::{Area, Length, Volume};

use super::config::WindowProps;

/// Geometric properties of the spherical capsule.
///
/// Inner surfaces are approximated as spheres at their own radii; the window
/// cutout is subtracted only from the net outer shell area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleGeometry {
    pub outer_radius: Length,
    pub shell_inner_radius: Length,
    pub insulation_inner_radius: Length,

    pub shell_outer_area: Area,
    pub window_area: Area,
    /// Outer shell area minus the window cutout.
    pub shell_outer_area_net: Area,
    pub shell_inner_area: Area,
    pub insulation_inner_area: Area,

    pub shell_volume: Volume,
    pub insulation_volume: Volume,
    pub interior_volume: Volume,
}

fn sphere_area(radius: Length) -> Area {
    4.0 * PI * radius * radius
}

fn sphere_volume(radius: Length) -> Volume {
    (4.0 / 3.0) * PI * radius * radius * radius
}

impl CapsuleGeometry {
    /// Computes the geometry for the given layer stack.
    #[must_use]
    pub fn new(
        outer_radius: Length,
        shell_thickness: Length,
        insulation_thickness: Length,
        window: &WindowProps,
    ) -> Self {
        let shell_inner_radius = outer_radius - shell_thickness;
        let insulation_inner_radius = shell_inner_radius - insulation_thickness;

        let shell_outer_area = sphere_area(outer_radius);
        let window_area = window.area();

        Self {
            outer_radius,
            shell_inner_radius,
            insulation_inner_radius,
            shell_outer_area,
            window_area,
            shell_outer_area_net: shell_outer_area - window_area,
            shell_inner_area: sphere_area(shell_inner_radius),
            insulation_inner_area: sphere_area(insulation_inner_radius),
            shell_volume: sphere_volume(outer_radius) - sphere_volume(shell_inner_radius),
            insulation_volume: sphere_volume(shell_inner_radius)
                - sphere_volume(insulation_inner_radius),
            interior_volume: sphere_volume(insulation_inner_radius),
        }
    }
}
