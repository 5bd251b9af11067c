//! Stratospheric capsule thermal network model.
//!
//! Models a spherical crewed capsule as six lumped thermal nodes (shell
//! outer surface, shell inner surface, insulation inner surface, window,
//! interior air, and interior mass) coupled by conduction, convection, and
//! radiation, with solar loading on the exterior and metabolic/electronics
//! heat generation inside. Ambient conditions come from the ISA atmosphere
//! at the altitude given by an ascent/float/descent flight profile.
//!
//! The network is integrated by forward Euler with the derivative evaluated
//! from the previous step's state. The integrator is deliberately crude and
//! carries two guards: the per-step temperature change is clamped to a
//! stability bound and absolute temperatures are clamped to a physical
//! sanity range. Both guards mask instability rather than report it, so the
//! solver counts the steps on which each clamp fired and ships the counts in
//! the [`Simulation`] diagnostics.

pub(crate) mod core;

pub use self::core::{
    CapsuleColor, CapsuleGeometry, ComfortSummary, ConfigError, ElectronicsLoad,
    ElectronicsPreset, FlightProfile, FluxBreakdown, InsulationProps, Margin, MaterialMargins,
    MaterialProps, NodeExtremes, NodeTemperatures, ProfileSample, ShellMaterial, Simulation,
    ThermalConfig, ThermalNode, WindowProps, comfort_summary, effective_earth_temperature,
    exterior_convection_coefficient, material_margins, shell_properties,
};

use twine_core::Model;

/// Six-node capsule thermal simulation.
///
/// A stateless [`Model`] adapter over the solver core: validates the
/// configuration and integrates the node network over the full flight
/// profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapsuleThermal;

impl Model for CapsuleThermal {
    type Input = ThermalConfig;
    type Output = Simulation;
    type Error = ConfigError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        core::solve(input)
    }
}
