//! # Coil
//!
//! A helical winding with straight leads, swept from a round wire section.
//! The helix is sampled finely, so the sweep stitches many short segments
//! joined by small rounded bends.

use std::f64::consts::TAU;
use std::io::Write;

use glam::DVec3;
use partmesh::{CircleParams, Ring, Transform, Wire, WireBuildOptions, WireParams, WireSweep};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vrml_scene::{sanitize_name, Material, SceneWriter};

use crate::error::{ModelError, ModelResult};

/// Coil parameters (millimetres).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoilParams {
    pub turns: f64,
    /// Helix radius, measured to the wire center
    pub radius: f64,
    /// Rise per turn
    pub pitch: f64,
    pub wire_diameter: f64,
    pub samples_per_turn: u32,
    /// Straight lead below the first turn and above the last; 0 for none
    pub lead_length: f64,
    pub bend_radius: f64,
    pub segments_per_bend: u32,
    pub section_vertices: usize,
}

impl Default for CoilParams {
    fn default() -> Self {
        Self {
            turns: 5.0,
            radius: 2.0,
            pitch: 0.6,
            wire_diameter: 0.3,
            samples_per_turn: 24,
            lead_length: 2.0,
            bend_radius: 0.2,
            segments_per_bend: 4,
            section_vertices: 12,
        }
    }
}

impl CoilParams {
    pub fn validate(&self) -> ModelResult<()> {
        for (label, value) in [
            ("turns", self.turns),
            ("radius", self.radius),
            ("pitch", self.pitch),
            ("wire diameter", self.wire_diameter),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ModelError::invalid_parameter(format!(
                    "{label} must be positive, got {value}"
                )));
            }
        }
        if !(self.lead_length >= 0.0) {
            return Err(ModelError::invalid_parameter(format!(
                "lead length must not be negative, got {}",
                self.lead_length
            )));
        }
        if self.wire_diameter >= self.pitch {
            return Err(ModelError::invalid_parameter(format!(
                "wire diameter {} does not fit pitch {}",
                self.wire_diameter, self.pitch
            )));
        }
        if self.wire_diameter >= self.radius {
            return Err(ModelError::invalid_parameter(format!(
                "wire diameter {} does not fit radius {}",
                self.wire_diameter, self.radius
            )));
        }
        if self.samples_per_turn < 8 {
            return Err(ModelError::invalid_parameter(format!(
                "at least 8 samples per turn are needed, got {}",
                self.samples_per_turn
            )));
        }
        self.wire_params().validate()?;
        CircleParams {
            vertices: self.section_vertices,
        }
        .validate()?;
        Ok(())
    }

    fn wire_params(&self) -> WireParams {
        WireParams {
            segments_per_bend: self.segments_per_bend,
            bend_radius: self.bend_radius,
        }
    }
}

/// Centerline points of a coil: lead in, helix samples, lead out.
///
/// The helix starts at `(radius, 0, 0)` and winds counter-clockwise about
/// +Z. Leads run along Z.
///
/// # Example
///
/// ```rust
/// use part_models::{coil_path, CoilParams};
///
/// let params = CoilParams { turns: 1.0, samples_per_turn: 8, ..Default::default() };
/// let points = coil_path(&params);
/// assert_eq!(points.len(), 8 + 1 + 2);
/// ```
pub fn coil_path(params: &CoilParams) -> Vec<DVec3> {
    let samples = (params.turns * f64::from(params.samples_per_turn)).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(samples + 3);

    let helix = |k: usize| {
        let t = params.turns * k as f64 / samples as f64;
        let (sin, cos) = (TAU * t).sin_cos();
        DVec3::new(params.radius * cos, params.radius * sin, params.pitch * t)
    };

    if params.lead_length > 0.0 {
        points.push(helix(0) - DVec3::Z * params.lead_length);
    }
    points.extend((0..=samples).map(helix));
    if params.lead_length > 0.0 {
        points.push(helix(samples) + DVec3::Z * params.lead_length);
    }
    points
}

/// A validated coil.
#[derive(Debug, Clone, PartialEq)]
pub struct Coil {
    params: CoilParams,
}

impl Coil {
    pub fn new(params: CoilParams) -> ModelResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &CoilParams {
        &self.params
    }

    /// Wire cross-section centered on the origin in the XY plane.
    pub fn section(&self) -> ModelResult<Ring> {
        let r = self.params.wire_diameter / 2.0;
        let ring = CircleParams {
            vertices: self.params.section_vertices,
        }
        .calc(r, r, &Transform::identity())?;
        Ok(ring)
    }

    pub fn wire(&self) -> ModelResult<Wire> {
        let mut wire = Wire::new(self.params.wire_params())?;
        for p in coil_path(&self.params) {
            wire.add_point(p.x, p.y, p.z)?;
        }
        Ok(wire)
    }

    /// Sweeps the section along the coil path.
    pub fn sweep(&self) -> ModelResult<WireSweep> {
        let sweep = self.wire()?.build(&self.section()?, &WireBuildOptions::default())?;
        Ok(sweep)
    }

    /// Writes the coil in its own named transform and returns the wire length.
    pub fn build<W: Write>(
        &self,
        writer: &mut SceneWriter<W>,
        part_name: &str,
        placement: &Transform,
        material: &Material,
    ) -> ModelResult<f64> {
        let name = sanitize_name(part_name)?;
        let wire = self.wire()?;
        let section = self.section()?;
        let indent = writer.next_indent();

        writer.open_transform_with(&name, indent, placement)?;
        let length = writer.build_wire(&wire, &section, &WireBuildOptions::default(), material)?;
        writer.close_transform(indent)?;

        debug!(part = %name, turns = self.params.turns, length, "built coil");
        Ok(length)
    }
}
