//! # QFP Body
//!
//! Molded package body built as a five-step extrusion stack:
//!
//! ```text
//!        ┌──────────┐   chamfer (shrink)
//!       /            \  draft   (shrink)
//!      │              │ middle
//!       \            /  draft   (grow)
//!        └──────────┘   chamfer (grow)
//! ```
//!
//! Each taper is undone by its mirror step, so the top outline matches the
//! bottom one. The top face carries a round polarity dot near pin 1: a
//! spherical dimple pressed into the face, or a bump for a negative depth.

use std::io::Write;

use config::constants::MIN_LENGTH;
use glam::DVec3;
use partmesh::{
    draft_step, extrude_chain, paint, DimpleParams, DraftFactors, ExtrudeParams, MeshFragment,
    RectangleParams, Tessellator, Transform,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vrml_scene::{sanitize_name, Material, SceneWriter};

use crate::error::{ModelError, ModelResult};

/// Body dimensions (millimetres, radians).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QfpParams {
    /// Widest extent along X
    pub width: f64,
    /// Widest extent along Y
    pub length: f64,
    pub height: f64,
    /// Gap between the board and the body
    pub standoff: f64,
    /// Height (and inset) of the top and bottom chamfers
    pub chamfer: f64,
    /// Mold draft from vertical
    pub draft_angle: f64,
    /// Straight band at the parting line
    pub middle: f64,
    /// Radius of the polarity dot; 0 for none
    pub dot_radius: f64,
    /// Dimple depth below the top face; negative for a raised bump
    pub dot_depth: f64,
    /// Distance of the dot center from the pin 1 corner along X and Y
    pub dot_inset: f64,
    pub dot_vertices: usize,
    /// Rings between the dot's rim and its pole
    pub dot_sections: usize,
}

impl Default for QfpParams {
    fn default() -> Self {
        Self {
            width: 7.0,
            length: 7.0,
            height: 1.4,
            standoff: 0.1,
            chamfer: 0.1,
            draft_angle: 12f64.to_radians(),
            middle: 0.2,
            dot_radius: 0.3,
            dot_depth: 0.05,
            dot_inset: 1.0,
            dot_vertices: 16,
            dot_sections: 5,
        }
    }
}

/// Per-axis taper factors of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tapers {
    chamfer_x: DraftFactors,
    chamfer_y: DraftFactors,
    draft_x: DraftFactors,
    draft_y: DraftFactors,
}

impl QfpParams {
    /// Height of each drafted band.
    pub fn draft_height(&self) -> f64 {
        (self.height - self.middle - 2.0 * self.chamfer) / 2.0
    }

    /// Center of the polarity dot on the top face.
    pub fn dot_center(&self) -> DVec3 {
        DVec3::new(
            -self.width / 2.0 + self.dot_inset,
            self.length / 2.0 - self.dot_inset,
            self.standoff + self.height,
        )
    }

    pub fn validate(&self) -> ModelResult<()> {
        self.tapers().map(|_| ())
    }

    fn dimple(&self) -> DimpleParams {
        DimpleParams {
            sides: self.dot_vertices,
            sections: self.dot_sections,
        }
    }

    fn tapers(&self) -> ModelResult<Tapers> {
        for (label, value) in [("width", self.width), ("length", self.length), ("height", self.height)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ModelError::invalid_parameter(format!(
                    "{label} must be positive, got {value}"
                )));
            }
        }
        for (label, value) in [
            ("standoff", self.standoff),
            ("chamfer", self.chamfer),
            ("middle", self.middle),
            ("dot radius", self.dot_radius),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ModelError::invalid_parameter(format!(
                    "{label} must not be negative, got {value}"
                )));
            }
        }
        let draft_height = self.draft_height();
        if draft_height < MIN_LENGTH {
            return Err(ModelError::invalid_parameter(format!(
                "chamfers and middle band leave no room for the draft in height {}",
                self.height
            )));
        }

        let tapers = Tapers {
            chamfer_x: DraftFactors::from_chamfer(self.width / 2.0, self.chamfer)?,
            chamfer_y: DraftFactors::from_chamfer(self.length / 2.0, self.chamfer)?,
            draft_x: DraftFactors::from_angle(self.width / 2.0, draft_height, self.draft_angle)?,
            draft_y: DraftFactors::from_angle(self.length / 2.0, draft_height, self.draft_angle)?,
        };

        if self.dot_radius > 0.0 {
            self.dimple().check(self.dot_radius, self.dot_depth)?;
            if self.dot_depth >= self.height {
                return Err(ModelError::invalid_parameter(format!(
                    "dot depth {} reaches through the body of height {}",
                    self.dot_depth, self.height
                )));
            }
            // The dot must sit inside the narrowed top outline
            let margin_x = self.width / 2.0 * (1.0 - tapers.draft_x.shrink * tapers.chamfer_x.shrink);
            let margin_y = self.length / 2.0 * (1.0 - tapers.draft_y.shrink * tapers.chamfer_y.shrink);
            let room = self.dot_inset - self.dot_radius;
            if room <= margin_x.max(margin_y) + MIN_LENGTH {
                return Err(ModelError::invalid_parameter(format!(
                    "dot of radius {} at inset {} overlaps the top edge",
                    self.dot_radius, self.dot_inset
                )));
            }
        }
        Ok(tapers)
    }
}

/// Generated body geometry, split by material.
#[derive(Debug, Clone, PartialEq)]
pub struct QfpMeshes {
    pub body: Vec<MeshFragment>,
    pub dot: Vec<MeshFragment>,
}

/// A validated QFP body.
#[derive(Debug, Clone, PartialEq)]
pub struct QfpBody {
    params: QfpParams,
}

impl QfpBody {
    pub fn new(params: QfpParams) -> ModelResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &QfpParams {
        &self.params
    }

    /// Builds the body stack, the top face and the polarity dot.
    pub fn meshes(&self) -> ModelResult<QfpMeshes> {
        let p = &self.params;
        let t = p.tapers()?;

        let base = RectangleParams::default().calc(
            p.width * t.draft_x.shrink * t.chamfer_x.shrink,
            p.length * t.draft_y.shrink * t.chamfer_y.shrink,
            &Transform::from_translation(DVec3::new(0.0, 0.0, p.standoff)),
        )?;

        let draft_height = p.draft_height();
        let mut steps = Vec::with_capacity(5);
        if p.chamfer > 0.0 {
            steps.push(draft_step(t.chamfer_x.grow, t.chamfer_y.grow, p.chamfer));
        }
        steps.push(draft_step(t.draft_x.grow, t.draft_y.grow, draft_height));
        if p.middle > 0.0 {
            steps.push(draft_step(1.0, 1.0, p.middle));
        }
        steps.push(draft_step(t.draft_x.shrink, t.draft_y.shrink, draft_height));
        if p.chamfer > 0.0 {
            steps.push(draft_step(t.chamfer_x.shrink, t.chamfer_y.shrink, p.chamfer));
        }
        let steps: Vec<ExtrudeParams> = steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| ExtrudeParams {
                cap_bottom: i == 0,
                step,
                ..Default::default()
            })
            .collect();

        let (mut body, top) = extrude_chain(&base, &steps)?;
        let identity = Transform::identity();

        if p.dot_radius <= 0.0 {
            body.push(paint(&top, true, &identity)?);
            return Ok(QfpMeshes { body, dot: Vec::new() });
        }

        // The hole is the dimple's own rim so the two meshes share vertices
        let at = Transform::from_translation(p.dot_center());
        let dimple = p.dimple();
        let rim = dimple.rings(p.dot_radius, p.dot_depth, &at)?.swap_remove(0);

        let mut tessellator = Tessellator::new();
        tessellator.add_polygon(&top, false);
        tessellator.add_polygon(&rim, true);
        body.push(tessellator.tessellate()?.fragment(true, &identity)?);

        Ok(QfpMeshes {
            body,
            dot: vec![dimple.calc(p.dot_radius, p.dot_depth, &at)?],
        })
    }

    /// Writes the body in its own named transform.
    pub fn build<W: Write>(
        &self,
        writer: &mut SceneWriter<W>,
        part_name: &str,
        placement: &Transform,
        body: &Material,
        dot: &Material,
    ) -> ModelResult<()> {
        let name = sanitize_name(part_name)?;
        let meshes = self.meshes()?;
        let indent = writer.next_indent();

        writer.open_transform_with(&name, indent, placement)?;
        for fragment in &meshes.body {
            writer.write_fragment(fragment, body)?;
        }
        for fragment in &meshes.dot {
            writer.write_fragment(fragment, dot)?;
        }
        writer.close_transform(indent)?;

        debug!(part = %name, shapes = meshes.body.len() + meshes.dot.len(), "built QFP body");
        Ok(())
    }
}
