//! # Pin Header
//!
//! A grid of pins held by an insulating case.
//!
//! ## Layout
//!
//! ```text
//!   y
//!   ^   pin 1 ─ pin 3 ─ pin 5 ...      columns along +X
//!   |     |       |       |            rows along -Y
//!   |   pin 2 ─ pin 4 ─ pin 6 ...
//!   └────> x
//! ```
//!
//! Pin 1 sits at the origin. The case is centered on the pin grid and
//! extends half a pitch beyond the outer pins, so its footprint is
//! `columns * pitch_x` by `rows * pitch_y`. The case spans `0..height` in Z;
//! pins run from `-tail` to `height + length`.

use std::io::Write;
use std::path::Path;

use glam::DVec3;
use partmesh::{
    draft_step, extrude, extrude_chain, CircleParams, DraftFactors, ExtrudeParams, MeshFragment,
    RectangleParams, Ring, Tessellator, Transform,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vrml_scene::{sanitize_name, Material, SceneWriter};

use crate::error::{ModelError, ModelResult};

/// Cross-section of a pin and of the case opening it passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinShape {
    #[default]
    Square,
    Round,
}

/// Insulating case parameters (millimetres).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderCase {
    /// Pins along X
    pub columns: u32,
    /// Pins along -Y
    pub rows: u32,
    pub pitch_x: f64,
    pub pitch_y: f64,
    pub height: f64,
    /// Chamfer on the four vertical case edges
    pub bevel: f64,
    /// Side (square) or diameter (round) of each pin opening
    pub hole_size: f64,
}

impl Default for HeaderCase {
    fn default() -> Self {
        Self {
            columns: 3,
            rows: 1,
            pitch_x: 2.54,
            pitch_y: 2.54,
            height: 2.54,
            bevel: 0.4,
            hole_size: 1.0,
        }
    }
}

/// Pin parameters (millimetres).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderPins {
    pub shape: PinShape,
    /// Side (square) or diameter (round)
    pub diameter: f64,
    /// Length below the case
    pub tail: f64,
    /// Length above the case
    pub length: f64,
    /// Chamfer at both pin ends; 0 for blunt pins
    pub tip: f64,
    /// Ring size for round pins
    pub vertices: usize,
}

impl Default for HeaderPins {
    fn default() -> Self {
        Self {
            shape: PinShape::Square,
            diameter: 0.64,
            tail: 3.0,
            length: 6.0,
            tip: 0.1,
            vertices: 16,
        }
    }
}

/// Complete header description.
///
/// # Example
///
/// ```rust
/// use part_models::HeaderParams;
///
/// let params: HeaderParams = serde_json::from_str(r#"{"case": {"columns": 6, "rows": 2}}"#).unwrap();
/// assert!(params.validate().is_ok());
/// assert_eq!(params.pin_count(), 12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderParams {
    pub case: HeaderCase,
    pub pins: HeaderPins,
}

impl HeaderParams {
    /// Checks every dimension and that the pins fit their openings.
    pub fn validate(&self) -> ModelResult<()> {
        let case = &self.case;
        let pins = &self.pins;

        require(case.columns >= 1 && case.rows >= 1, || {
            format!("header needs at least one column and row, got {}x{}", case.columns, case.rows)
        })?;
        for (label, value) in [
            ("pitch_x", case.pitch_x),
            ("pitch_y", case.pitch_y),
            ("height", case.height),
            ("hole_size", case.hole_size),
            ("pin diameter", pins.diameter),
        ] {
            require(value > 0.0 && value.is_finite(), || format!("{label} must be positive, got {value}"))?;
        }
        for (label, value) in [
            ("bevel", case.bevel),
            ("pin tail", pins.tail),
            ("pin length", pins.length),
            ("pin tip", pins.tip),
        ] {
            require(value >= 0.0 && value.is_finite(), || format!("{label} must not be negative, got {value}"))?;
        }

        let min_pitch = case.pitch_x.min(case.pitch_y);
        require(case.hole_size < min_pitch, || {
            format!("hole size {} leaves no wall between pins at pitch {min_pitch}", case.hole_size)
        })?;
        require(pins.diameter < case.hole_size, || {
            format!("pin diameter {} does not fit hole size {}", pins.diameter, case.hole_size)
        })?;
        // Corner openings must survive the case chamfer
        let corner_room = (case.pitch_x + case.pitch_y) / 2.0 - case.hole_size;
        require(case.bevel < corner_room, || {
            format!("bevel {} cuts into the corner openings (limit {corner_room})", case.bevel)
        })?;
        require(2.0 * pins.tip < pins.diameter, || {
            format!("pin tip {} is too large for diameter {}", pins.tip, pins.diameter)
        })?;
        require(2.0 * pins.tip < self.pin_span(), || {
            format!("pin tips {} overlap on a pin of length {}", pins.tip, self.pin_span())
        })?;
        if pins.shape == PinShape::Round {
            CircleParams { vertices: pins.vertices }.validate()?;
        }
        Ok(())
    }

    pub fn pin_count(&self) -> usize {
        self.case.columns as usize * self.case.rows as usize
    }

    /// Position of pin `index` (0-based); pins are numbered down each
    /// column before moving to the next.
    pub fn pin_position(&self, index: usize) -> DVec3 {
        let rows = self.case.rows.max(1) as usize;
        let column = (index / rows) as f64;
        let row = (index % rows) as f64;
        DVec3::new(column * self.case.pitch_x, -row * self.case.pitch_y, 0.0)
    }

    /// Case width and depth.
    pub fn footprint(&self) -> (f64, f64) {
        (
            f64::from(self.case.columns) * self.case.pitch_x,
            f64::from(self.case.rows) * self.case.pitch_y,
        )
    }

    /// Center of the case's bottom face.
    pub fn case_center(&self) -> DVec3 {
        DVec3::new(
            f64::from(self.case.columns.saturating_sub(1)) * self.case.pitch_x / 2.0,
            -f64::from(self.case.rows.saturating_sub(1)) * self.case.pitch_y / 2.0,
            0.0,
        )
    }

    /// Full pin length, tail to tip.
    pub fn pin_span(&self) -> f64 {
        self.pins.tail + self.case.height + self.pins.length
    }
}

/// Materials used by a header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderMaterials {
    pub case: Material,
    pub pins: Material,
}

impl HeaderMaterials {
    /// Loads both materials from description files.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(case: P, pins: Q) -> ModelResult<Self> {
        Ok(Self {
            case: Material::load(case)?,
            pins: Material::load(pins)?,
        })
    }
}

/// A validated pin header ready to be built.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    params: HeaderParams,
}

impl Header {
    pub fn new(params: HeaderParams) -> ModelResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &HeaderParams {
        &self.params
    }

    /// Case geometry: outer walls, bottom and top faces with one opening
    /// per pin, and the opening walls.
    pub fn case_fragments(&self) -> ModelResult<Vec<MeshFragment>> {
        let case = &self.params.case;
        let (width, depth) = self.params.footprint();
        let identity = Transform::identity();
        let rise = DVec3::Z * case.height;

        let outline = RectangleParams::chamfer(case.bevel).calc(
            width,
            depth,
            &Transform::from_translation(self.params.case_center()),
        )?;
        let openings = (0..self.params.pin_count())
            .map(|i| {
                let at = Transform::from_translation(self.params.pin_position(i));
                pin_ring(self.params.pins.shape, case.hole_size, self.params.pins.vertices, &at)
            })
            .collect::<ModelResult<Vec<Ring>>>()?;

        let walls = ExtrudeParams {
            step: Transform::from_translation(rise),
            ..Default::default()
        };
        let mut fragments = vec![extrude(&outline, &walls)?.fragment];

        let mut tessellator = Tessellator::new();
        tessellator.add_polygon(&outline, false);
        for opening in &openings {
            tessellator.add_polygon(opening, true);
        }
        let face = tessellator.tessellate()?;
        fragments.push(face.fragment(false, &identity)?);
        fragments.push(face.fragment(true, &Transform::from_translation(rise))?);

        for opening in &openings {
            fragments.push(extrude(opening, &ExtrudeParams::hole(rise))?.fragment);
        }
        Ok(fragments)
    }

    /// Geometry of a single pin standing at the origin.
    pub fn pin_fragments(&self) -> ModelResult<Vec<MeshFragment>> {
        let pins = &self.params.pins;
        let span = self.params.pin_span();
        let bottom = Transform::from_translation(DVec3::new(0.0, 0.0, -pins.tail));

        if pins.tip <= 0.0 {
            let ring = pin_ring(pins.shape, pins.diameter, pins.vertices, &bottom)?;
            return Ok(vec![extrude(&ring, &ExtrudeParams::solid(DVec3::Z * span))?.fragment]);
        }

        let taper = DraftFactors::from_chamfer(pins.diameter, 2.0 * pins.tip)?;
        let ring = pin_ring(pins.shape, pins.diameter * taper.shrink, pins.vertices, &bottom)?;
        let steps = [
            ExtrudeParams {
                cap_bottom: true,
                step: draft_step(taper.grow, taper.grow, pins.tip),
                ..Default::default()
            },
            ExtrudeParams {
                step: draft_step(1.0, 1.0, span - 2.0 * pins.tip),
                ..Default::default()
            },
            ExtrudeParams {
                cap_top: true,
                step: draft_step(taper.shrink, taper.shrink, pins.tip),
                ..Default::default()
            },
        ];
        let (fragments, _) = extrude_chain(&ring, &steps)?;
        Ok(fragments)
    }

    /// Writes the header as one named transform holding the case and one
    /// nested `{name}_PIN_{n}` transform per pin.
    pub fn build<W: Write>(
        &self,
        writer: &mut SceneWriter<W>,
        part_name: &str,
        placement: &Transform,
        materials: &HeaderMaterials,
    ) -> ModelResult<()> {
        let name = sanitize_name(part_name)?;
        let indent = writer.next_indent();
        let case = self.case_fragments()?;
        let pin = self.pin_fragments()?;

        writer.open_transform_with(&name, indent, placement)?;
        for fragment in &case {
            writer.write_fragment(fragment, &materials.case)?;
        }
        for index in 0..self.params.pin_count() {
            let at = Transform::from_translation(self.params.pin_position(index));
            writer.open_transform_with(&format!("{name}_PIN_{}", index + 1), indent + 1, &at)?;
            for fragment in &pin {
                writer.write_fragment(fragment, &materials.pins)?;
            }
            writer.close_transform(indent + 1)?;
        }
        writer.close_transform(indent)?;

        debug!(
            part = %name,
            columns = self.params.case.columns,
            rows = self.params.case.rows,
            "built pin header"
        );
        Ok(())
    }
}

fn pin_ring(shape: PinShape, size: f64, vertices: usize, transform: &Transform) -> ModelResult<Ring> {
    let ring = match shape {
        PinShape::Square => RectangleParams::default().calc(size, size, transform)?,
        PinShape::Round => CircleParams { vertices }.calc(size / 2.0, size / 2.0, transform)?,
    };
    Ok(ring)
}

fn require(condition: bool, message: impl FnOnce() -> String) -> ModelResult<()> {
    if condition {
        Ok(())
    } else {
        Err(ModelError::invalid_parameter(message()))
    }
}
