//! # Geometry Emitters
//!
//! Runs a geometry operation and writes its result into the innermost scope
//! in one call.

use std::io::Write;

use partmesh::{
    extrude, paint, paint_tessellated, stitch, ExtrudeParams, Ring, Tessellator, Transform, Wire,
    WireBuildOptions,
};

use crate::error::SceneResult;
use crate::material::Material;
use crate::writer::SceneWriter;

impl<W: Write> SceneWriter<W> {
    /// Writes the band joining two corresponding rings.
    pub fn stitch(
        &mut self,
        a: &Ring,
        b: &Ring,
        forward: bool,
        transform: &Transform,
        material: &Material,
    ) -> SceneResult<()> {
        let fragment = stitch(a, b, forward, transform)?;
        self.write_fragment(&fragment, material)
    }

    /// Writes a flat cap over a convex ring.
    pub fn paint(&mut self, ring: &Ring, ccw: bool, transform: &Transform, material: &Material) -> SceneResult<()> {
        let fragment = paint(ring, ccw, transform)?;
        self.write_fragment(&fragment, material)
    }

    /// Writes a triangulated cap over any simple ring.
    pub fn paint_tessellated(
        &mut self,
        ring: &Ring,
        ccw: bool,
        transform: &Transform,
        material: &Material,
    ) -> SceneResult<()> {
        let fragment = paint_tessellated(ring, ccw, transform)?;
        self.write_fragment(&fragment, material)
    }

    /// Writes one extrusion step and returns the successor ring.
    pub fn extrude(&mut self, ring: &Ring, params: &ExtrudeParams, material: &Material) -> SceneResult<Ring> {
        let result = extrude(ring, params)?;
        self.write_fragment(&result.fragment, material)?;
        Ok(result.next)
    }

    /// Writes a chain of extrusion steps and returns the last ring.
    pub fn extrude_chain(&mut self, ring: &Ring, steps: &[ExtrudeParams], material: &Material) -> SceneResult<Ring> {
        let mut current = ring.clone();
        for params in steps {
            current = self.extrude(&current, params, material)?;
        }
        Ok(current)
    }

    /// Sweeps `cross_section` along `wire` and writes every fragment.
    ///
    /// Returns the centerline length.
    pub fn build_wire(
        &mut self,
        wire: &Wire,
        cross_section: &Ring,
        options: &WireBuildOptions,
        material: &Material,
    ) -> SceneResult<f64> {
        let sweep = wire.build(cross_section, options)?;
        for fragment in &sweep.fragments {
            self.write_fragment(fragment, material)?;
        }
        Ok(sweep.length)
    }

    /// Triangulates the tessellator's outline and holes and writes the cap.
    ///
    /// With `ccw` the cap faces along the outer boundary's normal.
    pub fn write_tessellation(
        &mut self,
        tessellator: &Tessellator,
        ccw: bool,
        transform: &Transform,
        material: &Material,
    ) -> SceneResult<()> {
        let fragment = tessellator.tessellate()?.fragment(ccw, transform)?;
        self.write_fragment(&fragment, material)
    }
}
