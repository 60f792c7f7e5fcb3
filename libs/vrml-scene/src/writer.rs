//! # Scene Writer
//!
//! Streams a VRML 2.0 file: a header, nested named `Transform` scopes and
//! `Shape` nodes holding `IndexedFaceSet` geometry.
//!
//! ## Scope protocol
//!
//! ```text
//! open_transform("PART", 0)
//!     open_transform("PART_PIN_1", 1)
//!         write_fragment(..)
//!     close_transform(1)
//!     write_fragment(..)
//! close_transform(0)
//! finish()
//! ```
//!
//! Scopes close in reverse order of opening, each with the indent it was
//! opened with. Geometry is only accepted inside a scope. `finish` fails if
//! any scope is still open.
//!
//! Transforms and materials share one DEF namespace: every name is bound at
//! most once per file.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use config::constants::{MeshSettings, EPSILON, FACES_PER_LINE, POINTS_PER_LINE};
use glam::DVec3;
use partmesh::{MeshError, MeshFragment, Transform};
use tracing::{debug, trace, warn};

use crate::error::{SceneError, SceneResult};
use crate::format::{number, pad};
use crate::material::Material;
use crate::name::sanitize_name;

/// First line of every scene file.
pub const VRML_HEADER: &str = "#VRML V2.0 utf8";

/// Counts bytes passed through to the wrapped writer.
#[derive(Debug)]
struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.count += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// An open `Transform` block.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Scope {
    name: String,
    indent: usize,
}

/// Streaming VRML 2.0 writer.
///
/// One writer produces one file. It owns the scope stack and remembers which
/// materials have been defined so later shapes can `USE` them.
#[derive(Debug)]
pub struct SceneWriter<W: Write> {
    out: CountingWriter<W>,
    scopes: Vec<Scope>,
    materials: HashMap<String, Material>,
    /// Every DEF'd name, scopes and materials alike
    names: HashSet<String>,
    settings: MeshSettings,
    shapes: usize,
    finished: bool,
}

impl<W: Write> SceneWriter<W> {
    /// Starts a scene on `out` and writes the header.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vrml_scene::SceneWriter;
    ///
    /// let mut writer = SceneWriter::new(Vec::new()).unwrap();
    /// writer.open_transform("Part", 0).unwrap();
    /// writer.close_transform(0).unwrap();
    /// writer.finish().unwrap();
    /// let text = String::from_utf8(writer.get_ref().clone()).unwrap();
    /// assert!(text.starts_with("#VRML V2.0 utf8"));
    /// ```
    pub fn new(out: W) -> SceneResult<Self> {
        Self::with_settings(out, MeshSettings::default())
    }

    /// Like [`new`](Self::new), with explicit precision and zero tolerance.
    pub fn with_settings(out: W, settings: MeshSettings) -> SceneResult<Self> {
        let mut writer = Self {
            out: CountingWriter { inner: out, count: 0 },
            scopes: Vec::new(),
            materials: HashMap::new(),
            names: HashSet::new(),
            settings,
            shapes: 0,
            finished: false,
        };
        writeln!(writer.out, "{VRML_HEADER}")?;
        writeln!(writer.out)?;
        Ok(writer)
    }

    /// Number of open scopes.
    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Smallest indent accepted by the next [`open_transform`](Self::open_transform).
    pub fn next_indent(&self) -> usize {
        self.scopes.last().map_or(0, |s| s.indent + 1)
    }

    /// Bytes handed to the underlying writer so far.
    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.out.count
    }

    /// Number of shapes written.
    #[inline]
    pub fn shape_count(&self) -> usize {
        self.shapes
    }

    /// True once [`finish`](Self::finish) has succeeded.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True if a material with this name has been written.
    pub fn has_material(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    pub fn get_ref(&self) -> &W {
        &self.out.inner
    }

    /// Writes `# ` comment lines at the current depth.
    pub fn comment(&mut self, text: &str) -> SceneResult<()> {
        self.check_active()?;
        let prefix = pad(self.content_level());
        for line in text.lines() {
            writeln!(self.out, "{prefix}# {line}")?;
        }
        Ok(())
    }

    /// Opens a named `Transform` scope with no placement.
    pub fn open_transform(&mut self, name: &str, indent: usize) -> SceneResult<()> {
        self.open_transform_with(name, indent, &Transform::identity())
    }

    /// Opens a named `Transform` scope carrying `transform`'s translation,
    /// rotation and scale fields.
    ///
    /// # Errors
    ///
    /// - [`SceneError::InvalidName`] for a blank name
    /// - [`SceneError::DuplicateName`] if the name is already defined
    /// - [`SceneError::Structural`] if `indent` is not deeper than the
    ///   enclosing scope's indent
    pub fn open_transform_with(&mut self, name: &str, indent: usize, transform: &Transform) -> SceneResult<()> {
        self.check_active()?;
        let name = sanitize_name(name)?;
        if self.names.contains(&name) {
            return Err(SceneError::DuplicateName { name });
        }
        if let Some(parent) = self.scopes.last() {
            if indent <= parent.indent {
                return Err(SceneError::structural(format!(
                    "scope {name} at indent {indent} must be deeper than {} at indent {}",
                    parent.name, parent.indent
                )));
            }
        }

        let outer = pad(indent);
        let inner = pad(indent + 1);
        writeln!(self.out, "{outer}DEF {name} Transform {{")?;

        let translation = transform.translation();
        if translation != DVec3::ZERO {
            writeln!(self.out, "{inner}translation {}", self.vector_text(translation))?;
        }
        let (axis, angle) = transform.rotation().to_axis_angle();
        if angle.abs() > EPSILON {
            writeln!(
                self.out,
                "{inner}rotation {} {}",
                self.vector_text(axis),
                self.number_text(angle)
            )?;
        }
        let scale = transform.scale();
        if scale != DVec3::ONE {
            writeln!(self.out, "{inner}scale {}", self.vector_text(scale))?;
        }
        writeln!(self.out, "{inner}children [")?;

        debug!(name = %name, indent, depth = self.scopes.len() + 1, "opened transform");
        self.names.insert(name.clone());
        self.scopes.push(Scope { name, indent });
        Ok(())
    }

    /// Closes the innermost scope.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Structural`] if no scope is open or if `indent`
    /// differs from the innermost scope's indent.
    pub fn close_transform(&mut self, indent: usize) -> SceneResult<()> {
        self.check_active()?;
        let scope = match self.scopes.last() {
            Some(scope) => scope.clone(),
            None => {
                return Err(SceneError::structural(format!(
                    "close at indent {indent} without a matching open"
                )))
            }
        };
        if scope.indent != indent {
            return Err(SceneError::structural(format!(
                "close at indent {indent} does not match {} opened at indent {}",
                scope.name, scope.indent
            )));
        }

        writeln!(self.out, "{}]", pad(indent + 1))?;
        writeln!(self.out, "{}}}", pad(indent))?;
        self.scopes.pop();
        debug!(name = %scope.name, indent, "closed transform");
        Ok(())
    }

    /// Writes a top-level `DEF name Material` ahead of any geometry.
    ///
    /// Defining the same material twice is a no-op.
    pub fn define_material(&mut self, material: &Material) -> SceneResult<()> {
        self.check_active()?;
        if !self.scopes.is_empty() {
            return Err(SceneError::structural(format!(
                "material {} must be defined outside any scope",
                material.name()
            )));
        }
        if self.register_material(material)? {
            return Ok(());
        }
        write!(self.out, "DEF {} ", material.name())?;
        material.write_node(&mut self.out, 0)?;
        Ok(())
    }

    /// Appends a `Shape` for `fragment` to the innermost scope.
    ///
    /// The material is written in full on its first use and referenced with
    /// `USE` afterwards. A fragment with no faces writes nothing.
    ///
    /// # Errors
    ///
    /// - [`SceneError::Structural`] if no scope is open
    /// - [`SceneError::Mesh`] if the fragment is malformed or too large
    /// - [`SceneError::Material`] if another material already uses the name
    /// - [`SceneError::DuplicateName`] if a transform already uses the name
    pub fn write_fragment(&mut self, fragment: &MeshFragment, material: &Material) -> SceneResult<()> {
        self.check_active()?;
        let level = match self.scopes.last() {
            Some(scope) => scope.indent + 2,
            None => return Err(SceneError::structural("geometry written outside any transform scope")),
        };
        if !fragment.validate() {
            return Err(MeshError::invalid_parameter(
                "fragment has out-of-range indices or non-finite vertices",
            )
            .into());
        }
        fragment.check_limits()?;
        if fragment.is_empty() {
            trace!("skipped fragment without faces");
            return Ok(());
        }

        let reused = self.register_material(material)?;
        let p = [pad(level), pad(level + 1), pad(level + 2), pad(level + 3), pad(level + 4)];

        writeln!(self.out, "{}Shape {{", p[0])?;
        writeln!(self.out, "{}appearance Appearance {{", p[1])?;
        if reused {
            writeln!(self.out, "{}material USE {}", p[2], material.name())?;
        } else {
            write!(self.out, "{}material DEF {} ", p[2], material.name())?;
            material.write_node(&mut self.out, level + 2)?;
        }
        writeln!(self.out, "{}}}", p[1])?;

        writeln!(self.out, "{}geometry IndexedFaceSet {{", p[1])?;
        writeln!(self.out, "{}coord Coordinate {{", p[2])?;
        writeln!(self.out, "{}point [", p[3])?;
        let points: Vec<String> = fragment.vertices().iter().map(|v| self.vector_text(*v)).collect();
        self.write_rows(&points, POINTS_PER_LINE, ", ", &p[4])?;
        writeln!(self.out, "{}]", p[3])?;
        writeln!(self.out, "{}}}", p[2])?;

        writeln!(self.out, "{}coordIndex [", p[2])?;
        let faces: Vec<String> = fragment
            .faces()
            .iter()
            .map(|face| {
                let mut text: String = face.iter().map(|i| format!("{i},")).collect();
                text.push_str("-1");
                text
            })
            .collect();
        self.write_rows(&faces, FACES_PER_LINE, ", ", &p[3])?;
        writeln!(self.out, "{}]", p[2])?;
        writeln!(self.out, "{}}}", p[1])?;
        writeln!(self.out, "{}}}", p[0])?;

        self.shapes += 1;
        trace!(
            vertices = fragment.vertex_count(),
            faces = fragment.face_count(),
            material = material.name(),
            "wrote shape"
        );
        Ok(())
    }

    /// Flushes the stream and seals the writer.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Structural`] if any scope is still open.
    pub fn finish(&mut self) -> SceneResult<()> {
        self.check_active()?;
        if !self.scopes.is_empty() {
            let open: Vec<&str> = self.scopes.iter().map(|s| s.name.as_str()).collect();
            return Err(SceneError::structural(format!(
                "{} scope(s) still open: {}",
                open.len(),
                open.join(", ")
            )));
        }
        self.out.flush()?;
        self.finished = true;
        debug!(bytes = self.out.count, shapes = self.shapes, "finished scene");
        Ok(())
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn check_active(&self) -> SceneResult<()> {
        if self.finished {
            return Err(SceneError::structural("scene already finished"));
        }
        Ok(())
    }

    /// Indent level of content inside the innermost scope.
    fn content_level(&self) -> usize {
        self.scopes.last().map_or(0, |s| s.indent + 2)
    }

    /// Returns true if the material was already written.
    fn register_material(&mut self, material: &Material) -> SceneResult<bool> {
        if let Some(existing) = self.materials.get(material.name()) {
            if existing != material {
                return Err(SceneError::material(format!(
                    "conflicting definitions of material {}",
                    material.name()
                )));
            }
            return Ok(true);
        }
        if self.names.contains(material.name()) {
            return Err(SceneError::DuplicateName {
                name: material.name().to_string(),
            });
        }
        material.validate()?;
        self.names.insert(material.name().to_string());
        self.materials.insert(material.name().to_string(), material.clone());
        Ok(false)
    }

    fn number_text(&self, value: f64) -> String {
        number(value, self.settings.coordinate_precision, self.settings.merge_tolerance)
    }

    fn vector_text(&self, v: DVec3) -> String {
        format!("{} {} {}", self.number_text(v.x), self.number_text(v.y), self.number_text(v.z))
    }

    fn write_rows(&mut self, items: &[String], per_line: usize, separator: &str, prefix: &str) -> io::Result<()> {
        let rows = items.len().div_ceil(per_line);
        for (row, chunk) in items.chunks(per_line).enumerate() {
            let trailer = if row + 1 < rows { "," } else { "" };
            writeln!(self.out, "{prefix}{}{trailer}", chunk.join(separator))?;
        }
        Ok(())
    }
}

impl SceneWriter<BufWriter<File>> {
    /// Creates (or truncates) a scene file and writes the header.
    pub fn create<P: AsRef<Path>>(path: P) -> SceneResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| SceneError::file(path, e))?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> Drop for SceneWriter<W> {
    fn drop(&mut self) {
        if !self.finished && !self.scopes.is_empty() {
            warn!(
                open_scopes = self.scopes.len(),
                innermost = %self.scopes.last().map_or("", |s| s.name.as_str()),
                "scene writer dropped with open scopes"
            );
        }
    }
}

/// Writes a complete scene file, removing it again if anything fails.
///
/// `build` receives a writer positioned after the header. On success the
/// writer is finished and the number of bytes written is returned. On any
/// error, from `build` or from finishing, the partial file is deleted so no
/// truncated scene is left behind.
///
/// # Example
///
/// ```rust,no_run
/// use vrml_scene::{write_scene, SceneError};
///
/// let bytes = write_scene("part.wrl", |writer| {
///     writer.open_transform("Part", 0)?;
///     writer.close_transform(0)?;
///     Ok::<(), SceneError>(())
/// })
/// .unwrap();
/// assert!(bytes > 0);
/// ```
pub fn write_scene<P, F, E>(path: P, build: F) -> Result<u64, E>
where
    P: AsRef<Path>,
    F: FnOnce(&mut SceneWriter<BufWriter<File>>) -> Result<(), E>,
    E: From<SceneError>,
{
    let path = path.as_ref();
    let mut writer = SceneWriter::create(path)?;

    let result = build(&mut writer).and_then(|()| writer.finish().map_err(E::from));
    let bytes = writer.bytes_written();
    // Silence the open-scope warning: the failure is reported to the caller
    writer.finished = true;
    drop(writer);

    match result {
        Ok(()) => Ok(bytes),
        Err(e) => {
            if let Err(remove) = std::fs::remove_file(path) {
                warn!(path = %path.display(), error = %remove, "could not remove partial scene");
            }
            Err(e)
        }
    }
}
