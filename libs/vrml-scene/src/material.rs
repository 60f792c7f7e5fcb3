//! # Materials
//!
//! Surface appearance shared by many shapes. A material is loaded once from
//! a key/value description, then borrowed by every geometry call that uses
//! it. The writer emits its `DEF` block on first use and a `USE` reference
//! afterwards.
//!
//! ## File format
//!
//! ```text
//! # gold plating
//! name:         GoldPin
//! diffuse:      0.8 0.68 0.23
//! specular:     0.9 0.85 0.6
//! ambient:      0.3
//! shininess:    0.4
//! ```
//!
//! `name` is required, as is at least one of `diffuse` or `specular`.
//! Colors are three values and coefficients one value, all within `0..=1`.

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::Path;

use config::constants::MATERIAL_PRECISION;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{SceneError, SceneResult};
use crate::format::{number, pad};
use crate::name::sanitize_name;

/// An RGB color with components in `0..=1`.
pub type Rgb = [f64; 3];

/// VRML material node parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    name: String,
    #[serde(default)]
    diffuse: Rgb,
    #[serde(default)]
    emissive: Rgb,
    #[serde(default)]
    specular: Rgb,
    #[serde(default)]
    ambient: f64,
    #[serde(default)]
    transparency: f64,
    #[serde(default)]
    shininess: f64,
}

impl Material {
    /// Creates a black, opaque material.
    ///
    /// The name is made DEF-safe with [`sanitize_name`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use vrml_scene::Material;
    ///
    /// let red = Material::new("Red").unwrap().with_diffuse([0.8, 0.1, 0.1]).unwrap();
    /// assert_eq!(red.name(), "Red");
    /// assert!(red.with_transparency(1.5).is_err());
    /// ```
    pub fn new(name: &str) -> SceneResult<Self> {
        Ok(Self {
            name: sanitize_name(name)?,
            diffuse: [0.0; 3],
            emissive: [0.0; 3],
            specular: [0.0; 3],
            ambient: 0.0,
            transparency: 0.0,
            shininess: 0.0,
        })
    }

    /// Loads a material description file.
    ///
    /// # Errors
    ///
    /// - [`SceneError::File`] if the file cannot be read
    /// - [`SceneError::Material`] if the description is incomplete or invalid
    pub fn load<P: AsRef<Path>>(path: P) -> SceneResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SceneError::file(path, e))?;
        let material = Self::parse(&text).map_err(|e| match e {
            SceneError::Material { message } => {
                SceneError::material(format!("{}: {message}", path.display()))
            }
            other => other,
        })?;
        info!(name = %material.name, path = %path.display(), "loaded material");
        Ok(material)
    }

    /// Parses a material description.
    ///
    /// Lines are `key: value`; blank lines and lines starting with `#` are
    /// skipped. Unknown keys are ignored with a warning.
    pub fn parse(text: &str) -> SceneResult<Self> {
        let mut name = None;
        let mut diffuse = None;
        let mut emissive = None;
        let mut specular = None;
        let mut ambient = None;
        let mut transparency = None;
        let mut shininess = None;
        let mut seen = HashSet::new();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line.split_once(':').ok_or_else(|| {
                SceneError::material(format!("line {line_no}: expected `key: value`"))
            })?;
            let key: String = key.chars().filter(|c| !c.is_whitespace()).collect();
            let value = value.trim();
            if value.is_empty() {
                return Err(SceneError::material(format!("line {line_no}: `{key}` has no value")));
            }
            if !seen.insert(key.clone()) {
                return Err(SceneError::material(format!("line {line_no}: `{key}` given twice")));
            }

            match key.as_str() {
                "name" => name = Some(sanitize_name(value)?),
                "diffuse" => diffuse = Some(parse_rgb(&key, value)?),
                "emissive" => emissive = Some(parse_rgb(&key, value)?),
                "specular" => specular = Some(parse_rgb(&key, value)?),
                "ambient" => ambient = Some(parse_unit(&key, value)?),
                "transparency" => transparency = Some(parse_unit(&key, value)?),
                "shininess" => shininess = Some(parse_unit(&key, value)?),
                _ => warn!(key = %key, line = line_no, "ignoring unknown material key"),
            }
        }

        let name = name.ok_or_else(|| SceneError::material("no `name` given"))?;
        if diffuse.is_none() && specular.is_none() {
            return Err(SceneError::material(format!(
                "material {name} defines neither `diffuse` nor `specular`"
            )));
        }

        Ok(Self {
            name,
            diffuse: diffuse.unwrap_or_default(),
            emissive: emissive.unwrap_or_default(),
            specular: specular.unwrap_or_default(),
            ambient: ambient.unwrap_or_default(),
            transparency: transparency.unwrap_or_default(),
            shininess: shininess.unwrap_or_default(),
        })
    }

    pub fn with_diffuse(mut self, rgb: Rgb) -> SceneResult<Self> {
        self.diffuse = check_rgb("diffuse", rgb)?;
        Ok(self)
    }

    pub fn with_emissive(mut self, rgb: Rgb) -> SceneResult<Self> {
        self.emissive = check_rgb("emissive", rgb)?;
        Ok(self)
    }

    pub fn with_specular(mut self, rgb: Rgb) -> SceneResult<Self> {
        self.specular = check_rgb("specular", rgb)?;
        Ok(self)
    }

    pub fn with_ambient(mut self, value: f64) -> SceneResult<Self> {
        self.ambient = check_unit("ambient", value)?;
        Ok(self)
    }

    pub fn with_transparency(mut self, value: f64) -> SceneResult<Self> {
        self.transparency = check_unit("transparency", value)?;
        Ok(self)
    }

    pub fn with_shininess(mut self, value: f64) -> SceneResult<Self> {
        self.shininess = check_unit("shininess", value)?;
        Ok(self)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn diffuse(&self) -> Rgb {
        self.diffuse
    }

    #[inline]
    pub fn emissive(&self) -> Rgb {
        self.emissive
    }

    #[inline]
    pub fn specular(&self) -> Rgb {
        self.specular
    }

    #[inline]
    pub fn ambient(&self) -> f64 {
        self.ambient
    }

    #[inline]
    pub fn transparency(&self) -> f64 {
        self.transparency
    }

    #[inline]
    pub fn shininess(&self) -> f64 {
        self.shininess
    }

    /// Re-checks every field.
    ///
    /// Deserialized materials bypass the setters; the writer calls this
    /// before emitting a definition.
    pub fn validate(&self) -> SceneResult<()> {
        if sanitize_name(&self.name)? != self.name {
            return Err(SceneError::InvalidName {
                name: self.name.clone(),
            });
        }
        check_rgb("diffuse", self.diffuse)?;
        check_rgb("emissive", self.emissive)?;
        check_rgb("specular", self.specular)?;
        check_unit("ambient", self.ambient)?;
        check_unit("transparency", self.transparency)?;
        check_unit("shininess", self.shininess)?;
        Ok(())
    }

    /// Writes the `Material { ... }` body, opening brace included, at `level`.
    pub(crate) fn write_node<W: Write>(&self, out: &mut W, level: usize) -> io::Result<()> {
        let inner = pad(level + 1);
        writeln!(out, "Material {{")?;
        writeln!(out, "{inner}diffuseColor {}", rgb_text(self.diffuse))?;
        writeln!(out, "{inner}emissiveColor {}", rgb_text(self.emissive))?;
        writeln!(out, "{inner}specularColor {}", rgb_text(self.specular))?;
        writeln!(out, "{inner}ambientIntensity {}", unit_text(self.ambient))?;
        writeln!(out, "{inner}transparency {}", unit_text(self.transparency))?;
        writeln!(out, "{inner}shininess {}", unit_text(self.shininess))?;
        writeln!(out, "{}}}", pad(level))
    }
}

fn unit_text(value: f64) -> String {
    number(value, MATERIAL_PRECISION, 0.0)
}

fn rgb_text(rgb: Rgb) -> String {
    format!("{} {} {}", unit_text(rgb[0]), unit_text(rgb[1]), unit_text(rgb[2]))
}

fn check_unit(key: &str, value: f64) -> SceneResult<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SceneError::material(format!(
            "`{key}` must be within 0..1, got {value}"
        )));
    }
    Ok(value)
}

fn check_rgb(key: &str, rgb: Rgb) -> SceneResult<Rgb> {
    for component in rgb {
        check_unit(key, component)?;
    }
    Ok(rgb)
}

fn parse_unit(key: &str, value: &str) -> SceneResult<f64> {
    let parsed = value
        .parse::<f64>()
        .map_err(|_| SceneError::material(format!("`{key}` is not a number: {value:?}")))?;
    check_unit(key, parsed)
}

fn parse_rgb(key: &str, value: &str) -> SceneResult<Rgb> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(SceneError::material(format!(
            "`{key}` needs three values, got {value:?}"
        )));
    }
    let mut rgb = [0.0; 3];
    for (slot, part) in rgb.iter_mut().zip(parts) {
        *slot = parse_unit(key, part)?;
    }
    Ok(rgb)
}
