//! Loading structures from JSON job descriptions.
//!
//! A job file is a single JSON object with row-oriented tables:
//!
//! ```json
//! {
//!   "nodes": [[0.0, 0.0, 0.0], [0.0, 0.0, 10.0]],
//!   "elems": [[0, 1]],
//!   "props": [[1000.0, 100.0, 100.0, 200.0, 0.0, 1.0, 0.0]],
//!   "displacements": [[0, 0, 0, 0, 0, 0], [0, 1, 0, 0, 0, 0]],
//!   "colors": [[1.0, 0.0, 0.0, 1.0]]
//! }
//! ```
//!
//! `props` rows are `[EA, EIz, EIy, GJ, nx, ny, nz]` where the last three
//! entries are the element's reference vector. `displacements` and `colors`
//! may be omitted.

use std::fs;
use std::path::Path;

use log::info;
use nalgebra::Vector3;
use serde::Deserialize;

use crate::errors::{GeometryError, JobError};
use crate::geometry::{Displacement, Element, Point, DOFS_PER_NODE};
use crate::scene::{SceneGeometry, SceneOptions};
use crate::structure::Structure;

/// Element colour as `[red, green, blue, alpha]`, each in `[0, 1]`.
pub type Color = [f32; 4];

/// Section properties carried alongside each element.
///
/// They are not used for geometry; hosts may use them for colouring or labels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SectionProperties {
    /// Extensional stiffness.
    pub ea: f32,
    /// Bending stiffness about the local z-axis.
    pub eiz: f32,
    /// Bending stiffness about the local y-axis.
    pub eiy: f32,
    /// Torsional stiffness.
    pub gj: f32,
}

/// Raw tables as they appear in the file.
#[derive(Debug, Deserialize)]
struct JobFile {
    /// `[x, y, z]` rows.
    nodes: Vec<Vec<f32>>,
    /// `[n1, n2]` rows.
    elems: Vec<Vec<usize>>,
    /// `[EA, EIz, EIy, GJ, nx, ny, nz]` rows.
    props: Vec<Vec<f32>>,
    /// `[dx, dy, dz, rx, ry, rz]` rows, empty when absent.
    #[serde(default)]
    displacements: Vec<Vec<f32>>,
    /// `[r, g, b, a]` rows, empty when absent.
    #[serde(default)]
    colors: Vec<Vec<f32>>,
}

/// Check that every row of `table` holds exactly `width` values.
fn check_rows<T>(table: &'static str, rows: &[Vec<T>], width: usize) -> Result<(), JobError> {
    match rows.iter().position(|row| row.len() != width) {
        Some(row) => Err(JobError::InvalidRow {
            table,
            row,
            expected: width,
            found: rows[row].len(),
        }),
        None => Ok(()),
    }
}

/// A loaded and validated job.
#[derive(Clone, Debug)]
pub struct Job {
    /// The validated structure.
    pub structure: Structure,
    /// Section properties, parallel to the element list.
    pub properties: Vec<SectionProperties>,
    /// One displacement per node, if supplied.
    pub displacements: Option<Vec<Displacement>>,
    /// One colour per element, if supplied.
    pub colors: Option<Vec<Color>>,
}

impl Job {
    /// Parse and validate a job description.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Json`] for malformed JSON, [`JobError::MissingTable`]
    /// when `nodes`, `elems` or `props` is empty, [`JobError::InvalidRow`] for
    /// rows of the wrong width and [`JobError::Geometry`] for mismatched table
    /// lengths or an invalid structure.
    ///
    /// # Examples
    /// ```
    /// use trussview::Job;
    ///
    /// let job = Job::from_json_str(
    ///     r#"{
    ///         "nodes": [[0, 0, 0], [1, 0, 0]],
    ///         "elems": [[0, 1]],
    ///         "props": [[1, 1, 1, 1, 0, 0, 1]]
    ///     }"#,
    /// )?;
    /// assert_eq!(job.structure.element_count(), 1);
    /// assert!(job.displacements.is_none());
    /// # Ok::<(), trussview::JobError>(())
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, JobError> {
        let file: JobFile = serde_json::from_str(text)?;

        for (table, empty) in [
            ("nodes", file.nodes.is_empty()),
            ("elems", file.elems.is_empty()),
            ("props", file.props.is_empty()),
        ] {
            if empty {
                return Err(JobError::MissingTable(table));
            }
        }
        check_rows("nodes", &file.nodes, 3)?;
        check_rows("elems", &file.elems, 2)?;
        check_rows("props", &file.props, 7)?;
        check_rows("displacements", &file.displacements, DOFS_PER_NODE)?;
        check_rows("colors", &file.colors, 4)?;

        if file.props.len() != file.elems.len() {
            return Err(GeometryError::DimensionMismatch {
                what: "props rows per element",
                expected: file.elems.len(),
                found: file.props.len(),
            }
            .into());
        }
        if !file.displacements.is_empty() && file.displacements.len() != file.nodes.len() {
            return Err(GeometryError::DimensionMismatch {
                what: "displacements per node",
                expected: file.nodes.len(),
                found: file.displacements.len(),
            }
            .into());
        }
        if !file.colors.is_empty() && file.colors.len() != file.elems.len() {
            return Err(GeometryError::DimensionMismatch {
                what: "colors per element",
                expected: file.elems.len(),
                found: file.colors.len(),
            }
            .into());
        }

        let nodes = file
            .nodes
            .iter()
            .map(|row| Point::new(row[0], row[1], row[2]))
            .collect();
        let elements = file
            .elems
            .iter()
            .zip(&file.props)
            .map(|(connectivity, props)| {
                Element::new(
                    connectivity[0],
                    connectivity[1],
                    Vector3::new(props[4], props[5], props[6]),
                )
            })
            .collect();
        let properties = file
            .props
            .iter()
            .map(|props| SectionProperties {
                ea: props[0],
                eiz: props[1],
                eiy: props[2],
                gj: props[3],
            })
            .collect();
        let displacements = (!file.displacements.is_empty()).then(|| {
            file.displacements
                .iter()
                .map(|row| Displacement::new(row[0], row[1], row[2], row[3], row[4], row[5]))
                .collect()
        });
        let colors = (!file.colors.is_empty()).then(|| {
            file.colors
                .iter()
                .map(|row| [row[0], row[1], row[2], row[3]])
                .collect()
        });

        Ok(Self {
            structure: Structure::new(nodes, elements)?,
            properties,
            displacements,
            colors,
        })
    }

    /// Read and validate a job file.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Io`] when the file cannot be read and every error of
    /// [`Job::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, JobError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let job = Self::from_json_str(&text)?;
        info!(
            "loaded job {}: {} nodes, {} elements, displacements {}",
            path.display(),
            job.structure.node_count(),
            job.structure.element_count(),
            if job.displacements.is_some() { "present" } else { "absent" }
        );
        Ok(job)
    }

    /// Build the render geometry for this job at deformation `scale`.
    ///
    /// # Errors
    ///
    /// Returns every error of [`SceneGeometry::build`].
    pub fn into_scene(self, scale: f32, options: SceneOptions) -> Result<SceneGeometry, GeometryError> {
        SceneGeometry::build(self.structure, self.displacements, scale, options)
    }
}
