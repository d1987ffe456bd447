//! Render-ready geometry for a structure in original and deformed state.
//!
//! [`SceneGeometry`] owns the validated input and every derived output. Changing
//! the deformation scale rebuilds the deformed geometry wholesale; nothing is
//! updated incrementally.

use log::{debug, warn};
use nalgebra::{Matrix4, Vector3};

use crate::bounds::Bounds;
use crate::errors::GeometryError;
use crate::geometry::{Displacement, Point};
use crate::interpolation::{interpolate_all_strips, InterpolationOptions};
use crate::placement::{build_placement_vector, build_strip_placements, PlacementOptions};
use crate::structure::Structure;

/// Smallest deformation scale offered to interactive users.
pub const MIN_DEFORMATION_SCALE: f32 = 1.0e-4;

/// Largest deformation scale offered to interactive users.
pub const MAX_DEFORMATION_SCALE: f32 = 1.0e8;

/// Clamp a user-supplied deformation scale to the interactive range.
#[must_use]
pub fn clamp_deformation_scale(scale: f32) -> f32 {
    scale.clamp(MIN_DEFORMATION_SCALE, MAX_DEFORMATION_SCALE)
}

/// Settings shared by original and deformed geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneOptions {
    /// Node strip generation settings.
    pub interpolation: InterpolationOptions,
    /// Negate the Z row of every placement.
    pub mirror_z: bool,
}

/// Deformed node strips and the placements that instance them.
#[derive(Clone, Debug, PartialEq)]
pub struct DeformedGeometry {
    /// Deformation scale the geometry was built with.
    pub scale: f32,
    /// One strip per element, in element order.
    pub strips: Vec<Vec<Point>>,
    /// `points - 1` placements per element, grouped by element.
    pub placements: Vec<Matrix4<f32>>,
}

impl DeformedGeometry {
    /// Build the deformed geometry of `structure` at `scale`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DimensionMismatch`] when there is not exactly one
    /// displacement per node, [`GeometryError::InvalidScale`] for a non-finite
    /// scale and [`GeometryError::InvalidInterpolationCount`] for fewer than two
    /// strip points.
    pub fn compute(
        structure: &Structure,
        displacements: &[Displacement],
        scale: f32,
        options: &SceneOptions,
        centering_shift: &Vector3<f32>,
    ) -> Result<Self, GeometryError> {
        let strips = interpolate_all_strips(
            structure.nodes(),
            structure.elements(),
            displacements,
            scale,
            &options.interpolation,
        )?;
        let placement_options = PlacementOptions::deformed().with_mirror_z(options.mirror_z);
        let placements = build_strip_placements(&strips, &placement_options, centering_shift);
        Ok(Self {
            scale,
            strips,
            placements,
        })
    }

    /// Largest distance of any strip point from the undeformed centreline.
    ///
    /// Returns the element position and the distance, or `None` without strips.
    #[must_use]
    pub fn max_deviation(&self, structure: &Structure) -> Option<(usize, f32)> {
        self.strips
            .iter()
            .zip(structure.elements())
            .enumerate()
            .map(|(index, (strip, element))| {
                let start = structure.nodes()[element.start].to_vector();
                let end = structure.nodes()[element.end].to_vector();
                let last = strip.len().saturating_sub(1).max(1) as f32;
                let deviation = strip
                    .iter()
                    .enumerate()
                    .map(|(k, point)| {
                        (point.to_vector() - start.lerp(&end, k as f32 / last)).norm()
                    })
                    .fold(0.0_f32, f32::max);
                (index, deviation)
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Explicit scene context: validated structure plus everything derived from it.
#[derive(Clone, Debug)]
pub struct SceneGeometry {
    /// The validated structure.
    structure: Structure,
    /// Nodal displacements, one per node, if supplied.
    displacements: Option<Vec<Displacement>>,
    /// Settings used for every rebuild.
    options: SceneOptions,
    /// Bounds of the undeformed nodes.
    bounds: Bounds,
    /// One placement per element for the original configuration.
    original: Vec<Matrix4<f32>>,
    /// Deformed geometry, present when displacements were supplied.
    deformed: Option<DeformedGeometry>,
}

impl SceneGeometry {
    /// Build original and, with displacements, deformed geometry.
    ///
    /// # Errors
    ///
    /// Returns every error of [`DeformedGeometry::compute`]. All of them are
    /// raised here, at load time.
    ///
    /// # Examples
    /// ```
    /// use nalgebra::Vector3;
    /// use trussview::{point, Displacement, Element, SceneGeometry, SceneOptions, Structure};
    ///
    /// let structure = Structure::new(
    ///     vec![point(0.0, 0.0, 0.0), point(4.0, 0.0, 0.0)],
    ///     vec![Element::new(0, 1, Vector3::y())],
    /// )?;
    /// let displacements = vec![
    ///     Displacement::default(),
    ///     Displacement::translation_only(0.0, -0.1, 0.0),
    /// ];
    /// let mut scene = SceneGeometry::build(structure, Some(displacements), 1.0, SceneOptions::default())?;
    /// assert_eq!(scene.original_placements().len(), 1);
    /// assert_eq!(scene.deformed().map(|d| d.placements.len()), Some(4));
    ///
    /// scene.set_deformation_scale(10.0)?;
    /// let tip = scene.deformed().map(|d| d.strips[0][4]);
    /// assert!(tip.is_some_and(|tip| (tip.y + 1.0).abs() < 1.0e-5));
    /// # Ok::<(), trussview::GeometryError>(())
    /// ```
    pub fn build(
        structure: Structure,
        displacements: Option<Vec<Displacement>>,
        scale: f32,
        options: SceneOptions,
    ) -> Result<Self, GeometryError> {
        let bounds = structure.bounds();
        let placement_options = PlacementOptions::default().with_mirror_z(options.mirror_z);
        let original = build_placement_vector(
            structure.nodes(),
            structure.elements(),
            &placement_options,
            &bounds.centering_shift,
        )?;
        let deformed = displacements
            .as_deref()
            .map(|displacements| {
                DeformedGeometry::compute(
                    &structure,
                    displacements,
                    scale,
                    &options,
                    &bounds.centering_shift,
                )
            })
            .transpose()?;
        debug!(
            "scene built: {} original placements, deformed geometry {}",
            original.len(),
            if deformed.is_some() { "present" } else { "absent" }
        );
        Ok(Self {
            structure,
            displacements,
            options,
            bounds,
            original,
            deformed,
        })
    }

    /// Rebuild the deformed geometry at a new scale.
    ///
    /// Without displacements this only logs a warning.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidScale`] for a non-finite scale; the
    /// previous geometry is kept in that case.
    pub fn set_deformation_scale(&mut self, scale: f32) -> Result<(), GeometryError> {
        let Some(displacements) = self.displacements.as_deref() else {
            warn!("cannot set deformation scale: no displacements provided");
            return Ok(());
        };
        let deformed = DeformedGeometry::compute(
            &self.structure,
            displacements,
            scale,
            &self.options,
            &self.bounds.centering_shift,
        )?;
        self.deformed = Some(deformed);
        Ok(())
    }

    /// Current deformation scale, if displacements were supplied.
    #[must_use]
    pub fn deformation_scale(&self) -> Option<f32> {
        self.deformed.as_ref().map(|deformed| deformed.scale)
    }

    /// The validated structure.
    #[must_use]
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Bounds of the undeformed structure.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// One placement per element for the original configuration.
    #[must_use]
    pub fn original_placements(&self) -> &[Matrix4<f32>] {
        &self.original
    }

    /// Deformed geometry, when displacements were supplied.
    #[must_use]
    pub fn deformed(&self) -> Option<&DeformedGeometry> {
        self.deformed.as_ref()
    }
}
