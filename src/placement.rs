//! Placement transforms that instance a unit prototype along each element.
//!
//! The prototype (see [`crate::Prototype`]) spans `y in [0, 1]` in its own frame.
//! A placement rotates its `+Y` axis onto the element direction, stretches it to
//! the element length and moves its base onto the first node.

use std::f32::consts::PI;

use log::debug;
use nalgebra::{Matrix4, Translation3, Unit, UnitQuaternion, Vector3};

use crate::errors::GeometryError;
use crate::geometry::{Element, Point};

/// Components of an element direction below which it counts as parallel to global Y.
pub const AXIS_TOLERANCE: f32 = 1.0e-5;

/// Cross-section scale used for the sub-segments of deformed node strips.
pub const DEFORMED_SEGMENT_SCALE: f32 = 0.99;

/// Scale and handedness settings for placement matrices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementOptions {
    /// Scale applied along the prototype's local X axis.
    pub x_scale: f32,
    /// Scale applied along the prototype's local Z axis.
    pub z_scale: f32,
    /// Negate the Z row of every placement, for hosts with a left-handed view space.
    pub mirror_z: bool,
}

impl PlacementOptions {
    /// Options with independent X and Z scale multipliers.
    #[must_use]
    pub const fn new(x_scale: f32, z_scale: f32) -> Self {
        Self {
            x_scale,
            z_scale,
            mirror_z: false,
        }
    }

    /// Options used for deformed sub-segments, slightly thinner than the
    /// original members so both shapes stay visible where they overlap.
    #[must_use]
    pub const fn deformed() -> Self {
        Self::new(DEFORMED_SEGMENT_SCALE, DEFORMED_SEGMENT_SCALE)
    }

    /// Enable or disable Z mirroring.
    #[must_use]
    pub const fn with_mirror_z(mut self, mirror_z: bool) -> Self {
        self.mirror_z = mirror_z;
        self
    }
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// Rigid transform rotating by `angle` radians about `axis` and then
/// translating by `translation`.
///
/// # Examples
/// ```
/// use nalgebra::{Vector3, Vector4};
/// use trussview::rotation_placement;
///
/// let placement = rotation_placement(
///     std::f32::consts::FRAC_PI_2,
///     &Vector3::z(),
///     &Vector3::new(1.0, 0.0, 0.0),
/// );
/// let tip = placement * Vector4::new(0.0, 1.0, 0.0, 1.0);
/// assert!((tip - Vector4::new(0.0, 0.0, 0.0, 1.0)).norm() < 1.0e-6);
/// ```
#[must_use]
pub fn rotation_placement(
    angle: f32,
    axis: &Vector3<f32>,
    translation: &Vector3<f32>,
) -> Matrix4<f32> {
    let rotation = UnitQuaternion::from_axis_angle(&Unit::new_normalize(*axis), angle);
    Translation3::from(*translation).to_homogeneous() * rotation.to_homogeneous()
}

/// Placement of a segment from `start` to `end`.
///
/// A zero-length segment collapses to a zero-height instance at `start`.
fn segment_placement(
    start: &Vector3<f32>,
    end: &Vector3<f32>,
    options: &PlacementOptions,
    centering_shift: &Vector3<f32>,
) -> Matrix4<f32> {
    let dn = end - start;
    let length = dn.norm();
    let translation = start - centering_shift;

    let rotated = if dn.x.abs() < AXIS_TOLERANCE && dn.z.abs() < AXIS_TOLERANCE {
        // Parallel to global Y: Y x dn is unstable, so flip about Z instead.
        let angle = if dn.y < 0.0 { PI } else { 0.0 };
        rotation_placement(angle, &Vector3::z(), &translation)
    } else {
        let y_axis = Vector3::y();
        let axis = y_axis.cross(&dn);
        let angle = (dn.dot(&y_axis) / length).clamp(-1.0, 1.0).acos();
        rotation_placement(angle, &axis, &translation)
    };

    let placement = rotated
        * Matrix4::new_nonuniform_scaling(&Vector3::new(options.x_scale, length, options.z_scale));
    if options.mirror_z {
        Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 1.0, -1.0)) * placement
    } else {
        placement
    }
}

/// Look up the endpoints of `element` in `nodes`.
pub(crate) fn element_endpoints(
    index: usize,
    element: &Element,
    nodes: &[Point],
) -> Result<(Vector3<f32>, Vector3<f32>), GeometryError> {
    let lookup = |node: usize| {
        nodes
            .get(node)
            .map(|point| point.to_vector())
            .ok_or(GeometryError::UnknownNode {
                element: index,
                node,
            })
    };
    Ok((lookup(element.start)?, lookup(element.end)?))
}

/// Build one placement matrix per element, in element order.
///
/// Each matrix rotates the prototype's `+Y` axis onto `end - start`, scales X
/// and Z by the option multipliers and Y by the element length, and translates
/// to `start - centering_shift`.
///
/// # Errors
///
/// Returns [`GeometryError::UnknownNode`] when an element references a missing
/// node and [`GeometryError::ZeroLengthElement`] when its endpoints coincide.
pub fn build_placement_vector(
    nodes: &[Point],
    elements: &[Element],
    options: &PlacementOptions,
    centering_shift: &Vector3<f32>,
) -> Result<Vec<Matrix4<f32>>, GeometryError> {
    let placements = elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let (start, end) = element_endpoints(index, element, nodes)?;
            if (end - start).norm() == 0.0 {
                return Err(GeometryError::ZeroLengthElement { element: index });
            }
            Ok(segment_placement(&start, &end, options, centering_shift))
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("built {} element placements", placements.len());
    Ok(placements)
}

/// Build placements for every consecutive point pair of every strip.
///
/// The result holds `points - 1` matrices per strip, grouped by strip in input
/// order. Coincident strip points produce a zero-height instance rather than an
/// error, so rebuilding at a new deformation scale cannot fail.
#[must_use]
pub fn build_strip_placements(
    strips: &[Vec<Point>],
    options: &PlacementOptions,
    centering_shift: &Vector3<f32>,
) -> Vec<Matrix4<f32>> {
    let placements: Vec<Matrix4<f32>> = strips
        .iter()
        .flat_map(|strip| {
            strip.windows(2).map(|pair| {
                segment_placement(
                    &pair[0].to_vector(),
                    &pair[1].to_vector(),
                    options,
                    centering_shift,
                )
            })
        })
        .collect();
    debug!(
        "built {} deformed segment placements for {} strips",
        placements.len(),
        strips.len()
    );
    placements
}
