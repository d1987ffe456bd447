//! Deformed-shape interpolation for two-node beam elements.
//!
//! Nodal displacements are rotated into each element's local frame, where the
//! axial component is interpolated linearly and the two transverse components
//! with cubic Hermite shape functions (value and slope at both ends). The local
//! offsets are then rotated back to global space and added, scaled, to the
//! undeformed centreline.
//!
//! See <https://en.wikipedia.org/wiki/Cubic_Hermite_spline> and
//! <https://en.wikipedia.org/wiki/Euler%E2%80%93Bernoulli_beam_theory>.

use log::debug;
use nalgebra::Vector3;

use crate::errors::GeometryError;
use crate::frame::{ElementVector, LocalFrame, ReferenceHandling};
use crate::geometry::{Displacement, Element, Point, DOFS_PER_NODE};
use crate::placement::element_endpoints;

/// Number of points per node strip unless configured otherwise.
pub const DEFAULT_STRIP_POINTS: usize = 5;

/// Sign applied to rotations about the local Y axis when bending in the local
/// XZ plane.
///
/// For a right-handed frame the slope of the local Z deflection is `-theta_y`,
/// while the slope of the local Y deflection is `+theta_z`. Historical data sets
/// were produced with `+theta_y` for both planes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RotationSignConvention {
    /// Use `+theta_y` as the slope of the local Z deflection.
    #[default]
    Legacy,
    /// Use `-theta_y`, the right-handed Euler-Bernoulli relation.
    BeamTheory,
}

impl RotationSignConvention {
    /// Factor applied to local Y rotations in the XZ bending plane.
    fn ry_sign(self) -> f32 {
        match self {
            RotationSignConvention::Legacy => 1.0,
            RotationSignConvention::BeamTheory => -1.0,
        }
    }
}

/// Parameters controlling node strip generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterpolationOptions {
    /// Number of points per strip, at least 2.
    pub points: usize,
    /// How the element reference vector becomes the local Y axis.
    pub reference: ReferenceHandling,
    /// Sign convention for local Y rotations.
    pub rotation_sign: RotationSignConvention,
}

impl InterpolationOptions {
    /// Use `points` points per strip.
    #[must_use]
    pub const fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// Use the given reference vector handling.
    #[must_use]
    pub const fn with_reference(mut self, reference: ReferenceHandling) -> Self {
        self.reference = reference;
        self
    }

    /// Use the given rotation sign convention.
    #[must_use]
    pub const fn with_rotation_sign(mut self, rotation_sign: RotationSignConvention) -> Self {
        self.rotation_sign = rotation_sign;
        self
    }
}

impl Default for InterpolationOptions {
    fn default() -> Self {
        Self {
            points: DEFAULT_STRIP_POINTS,
            reference: ReferenceHandling::AsGiven,
            rotation_sign: RotationSignConvention::Legacy,
        }
    }
}

/// Cubic Hermite shape functions evaluated at one parameter value.
///
/// `h2` and `h4` multiply end rotations and already include the element length,
/// because the parameter runs over `[0, 1]` rather than `[0, L]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HermiteWeights {
    /// Weight of the start value.
    pub h1: f32,
    /// Weight of the start slope.
    pub h2: f32,
    /// Weight of the end value.
    pub h3: f32,
    /// Weight of the end slope.
    pub h4: f32,
}

impl HermiteWeights {
    /// Evaluate the shape functions at `t` for an element of length `length`.
    ///
    /// # Examples
    /// ```
    /// use trussview::HermiteWeights;
    ///
    /// let weights = HermiteWeights::at(0.5, 10.0);
    /// assert_eq!(weights.h1, 0.5);
    /// assert_eq!(weights.h3, 0.5);
    /// assert_eq!(weights.h2, 1.25);
    /// assert_eq!(weights.h4, -1.25);
    /// ```
    #[must_use]
    pub fn at(t: f32, length: f32) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        Self {
            h1: 1.0 - 3.0 * t2 + 2.0 * t3,
            h2: length * (t - 2.0 * t2 + t3),
            h3: 3.0 * t2 - 2.0 * t3,
            h4: length * (-t2 + t3),
        }
    }

    /// Blend end values `v1`, `v2` and end slopes `theta1`, `theta2`.
    #[must_use]
    pub fn blend(&self, v1: f32, theta1: f32, v2: f32, theta2: f32) -> f32 {
        self.h1 * v1 + self.h2 * theta1 + self.h3 * v2 + self.h4 * theta2
    }
}

/// Reject scales that are NaN or infinite.
fn check_scale(scale: f32) -> Result<(), GeometryError> {
    if scale.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::InvalidScale(scale))
    }
}

/// Strip for a single element; `index` is only used for error reporting.
#[allow(clippy::too_many_arguments)]
fn element_strip(
    index: usize,
    start: &Vector3<f32>,
    end: &Vector3<f32>,
    reference: &Vector3<f32>,
    start_displacement: &Displacement,
    end_displacement: &Displacement,
    scale: f32,
    options: &InterpolationOptions,
) -> Result<Vec<Point>, GeometryError> {
    let axis = end - start;
    let length = axis.norm();
    if length == 0.0 {
        return Err(GeometryError::ZeroLengthElement { element: index });
    }
    let frame = LocalFrame::new(axis, *reference, options.reference)
        .ok_or(GeometryError::DegenerateFrame { element: index })?;
    let inverse = frame
        .inverse_components()
        .ok_or(GeometryError::DegenerateFrame { element: index })?;

    let mut global = ElementVector::zeros();
    global
        .fixed_rows_mut::<DOFS_PER_NODE>(0)
        .copy_from(&start_displacement.to_vector());
    global
        .fixed_rows_mut::<DOFS_PER_NODE>(DOFS_PER_NODE)
        .copy_from(&end_displacement.to_vector());
    let local = frame.to_local(&global);

    let ry_sign = options.rotation_sign.ry_sign();
    let last = (options.points - 1) as f32;
    let strip = (0..options.points)
        .map(|k| {
            let t = k as f32 / last;
            let weights = HermiteWeights::at(t, length);
            let local_offset = Vector3::new(
                local[0] * (1.0 - t) + local[6] * t,
                weights.blend(local[1], local[5], local[7], local[11]),
                weights.blend(local[2], ry_sign * local[4], local[8], ry_sign * local[10]),
            );
            Point::from(start.lerp(end, t) + scale * (inverse * local_offset))
        })
        .collect();
    Ok(strip)
}

/// Interpolate the deformed centreline of one element.
///
/// Returns `options.points` points; the first lies at `node1` plus the scaled
/// start translation and the last at `node2` plus the scaled end translation.
/// Errors are reported against element `0`.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidInterpolationCount`] for fewer than two
/// points, [`GeometryError::InvalidScale`] for a non-finite scale,
/// [`GeometryError::ZeroLengthElement`] when the nodes coincide and
/// [`GeometryError::DegenerateFrame`] when `reference` is parallel to the axis.
///
/// # Examples
/// ```
/// use nalgebra::Vector3;
/// use trussview::{interpolate_strip, point, Displacement, InterpolationOptions};
///
/// let strip = interpolate_strip(
///     &point(0.0, 0.0, 0.0),
///     &point(0.0, 0.0, 10.0),
///     &Vector3::y(),
///     &Displacement::default(),
///     &Displacement::translation_only(0.0, 1.0, 0.0),
///     1.0,
///     &InterpolationOptions::default(),
/// )
/// .expect("valid element");
/// assert_eq!(strip.len(), 5);
/// assert!((strip[4].y - 1.0).abs() < 1.0e-6);
/// ```
pub fn interpolate_strip(
    node1: &Point,
    node2: &Point,
    reference: &Vector3<f32>,
    disp1: &Displacement,
    disp2: &Displacement,
    scale: f32,
    options: &InterpolationOptions,
) -> Result<Vec<Point>, GeometryError> {
    if options.points < 2 {
        return Err(GeometryError::InvalidInterpolationCount(options.points));
    }
    check_scale(scale)?;
    element_strip(
        0,
        &node1.to_vector(),
        &node2.to_vector(),
        reference,
        disp1,
        disp2,
        scale,
        options,
    )
}

/// Interpolate one node strip per element, in element order.
///
/// # Errors
///
/// Returns [`GeometryError::DimensionMismatch`] when `displacements` and
/// `nodes` differ in length, plus every error of [`interpolate_strip`] and
/// [`GeometryError::UnknownNode`], each tagged with the failing element.
pub fn interpolate_all_strips(
    nodes: &[Point],
    elements: &[Element],
    displacements: &[Displacement],
    scale: f32,
    options: &InterpolationOptions,
) -> Result<Vec<Vec<Point>>, GeometryError> {
    if displacements.len() != nodes.len() {
        return Err(GeometryError::DimensionMismatch {
            what: "displacements per node",
            expected: nodes.len(),
            found: displacements.len(),
        });
    }
    if options.points < 2 {
        return Err(GeometryError::InvalidInterpolationCount(options.points));
    }
    check_scale(scale)?;

    let strips = elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let (start, end) = element_endpoints(index, element, nodes)?;
            element_strip(
                index,
                &start,
                &end,
                &element.reference,
                &displacements[element.start],
                &displacements[element.end],
                scale,
                options,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        "interpolated {} node strips with {} points at scale {}",
        strips.len(),
        options.points,
        scale
    );
    Ok(strips)
}
