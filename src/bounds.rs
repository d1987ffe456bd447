//! Bounding box and centering offset of a node set.

use log::warn;
use nalgebra::Vector3;

use crate::geometry::Point;

/// Ratio between the initial camera distance and the largest Z coordinate.
const CAMERA_DISTANCE_FACTOR: f32 = 1.75;

/// Axis-aligned bounds of a node set together with its centering offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Component-wise minimum over all nodes.
    pub min: Vector3<f32>,
    /// Component-wise maximum over all nodes.
    pub max: Vector3<f32>,
    /// Half the extent, `(max - min) / 2`, subtracted from every placement.
    pub centering_shift: Vector3<f32>,
}

impl Bounds {
    /// Scan `nodes` once for their bounds.
    ///
    /// An empty node set yields all-zero bounds.
    ///
    /// # Examples
    /// ```
    /// use nalgebra::Vector3;
    /// use trussview::{point, Bounds};
    ///
    /// let bounds = Bounds::from_nodes(&[point(0.0, 0.0, 0.0), point(2.0, 4.0, 6.0)]);
    /// assert_eq!(bounds.centering_shift, Vector3::new(1.0, 2.0, 3.0));
    /// ```
    #[must_use]
    pub fn from_nodes(nodes: &[Point]) -> Self {
        let Some(first) = nodes.first() else {
            warn!("computing bounds of an empty node set");
            return Self {
                min: Vector3::zeros(),
                max: Vector3::zeros(),
                centering_shift: Vector3::zeros(),
            };
        };
        let (min, max) = nodes.iter().skip(1).fold(
            (first.to_vector(), first.to_vector()),
            |(min, max), node| {
                let position = node.to_vector();
                (min.inf(&position), max.sup(&position))
            },
        );
        Self {
            min,
            max,
            centering_shift: (max - min) / 2.0,
        }
    }

    /// Full extent of the node set along each axis.
    #[must_use]
    pub fn extent(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Initial camera offset along the view axis, `-1.75 * |max.z|`.
    #[must_use]
    pub fn camera_distance(&self) -> f32 {
        -CAMERA_DISTANCE_FACTOR * self.max.z.abs()
    }
}

/// Compute the bounds and centering offset of `nodes`.
///
/// Returns `(min, max, centering_shift)`.
#[must_use]
pub fn compute_bounds_and_centering(
    nodes: &[Point],
) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
    let bounds = Bounds::from_nodes(nodes);
    (bounds.min, bounds.max, bounds.centering_shift)
}
