//! Fundamental geometric types for structure visualization.

use nalgebra::{Vector3, Vector6};

/// Number of degrees of freedom carried by every node.
pub const DOFS_PER_NODE: usize = 6;

/// Position in three dimensional space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f32,
    /// Distance along the global Y axis.
    pub y: f32,
    /// Distance along the global Z axis.
    pub z: f32,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f32>> for Point {
    fn from(value: Vector3<f32>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Point> for Vector3<f32> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

impl From<[f32; 3]> for Point {
    fn from(value: [f32; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

/// Ordering of the six nodal degrees of freedom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dof {
    /// Displacement along the global x-axis.
    DisplacementX,
    /// Displacement along the global y-axis.
    DisplacementY,
    /// Displacement along the global z-axis.
    DisplacementZ,
    /// Rotation about the global x-axis.
    RotationX,
    /// Rotation about the global y-axis.
    RotationY,
    /// Rotation about the global z-axis.
    RotationZ,
}

impl Dof {
    /// All degrees of freedom in storage order.
    pub const ALL: [Dof; DOFS_PER_NODE] = [
        Dof::DisplacementX,
        Dof::DisplacementY,
        Dof::DisplacementZ,
        Dof::RotationX,
        Dof::RotationY,
        Dof::RotationZ,
    ];

    /// Position of this degree of freedom inside a nodal 6-vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Nodal displacement given as `[dx, dy, dz, rx, ry, rz]`.
///
/// Translations are along, and rotations about, the global axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Displacement {
    /// Translation along the global X axis.
    pub dx: f32,
    /// Translation along the global Y axis.
    pub dy: f32,
    /// Translation along the global Z axis.
    pub dz: f32,
    /// Rotation about the global X axis.
    pub rx: f32,
    /// Rotation about the global Y axis.
    pub ry: f32,
    /// Rotation about the global Z axis.
    pub rz: f32,
}

impl Displacement {
    /// Create a [`Displacement`] with explicit components.
    #[must_use]
    pub const fn new(dx: f32, dy: f32, dz: f32, rx: f32, ry: f32, rz: f32) -> Self {
        Self {
            dx,
            dy,
            dz,
            rx,
            ry,
            rz,
        }
    }

    /// Pure translation with no rotation.
    #[must_use]
    pub const fn translation_only(dx: f32, dy: f32, dz: f32) -> Self {
        Self::new(dx, dy, dz, 0.0, 0.0, 0.0)
    }

    /// Translational part of the displacement.
    #[must_use]
    pub fn translation(self) -> Vector3<f32> {
        Vector3::new(self.dx, self.dy, self.dz)
    }

    /// Rotational part of the displacement.
    #[must_use]
    pub fn rotation(self) -> Vector3<f32> {
        Vector3::new(self.rx, self.ry, self.rz)
    }

    /// Component for a single degree of freedom.
    #[must_use]
    pub fn component(self, dof: Dof) -> f32 {
        self.to_vector()[dof.index()]
    }

    /// Convert the displacement into an algebraic 6-vector.
    #[must_use]
    pub fn to_vector(self) -> Vector6<f32> {
        Vector6::new(self.dx, self.dy, self.dz, self.rx, self.ry, self.rz)
    }
}

impl From<[f32; DOFS_PER_NODE]> for Displacement {
    fn from(value: [f32; DOFS_PER_NODE]) -> Self {
        Self::new(value[0], value[1], value[2], value[3], value[4], value[5])
    }
}

impl From<Vector6<f32>> for Displacement {
    fn from(value: Vector6<f32>) -> Self {
        Self::new(value[0], value[1], value[2], value[3], value[4], value[5])
    }
}

/// A two-node beam element.
///
/// `reference` points along the element's local Y axis; together with the axis
/// `end - start` it fixes the bending planes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Element {
    /// Index of the first node.
    pub start: usize,
    /// Index of the second node.
    pub end: usize,
    /// Local reference ("normal") vector, not necessarily normalized.
    pub reference: Vector3<f32>,
}

impl Element {
    /// Create an [`Element`] joining `start` to `end`.
    #[must_use]
    pub fn new(start: usize, end: usize, reference: Vector3<f32>) -> Self {
        Self {
            start,
            end,
            reference,
        }
    }

    /// Node indices as a `[start, end]` pair.
    #[must_use]
    pub const fn node_numbers(&self) -> [usize; 2] {
        [self.start, self.end]
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use trussview::point;
///
/// let origin = point(0.0, 0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f32, y: f32, z: f32) -> Point {
    Point::new(x, y, z)
}

/// Convenience helper for creating [`Displacement`] instances.
///
/// # Examples
/// ```
/// use trussview::displacement;
///
/// let delta = displacement(0.0, 1.0, 0.0, 0.0, 0.0, 0.1);
/// assert_eq!(delta.dy, 1.0);
/// assert_eq!(delta.rz, 0.1);
/// ```
#[must_use]
pub const fn displacement(dx: f32, dy: f32, dz: f32, rx: f32, ry: f32, rz: f32) -> Displacement {
    Displacement::new(dx, dy, dz, rx, ry, rz)
}
