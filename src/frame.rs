//! Local coordinate frames for two-node beam elements.
//!
//! A frame is built from the element's axial direction and a user-supplied
//! reference ("normal") vector that points along the element's local Y axis.
//! The local Z axis is always derived as `normalize(nx x ny)`.

use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

/// Number of degrees of freedom of a two-node beam element.
pub const ELEMENT_DOFS: usize = 12;

/// 12x12 block rotation acting on a two-node element's displacement vector.
pub type BlockTransform = SMatrix<f32, ELEMENT_DOFS, ELEMENT_DOFS>;

/// Twelve-component element displacement `[d1, r1, d2, r2]`.
pub type ElementVector = SVector<f32, ELEMENT_DOFS>;

/// Smallest admissible `|nx x ny|` before a frame is considered degenerate.
pub const FRAME_TOLERANCE: f32 = 1.0e-5;

/// How the reference vector is turned into the local Y axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReferenceHandling {
    /// Use the normalized reference vector as given, even when it is not
    /// perpendicular to the element axis. Only `nz` is derived.
    #[default]
    AsGiven,
    /// Replace the reference vector with `nz x nx`, making the triad orthonormal.
    Orthogonalized,
}

/// Local triad `{nx, ny, nz}` of a beam element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalFrame {
    /// Unit vector along the element axis.
    pub nx: Vector3<f32>,
    /// Local Y axis.
    pub ny: Vector3<f32>,
    /// Unit local Z axis.
    pub nz: Vector3<f32>,
}

impl LocalFrame {
    /// Build the frame for an element with axial direction `axis` and reference
    /// vector `reference`. Neither argument needs to be normalized.
    ///
    /// Returns `None` when either vector is zero or when the reference vector is
    /// parallel to the axis within [`FRAME_TOLERANCE`].
    ///
    /// # Examples
    /// ```
    /// use nalgebra::Vector3;
    /// use trussview::{LocalFrame, ReferenceHandling};
    ///
    /// let frame = LocalFrame::new(Vector3::x(), Vector3::y(), ReferenceHandling::AsGiven)
    ///     .expect("perpendicular reference vector");
    /// assert_eq!(frame.nz, Vector3::z());
    ///
    /// assert!(LocalFrame::new(Vector3::x(), Vector3::x() * 2.0, ReferenceHandling::AsGiven).is_none());
    /// ```
    #[must_use]
    pub fn new(
        axis: Vector3<f32>,
        reference: Vector3<f32>,
        handling: ReferenceHandling,
    ) -> Option<Self> {
        let nx = axis.try_normalize(0.0)?;
        let ny = reference.try_normalize(0.0)?;
        let cross = nx.cross(&ny);
        if cross.norm() <= FRAME_TOLERANCE {
            return None;
        }
        let nz = cross.normalize();
        let ny = match handling {
            ReferenceHandling::AsGiven => ny,
            ReferenceHandling::Orthogonalized => nz.cross(&nx),
        };
        Some(Self { nx, ny, nz })
    }

    /// Cosine of the angle between the local Y axis and the element axis.
    ///
    /// Zero for an orthogonal triad.
    #[must_use]
    pub fn skew(&self) -> f32 {
        self.nx.dot(&self.ny)
    }

    /// Transform components: the 3x3 matrix with rows `nx, ny, nz`.
    ///
    /// Rotates a global vector into the local frame.
    #[must_use]
    pub fn components(&self) -> Matrix3<f32> {
        Matrix3::from_rows(&[self.nx.transpose(), self.ny.transpose(), self.nz.transpose()])
    }

    /// Local-to-global transform for a single vector.
    ///
    /// This is a true inverse, not the transpose, since `ny` need not be
    /// orthogonal to `nx`. Returns `None` if the components are singular.
    #[must_use]
    pub fn inverse_components(&self) -> Option<Matrix3<f32>> {
        self.components().try_inverse()
    }

    /// 12x12 block-diagonal transform with four copies of [`Self::components`].
    ///
    /// Blocks act on translation-node1, rotation-node1, translation-node2 and
    /// rotation-node2 respectively.
    #[must_use]
    pub fn block_transform(&self) -> BlockTransform {
        let components = self.components();
        let mut transform = BlockTransform::zeros();
        for block in 0..4 {
            let offset = block * 3;
            transform
                .fixed_view_mut::<3, 3>(offset, offset)
                .copy_from(&components);
        }
        transform
    }

    /// Map the global element displacement vector into local coordinates.
    #[must_use]
    pub fn to_local(&self, global: &ElementVector) -> ElementVector {
        self.block_transform() * global
    }
}
