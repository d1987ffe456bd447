#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

/// Bounding box, centering offset and camera distance
mod bounds;
/// Error types
mod errors;
/// Element local frames and the 12x12 block transform
mod frame;
/// Points, displacements and elements
mod geometry;
/// Cubic Hermite deformed-shape interpolation
mod interpolation;
/// JSON job loading
mod job;
/// Placement transforms for prototype instancing
mod placement;
/// Prototype meshes
mod prototype;
/// Original and deformed render geometry
mod scene;
/// Validated structures and their topology
mod structure;

pub use bounds::{compute_bounds_and_centering, Bounds};
pub use errors::{GeometryError, JobError};
pub use frame::{
    BlockTransform, ElementVector, LocalFrame, ReferenceHandling, ELEMENT_DOFS, FRAME_TOLERANCE,
};
pub use geometry::{displacement, point, Displacement, Dof, Element, Point, DOFS_PER_NODE};
pub use interpolation::{
    interpolate_all_strips, interpolate_strip, HermiteWeights, InterpolationOptions,
    RotationSignConvention, DEFAULT_STRIP_POINTS,
};
pub use job::{Color, Job, SectionProperties};
pub use placement::{
    build_placement_vector, build_strip_placements, rotation_placement, PlacementOptions,
    AXIS_TOLERANCE, DEFORMED_SEGMENT_SCALE,
};
pub use prototype::{
    Mesh, Prototype, DEFAULT_RADIUS, DEFAULT_RINGS, DEFAULT_SECTORS, MAX_SUBDIVISIONS,
};
pub use scene::{
    clamp_deformation_scale, DeformedGeometry, SceneGeometry, SceneOptions,
    MAX_DEFORMATION_SCALE, MIN_DEFORMATION_SCALE,
};
pub use structure::Structure;
