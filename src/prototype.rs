//! Prototype meshes instanced by placement transforms.
//!
//! Meshes are indexed triangle lists with counter-clockwise winding seen from
//! outside, ready to be uploaded once and drawn instanced with one placement
//! matrix per element or strip segment.

use std::f32::consts::PI;

use nalgebra::{Matrix4, Point3};

use crate::geometry::Point;

/// Radius of the default prototypes.
pub const DEFAULT_RADIUS: f32 = 0.05;

/// Number of angular subdivisions of the default prototypes.
pub const DEFAULT_SECTORS: u16 = 25;

/// Number of latitude rings of the default sphere.
pub const DEFAULT_RINGS: u16 = 25;

/// Largest number of rings or sectors a prototype is built with.
///
/// At this cap a sphere has 65536 vertices, the most that `u16` indices can
/// address.
pub const MAX_SUBDIVISIONS: u16 = 256;

/// Indexed triangle mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<[f32; 3]>,
    /// Unit vertex normals, parallel to `vertices`.
    pub normals: Vec<[f32; 3]>,
    /// Triangle vertex indices, three per triangle.
    pub indices: Vec<u16>,
}

impl Mesh {
    /// Return the number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Apply a placement transform to every vertex.
    #[must_use]
    pub fn transform_vertices(&self, placement: &Matrix4<f32>) -> Vec<Point> {
        self.vertices
            .iter()
            .map(|&[x, y, z]| Point::from(placement.transform_point(&Point3::new(x, y, z)).coords))
            .collect()
    }

    /// Append a vertex and return its index.
    fn push(&mut self, vertex: [f32; 3], normal: [f32; 3]) -> usize {
        self.vertices.push(vertex);
        self.normals.push(normal);
        self.vertices.len() - 1
    }

    /// Append a triangle given by three vertex indices.
    fn triangle(&mut self, a: usize, b: usize, c: usize) {
        for index in [a, b, c] {
            self.indices.push(
                u16::try_from(index).expect("capped subdivisions keep vertex indices within u16"),
            );
        }
    }
}

/// Closed set of shapes that can be instanced along elements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Prototype {
    /// Capped cylinder of unit height along `+Y`, base at the origin.
    Cylinder {
        /// Cylinder radius.
        radius: f32,
        /// Angular subdivisions including the closing seam, between 4 and
        /// [`MAX_SUBDIVISIONS`].
        sectors: u16,
    },
    /// Sphere centred at the origin.
    Sphere {
        /// Sphere radius.
        radius: f32,
        /// Latitude rings including both poles, between 3 and [`MAX_SUBDIVISIONS`].
        rings: u16,
        /// Angular subdivisions including the closing seam, between 4 and
        /// [`MAX_SUBDIVISIONS`].
        sectors: u16,
    },
}

impl Default for Prototype {
    fn default() -> Self {
        Prototype::cylinder()
    }
}

impl Prototype {
    /// Default cylinder used for elements and strip segments.
    #[must_use]
    pub const fn cylinder() -> Self {
        Prototype::Cylinder {
            radius: DEFAULT_RADIUS,
            sectors: DEFAULT_SECTORS,
        }
    }

    /// Default sphere used for joints.
    #[must_use]
    pub const fn sphere() -> Self {
        Prototype::Sphere {
            radius: DEFAULT_RADIUS,
            rings: DEFAULT_RINGS,
            sectors: DEFAULT_SECTORS,
        }
    }

    /// Generate the triangle mesh for this prototype.
    ///
    /// Rings are clamped to `3..=MAX_SUBDIVISIONS` and sectors to
    /// `4..=MAX_SUBDIVISIONS`.
    ///
    /// # Examples
    /// ```
    /// use trussview::Prototype;
    ///
    /// let mesh = Prototype::cylinder().mesh();
    /// assert!(mesh.vertices.iter().all(|v| (0.0..=1.0).contains(&v[1])));
    /// ```
    #[must_use]
    pub fn mesh(&self) -> Mesh {
        let clamp = |count: u16, min: u16| usize::from(count.clamp(min, MAX_SUBDIVISIONS));
        match *self {
            Prototype::Cylinder { radius, sectors } => cylinder_mesh(radius, clamp(sectors, 4)),
            Prototype::Sphere {
                radius,
                rings,
                sectors,
            } => sphere_mesh(radius, clamp(rings, 3), clamp(sectors, 4)),
        }
    }
}

/// Angle of sector `j`; the last sector repeats the first to close the seam.
fn sector_angle(j: usize, sectors: usize) -> f32 {
    2.0 * PI * j as f32 / (sectors - 1) as f32
}

/// Side wall followed by the bottom and top caps.
fn cylinder_mesh(radius: f32, sectors: usize) -> Mesh {
    let mut mesh = Mesh::default();

    for ring in 0..2 {
        let y = ring as f32;
        for j in 0..sectors {
            let (sin, cos) = sector_angle(j, sectors).sin_cos();
            mesh.push([radius * cos, y, radius * sin], [cos, 0.0, sin]);
        }
    }
    for bottom in 0..sectors - 1 {
        let top = sectors + bottom;
        mesh.triangle(bottom, top, bottom + 1);
        mesh.triangle(bottom + 1, top, top + 1);
    }

    for (y, normal_y) in [(0.0, -1.0), (1.0, 1.0)] {
        let center = mesh.push([0.0, y, 0.0], [0.0, normal_y, 0.0]);
        let first = mesh.vertices.len();
        for j in 0..sectors {
            let (sin, cos) = sector_angle(j, sectors).sin_cos();
            mesh.push([radius * cos, y, radius * sin], [0.0, normal_y, 0.0]);
        }
        for j in first..first + sectors - 1 {
            if normal_y < 0.0 {
                mesh.triangle(center, j, j + 1);
            } else {
                mesh.triangle(center, j + 1, j);
            }
        }
    }
    mesh
}

/// Latitude/longitude sphere from the north pole (`+Y`) to the south pole.
fn sphere_mesh(radius: f32, rings: usize, sectors: usize) -> Mesh {
    let mut mesh = Mesh::default();
    for i in 0..rings {
        // Poles are placed exactly so their bands have no sliver triangles.
        let (sin_polar, cos_polar) = match i {
            0 => (0.0, 1.0),
            i if i == rings - 1 => (0.0, -1.0),
            i => (PI * i as f32 / (rings - 1) as f32).sin_cos(),
        };
        for j in 0..sectors {
            let (sin, cos) = sector_angle(j, sectors).sin_cos();
            let normal = [cos * sin_polar, cos_polar, sin * sin_polar];
            mesh.push(normal.map(|component| radius * component), normal);
        }
    }
    for i in 0..rings - 1 {
        for j in 0..sectors - 1 {
            let here = i * sectors + j;
            let below = (i + 1) * sectors + j;
            if i != 0 {
                mesh.triangle(here, here + 1, below);
            }
            if i != rings - 2 {
                mesh.triangle(here + 1, below + 1, below);
            }
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn vector(v: [f32; 3]) -> Vector3<f32> {
        Vector3::new(v[0], v[1], v[2])
    }

    /// Every triangle has positive area and faces along its vertex normals.
    fn assert_outward(mesh: &Mesh) {
        for triangle in mesh.indices.chunks(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(usize::from);
            let face = (vector(mesh.vertices[b]) - vector(mesh.vertices[a]))
                .cross(&(vector(mesh.vertices[c]) - vector(mesh.vertices[a])));
            let normal =
                vector(mesh.normals[a]) + vector(mesh.normals[b]) + vector(mesh.normals[c]);
            assert!(face.dot(&normal) > 0.0, "inward or degenerate triangle {triangle:?}");
        }
    }

    fn assert_indices_in_range(mesh: &Mesh) {
        assert!(mesh
            .indices
            .iter()
            .all(|&index| usize::from(index) < mesh.vertices.len()));
    }

    #[test]
    fn cylinder_spans_unit_height() {
        let mesh = Prototype::cylinder().mesh();
        assert_eq!(mesh.vertices.len(), 4 * 25 + 2);
        assert_eq!(mesh.triangle_count(), 4 * 24);
        assert_indices_in_range(&mesh);
        for vertex in &mesh.vertices {
            let radial = (vertex[0] * vertex[0] + vertex[2] * vertex[2]).sqrt();
            assert!(radial <= DEFAULT_RADIUS + 1.0e-6);
            assert!(vertex[1] == 0.0 || vertex[1] == 1.0);
        }
        assert_outward(&mesh);
    }

    #[test]
    fn sphere_vertices_lie_on_the_surface() {
        let mesh = Prototype::Sphere {
            radius: 2.0,
            rings: 9,
            sectors: 12,
        }
        .mesh();
        assert_eq!(mesh.vertices.len(), 9 * 12);
        // The two polar bands hold one triangle per quad.
        assert_eq!(mesh.triangle_count(), 2 * 7 * 11);
        assert_indices_in_range(&mesh);
        for (vertex, normal) in mesh.vertices.iter().zip(&mesh.normals) {
            assert_relative_eq!(vector(*vertex).norm(), 2.0, epsilon = 1.0e-5);
            assert_relative_eq!(vector(*normal).norm(), 1.0, epsilon = 1.0e-5);
        }
        assert_outward(&mesh);
    }

    #[test]
    fn sphere_poles_are_exact() {
        let mesh = Prototype::sphere().mesh();
        let ring = usize::from(DEFAULT_SECTORS);
        let south = mesh.vertices.len() - ring;
        for j in 0..ring {
            assert_eq!(mesh.vertices[j], [0.0, DEFAULT_RADIUS, 0.0]);
            assert_eq!(mesh.vertices[south + j], [0.0, -DEFAULT_RADIUS, 0.0]);
            assert_eq!(mesh.normals[south + j], [0.0, -1.0, 0.0]);
        }
        assert_outward(&mesh);
    }

    #[test]
    fn tiny_subdivisions_are_raised() {
        let mesh = Prototype::Cylinder {
            radius: 1.0,
            sectors: 0,
        }
        .mesh();
        assert_eq!(mesh.vertices.len(), 4 * 4 + 2);
        assert_outward(&mesh);

        let mesh = Prototype::Sphere {
            radius: 1.0,
            rings: 1,
            sectors: 2,
        }
        .mesh();
        assert_eq!(mesh.vertices.len(), 3 * 4);
        assert_eq!(mesh.triangle_count(), 2 * 3);
        assert_outward(&mesh);
    }

    #[test]
    fn huge_subdivisions_are_capped_to_u16_indices() {
        let mesh = Prototype::Cylinder {
            radius: 1.0,
            sectors: 20_000,
        }
        .mesh();
        assert_eq!(mesh.vertices.len(), 4 * usize::from(MAX_SUBDIVISIONS) + 2);
        assert_indices_in_range(&mesh);

        let mesh = Prototype::Sphere {
            radius: 1.0,
            rings: u16::MAX,
            sectors: 300,
        }
        .mesh();
        assert_eq!(mesh.vertices.len(), usize::from(u16::MAX) + 1);
        // The seam copy of the south pole is the only vertex no triangle uses.
        assert_eq!(mesh.indices.iter().copied().max(), Some(u16::MAX - 1));
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn placement_moves_prototype_onto_element() {
        let placement = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 4.0, 1.0));
        let moved = Prototype::cylinder().mesh().transform_vertices(&placement);
        let top = moved
            .iter()
            .map(|point| point.y)
            .fold(f32::MIN, f32::max);
        assert_relative_eq!(top, 6.0, epsilon = 1.0e-6);
    }
}
