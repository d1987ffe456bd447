#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use nalgebra::Vector3;
use trussview::{
    displacement, interpolate_all_strips, interpolate_strip, point, Displacement, Element,
    GeometryError, InterpolationOptions, Point, ReferenceHandling, RotationSignConvention,
};

/// A skewed space frame with members in general position.
fn space_frame() -> (Vec<Point>, Vec<Element>) {
    let nodes = vec![
        point(0.0, 0.0, 0.0),
        point(3.0, 1.0, -2.0),
        point(4.0, 5.0, 1.0),
        point(-1.0, 2.0, 6.0),
    ];
    let elements = vec![
        Element::new(0, 1, Vector3::new(0.0, 1.0, 0.0)),
        Element::new(1, 2, Vector3::new(1.0, 0.0, 0.3)),
        Element::new(2, 3, Vector3::new(0.2, 0.1, 1.0)),
        Element::new(3, 0, Vector3::new(1.0, 1.0, 1.0)),
    ];
    (nodes, elements)
}

fn loads() -> Vec<Displacement> {
    vec![
        displacement(0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
        displacement(0.01, -0.02, 0.03, 0.004, -0.002, 0.001),
        displacement(-0.03, 0.01, 0.02, -0.001, 0.003, 0.002),
        displacement(0.02, 0.02, -0.01, 0.002, 0.001, -0.003),
    ]
}

fn assert_point_eq(actual: Point, expected: Vector3<f32>) {
    assert_relative_eq!(actual.to_vector(), expected, epsilon = 1.0e-4);
}

#[test]
fn vertical_cantilever_follows_hermite_shape() {
    let options = InterpolationOptions::default();
    let strip = interpolate_strip(
        &point(0.0, 0.0, 0.0),
        &point(0.0, 0.0, 10.0),
        &Vector3::y(),
        &Displacement::default(),
        &Displacement::translation_only(0.0, 1.0, 0.0),
        1.0,
        &options,
    )
    .expect("well-formed element");

    assert_eq!(strip.len(), 5);
    assert_point_eq(strip[0], Vector3::zeros());
    assert_point_eq(strip[1], Vector3::new(0.0, 0.15625, 2.5));
    assert_point_eq(strip[2], Vector3::new(0.0, 0.5, 5.0));
    assert_point_eq(strip[3], Vector3::new(0.0, 0.84375, 7.5));
    assert_point_eq(strip[4], Vector3::new(0.0, 1.0, 10.0));
}

#[test]
fn strips_start_and_end_at_displaced_nodes() {
    let (nodes, elements) = space_frame();
    let displacements = loads();
    let scale = 7.5;
    let strips = interpolate_all_strips(
        &nodes,
        &elements,
        &displacements,
        scale,
        &InterpolationOptions::default().with_points(9),
    )
    .expect("valid frame");

    for (strip, element) in strips.iter().zip(&elements) {
        let expected_start = nodes[element.start].to_vector()
            + scale * displacements[element.start].translation();
        let expected_end =
            nodes[element.end].to_vector() + scale * displacements[element.end].translation();
        assert_eq!(strip.len(), 9);
        assert_point_eq(strip[0], expected_start);
        assert_point_eq(strip[8], expected_end);
    }
}

#[test]
fn zero_displacements_reproduce_the_undeformed_members() {
    let (nodes, elements) = space_frame();
    let displacements = vec![Displacement::default(); nodes.len()];
    let strips = interpolate_all_strips(
        &nodes,
        &elements,
        &displacements,
        1.0e6,
        &InterpolationOptions::default(),
    )
    .expect("valid frame");

    for (strip, element) in strips.iter().zip(&elements) {
        let start = nodes[element.start].to_vector();
        let end = nodes[element.end].to_vector();
        for (k, point) in strip.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let t = k as f32 / 4.0;
            assert_point_eq(*point, start.lerp(&end, t));
        }
    }
}

#[test]
fn offsets_scale_linearly() {
    let (nodes, elements) = space_frame();
    let displacements = loads();
    let options = InterpolationOptions::default();
    let once = interpolate_all_strips(&nodes, &elements, &displacements, 3.0, &options)
        .expect("valid frame");
    let twice = interpolate_all_strips(&nodes, &elements, &displacements, 6.0, &options)
        .expect("valid frame");

    for ((single, double), element) in once.iter().zip(&twice).zip(&elements) {
        let start = nodes[element.start].to_vector();
        let end = nodes[element.end].to_vector();
        for (k, (a, b)) in single.iter().zip(double).enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let base = start.lerp(&end, k as f32 / 4.0);
            let offset = a.to_vector() - base;
            assert_relative_eq!(b.to_vector() - base, 2.0 * offset, epsilon = 1.0e-4);
        }
    }
}

#[test]
fn strips_follow_element_order() {
    let (nodes, elements) = space_frame();
    let displacements = loads();
    let options = InterpolationOptions::default();
    let forward = interpolate_all_strips(&nodes, &elements, &displacements, 2.0, &options)
        .expect("valid frame");

    let reversed_elements: Vec<Element> = elements.iter().rev().copied().collect();
    let backward =
        interpolate_all_strips(&nodes, &reversed_elements, &displacements, 2.0, &options)
            .expect("valid frame");

    for (a, b) in forward.iter().zip(backward.iter().rev()) {
        assert_eq!(a, b);
    }
}

#[test]
fn degenerate_element_fails_the_whole_batch() {
    let (nodes, mut elements) = space_frame();
    // Reference vector along the member from node 1 to node 2.
    elements[1].reference = Vector3::new(2.0, 8.0, 6.0);
    let error = interpolate_all_strips(
        &nodes,
        &elements,
        &loads(),
        1.0,
        &InterpolationOptions::default(),
    )
    .expect_err("parallel reference vector");
    assert_eq!(error, GeometryError::DegenerateFrame { element: 1 });
}

#[test]
fn orthogonalized_reference_only_matters_for_skewed_frames() {
    let node1 = point(0.0, 0.0, 0.0);
    let node2 = point(5.0, 0.0, 0.0);
    let start = Displacement::default();
    let end = displacement(0.0, 0.2, 0.1, 0.0, 0.05, 0.03);
    let as_given = InterpolationOptions::default();
    let orthogonalized = as_given.with_reference(ReferenceHandling::Orthogonalized);

    let perpendicular = Vector3::y();
    let a = interpolate_strip(&node1, &node2, &perpendicular, &start, &end, 1.0, &as_given)
        .expect("valid element");
    let b = interpolate_strip(&node1, &node2, &perpendicular, &start, &end, 1.0, &orthogonalized)
        .expect("valid element");
    for (p, q) in a.iter().zip(&b) {
        assert_relative_eq!(p.to_vector(), q.to_vector(), epsilon = 1.0e-5);
    }

    let skewed = Vector3::new(1.0, 1.0, 0.0);
    let c = interpolate_strip(&node1, &node2, &skewed, &start, &end, 1.0, &as_given)
        .expect("valid element");
    let d = interpolate_strip(&node1, &node2, &skewed, &start, &end, 1.0, &orthogonalized)
        .expect("valid element");
    assert_point_eq(c[4], d[4].to_vector());
    assert!((c[2].to_vector() - d[2].to_vector()).norm() > 1.0e-4);
}

#[test]
fn rotation_sign_flips_only_the_local_z_slope() {
    let node1 = point(0.0, 0.0, 0.0);
    let node2 = point(4.0, 0.0, 0.0);
    let start = Displacement::default();
    let end = displacement(0.0, 0.0, 0.0, 0.0, 0.1, 0.0);
    let legacy = InterpolationOptions::default();
    let beam_theory = legacy.with_rotation_sign(RotationSignConvention::BeamTheory);

    let a = interpolate_strip(&node1, &node2, &Vector3::y(), &start, &end, 1.0, &legacy)
        .expect("valid element");
    let b = interpolate_strip(&node1, &node2, &Vector3::y(), &start, &end, 1.0, &beam_theory)
        .expect("valid element");

    // H4(0.5) * ry = -0.125 * L * 0.1 along local z, which is global z here.
    assert_relative_eq!(a[2].z, -0.05, epsilon = 1.0e-6);
    assert_relative_eq!(b[2].z, 0.05, epsilon = 1.0e-6);
    assert_relative_eq!(a[2].y, 0.0, epsilon = 1.0e-6);
}
