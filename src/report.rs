use std::fmt::Write;
use trussview::{Job, SceneGeometry};

/// Render a textual summary of the geometry generated for a job.
///
/// The report lists the numbers a host renderer depends on (instance counts,
/// bounds and the initial camera offset) so a job file can be sanity-checked
/// without opening a viewer.
#[must_use]
pub fn render_report(job_name: &str, scene: &SceneGeometry) -> String {
    let mut output = String::new();
    let structure = scene.structure();

    // Describe the input first so the reader knows what the geometry was built
    // from.
    writeln!(
        &mut output,
        "Structure {job_name}: {} nodes, {} elements, {} connected part(s)",
        structure.node_count(),
        structure.element_count(),
        structure.component_count()
    )
    .expect("writing to string cannot fail");

    let isolated = structure.isolated_nodes();
    if !isolated.is_empty() {
        writeln!(&mut output, "Unused nodes: {isolated:?}")
            .expect("writing to string cannot fail");
    }

    // Bounds drive the centering offset applied to every placement and the
    // starting camera position of the viewer.
    let bounds = scene.bounds();
    writeln!(
        &mut output,
        "Bounds: min = ({:.3}, {:.3}, {:.3}), max = ({:.3}, {:.3}, {:.3})",
        bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Centering shift: ({:.3}, {:.3}, {:.3}), camera distance = {:.3}",
        bounds.centering_shift.x,
        bounds.centering_shift.y,
        bounds.centering_shift.z,
        bounds.camera_distance()
    )
    .expect("writing to string cannot fail");

    let lengths = structure.element_lengths();
    let shortest = lengths.iter().copied().fold(f32::INFINITY, f32::min);
    let longest = lengths.iter().copied().fold(0.0_f32, f32::max);
    writeln!(
        &mut output,
        "Original placements: {} (element length {shortest:.3} to {longest:.3})",
        scene.original_placements().len()
    )
    .expect("writing to string cannot fail");

    // The deformed section only exists when the job carried displacements.
    if let Some(deformed) = scene.deformed() {
        let points = deformed.strips.first().map_or(0, Vec::len);
        writeln!(
            &mut output,
            "Deformed shape (scale = {}): {} strips of {points} points, {} segment placements",
            deformed.scale,
            deformed.strips.len(),
            deformed.placements.len()
        )
        .expect("writing to string cannot fail");
        if let Some((element, deviation)) = deformed.max_deviation(structure) {
            writeln!(
                &mut output,
                "Largest deviation from the undeformed axis: {deviation:.4e} at element {element}"
            )
            .expect("writing to string cannot fail");
        }
    } else {
        output.push_str("Deformed shape: not available (no displacements in job)\n");
    }

    output
}

/// Summarise the optional per-element data of a job that the geometry ignores.
#[must_use]
pub fn render_job_extras(job: &Job) -> String {
    let mut output = String::new();
    let stiffest = job
        .properties
        .iter()
        .map(|properties| properties.ea)
        .fold(f32::NEG_INFINITY, f32::max);
    writeln!(
        &mut output,
        "Section properties: {} rows, largest EA = {stiffest:.3e}",
        job.properties.len()
    )
    .expect("writing to string cannot fail");
    if job.colors.is_none() {
        output.push_str("Element colors: default\n");
    } else {
        output.push_str("Element colors: per element\n");
    }
    output
}
