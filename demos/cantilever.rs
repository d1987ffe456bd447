use nalgebra::Vector3;
use trussview::{point, Displacement, Element, SceneGeometry, SceneOptions, Structure};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A horizontal cantilever split into two members, bending in the XY plane
    let structure = Structure::new(
        vec![point(0.0, 0.0, 0.0), point(2.0, 0.0, 0.0), point(4.0, 0.0, 0.0)],
        vec![
            Element::new(0, 1, Vector3::y()),
            Element::new(1, 2, Vector3::y()),
        ],
    )?;

    // Nodal displacements from a tip load, computed elsewhere
    let displacements = vec![
        Displacement::default(),
        Displacement::new(0.0, -0.005, 0.0, 0.0, 0.0, -0.004),
        Displacement::new(0.0, -0.016, 0.0, 0.0, 0.0, -0.006),
    ];

    // Exaggerate the deflection so it is visible next to the members
    let scene = SceneGeometry::build(structure, Some(displacements), 25.0, SceneOptions::default())?;

    println!("camera distance: {:.3}", scene.bounds().camera_distance());
    println!("member placements: {}", scene.original_placements().len());
    if let Some(deformed) = scene.deformed() {
        for (element, strip) in deformed.strips.iter().enumerate() {
            for point in strip {
                println!("element {element}: ({:.3}, {:.3}, {:.3})", point.x, point.y, point.z);
            }
        }
        println!("segment placements: {}", deformed.placements.len());
    }

    Ok(())
}
