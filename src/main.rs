mod report;

use log::{info, warn};
use report::{render_job_extras, render_report};
use std::env;
use std::error::Error;
use std::path::Path;
use trussview::{clamp_deformation_scale, Job, SceneOptions};

/// Command-line usage shown when the job path is missing.
const USAGE: &str = "usage: trussview <job.json> [scale]";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    // The deformation scale exaggerates displacements that are usually tiny
    // compared to member lengths. Out-of-range values are clamped the same way
    // an interactive slider would clamp them.
    let requested = match args.next() {
        Some(text) => text.parse::<f32>()?,
        None => 1.0,
    };
    let scale = clamp_deformation_scale(requested);
    if scale != requested {
        warn!("deformation scale {requested} clamped to {scale}");
    }

    // Load and validate the job. Every geometric problem (unknown nodes,
    // zero-length members, reference vectors along a member) surfaces here.
    let job = Job::from_path(&path)?;
    let extras = render_job_extras(&job);

    // Build original placements, node strips and deformed placements at once.
    let scene = job.into_scene(scale, SceneOptions::default())?;
    info!("scene ready for {path}");

    let name = Path::new(&path)
        .file_stem()
        .map_or_else(|| path.clone(), |stem| stem.to_string_lossy().into_owned());
    println!("{}", render_report(&name, &scene));
    print!("{extras}");

    Ok(())
}
