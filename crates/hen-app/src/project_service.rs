//! Project file services: bridge between [`Setup`] and the persisted
//! document.

use std::path::Path;

use hen_core::StreamKind;
use hen_project::{DesignsDef, Project, schema::LATEST_VERSION};
use tracing::debug;

use crate::error::AppResult;
use crate::setup::Setup;

/// Build a live setup from a validated document.
///
/// The streams and films replay through the normal mutators, so the
/// derived tables come out exactly as if the user had typed the inputs;
/// the persisted ledgers are then adopted onto the fresh partitions.
pub fn setup_from_project(project: &Project) -> AppResult<Setup> {
    let mut setup = Setup::new(project.units);
    setup.set_dt(project.dt)?;

    for stream in &project.hot {
        setup.add_stream(StreamKind::Hot, stream.clone())?;
    }
    for stream in &project.cold {
        setup.add_stream(StreamKind::Cold, stream.clone())?;
    }
    for film in &project.hot_film {
        if film.coefficient.is_some() {
            setup.set_film_coefficient(StreamKind::Hot, &film.stream_id, film.coefficient)?;
        }
    }
    for film in &project.cold_film {
        if film.coefficient.is_some() {
            setup.set_film_coefficient(StreamKind::Cold, &film.stream_id, film.coefficient)?;
        }
    }

    setup.restore_designs(project.designs.above.clone(), project.designs.below.clone())?;

    debug!(
        hot = project.hot.len(),
        cold = project.cold.len(),
        "setup reconstructed from project"
    );
    Ok(setup)
}

/// Snapshot a setup into a document.
pub fn project_from_setup(setup: &Setup) -> Project {
    Project {
        version: LATEST_VERSION,
        units: setup.units(),
        dt: setup.dt(),
        hot: setup.hot().to_vec(),
        cold: setup.cold().to_vec(),
        hot_film: setup.hot_film().to_vec(),
        cold_film: setup.cold_film().to_vec(),
        designs: DesignsDef {
            above: setup.design_above().records().to_vec(),
            below: setup.design_below().records().to_vec(),
        },
    }
}

/// Load a setup from a project file (format by extension).
pub fn load_setup(path: &Path) -> AppResult<Setup> {
    let project = hen_project::load(path)?;
    setup_from_project(&project)
}

/// Save a setup to a project file (format by extension).
pub fn save_setup(path: &Path, setup: &Setup) -> AppResult<()> {
    let project = project_from_setup(setup);
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => hen_project::save_json(path, &project)?,
        _ => hen_project::save_yaml(path, &project)?,
    }
    Ok(())
}
