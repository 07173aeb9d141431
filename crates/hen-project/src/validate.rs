//! Structural validation of a project document.

use crate::schema::{LATEST_VERSION, Project};
use hen_core::{FilmCoefficient, Stream};

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Unsupported schema version {0}, expected {LATEST_VERSION}")]
    Version(u32),

    #[error("Minimum approach temperature must be positive and finite, got {0}")]
    ApproachTemperature(f64),

    #[error("Duplicate stream id '{0}'")]
    DuplicateId(String),

    #[error("Hot stream '{id}' must cool: inlet {t_in}, outlet {t_out}")]
    HotOrientation { id: String, t_in: f64, t_out: f64 },

    #[error("Cold stream '{id}' must heat: inlet {t_in}, outlet {t_out}")]
    ColdOrientation { id: String, t_in: f64, t_out: f64 },

    #[error("Stream '{id}': flow and heat capacity must be positive")]
    NonPositiveProperty { id: String },

    #[error("Film coefficient of '{id}' must be positive, got {value}")]
    NonPositiveFilm { id: String, value: f64 },

    #[error("Film table does not match its stream table at row {row}")]
    FilmMismatch { row: usize },
}

fn check_side(
    streams: &[Stream],
    films: &[FilmCoefficient],
    hot: bool,
) -> Result<(), ValidationError> {
    for (i, s) in streams.iter().enumerate() {
        if streams[..i].iter().any(|other| other.id == s.id) {
            return Err(ValidationError::DuplicateId(s.id.clone()));
        }
        if s.mass_flow <= 0.0 || s.heat_capacity <= 0.0 {
            return Err(ValidationError::NonPositiveProperty { id: s.id.clone() });
        }
        if hot && s.t_in <= s.t_out {
            return Err(ValidationError::HotOrientation {
                id: s.id.clone(),
                t_in: s.t_in,
                t_out: s.t_out,
            });
        }
        if !hot && s.t_in >= s.t_out {
            return Err(ValidationError::ColdOrientation {
                id: s.id.clone(),
                t_in: s.t_in,
                t_out: s.t_out,
            });
        }
    }

    if films.len() != streams.len() {
        return Err(ValidationError::FilmMismatch { row: films.len() });
    }
    for (row, (s, f)) in streams.iter().zip(films).enumerate() {
        if f.stream_id != s.id {
            return Err(ValidationError::FilmMismatch { row });
        }
        if let Some(h) = f.coefficient {
            if h <= 0.0 || !h.is_finite() {
                return Err(ValidationError::NonPositiveFilm {
                    id: s.id.clone(),
                    value: h,
                });
            }
        }
    }
    Ok(())
}

/// Check a document's structure before it touches the engine.
pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version != LATEST_VERSION {
        return Err(ValidationError::Version(project.version));
    }
    if !project.dt.is_finite() || project.dt <= 0.0 {
        return Err(ValidationError::ApproachTemperature(project.dt));
    }
    check_side(&project.hot, &project.hot_film, true)?;
    check_side(&project.cold, &project.cold_film, false)?;
    Ok(())
}
