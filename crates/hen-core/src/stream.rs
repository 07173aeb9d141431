//! Process stream and film-coefficient tables.

use crate::error::{HenError, HenResult};
use crate::numeric::{Real, ensure_finite};

/// Which side of the composite diagram a stream belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StreamKind {
    /// Releases heat: inlet hotter than outlet.
    Hot,
    /// Absorbs heat: inlet colder than outlet.
    Cold,
}

/// A single process stream row.
///
/// Units are one consistent set: mass flow kg/s, heat capacity kJ/(kg·K),
/// temperatures °C. `mass_flow * heat_capacity * ΔT` is then a duty in kW.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stream {
    pub id: String,
    pub mass_flow: Real,
    pub heat_capacity: Real,
    pub t_in: Real,
    pub t_out: Real,
}

impl Stream {
    /// Create a stream, validating orientation against `kind`.
    pub fn new(
        id: impl Into<String>,
        kind: StreamKind,
        mass_flow: Real,
        heat_capacity: Real,
        t_in: Real,
        t_out: Real,
    ) -> HenResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(HenError::invalid_input("stream id must not be empty"));
        }
        for (v, what) in [
            (mass_flow, "mass flow"),
            (heat_capacity, "heat capacity"),
            (t_in, "inlet temperature"),
            (t_out, "outlet temperature"),
        ] {
            ensure_finite(v, "stream field")
                .map_err(|_| HenError::invalid_input(format!("{what} of '{id}' is not finite")))?;
        }
        if mass_flow <= 0.0 || heat_capacity <= 0.0 {
            return Err(HenError::invalid_input(format!(
                "stream '{id}': flow and heat capacity must be positive"
            )));
        }
        match kind {
            StreamKind::Hot if t_in <= t_out => {
                return Err(HenError::invalid_input(format!(
                    "hot stream '{id}': inlet {t_in} must be above outlet {t_out}"
                )));
            }
            StreamKind::Cold if t_in >= t_out => {
                return Err(HenError::invalid_input(format!(
                    "cold stream '{id}': inlet {t_in} must be below outlet {t_out}"
                )));
            }
            _ => {}
        }
        Ok(Self {
            id,
            mass_flow,
            heat_capacity,
            t_in,
            t_out,
        })
    }

    /// Heat-capacity flow rate, mf·cp (kW/K).
    pub fn mcp(&self) -> Real {
        self.mass_flow * self.heat_capacity
    }

    /// Total duty over the stream's full temperature span (kW).
    pub fn duty(&self) -> Real {
        self.mcp() * (self.t_in - self.t_out).abs()
    }
}

/// Film heat transfer coefficient for one stream, W/(m²·K).
///
/// Kept positionally aligned with the owning stream table. The value
/// stays unset until the caller supplies one; area targeting and
/// exchanger sizing require every coefficient to be populated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilmCoefficient {
    pub stream_id: String,
    pub coefficient: Option<Real>,
}

impl FilmCoefficient {
    pub fn unset(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            coefficient: None,
        }
    }

    pub fn new(stream_id: impl Into<String>, coefficient: Real) -> Self {
        Self {
            stream_id: stream_id.into(),
            coefficient: Some(coefficient),
        }
    }
}

/// Check that every id in `streams` is unique within its own table.
pub fn check_unique_ids(streams: &[Stream]) -> HenResult<()> {
    for (i, s) in streams.iter().enumerate() {
        if streams[..i].iter().any(|other| other.id == s.id) {
            return Err(HenError::conflict(format!(
                "duplicate stream id '{}'",
                s.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hot_stream_requires_cooling_orientation() {
        assert!(Stream::new("H1", StreamKind::Hot, 1.0, 2.0, 170.0, 60.0).is_ok());
        let err = Stream::new("H1", StreamKind::Hot, 1.0, 2.0, 60.0, 170.0).unwrap_err();
        assert!(matches!(err, HenError::InvalidInput { .. }));
    }

    #[test]
    fn cold_stream_requires_heating_orientation() {
        assert!(Stream::new("C1", StreamKind::Cold, 1.0, 2.0, 20.0, 135.0).is_ok());
        assert!(Stream::new("C1", StreamKind::Cold, 1.0, 2.0, 135.0, 20.0).is_err());
    }

    #[test]
    fn nonpositive_flow_rejected() {
        assert!(Stream::new("H1", StreamKind::Hot, 0.0, 2.0, 170.0, 60.0).is_err());
        assert!(Stream::new("H1", StreamKind::Hot, 1.0, -2.0, 170.0, 60.0).is_err());
    }

    #[test]
    fn duty_uses_absolute_span() {
        let hot = Stream::new("H1", StreamKind::Hot, 3.0, 1.0, 170.0, 60.0).unwrap();
        let cold = Stream::new("C1", StreamKind::Cold, 2.0, 1.0, 20.0, 135.0).unwrap();
        assert_eq!(hot.duty(), 330.0);
        assert_eq!(cold.duty(), 230.0);
    }

    #[test]
    fn duplicate_ids_detected() {
        let streams = vec![
            Stream::new("H1", StreamKind::Hot, 1.0, 1.0, 100.0, 50.0).unwrap(),
            Stream::new("H1", StreamKind::Hot, 1.0, 1.0, 90.0, 40.0).unwrap(),
        ];
        assert!(matches!(
            check_unique_ids(&streams),
            Err(HenError::Conflict { .. })
        ));
    }
}
