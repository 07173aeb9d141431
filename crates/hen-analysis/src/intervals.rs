//! Temperature-interval ladder construction.

use hen_core::{HenError, HenResult, Real, Stream, ensure_finite, round4};

/// Hot-side and cold-side interval boundary ladders.
///
/// `hot` holds the unique boundary temperatures on the hot scale,
/// sorted hottest first; `cold` is the same ladder shifted down by the
/// minimum approach temperature. Boundaries are strictly decreasing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ladder {
    pub hot: Vec<Real>,
    pub cold: Vec<Real>,
}

impl Ladder {
    /// Number of intervals the ladder spans.
    pub fn interval_count(&self) -> usize {
        self.hot.len().saturating_sub(1)
    }
}

/// Merge all stream temperatures into the global interval ladder.
///
/// Cold temperatures are shifted by +ΔTmin onto the hot scale before the
/// union. Duplicate boundaries (a shifted cold temperature landing on a
/// hot one) collapse; comparisons are done on values rounded to 4
/// decimals so near-coincident boundaries collapse too.
pub fn build_ladder(hot: &[Stream], cold: &[Stream], dt: Real) -> HenResult<Ladder> {
    if hot.is_empty() || cold.is_empty() {
        return Err(HenError::invalid_input(
            "hot and cold stream tables must not be empty",
        ));
    }
    ensure_finite(dt, "minimum approach temperature")?;
    if dt <= 0.0 {
        return Err(HenError::invalid_input(
            "minimum approach temperature must be positive",
        ));
    }

    let mut ticks: Vec<Real> = Vec::with_capacity(2 * (hot.len() + cold.len()));
    for s in hot {
        ticks.push(round4(s.t_in));
        ticks.push(round4(s.t_out));
    }
    for s in cold {
        ticks.push(round4(s.t_in + dt));
        ticks.push(round4(s.t_out + dt));
    }

    // sort hottest first, then drop exact duplicates
    ticks.sort_by(|a, b| b.total_cmp(a));
    ticks.dedup();

    let cold_ticks = ticks.iter().map(|t| round4(t - dt)).collect();

    Ok(Ladder {
        hot: ticks,
        cold: cold_ticks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hen_core::StreamKind;

    fn four_stream_case() -> (Vec<Stream>, Vec<Stream>) {
        let hot = vec![
            Stream::new("H1", StreamKind::Hot, 1.0, 3.0, 170.0, 60.0).unwrap(),
            Stream::new("H2", StreamKind::Hot, 1.0, 1.5, 150.0, 30.0).unwrap(),
        ];
        let cold = vec![
            Stream::new("C1", StreamKind::Cold, 1.0, 2.0, 20.0, 135.0).unwrap(),
            Stream::new("C2", StreamKind::Cold, 1.0, 4.0, 80.0, 140.0).unwrap(),
        ];
        (hot, cold)
    }

    #[test]
    fn ladder_merges_and_sorts_descending() {
        let (hot, cold) = four_stream_case();
        let ladder = build_ladder(&hot, &cold, 10.0).unwrap();
        assert_eq!(ladder.hot, vec![170.0, 150.0, 145.0, 90.0, 60.0, 30.0]);
        assert_eq!(ladder.cold, vec![160.0, 140.0, 135.0, 80.0, 50.0, 20.0]);
        assert_eq!(ladder.interval_count(), 5);
    }

    #[test]
    fn coincident_shifted_boundaries_collapse() {
        let hot = vec![Stream::new("H1", StreamKind::Hot, 2.0, 1.0, 200.0, 100.0).unwrap()];
        let cold = vec![Stream::new("C1", StreamKind::Cold, 2.0, 1.0, 90.0, 190.0).unwrap()];
        // shifted cold ends at 200 and 100, exactly the hot boundaries
        let ladder = build_ladder(&hot, &cold, 10.0).unwrap();
        assert_eq!(ladder.hot, vec![200.0, 100.0]);
    }

    #[test]
    fn invalid_inputs_rejected() {
        let (hot, cold) = four_stream_case();
        assert!(build_ladder(&[], &cold, 10.0).is_err());
        assert!(build_ladder(&hot, &[], 10.0).is_err());
        assert!(build_ladder(&hot, &cold, 0.0).is_err());
        assert!(build_ladder(&hot, &cold, -5.0).is_err());
        assert!(build_ladder(&hot, &cold, Real::NAN).is_err());
    }
}
