//! Composite enthalpy curves.

use crate::problem_table::Interval;
use hen_core::{HenResult, Real, Stream};

/// One vertex of a piecewise-linear T–Q curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositePoint {
    pub q: Real,
    pub t: Real,
}

/// The hot and cold composite curves, both monotonic in Q.
///
/// Temperatures are on each curve's own scale (the cold curve is NOT
/// shifted). The hot curve starts at Q = 0; the cold curve starts at
/// the cold-utility duty so the two line up on the shared enthalpy
/// axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositeCurves {
    pub hot: Vec<CompositePoint>,
    pub cold: Vec<CompositePoint>,
}

impl CompositeCurves {
    /// Total enthalpy span of the hot curve (the aggregate hot duty).
    pub fn hot_span(&self) -> Real {
        match (self.hot.first(), self.hot.last()) {
            (Some(a), Some(b)) => b.q - a.q,
            _ => 0.0,
        }
    }

    /// Total enthalpy span of the cold curve (the aggregate cold duty).
    pub fn cold_span(&self) -> Real {
        match (self.cold.first(), self.cold.last()) {
            (Some(a), Some(b)) => b.q - a.q,
            _ => 0.0,
        }
    }
}

/// Build both composite curves from the problem table.
///
/// Walks the intervals coldest to hottest, accumulating each side's
/// enthalpy from its members' mf·cp·ΔT contributions. Cold-side
/// temperatures come off the hot-scale boundaries by subtracting ΔTmin.
pub fn build_composite_curves(
    hot: &[Stream],
    cold: &[Stream],
    dt: Real,
    cold_utility: Real,
    intervals: &[Interval],
) -> HenResult<CompositeCurves> {
    let mut sorted: Vec<&Interval> = intervals.iter().collect();
    sorted.sort_by(|a, b| a.t_in.total_cmp(&b.t_in));

    let mut curves = CompositeCurves::default();
    let mut hot_q = 0.0;
    let mut cold_q = cold_utility;

    for (i, interval) in sorted.iter().enumerate() {
        if i == 0 {
            curves.hot.push(CompositePoint {
                q: hot_q,
                t: interval.t_out,
            });
            curves.cold.push(CompositePoint {
                q: cold_q,
                t: interval.t_out - dt,
            });
        }

        for &idx in &interval.hot_members {
            hot_q += hot[idx].mcp() * (interval.t_in - interval.t_out);
        }
        for &idx in &interval.cold_members {
            cold_q += cold[idx].mcp() * (interval.t_in - interval.t_out);
        }

        curves.hot.push(CompositePoint {
            q: hot_q,
            t: interval.t_in,
        });
        curves.cold.push(CompositePoint {
            q: cold_q,
            t: interval.t_in - dt,
        });
    }

    Ok(curves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem_table::build_problem_table;
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
    fn four_stream_curves() {
        let (hot, cold) = four_stream_case();
        let table = build_problem_table(&hot, &cold, 10.0).unwrap();
        let curves = build_composite_curves(&hot, &cold, 10.0, 60.0, &table).unwrap();

        let hot_q: Vec<Real> = curves.hot.iter().map(|p| p.q).collect();
        let hot_t: Vec<Real> = curves.hot.iter().map(|p| p.t).collect();
        assert_eq!(hot_q, vec![0.0, 45.0, 180.0, 427.5, 450.0, 510.0]);
        assert_eq!(hot_t, vec![30.0, 60.0, 90.0, 145.0, 150.0, 170.0]);

        let cold_q: Vec<Real> = curves.cold.iter().map(|p| p.q).collect();
        let cold_t: Vec<Real> = curves.cold.iter().map(|p| p.t).collect();
        assert_eq!(cold_q, vec![60.0, 120.0, 180.0, 510.0, 530.0, 530.0]);
        assert_eq!(cold_t, vec![20.0, 50.0, 80.0, 135.0, 140.0, 160.0]);
    }

    #[test]
    fn spans_equal_aggregate_duties() {
        let (hot, cold) = four_stream_case();
        let table = build_problem_table(&hot, &cold, 10.0).unwrap();
        let curves = build_composite_curves(&hot, &cold, 10.0, 60.0, &table).unwrap();

        let hot_duty: Real = hot.iter().map(|s| s.duty()).sum();
        let cold_duty: Real = cold.iter().map(|s| s.duty()).sum();
        assert!((curves.hot_span() - hot_duty).abs() < 1e-9);
        assert!((curves.cold_span() - cold_duty).abs() < 1e-9);
    }

    #[test]
    fn curves_are_monotonic_in_q() {
        let (hot, cold) = four_stream_case();
        let table = build_problem_table(&hot, &cold, 10.0).unwrap();
        let curves = build_composite_curves(&hot, &cold, 10.0, 60.0, &table).unwrap();

        for curve in [&curves.hot, &curves.cold] {
            assert!(curve.windows(2).all(|w| w[1].q >= w[0].q));
            assert!(curve.windows(2).all(|w| w[1].t >= w[0].t));
        }
    }
}
