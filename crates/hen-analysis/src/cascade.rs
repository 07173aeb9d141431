//! Cascade algorithm: pinch location, utility targets and heat flows.

use crate::problem_table::Interval;
use hen_core::{HenError, HenResult, Real, Tolerances, nearly_equal};
use tracing::debug;

/// Outcome of the problem-table cascade.
///
/// `pinch` is the hot-side boundary temperature, or `None` for a
/// threshold problem where the adjusted cascade never touches zero
/// strictly inside the temperature range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchResult {
    pub pinch: Option<Real>,
    pub hot_utility: Real,
    pub cold_utility: Real,
}

/// One row of the heat-cascade table, aligned with the problem table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatFlow {
    /// Utility heat injected at the top of this interval.
    pub utility_in: Real,
    /// Heat cascading out of the bottom of this interval.
    pub heat_out: Real,
    pub excess_heat: Real,
}

fn is_zero(v: Real) -> bool {
    nearly_equal(
        v,
        0.0,
        Tolerances {
            abs: 1e-6,
            rel: 1e-9,
        },
    )
}

/// Run the cascade over the problem table.
///
/// First pass cascades the excess heats assuming zero heat input; the
/// minimum hot utility is whatever lifts the most negative flow back to
/// zero. The second pass re-cascades with that utility injected at the
/// top: the pinch is the first interior boundary where the adjusted
/// flow reaches zero, and the flow leaving the bottom interval is the
/// cold utility demand.
pub fn locate_pinch(intervals: &[Interval]) -> HenResult<PinchResult> {
    if intervals.is_empty() {
        return Err(HenError::invalid_input(
            "cannot locate a pinch on an empty problem table",
        ));
    }

    let mut flow = 0.0;
    let mut min_flow: Real = 0.0;
    for interval in intervals {
        flow += interval.excess_heat;
        min_flow = min_flow.min(flow);
    }
    let hot_utility = (-min_flow).max(0.0);

    let mut flow = hot_utility;
    let mut pinch = None;
    for (i, interval) in intervals.iter().enumerate() {
        flow += interval.excess_heat;
        // zero at the very bottom is a threshold, not a pinch
        if pinch.is_none() && i + 1 < intervals.len() && is_zero(flow) {
            pinch = Some(interval.t_out);
        }
    }
    let cold_utility = if is_zero(flow) { 0.0 } else { flow };

    debug!(
        pinch = ?pinch,
        hot_utility,
        cold_utility,
        intervals = intervals.len(),
        "cascade complete"
    );

    Ok(PinchResult {
        pinch,
        hot_utility,
        cold_utility,
    })
}

/// Cascade with clamping at zero.
///
/// Any would-be-negative outflow is reported as utility injected at
/// that interval instead, with the outflow clamped to zero. Used by the
/// cascade diagram; the totals agree with [`locate_pinch`].
pub fn heat_flows(intervals: &[Interval]) -> HenResult<Vec<HeatFlow>> {
    if intervals.is_empty() {
        return Err(HenError::invalid_input(
            "cannot determine heat flows on an empty problem table",
        ));
    }

    let mut rows = Vec::with_capacity(intervals.len());
    let mut out_prev = 0.0;
    for interval in intervals {
        let mut out = out_prev + interval.excess_heat;
        let utility_in = if out <= 0.0 {
            let util = -out;
            out = 0.0;
            util
        } else {
            0.0
        };
        rows.push(HeatFlow {
            utility_in,
            heat_out: out,
            excess_heat: interval.excess_heat,
        });
        out_prev = out;
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem_table::build_problem_table;
    use hen_core::{Stream, StreamKind};

    fn intervals_from(excess: &[Real]) -> Vec<Interval> {
        let mut cumulative = 0.0;
        excess
            .iter()
            .enumerate()
            .map(|(i, &e)| {
                cumulative += e;
                Interval {
                    name: format!("I-{}", i + 1),
                    t_in: 200.0 - 10.0 * i as Real,
                    t_out: 200.0 - 10.0 * (i + 1) as Real,
                    excess_heat: e,
                    cumulative_heat: cumulative,
                    hot_members: vec![],
                    cold_members: vec![],
                }
            })
            .collect()
    }

    #[test]
    fn four_stream_pinch_and_utilities() {
        let hot = vec![
            Stream::new("H1", StreamKind::Hot, 1.0, 3.0, 170.0, 60.0).unwrap(),
            Stream::new("H2", StreamKind::Hot, 1.0, 1.5, 150.0, 30.0).unwrap(),
        ];
        let cold = vec![
            Stream::new("C1", StreamKind::Cold, 1.0, 2.0, 20.0, 135.0).unwrap(),
            Stream::new("C2", StreamKind::Cold, 1.0, 4.0, 80.0, 140.0).unwrap(),
        ];
        let table = build_problem_table(&hot, &cold, 10.0).unwrap();
        let result = locate_pinch(&table).unwrap();

        assert_eq!(result.pinch, Some(90.0));
        assert!((result.hot_utility - 20.0).abs() < 1e-9);
        assert!((result.cold_utility - 60.0).abs() < 1e-9);
    }

    #[test]
    fn reported_hot_utility_keeps_cascade_nonnegative() {
        let table = intervals_from(&[60.0, 2.5, -82.5, 75.0, -15.0]);
        let result = locate_pinch(&table).unwrap();

        let mut flow = result.hot_utility;
        for interval in &table {
            flow += interval.excess_heat;
            assert!(flow >= -1e-9, "adjusted cascade went negative: {flow}");
        }
    }

    #[test]
    fn threshold_problem_has_no_pinch() {
        // matched duties: cascade stays positive, touching zero only at the bottom
        let table = intervals_from(&[80.0, 0.0, -80.0]);
        let result = locate_pinch(&table).unwrap();
        assert_eq!(result.pinch, None);
        assert_eq!(result.hot_utility, 0.0);
        assert_eq!(result.cold_utility, 0.0);
    }

    #[test]
    fn pure_deficit_is_all_hot_utility() {
        let table = intervals_from(&[-30.0, -20.0]);
        let result = locate_pinch(&table).unwrap();
        assert_eq!(result.pinch, None);
        assert!((result.hot_utility - 50.0).abs() < 1e-9);
        assert_eq!(result.cold_utility, 0.0);
    }

    #[test]
    fn pure_surplus_is_all_cold_utility() {
        // a single hot stream with nothing to heat
        let table = intervals_from(&[30.0, 20.0]);
        let result = locate_pinch(&table).unwrap();
        assert_eq!(result.pinch, None);
        assert_eq!(result.hot_utility, 0.0);
        assert!((result.cold_utility - 50.0).abs() < 1e-9);
    }

    #[test]
    fn heat_flow_table_clamps_at_zero() {
        let table = intervals_from(&[60.0, 2.5, -82.5, 75.0, -15.0]);
        let rows = heat_flows(&table).unwrap();

        let utils: Vec<Real> = rows.iter().map(|r| r.utility_in).collect();
        assert_eq!(utils, vec![0.0, 0.0, 20.0, 0.0, 0.0]);

        let outs: Vec<Real> = rows.iter().map(|r| r.heat_out).collect();
        assert_eq!(outs, vec![60.0, 62.5, 0.0, 75.0, 60.0]);
    }

    #[test]
    fn empty_table_rejected() {
        assert!(locate_pinch(&[]).is_err());
        assert!(heat_flows(&[]).is_err());
    }
}
