//! Problem-table construction: per-interval net heat and membership.

use crate::intervals::build_ladder;
use hen_core::{HenResult, Real, Stream, round4};

/// One row of the problem table, hottest interval first.
///
/// Temperatures are on the hot scale. `hot_members` / `cold_members`
/// are row indices into the input stream tables for the streams
/// thermally active in this interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub name: String,
    pub t_in: Real,
    pub t_out: Real,
    pub excess_heat: Real,
    pub cumulative_heat: Real,
    pub hot_members: Vec<usize>,
    pub cold_members: Vec<usize>,
}

/// Build the full problem table for the given streams and ΔTmin.
///
/// A hot stream belongs to an interval when its inlet sits on the
/// interval's top boundary, its outlet on the bottom boundary, or it
/// fully spans the interval. Cold streams use the same test after
/// shifting by +ΔTmin. `excess_heat` is the net heat the interval
/// releases (hot duty in, cold duty out); `cumulative_heat` is the
/// running sum from the hottest interval down.
pub fn build_problem_table(hot: &[Stream], cold: &[Stream], dt: Real) -> HenResult<Vec<Interval>> {
    let ladder = build_ladder(hot, cold, dt)?;
    let mut table = Vec::with_capacity(ladder.interval_count());

    let mut cumulative = 0.0;
    for (i, pair) in ladder.hot.windows(2).enumerate() {
        let (t_in, t_out) = (pair[0], pair[1]);

        let hot_members: Vec<usize> = hot
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                let (s_in, s_out) = (round4(s.t_in), round4(s.t_out));
                s_in == t_in || s_out == t_out || (s_in >= t_in && s_out <= t_out)
            })
            .map(|(idx, _)| idx)
            .collect();

        let cold_members: Vec<usize> = cold
            .iter()
            .enumerate()
            .filter(|(_, s)| {
                let (s_in, s_out) = (round4(s.t_in + dt), round4(s.t_out + dt));
                s_in == t_out || s_out == t_in || (s_in <= t_out && s_out >= t_in)
            })
            .map(|(idx, _)| idx)
            .collect();

        let mut excess = 0.0;
        for &idx in &hot_members {
            excess += hot[idx].mcp() * (t_in - t_out);
        }
        for &idx in &cold_members {
            excess += cold[idx].mcp() * (t_out - t_in);
        }
        cumulative += excess;

        table.push(Interval {
            name: format!("I-{}", i + 1),
            t_in,
            t_out,
            excess_heat: excess,
            cumulative_heat: cumulative,
            hot_members,
            cold_members,
        });
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hen_core::{StreamKind, Tolerances, nearly_equal};
    use proptest::prelude::*;

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
    fn four_stream_excess_heats() {
        let (hot, cold) = four_stream_case();
        let table = build_problem_table(&hot, &cold, 10.0).unwrap();

        let excess: Vec<Real> = table.iter().map(|i| i.excess_heat).collect();
        assert_eq!(excess, vec![60.0, 2.5, -82.5, 75.0, -15.0]);

        let cumulative: Vec<Real> = table.iter().map(|i| i.cumulative_heat).collect();
        assert_eq!(cumulative, vec![60.0, 62.5, -20.0, 55.0, 40.0]);

        assert_eq!(table[0].name, "I-1");
        assert_eq!(table[4].name, "I-5");
        assert!(table.windows(2).all(|w| w[0].t_out == w[1].t_in));
    }

    #[test]
    fn four_stream_membership() {
        let (hot, cold) = four_stream_case();
        let table = build_problem_table(&hot, &cold, 10.0).unwrap();

        // I-1 (170→150): only H1
        assert_eq!(table[0].hot_members, vec![0]);
        assert!(table[0].cold_members.is_empty());

        // I-3 (145→90): everything
        assert_eq!(table[2].hot_members, vec![0, 1]);
        assert_eq!(table[2].cold_members, vec![0, 1]);

        // I-5 (60→30): H2 and C1
        assert_eq!(table[4].hot_members, vec![1]);
        assert_eq!(table[4].cold_members, vec![0]);
    }

    #[test]
    fn boundaries_strictly_decreasing() {
        let (hot, cold) = four_stream_case();
        let table = build_problem_table(&hot, &cold, 10.0).unwrap();
        assert!(table.iter().all(|i| i.t_in > i.t_out));
    }

    proptest! {
        // Total excess heat equals the aggregate hot/cold duty imbalance,
        // whatever the interval layout ΔTmin produces.
        #[test]
        fn total_excess_matches_duty_imbalance(
            dt in 1.0_f64..40.0,
            h_mcp in 0.5_f64..5.0,
            c_mcp in 0.5_f64..5.0,
        ) {
            let hot = vec![Stream::new("H1", StreamKind::Hot, 1.0, h_mcp, 180.0, 50.0).unwrap()];
            let cold = vec![Stream::new("C1", StreamKind::Cold, 1.0, c_mcp, 30.0, 120.0).unwrap()];
            let table = build_problem_table(&hot, &cold, dt).unwrap();

            let total: Real = table.iter().map(|i| i.excess_heat).sum();
            let imbalance = hot[0].duty() - cold[0].duty();
            let tol = Tolerances { abs: 1e-6, rel: 1e-9 };
            prop_assert!(nearly_equal(total, imbalance, tol));
        }
    }
}
