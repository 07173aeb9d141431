//! Vertical-border area targeting on the composite diagram.
//!
//! The composite diagram is cut into vertical enthalpy segments at
//! every kink of either curve; each segment is treated as a co-current
//! exchanger slice whose area follows from the duty each active stream
//! carries through it and that stream's film coefficient.

use crate::composite::{CompositeCurves, CompositePoint};
use crate::problem_table::Interval;
use hen_core::{FilmCoefficient, HenError, HenResult, Real, Stream, Tolerances, nearly_equal, round4};
use tracing::debug;

/// Fixed correction factor applied to every segment's LMTD.
pub const AREA_CORRECTION_FACTOR: Real = 0.8;

/// Exchanger flow arrangement for the log-mean temperature difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPattern {
    CoCurrent,
    CounterCurrent,
}

/// Log-mean temperature difference for the given arrangement.
///
/// When the two terminal differences are nearly equal the logarithm
/// argument vanishes; the common difference is returned directly.
pub fn log_mean_diff(
    pattern: FlowPattern,
    hot_in: Real,
    hot_out: Real,
    cold_in: Real,
    cold_out: Real,
) -> Real {
    let (dta, dtb) = match pattern {
        FlowPattern::CoCurrent => (hot_in - cold_in, hot_out - cold_out),
        FlowPattern::CounterCurrent => (hot_in - cold_out, hot_out - cold_in),
    };
    if nearly_equal(
        dta,
        dtb,
        Tolerances {
            abs: 1e-8,
            rel: 1e-5,
        },
    ) {
        dta
    } else {
        (dta - dtb) / (dta / dtb).ln()
    }
}

/// A vertical cut of the composite diagram.
///
/// Either temperature is `None` when the cut's enthalpy falls outside
/// that curve's span (the utility-covered ends of the diagram).
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub hot_t: Option<Real>,
    pub cold_t: Option<Real>,
    pub q: Real,
}

/// One enthalpy slice between two fully-defined borders.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub hot_t_in: Real,
    pub hot_t_out: Real,
    pub cold_t_in: Real,
    pub cold_t_out: Real,
    pub lmtd: Real,
    /// Enthalpy width of the slice (kW).
    pub q: Real,
    /// Duty carried by each active stream through this slice, by id.
    pub stream_duties: Vec<(String, Real)>,
    /// Σ ΔQ / film coefficient, the area numerator (film in kW/(m²·K)).
    pub sum_q_over_h: Real,
}

/// Temperature of `curve` at enthalpy `q`, by two-point linear
/// interpolation within the enclosing piece (`T = A·Q + b`). Exact at
/// vertices; `None` outside the curve's span. Zero-width (vertical)
/// pieces are skipped.
fn temperature_at(curve: &[CompositePoint], q: Real) -> Option<Real> {
    let tol = Tolerances {
        abs: 1e-9,
        rel: 1e-12,
    };
    for w in curve.windows(2) {
        let (lb, ub) = (w[0].q, w[1].q);
        if lb <= q && q <= ub && !nearly_equal(lb, ub, tol) {
            let slope = (w[1].t - w[0].t) / (ub - lb);
            return Some(w[0].t + slope * (q - lb));
        }
    }
    None
}

fn same_key(a: Option<Real>, b: Option<Real>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => round4(a) == round4(b),
        // an undefined temperature never duplicates anything
        _ => false,
    }
}

/// Build the vertical borders of the composite diagram.
///
/// A border is raised at every vertex enthalpy of either curve, with
/// the temperature on the opposite curve interpolated. Exact duplicates
/// (a pinch produces one) are dropped, then borders that would repeat a
/// hot temperature (keep last) or a cold temperature (keep first) are
/// dropped so no zero-width or inverted segment survives on either
/// side.
pub fn build_borders(curves: &CompositeCurves) -> Vec<Border> {
    let mut borders: Vec<Border> = curves
        .hot
        .iter()
        .chain(curves.cold.iter())
        .map(|p| Border {
            hot_t: temperature_at(&curves.hot, p.q),
            cold_t: temperature_at(&curves.cold, p.q),
            q: p.q,
        })
        .collect();

    borders.sort_by(|a, b| a.q.total_cmp(&b.q));

    // drop exact duplicates (a pinch raises the same border twice)
    borders.dedup_by(|a, b| {
        let same_opt = |x: Option<Real>, y: Option<Real>| match (x, y) {
            (Some(x), Some(y)) => round4(x) == round4(y),
            (None, None) => true,
            _ => false,
        };
        round4(a.q) == round4(b.q)
            && same_opt(a.hot_t, b.hot_t)
            && same_opt(a.cold_t, b.cold_t)
    });

    // repeated hot temperature: keep the last occurrence
    let mut keep = vec![true; borders.len()];
    for i in 0..borders.len() {
        if borders[i + 1..]
            .iter()
            .any(|b| same_key(borders[i].hot_t, b.hot_t))
        {
            keep[i] = false;
        }
    }
    let mut i = 0;
    borders.retain(|_| {
        i += 1;
        keep[i - 1]
    });

    // repeated cold temperature: keep the first occurrence
    let mut keep = vec![true; borders.len()];
    for i in 0..borders.len() {
        if borders[..i]
            .iter()
            .any(|b| same_key(borders[i].cold_t, b.cold_t))
        {
            keep[i] = false;
        }
    }
    let mut i = 0;
    borders.retain(|_| {
        i += 1;
        keep[i - 1]
    });

    borders
}

/// Row indices of the streams thermally active in `[t1, t2]`.
///
/// `shift` is 0 for the hot side and ΔTmin for the cold side, moving
/// the hot-scale interval boundaries onto the queried scale. The
/// intervals are scanned by boundary bracket, so the caller's ordering
/// does not matter.
fn streams_in_range(
    t1: Real,
    t2: Real,
    intervals: &[&Interval],
    shift: Real,
    cold_side: bool,
) -> HenResult<Vec<usize>> {
    let bounds: Vec<(Real, Real)> = intervals
        .iter()
        .map(|i| (round4(i.t_in - shift), round4(i.t_out - shift)))
        .collect();

    let start = bounds
        .iter()
        .position(|&(t_in, t_out)| t_in > t1 && t1 >= t_out)
        .ok_or_else(|| HenError::invalid_input(format!("no interval brackets {t1}")))?;
    let end = bounds
        .iter()
        .position(|&(t_in, t_out)| t_in >= t2 && t2 > t_out)
        .ok_or_else(|| HenError::invalid_input(format!("no interval brackets {t2}")))?;
    let (start, end) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    let mut indices: Vec<usize> = intervals[start..=end]
        .iter()
        .flat_map(|i| {
            if cold_side {
                i.cold_members.iter().copied()
            } else {
                i.hot_members.iter().copied()
            }
        })
        .collect();
    indices.sort_unstable();
    indices.dedup();
    Ok(indices)
}

/// Build the area-accounting segments between consecutive borders.
///
/// Only border pairs with both temperatures defined on both sides form
/// a segment; the utility-covered diagram ends contribute no process
/// area. Film coefficients (W/(m²·K)) must be populated for every
/// stream active in any segment.
#[allow(clippy::too_many_arguments)]
pub fn build_segments(
    hot: &[Stream],
    cold: &[Stream],
    dt: Real,
    curves: &CompositeCurves,
    hot_films: &[FilmCoefficient],
    cold_films: &[FilmCoefficient],
    intervals: &[Interval],
) -> HenResult<Vec<Segment>> {
    let mut by_t_in: Vec<&Interval> = intervals.iter().collect();
    by_t_in.sort_by(|a, b| b.t_in.total_cmp(&a.t_in));

    let film = |films: &[FilmCoefficient], idx: usize, id: &str| -> HenResult<Real> {
        films
            .get(idx)
            .and_then(|f| f.coefficient)
            .ok_or_else(|| HenError::infeasible(format!("film coefficient missing for '{id}'")))
    };

    let borders = build_borders(curves);
    debug!(borders = borders.len(), "composite borders built");

    let mut segments = Vec::new();
    for pair in borders.windows(2) {
        let (Some(h1), Some(c1), Some(h2), Some(c2)) =
            (pair[0].hot_t, pair[0].cold_t, pair[1].hot_t, pair[1].cold_t)
        else {
            continue;
        };
        // rounded against floating point residue in the Q accumulation
        let (hot_1, hot_2) = (round4(h1), round4(h2));
        let (cold_1, cold_2) = (round4(c1), round4(c2));

        let lmtd = log_mean_diff(FlowPattern::CoCurrent, hot_1, hot_2, cold_1, cold_2);

        let mut stream_duties = Vec::new();
        let mut sum_q_over_h = 0.0;

        for idx in streams_in_range(hot_1, hot_2, &by_t_in, 0.0, false)? {
            let s = &hot[idx];
            let dq = s.mcp() * (hot_2 - hot_1);
            sum_q_over_h += dq / (film(hot_films, idx, &s.id)? / 1000.0);
            stream_duties.push((s.id.clone(), dq));
        }
        for idx in streams_in_range(cold_1, cold_2, &by_t_in, dt, true)? {
            let s = &cold[idx];
            let dq = s.mcp() * (cold_2 - cold_1);
            sum_q_over_h += dq / (film(cold_films, idx, &s.id)? / 1000.0);
            stream_duties.push((s.id.clone(), dq));
        }

        segments.push(Segment {
            hot_t_in: hot_1,
            hot_t_out: hot_2,
            cold_t_in: cold_1,
            cold_t_out: cold_2,
            lmtd,
            q: pair[1].q - pair[0].q,
            stream_duties,
            sum_q_over_h,
        });
    }

    Ok(segments)
}

/// Total minimum network area (m²) from the per-segment accounting.
pub fn area_target(segments: &[Segment]) -> Real {
    segments
        .iter()
        .map(|s| s.sum_q_over_h / (s.lmtd * AREA_CORRECTION_FACTOR))
        .sum()
}
