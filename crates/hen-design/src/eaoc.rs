//! Equivalent-annual-operating-cost sweep over the approach temperature.
//!
//! Each ΔTmin candidate runs the full targeting pipeline, prices one
//! representative exchanger at the network's average area, annualizes
//! the capital and adds the utility bill. Candidates are independent,
//! so the sweep evaluates them in parallel.

use hen_analysis::{
    area_target, build_composite_curves, build_problem_table, build_segments, locate_pinch,
    minimum_exchangers, partition_streams, Branch,
};
use hen_core::{FilmCoefficient, HenError, HenResult, Real, Stream};
use rayon::prelude::*;
use tracing::debug;

use crate::cost::{bare_module_cost, Arrangement, ExchangerKind, Material};

/// CEPCI escalation from the correlation base year.
pub const CEPCI_RATIO: Real = 542.0 / 397.0;
/// Hot utility price, $/GJ.
pub const HOT_UTILITY_PRICE: Real = 9.830;
/// Cold utility price, $/GJ.
pub const COLD_UTILITY_PRICE: Real = 0.353;
/// Operating hours per year.
pub const OPERATING_HOURS: Real = 8000.0;
/// Capital recovery horizon, years.
pub const RECOVERY_YEARS: i32 = 5;
/// Interest rate per year, before tax.
pub const INTEREST_RATE: Real = 0.10;

/// The exchanger model every candidate network is priced with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBasis {
    pub kind: ExchangerKind,
    pub arrangement: Arrangement,
    pub shell_material: Option<Material>,
    pub tube_material: Option<Material>,
    /// Operating gauge pressure, barg.
    pub pressure: Real,
}

/// One evaluated ΔTmin candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub dt: Real,
    /// Equivalent annual operating cost, $/yr.
    pub eaoc: Real,
    /// Network area target, m².
    pub net_area: Real,
    /// Minimum hot utility, kW.
    pub hot_utility: Real,
    /// Minimum cold utility, kW.
    pub cold_utility: Real,
    /// Total minimum exchanger count.
    pub exchanger_count: usize,
}

/// Annual cost of a utility duty in kW at the given price in $/GJ.
fn utility_cost(duty: Real, price: Real) -> Real {
    duty * 1e3 * 3600.0 * OPERATING_HOURS * price * 1e-9
}

/// Capital recovery factor for the fixed horizon and interest rate.
fn capital_recovery_factor() -> Real {
    let i = INTEREST_RATE;
    let growth = (1.0 + i).powi(RECOVERY_YEARS);
    (i * growth) / (growth - 1.0)
}

/// Evaluate one ΔTmin candidate against the full pipeline.
pub fn eaoc_at(
    hot: &[Stream],
    cold: &[Stream],
    dt: Real,
    hot_films: &[FilmCoefficient],
    cold_films: &[FilmCoefficient],
    basis: &CostBasis,
) -> HenResult<SweepPoint> {
    let table = build_problem_table(hot, cold, dt)?;
    let pinch = locate_pinch(&table)?;
    let curves = build_composite_curves(hot, cold, dt, pinch.cold_utility, &table)?;
    let segments = build_segments(hot, cold, dt, &curves, hot_films, cold_films, &table)?;
    let net_area = area_target(&segments);

    let parts = partition_streams(hot, cold, dt, pinch.pinch, hot_films, cold_films);
    let n_above =
        minimum_exchangers(parts.above.hot.len(), parts.above.cold.len(), Branch::Above);
    let n_below =
        minimum_exchangers(parts.below.hot.len(), parts.below.cold.len(), Branch::Below);
    let n_ex = n_above + n_below;
    if n_ex == 0 {
        return Err(HenError::infeasible(
            "no exchangers to cost: both pinch branches are empty",
        ));
    }

    let area = net_area / n_ex as Real;
    let cbm = bare_module_cost(
        basis.kind,
        basis.arrangement,
        basis.shell_material,
        basis.tube_material,
        area,
        basis.pressure,
    )? * CEPCI_RATIO;

    let huc = utility_cost(pinch.hot_utility, HOT_UTILITY_PRICE);
    let cuc = utility_cost(pinch.cold_utility, COLD_UTILITY_PRICE);
    let eaoc = capital_recovery_factor() * n_ex as Real * cbm + huc + cuc;

    debug!(dt, eaoc, net_area, n_ex, "candidate evaluated");

    Ok(SweepPoint {
        dt,
        eaoc,
        net_area,
        hot_utility: pinch.hot_utility,
        cold_utility: pinch.cold_utility,
        exchanger_count: n_ex,
    })
}

/// Evaluate every candidate, in parallel, preserving input order.
pub fn sweep(
    hot: &[Stream],
    cold: &[Stream],
    candidates: &[Real],
    hot_films: &[FilmCoefficient],
    cold_films: &[FilmCoefficient],
    basis: &CostBasis,
) -> Vec<(Real, HenResult<SweepPoint>)> {
    candidates
        .par_iter()
        .map(|&dt| (dt, eaoc_at(hot, cold, dt, hot_films, cold_films, basis)))
        .collect()
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

    fn films(ids: &[&str], value: Real) -> Vec<FilmCoefficient> {
        ids.iter().map(|id| FilmCoefficient::new(*id, value)).collect()
    }

    fn basis() -> CostBasis {
        CostBasis {
            kind: ExchangerKind::FloatingHead,
            arrangement: Arrangement::ShellTube,
            shell_material: Some(Material::CarbonSteel),
            tube_material: Some(Material::CarbonSteel),
            pressure: 2.0,
        }
    }

    #[test]
    fn recovery_factor_matches_annuity_formula() {
        // 5 years at 10%: 0.1·1.1⁵/(1.1⁵−1)
        let cc = capital_recovery_factor();
        assert!((cc - 0.263797).abs() < 1e-6);
    }

    #[test]
    fn utility_bill_scales_with_duty_and_price() {
        // 1 kW for 8000 h = 28.8 GJ/yr
        let c = utility_cost(1.0, 1.0);
        assert!((c - 28.8).abs() < 1e-9);
        assert!((utility_cost(20.0, HOT_UTILITY_PRICE) - 20.0 * 28.8 * 9.83).abs() < 1e-6);
    }

    #[test]
    fn four_stream_candidate_reports_targets() {
        let (hot, cold) = four_stream_case();
        let hf = films(&["H1", "H2"], 800.0);
        let cf = films(&["C1", "C2"], 600.0);

        let point = eaoc_at(&hot, &cold, 10.0, &hf, &cf, &basis()).unwrap();
        assert!((point.hot_utility - 20.0).abs() < 1e-9);
        assert!((point.cold_utility - 60.0).abs() < 1e-9);
        assert_eq!(point.exchanger_count, 7);
        assert!(point.net_area > 0.0);

        // the annual cost is capital plus both utility bills
        let floor = utility_cost(20.0, HOT_UTILITY_PRICE) + utility_cost(60.0, COLD_UTILITY_PRICE);
        assert!(point.eaoc > floor);
    }

    #[test]
    fn sweep_preserves_candidate_order() {
        let (hot, cold) = four_stream_case();
        let hf = films(&["H1", "H2"], 800.0);
        let cf = films(&["C1", "C2"], 600.0);

        let candidates = [8.0, 10.0, 12.0];
        let points = sweep(&hot, &cold, &candidates, &hf, &cf, &basis());
        assert_eq!(points.len(), 3);
        for (given, (dt, result)) in candidates.iter().zip(&points) {
            assert_eq!(given, dt);
            let point = result.as_ref().unwrap();
            assert_eq!(point.dt, *dt);
        }

        // utilities grow with the approach temperature
        let first = points[0].1.as_ref().unwrap();
        let last = points[2].1.as_ref().unwrap();
        assert!(last.hot_utility > first.hot_utility);
        assert!(last.cold_utility > first.cold_utility);
    }

    #[test]
    fn missing_films_fail_the_candidate() {
        let (hot, cold) = four_stream_case();
        let hf = vec![
            FilmCoefficient::new("H1", 800.0),
            FilmCoefficient::unset("H2"),
        ];
        let cf = films(&["C1", "C2"], 600.0);
        let err = eaoc_at(&hot, &cold, 10.0, &hf, &cf, &basis()).unwrap_err();
        assert!(matches!(err, HenError::InfeasibleDesign { .. }));
    }
}
