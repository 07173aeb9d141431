//! Single-exchanger sizing: overall coefficient, area, shell count.

use hen_core::{HenError, HenResult, Real, Stream};

pub use hen_analysis::{FlowPattern, log_mean_diff};

/// Overall heat transfer coefficient from the film coefficients on both
/// sides, `1/U = Σ 1/h`. Coefficients in W/(m²·K).
pub fn overall_coefficient(hot_coefs: &[Real], cold_coefs: &[Real]) -> HenResult<Real> {
    if hot_coefs.is_empty() || cold_coefs.is_empty() {
        return Err(HenError::invalid_input(
            "overall coefficient needs at least one film coefficient per side",
        ));
    }
    let mut resistance = 0.0;
    for &h in hot_coefs.iter().chain(cold_coefs) {
        if h <= 0.0 {
            return Err(HenError::invalid_input(format!(
                "film coefficient must be positive, got {h}"
            )));
        }
        resistance += 1.0 / h;
    }
    Ok(1.0 / resistance)
}

/// Heat transfer area (m²) and overall coefficient for a duty in kW.
///
/// `factor` is the LMTD correction factor F, in (0, 1].
pub fn exchanger_area(
    duty: Real,
    lmtd: Real,
    hot_coefs: &[Real],
    cold_coefs: &[Real],
    factor: Real,
) -> HenResult<(Real, Real)> {
    if duty <= 0.0 {
        return Err(HenError::invalid_input(format!(
            "exchanger duty must be positive, got {duty}"
        )));
    }
    if lmtd <= 0.0 {
        return Err(HenError::infeasible(format!(
            "non-positive log mean temperature difference {lmtd}"
        )));
    }
    if factor <= 0.0 || factor > 1.0 {
        return Err(HenError::invalid_range(format!(
            "LMTD correction factor {factor} outside (0, 1]"
        )));
    }
    let u = overall_coefficient(hot_coefs, cold_coefs)?;
    let area = duty * 1e3 / (u * lmtd * factor);
    Ok((area, u))
}

/// Number of shells for a 1-2 shell-and-tube exchanger.
///
/// Uses the R/P effectiveness ratios of the terminal temperatures, with
/// the balanced `R = 1` special case, rounded up to whole shells.
pub fn shell_count(hot: &Stream, cold: &Stream) -> HenResult<usize> {
    let r = cold.mcp() / hot.mcp();
    let span = hot.t_in - cold.t_in;
    if span <= 0.0 {
        return Err(HenError::infeasible(format!(
            "hot inlet {} not above cold inlet {}",
            hot.t_in, cold.t_in
        )));
    }
    let p = (cold.t_out - cold.t_in) / span;
    if p <= 0.0 || p >= 1.0 {
        return Err(HenError::infeasible(format!(
            "thermal effectiveness {p} outside (0, 1)"
        )));
    }

    let shells = if r != 1.0 {
        let arg = (1.0 - p * r) / (1.0 - p);
        if arg <= 0.0 {
            return Err(HenError::infeasible(
                "temperature cross too severe for a 1-2 shell arrangement",
            ));
        }
        arg.ln() / (1.0 / r).ln()
    } else {
        p / (1.0 - p)
    };

    Ok(shells.ceil() as usize)
}
