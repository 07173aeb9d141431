//! Bare-module exchanger costing from the Turton correlation tables.
//!
//! Purchase cost and pressure factor share the form
//! `10^(c1 + c2·log10 x + c3·log10² x)`; the coefficients are looked up
//! by (exchanger kind, tube arrangement, pressure bracket) and each row
//! carries the area and pressure ranges the correlation was fitted
//! over. Material factors are a second table keyed by kind and the
//! shell/tube material pair.

use std::collections::HashMap;
use std::sync::OnceLock;

use hen_core::{HenError, HenResult, Real};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExchangerKind {
    AirCooler,
    Bayonet,
    DoublePipe,
    FixedTube,
    FlatPlate,
    FloatingHead,
    KettleReboiler,
    MultiplePipe,
    ScrapedWall,
    SpiralPlate,
    SpiralTube,
    TeflonTube,
    UTube,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arrangement {
    Conventional,
    ShellTube,
    TubeOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PressureBracket {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Material {
    CarbonSteel,
    StainlessSteel,
    Copper,
    Nickel,
    Titanium,
    Aluminum,
}

/// One row of the cost table: purchase-cost constants `k`, pressure
/// factor constants `c`, bare-module constants `b`, and the validated
/// area (m²) and gauge pressure (barg) ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostCorrelation {
    pub k: [Real; 3],
    pub c: [Real; 3],
    pub b: [Real; 2],
    pub area: (Real, Real),
    pub pressure: (Real, Real),
}

type CostKey = (ExchangerKind, Arrangement, PressureBracket);
type MaterialKey = (ExchangerKind, Option<Material>, Option<Material>);

const NO_FP: [Real; 3] = [0.0, 0.0, 0.0];
// shell-and-tube, 5 < P < 140 barg, both sides rated
const ST_FP: [Real; 3] = [0.03881, -0.11272, 0.08183];
// tube-only pipe exchangers, 40 < P < 100 barg
const PIPE_FP: [Real; 3] = [0.6072, -0.9120, 0.3327];

fn cost_table() -> &'static HashMap<CostKey, CostCorrelation> {
    static TABLE: OnceLock<HashMap<CostKey, CostCorrelation>> = OnceLock::new();
    TABLE.get_or_init(|| {
        use Arrangement::*;
        use ExchangerKind::*;
        use PressureBracket::*;

        let mut t = HashMap::new();
        let mut row =
            |kind, arr, bracket, k, c, b, area, pressure| {
                t.insert(
                    (kind, arr, bracket),
                    CostCorrelation {
                        k,
                        c,
                        b,
                        area,
                        pressure,
                    },
                );
            };

        // shell-and-tube family: B1 = 1.63, B2 = 1.66
        let st = [1.63, 1.66];
        for (kind, k, area) in [
            (FixedTube, [4.3247, -0.3030, 0.1634], (10.0, 1000.0)),
            (FloatingHead, [4.8306, -0.8509, 0.3187], (10.0, 1000.0)),
            (UTube, [4.1884, -0.2503, 0.1974], (10.0, 1000.0)),
            (Bayonet, [4.2768, -0.0495, 0.1431], (10.0, 1000.0)),
            (KettleReboiler, [4.4646, -0.5277, 0.3955], (10.0, 100.0)),
        ] {
            row(kind, ShellTube, Low, k, NO_FP, st, area, (0.0, 5.0));
            row(kind, ShellTube, Medium, k, ST_FP, st, area, (5.0, 140.0));
        }

        // tube-only pipe family: B1 = 1.74, B2 = 1.55
        let pipe = [1.74, 1.55];
        for (kind, k, area) in [
            (DoublePipe, [3.3444, 0.2745, -0.0472], (1.0, 10.0)),
            (MultiplePipe, [2.7652, 0.7282, 0.0783], (10.0, 100.0)),
            (ScrapedWall, [3.7803, 0.8569, 0.0349], (2.0, 20.0)),
        ] {
            row(kind, TubeOnly, Low, k, NO_FP, pipe, area, (0.0, 40.0));
            row(kind, TubeOnly, High, k, PIPE_FP, pipe, area, (40.0, 100.0));
        }
        row(
            SpiralTube,
            TubeOnly,
            Low,
            [3.9912, 0.0668, 0.2430],
            NO_FP,
            pipe,
            (1.0, 100.0),
            (0.0, 150.0),
        );
        row(
            SpiralTube,
            TubeOnly,
            High,
            [3.9912, 0.0668, 0.2430],
            [-0.4045, 0.1859, 0.0],
            pipe,
            (1.0, 100.0),
            (150.0, 400.0),
        );

        // plate and air-cooled units: B1 = 0.96, B2 = 1.21
        let plate = [0.96, 1.21];
        row(
            AirCooler,
            Conventional,
            Low,
            [4.0336, 0.2341, 0.0497],
            NO_FP,
            plate,
            (10.0, 10000.0),
            (0.0, 10.0),
        );
        row(
            AirCooler,
            Conventional,
            Medium,
            [4.0336, 0.2341, 0.0497],
            [-0.1250, 0.15361, -0.02861],
            plate,
            (10.0, 10000.0),
            (10.0, 100.0),
        );
        row(
            FlatPlate,
            Conventional,
            Low,
            [4.6656, -0.1557, 0.1547],
            NO_FP,
            plate,
            (10.0, 1000.0),
            (0.0, 19.0),
        );
        row(
            SpiralPlate,
            Conventional,
            Low,
            [4.6561, -0.2947, 0.2207],
            NO_FP,
            plate,
            (1.0, 100.0),
            (0.0, 19.0),
        );
        row(
            TeflonTube,
            ShellTube,
            Low,
            [3.8062, 0.8924, -0.1671],
            NO_FP,
            st,
            (1.0, 10.0),
            (0.0, 15.0),
        );

        t
    })
}

fn material_table() -> &'static HashMap<MaterialKey, Real> {
    static TABLE: OnceLock<HashMap<MaterialKey, Real>> = OnceLock::new();
    TABLE.get_or_init(|| {
        use ExchangerKind::*;
        use Material::*;

        let mut t = HashMap::new();

        // shell/tube material pairs shared by the tubular exchangers
        let pairs: [(Material, Material, Real); 9] = [
            (CarbonSteel, CarbonSteel, 1.00),
            (CarbonSteel, Copper, 1.25),
            (Copper, Copper, 1.60),
            (CarbonSteel, StainlessSteel, 1.70),
            (StainlessSteel, StainlessSteel, 2.70),
            (CarbonSteel, Nickel, 2.68),
            (Nickel, Nickel, 3.73),
            (CarbonSteel, Titanium, 4.63),
            (Titanium, Titanium, 11.38),
        ];
        for kind in [
            FixedTube,
            FloatingHead,
            UTube,
            Bayonet,
            KettleReboiler,
            DoublePipe,
            MultiplePipe,
            ScrapedWall,
            SpiralTube,
        ] {
            for (shell, tube, fm) in pairs {
                t.insert((kind, Some(shell), Some(tube)), fm);
            }
        }

        // air coolers have no shell side
        for (tube, fm) in [(CarbonSteel, 1.00), (Aluminum, 1.42), (StainlessSteel, 2.93)] {
            t.insert((AirCooler, None, Some(tube)), fm);
        }

        // plate units are rated on a single material
        for kind in [FlatPlate, SpiralPlate] {
            for (mat, fm) in [(CarbonSteel, 1.00), (StainlessSteel, 2.45), (Titanium, 4.63)] {
                t.insert((kind, None, Some(mat)), fm);
            }
        }

        // teflon tubes, rated on the shell material only
        t.insert((TeflonTube, Some(CarbonSteel), None), 1.00);

        t
    })
}

fn correlate(x: Real, c: &[Real; 3]) -> Real {
    // a zero-coefficient row encodes a factor of exactly 1; taking the
    // logarithm anyway would make x = 0 come out NaN
    if c.iter().all(|&v| v == 0.0) {
        return 1.0;
    }
    let lg = x.log10();
    10f64.powf(c[0] + c[1] * lg + c[2] * lg * lg)
}

/// Look up the correlation row, selecting the pressure bracket and
/// validating both ranges.
fn lookup(
    kind: ExchangerKind,
    arrangement: Arrangement,
    area: Real,
    pressure: Real,
) -> HenResult<&'static CostCorrelation> {
    let table = cost_table();
    let rows: Vec<&CostCorrelation> = [
        PressureBracket::Low,
        PressureBracket::Medium,
        PressureBracket::High,
    ]
    .iter()
    .filter_map(|&b| table.get(&(kind, arrangement, b)))
    .collect();

    if rows.is_empty() {
        return Err(HenError::not_found(format!(
            "no cost data for {kind:?} with {arrangement:?} arrangement"
        )));
    }

    let pmin = rows
        .iter()
        .map(|r| r.pressure.0)
        .fold(Real::INFINITY, Real::min);
    let pmax = rows
        .iter()
        .map(|r| r.pressure.1)
        .fold(Real::NEG_INFINITY, Real::max);
    if pressure < pmin || pressure > pmax {
        return Err(HenError::invalid_range(format!(
            "pressure {pressure} barg outside [{pmin}, {pmax}] for {kind:?}"
        )));
    }

    // brackets are closed on the left; the top bracket absorbs pmax
    let row = rows
        .into_iter()
        .find(|r| r.pressure.0 <= pressure && (pressure < r.pressure.1 || pressure == pmax))
        .ok_or_else(|| {
            HenError::invalid_range(format!("pressure {pressure} barg has no bracket for {kind:?}"))
        })?;

    if area < row.area.0 || area > row.area.1 {
        return Err(HenError::invalid_range(format!(
            "area {area} m² outside [{}, {}] for {kind:?}",
            row.area.0, row.area.1
        )));
    }

    Ok(row)
}

/// Base purchase cost Cp⁰ ($, carbon steel, ambient pressure).
pub fn purchase_cost(
    kind: ExchangerKind,
    arrangement: Arrangement,
    area: Real,
    pressure: Real,
) -> HenResult<Real> {
    let row = lookup(kind, arrangement, area, pressure)?;
    Ok(correlate(area, &row.k))
}

/// Pressure factor Fp for the operating gauge pressure.
pub fn pressure_factor(
    kind: ExchangerKind,
    arrangement: Arrangement,
    area: Real,
    pressure: Real,
) -> HenResult<Real> {
    let row = lookup(kind, arrangement, area, pressure)?;
    Ok(correlate(pressure, &row.c))
}

/// Material factor for the shell/tube material pair. `None` marks a
/// side the exchanger kind does not rate (air-cooler shell, plate
/// tube side).
pub fn material_factor(
    kind: ExchangerKind,
    shell: Option<Material>,
    tube: Option<Material>,
) -> HenResult<Real> {
    material_table()
        .get(&(kind, shell, tube))
        .copied()
        .ok_or_else(|| {
            HenError::not_found(format!(
                "no material factor for {kind:?} with shell {shell:?} and tube {tube:?}"
            ))
        })
}

/// Bare-module cost `Cp⁰ · (B1 + B2·FM·FP)` in correlation-base-year
/// dollars.
pub fn bare_module_cost(
    kind: ExchangerKind,
    arrangement: Arrangement,
    shell: Option<Material>,
    tube: Option<Material>,
    area: Real,
    pressure: Real,
) -> HenResult<Real> {
    let row = lookup(kind, arrangement, area, pressure)?;
    let fm = material_factor(kind, shell, tube)?;
    let cp0 = correlate(area, &row.k);
    let fp = correlate(pressure, &row.c);
    Ok(cp0 * (row.b[0] + row.b[1] * fm * fp))
}
