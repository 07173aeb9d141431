//! The analysis aggregate shared by the frontends.
//!
//! `Setup` owns the stream and film-coefficient tables, the approach
//! temperature and both branch design ledgers, and keeps every derived
//! table consistent: each mutating call recomputes the full dependent
//! chain synchronously before returning, so reads never observe stale
//! state. There is no observer wiring; consistency is the explicit
//! contract of the mutators.

use hen_analysis::{
    CompositeCurves, HeatFlow, Interval, Ladder, Partitions, Segment, area_target, build_composite_curves,
    build_ladder, build_problem_table, build_segments, heat_flows, locate_pinch,
    minimum_exchangers, partition_streams, Branch,
};
use hen_core::{
    FilmCoefficient, HenError, Real, Stream, StreamKind, UnitSet, check_unique_ids, ensure_finite,
};
use hen_design::{BranchDesign, ExchangerRecord, ExchangerSpec, UtilitySide, split_stream};
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Default minimum approach temperature for a fresh setup.
pub const DEFAULT_DT: Real = 10.0;

/// Everything derivable from the inputs, recomputed as one unit.
///
/// With an empty hot or cold side the tables stay empty and the pinch
/// undefined; that is a valid state, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Derived {
    pub ladder: Ladder,
    pub intervals: Vec<Interval>,
    pub heat_flows: Vec<HeatFlow>,
    pub pinch: Option<Real>,
    pub hot_utility: Real,
    pub cold_utility: Real,
    pub partitions: Partitions,
    pub curves: CompositeCurves,
}

#[derive(Debug, Clone)]
pub struct Setup {
    units: UnitSet,
    dt: Real,
    hot: Vec<Stream>,
    cold: Vec<Stream>,
    hot_film: Vec<FilmCoefficient>,
    cold_film: Vec<FilmCoefficient>,
    derived: Derived,
    design_above: BranchDesign,
    design_below: BranchDesign,
}

impl Setup {
    pub fn new(units: UnitSet) -> Self {
        let derived = Derived::default();
        Self {
            units,
            dt: DEFAULT_DT,
            hot: Vec::new(),
            cold: Vec::new(),
            hot_film: Vec::new(),
            cold_film: Vec::new(),
            design_above: BranchDesign::new(
                Branch::Above,
                derived.partitions.above.clone(),
                DEFAULT_DT,
            ),
            design_below: BranchDesign::new(
                Branch::Below,
                derived.partitions.below.clone(),
                DEFAULT_DT,
            ),
            derived,
        }
    }

    // ------------------------------------------------------------------
    // snapshots

    pub fn units(&self) -> UnitSet {
        self.units
    }

    pub fn dt(&self) -> Real {
        self.dt
    }

    pub fn hot(&self) -> &[Stream] {
        &self.hot
    }

    pub fn cold(&self) -> &[Stream] {
        &self.cold
    }

    pub fn hot_film(&self) -> &[FilmCoefficient] {
        &self.hot_film
    }

    pub fn cold_film(&self) -> &[FilmCoefficient] {
        &self.cold_film
    }

    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    pub fn pinch(&self) -> Option<Real> {
        self.derived.pinch
    }

    pub fn hot_utility(&self) -> Real {
        self.derived.hot_utility
    }

    pub fn cold_utility(&self) -> Real {
        self.derived.cold_utility
    }

    pub fn design_above(&self) -> &BranchDesign {
        &self.design_above
    }

    pub fn design_below(&self) -> &BranchDesign {
        &self.design_below
    }

    /// Combined minimum-exchanger target over both branches.
    pub fn min_exchangers(&self) -> usize {
        let above = minimum_exchangers(
            self.derived.partitions.above.hot.len(),
            self.derived.partitions.above.cold.len(),
            Branch::Above,
        );
        let below = minimum_exchangers(
            self.derived.partitions.below.hot.len(),
            self.derived.partitions.below.cold.len(),
            Branch::Below,
        );
        above + below
    }

    /// Vertical area-accounting segments; requires every film
    /// coefficient to be populated.
    pub fn segments(&self) -> AppResult<Vec<Segment>> {
        if self.derived.intervals.is_empty() {
            return Err(AppError::InvalidInput(
                "both stream tables must be populated before area targeting".into(),
            ));
        }
        Ok(build_segments(
            &self.hot,
            &self.cold,
            self.dt,
            &self.derived.curves,
            &self.hot_film,
            &self.cold_film,
            &self.derived.intervals,
        )?)
    }

    /// Minimum-network-area target, m².
    pub fn area_target(&self) -> AppResult<Real> {
        Ok(area_target(&self.segments()?))
    }

    // ------------------------------------------------------------------
    // mutations

    /// Add a stream to the given side. The id must be new on that side;
    /// its film coefficient starts unset.
    pub fn add_stream(&mut self, kind: StreamKind, stream: Stream) -> AppResult<()> {
        // revalidate orientation against the declared side
        let stream = Stream::new(
            stream.id,
            kind,
            stream.mass_flow,
            stream.heat_capacity,
            stream.t_in,
            stream.t_out,
        )?;
        let (streams, films) = self.side_mut(kind);
        if streams.iter().any(|s| s.id == stream.id) {
            return Err(HenError::conflict(format!("duplicate stream id '{}'", stream.id)).into());
        }
        films.push(FilmCoefficient::unset(&stream.id));
        streams.push(stream);
        self.recompute()
    }

    /// Remove a stream and its film coefficient row.
    pub fn delete_stream(&mut self, kind: StreamKind, id: &str) -> AppResult<()> {
        let (streams, films) = self.side_mut(kind);
        let pos = streams
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| HenError::not_found(format!("no stream '{id}' to delete")))?;
        streams.remove(pos);
        films.remove(pos);
        self.recompute()
    }

    /// Replace a stream's row, keeping its film coefficient.
    pub fn update_stream(&mut self, kind: StreamKind, id: &str, stream: Stream) -> AppResult<()> {
        let stream = Stream::new(
            stream.id,
            kind,
            stream.mass_flow,
            stream.heat_capacity,
            stream.t_in,
            stream.t_out,
        )?;
        let (streams, films) = self.side_mut(kind);
        let pos = streams
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| HenError::not_found(format!("no stream '{id}' to update")))?;
        if stream.id != id && streams.iter().any(|s| s.id == stream.id) {
            return Err(HenError::conflict(format!("duplicate stream id '{}'", stream.id)).into());
        }
        films[pos].stream_id = stream.id.clone();
        streams[pos] = stream;
        self.recompute()
    }

    pub fn set_dt(&mut self, dt: Real) -> AppResult<()> {
        ensure_finite(dt, "minimum approach temperature")?;
        if dt <= 0.0 {
            return Err(AppError::InvalidInput(format!(
                "minimum approach temperature must be positive, got {dt}"
            )));
        }
        self.dt = dt;
        self.recompute()
    }

    /// Set (or clear) a stream's film coefficient, W/(m²·K).
    pub fn set_film_coefficient(
        &mut self,
        kind: StreamKind,
        id: &str,
        coefficient: Option<Real>,
    ) -> AppResult<()> {
        if let Some(h) = coefficient {
            ensure_finite(h, "film coefficient")?;
            if h <= 0.0 {
                return Err(AppError::InvalidInput(format!(
                    "film coefficient must be positive, got {h}"
                )));
            }
        }
        let (_, films) = self.side_mut(kind);
        let film = films
            .iter_mut()
            .find(|f| f.stream_id == id)
            .ok_or_else(|| HenError::not_found(format!("no stream '{id}'")))?;
        film.coefficient = coefficient;
        self.recompute()
    }

    /// Split a stream into equal-property branches; both design ledgers
    /// reset since the partition topology changed.
    pub fn split_stream(&mut self, kind: StreamKind, id: &str, flows: &[Real]) -> AppResult<()> {
        let film = {
            let (_, films) = self.side_mut(kind);
            films
                .iter()
                .find(|f| f.stream_id == id)
                .map(|f| f.coefficient)
                .ok_or_else(|| HenError::not_found(format!("no stream '{id}' to split")))?
        };
        let (streams, films) = self.side_mut(kind);
        split_stream(streams, id, flows)?;

        // rebuild the film rows in table order, sub-streams inheriting
        // the parent's coefficient
        let pos = films
            .iter()
            .position(|f| f.stream_id == id)
            .ok_or_else(|| HenError::not_found(format!("no film row for '{id}'")))?;
        let replacements: Vec<FilmCoefficient> = streams[pos..pos + flows.len()]
            .iter()
            .map(|s| FilmCoefficient {
                stream_id: s.id.clone(),
                coefficient: film,
            })
            .collect();
        films.splice(pos..=pos, replacements);
        self.recompute()
    }

    /// Attach a process exchanger on one branch's ledger.
    #[allow(clippy::too_many_arguments)]
    pub fn add_process_exchanger(
        &mut self,
        branch: Branch,
        id: &str,
        interval: &str,
        hot_id: &str,
        cold_id: &str,
        duty: Real,
        spec: &ExchangerSpec,
    ) -> AppResult<ExchangerRecord> {
        let design = self.design_mut(branch);
        Ok(design.add_process_exchanger(id, interval, hot_id, cold_id, duty, spec)?)
    }

    /// Attach a utility exchanger on one branch's ledger.
    #[allow(clippy::too_many_arguments)]
    pub fn add_utility_exchanger(
        &mut self,
        branch: Branch,
        id: &str,
        interval: &str,
        process_id: &str,
        duty: Real,
        utility: &UtilitySide,
        spec: &ExchangerSpec,
    ) -> AppResult<ExchangerRecord> {
        let design = self.design_mut(branch);
        Ok(design.add_utility_exchanger(id, interval, process_id, duty, utility, spec)?)
    }

    pub fn delete_exchanger(&mut self, branch: Branch, id: &str) -> AppResult<()> {
        Ok(self.design_mut(branch).delete_exchanger(id)?)
    }

    /// Adopt persisted ledger records onto the current partitions, e.g.
    /// when reloading a project file.
    pub fn restore_designs(
        &mut self,
        above: Vec<ExchangerRecord>,
        below: Vec<ExchangerRecord>,
    ) -> AppResult<()> {
        self.design_above.restore(above)?;
        self.design_below.restore(below)?;
        Ok(())
    }

    // ------------------------------------------------------------------

    fn side_mut(&mut self, kind: StreamKind) -> (&mut Vec<Stream>, &mut Vec<FilmCoefficient>) {
        match kind {
            StreamKind::Hot => (&mut self.hot, &mut self.hot_film),
            StreamKind::Cold => (&mut self.cold, &mut self.cold_film),
        }
    }

    fn design_mut(&mut self, branch: Branch) -> &mut BranchDesign {
        match branch {
            Branch::Above => &mut self.design_above,
            Branch::Below => &mut self.design_below,
        }
    }

    /// Recompute the whole derived chain and reset both ledgers onto
    /// the fresh partitions.
    fn recompute(&mut self) -> AppResult<()> {
        check_unique_ids(&self.hot)?;
        check_unique_ids(&self.cold)?;

        self.derived = if self.hot.is_empty() || self.cold.is_empty() {
            Derived::default()
        } else {
            let ladder = build_ladder(&self.hot, &self.cold, self.dt)?;
            let intervals = build_problem_table(&self.hot, &self.cold, self.dt)?;
            let pinch = locate_pinch(&intervals)?;
            let flows = heat_flows(&intervals)?;
            let curves = build_composite_curves(
                &self.hot,
                &self.cold,
                self.dt,
                pinch.cold_utility,
                &intervals,
            )?;
            let partitions = partition_streams(
                &self.hot,
                &self.cold,
                self.dt,
                pinch.pinch,
                &self.hot_film,
                &self.cold_film,
            );
            Derived {
                ladder,
                intervals,
                heat_flows: flows,
                pinch: pinch.pinch,
                hot_utility: pinch.hot_utility,
                cold_utility: pinch.cold_utility,
                partitions,
                curves,
            }
        };

        self.design_above = BranchDesign::new(
            Branch::Above,
            self.derived.partitions.above.clone(),
            self.dt,
        );
        self.design_below = BranchDesign::new(
            Branch::Below,
            self.derived.partitions.below.clone(),
            self.dt,
        );

        debug!(
            hot = self.hot.len(),
            cold = self.cold.len(),
            dt = self.dt,
            pinch = ?self.derived.pinch,
            "derived state recomputed"
        );
        Ok(())
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::new(UnitSet::Si)
    }
}
