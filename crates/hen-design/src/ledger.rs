//! Incremental network-design ledger.
//!
//! One [`BranchDesign`] per pinch branch holds an ordered list of
//! exchanger records built against that branch's partition. A stream's
//! remaining capacity is recomputed from the ledger on every query, so
//! deleting a record restores whatever it had claimed.

use hen_analysis::{Branch, FlowPattern, Partition, PartitionStream, log_mean_diff,
    minimum_exchangers};
use hen_core::{HenError, HenResult, Real, Stream, StreamKind, Tolerances, nearly_equal};
use tracing::debug;

use crate::cost::{Arrangement, ExchangerKind, Material, bare_module_cost};
use crate::exchanger::{exchanger_area, shell_count};

/// Source label of an above-pinch utility exchanger.
pub const HOT_UTILITY: &str = "Hot utility";
/// Destination label of a below-pinch utility exchanger.
pub const COLD_UTILITY: &str = "Cold utility";

/// Geometry, materials and rating shared by the add operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangerSpec {
    pub kind: ExchangerKind,
    pub arrangement: Arrangement,
    pub shell_material: Option<Material>,
    pub tube_material: Option<Material>,
    /// Operating gauge pressure, barg.
    pub pressure: Real,
    pub pattern: FlowPattern,
    /// LMTD correction factor F.
    pub correction_factor: Real,
}

/// Caller-supplied utility side of a utility exchanger; the utility
/// stream is not part of the partition tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilitySide {
    pub t_in: Real,
    pub t_out: Real,
    /// Film coefficient, W/(m²·K).
    pub film: Real,
}

/// One ledger entry, fully sized and costed at insertion time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExchangerRecord {
    pub id: String,
    pub interval: String,
    /// Duty, kW.
    pub duty: Real,
    /// Hot-side stream id, or [`HOT_UTILITY`].
    pub source: String,
    /// Cold-side stream id, or [`COLD_UTILITY`].
    pub dest: String,
    pub kind: ExchangerKind,
    pub arrangement: Arrangement,
    pub shell_material: Option<Material>,
    pub tube_material: Option<Material>,
    pub pressure: Real,
    pub hot_in: Real,
    pub hot_out: Real,
    pub cold_in: Real,
    pub cold_out: Real,
    pub lmtd: Real,
    /// Overall coefficient, W/(m²·K).
    pub overall_coefficient: Real,
    pub correction_factor: Real,
    /// Area, m².
    pub area: Real,
    pub shells: usize,
    /// Bare-module cost, $.
    pub cost: Real,
}

/// The exchanger ledger for one side of the pinch.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchDesign {
    branch: Branch,
    partition: Partition,
    dt: Real,
    records: Vec<ExchangerRecord>,
}

impl BranchDesign {
    pub fn new(branch: Branch, partition: Partition, dt: Real) -> Self {
        Self {
            branch,
            partition,
            dt,
            records: Vec::new(),
        }
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn records(&self) -> &[ExchangerRecord] {
        &self.records
    }

    /// Minimum-exchanger target for this branch; the ledger may not
    /// grow past it.
    pub fn exchanger_target(&self) -> usize {
        minimum_exchangers(self.partition.hot.len(), self.partition.cold.len(), self.branch)
    }

    /// Remaining inlet temperature and unclaimed capacity (kW) of a hot
    /// partition stream, recomputed from the ledger.
    pub fn remaining_hot(&self, id: &str) -> HenResult<(Real, Real)> {
        let p = self
            .partition
            .find_hot(id)
            .ok_or_else(|| HenError::not_found(format!("hot stream '{id}' not in this branch")))?;
        let claimed: Real = self
            .records
            .iter()
            .filter(|r| r.source == id)
            .map(|r| r.duty)
            .sum();
        let t_in = p.stream.t_in - claimed / p.stream.mcp();
        Ok((t_in, p.stream.mcp() * (t_in - p.stream.t_out)))
    }

    /// Remaining inlet temperature and unclaimed capacity (kW) of a
    /// cold partition stream.
    pub fn remaining_cold(&self, id: &str) -> HenResult<(Real, Real)> {
        let p = self
            .partition
            .find_cold(id)
            .ok_or_else(|| HenError::not_found(format!("cold stream '{id}' not in this branch")))?;
        let claimed: Real = self
            .records
            .iter()
            .filter(|r| r.dest == id)
            .map(|r| r.duty)
            .sum();
        let t_in = p.stream.t_in + claimed / p.stream.mcp();
        Ok((t_in, p.stream.mcp() * (p.stream.t_out - t_in)))
    }

    fn check_admissible(&self, id: &str, duty: Real) -> HenResult<()> {
        if duty <= 0.0 {
            return Err(HenError::invalid_input(format!(
                "exchanger duty must be positive, got {duty}"
            )));
        }
        if self.records.iter().any(|r| r.id == id) {
            return Err(HenError::conflict(format!(
                "exchanger id '{id}' already in this branch"
            )));
        }
        if self.records.len() >= self.exchanger_target() {
            return Err(HenError::infeasible(format!(
                "branch already holds its minimum-exchanger target of {}",
                self.exchanger_target()
            )));
        }
        Ok(())
    }

    fn film_of(p: &PartitionStream) -> HenResult<Real> {
        p.film.ok_or_else(|| {
            HenError::infeasible(format!(
                "film coefficient missing for '{}'",
                p.stream.id
            ))
        })
    }

    fn check_capacity(what: &str, duty: Real, capacity: Real) -> HenResult<()> {
        if duty > capacity + 1e-9 {
            return Err(HenError::infeasible(format!(
                "duty {duty} kW exceeds remaining capacity {capacity} kW of {what}"
            )));
        }
        Ok(())
    }

    fn check_approach(&self, lmtd: Real) -> HenResult<()> {
        // also rejects NaN from an inverted driving force
        if !(lmtd >= self.dt) {
            return Err(HenError::infeasible(format!(
                "LMTD {lmtd} below the minimum approach {}",
                self.dt
            )));
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn size_and_push(
        &mut self,
        id: &str,
        interval: &str,
        source: &str,
        dest: &str,
        duty: Real,
        terminals: (Real, Real, Real, Real),
        films: (Real, Real),
        mcps: (Real, Real),
        spec: &ExchangerSpec,
    ) -> HenResult<ExchangerRecord> {
        let (hot_in, hot_out, cold_in, cold_out) = terminals;
        let lmtd = log_mean_diff(spec.pattern, hot_in, hot_out, cold_in, cold_out);
        self.check_approach(lmtd)?;

        let (area, u) =
            exchanger_area(duty, lmtd, &[films.0], &[films.1], spec.correction_factor)?;

        let hot_side = Stream::new(source, StreamKind::Hot, 1.0, mcps.0, hot_in, hot_out)?;
        let cold_side = Stream::new(dest, StreamKind::Cold, 1.0, mcps.1, cold_in, cold_out)?;
        let shells = shell_count(&hot_side, &cold_side)?;

        let cost = bare_module_cost(
            spec.kind,
            spec.arrangement,
            spec.shell_material,
            spec.tube_material,
            area,
            spec.pressure,
        )?;

        debug!(id, source, dest, duty, area, shells, "exchanger added");

        let record = ExchangerRecord {
            id: id.to_owned(),
            interval: interval.to_owned(),
            duty,
            source: source.to_owned(),
            dest: dest.to_owned(),
            kind: spec.kind,
            arrangement: spec.arrangement,
            shell_material: spec.shell_material,
            tube_material: spec.tube_material,
            pressure: spec.pressure,
            hot_in,
            hot_out,
            cold_in,
            cold_out,
            lmtd,
            overall_coefficient: u,
            correction_factor: spec.correction_factor,
            area,
            shells,
            cost,
        };
        self.records.push(record.clone());
        Ok(record)
    }

    /// Attach a process-to-process exchanger between a hot and a cold
    /// partition stream.
    pub fn add_process_exchanger(
        &mut self,
        id: &str,
        interval: &str,
        hot_id: &str,
        cold_id: &str,
        duty: Real,
        spec: &ExchangerSpec,
    ) -> HenResult<ExchangerRecord> {
        self.check_admissible(id, duty)?;

        let hot = self
            .partition
            .find_hot(hot_id)
            .ok_or_else(|| {
                HenError::not_found(format!("hot stream '{hot_id}' not in this branch"))
            })?
            .clone();
        let cold = self
            .partition
            .find_cold(cold_id)
            .ok_or_else(|| {
                HenError::not_found(format!("cold stream '{cold_id}' not in this branch"))
            })?
            .clone();
        let hot_film = Self::film_of(&hot)?;
        let cold_film = Self::film_of(&cold)?;

        let (hot_t, hot_cap) = self.remaining_hot(hot_id)?;
        Self::check_capacity(hot_id, duty, hot_cap)?;
        let (cold_t, cold_cap) = self.remaining_cold(cold_id)?;
        Self::check_capacity(cold_id, duty, cold_cap)?;

        let terminals = (
            hot_t,
            hot_t - duty / hot.stream.mcp(),
            cold_t,
            cold_t + duty / cold.stream.mcp(),
        );
        self.size_and_push(
            id,
            interval,
            hot_id,
            cold_id,
            duty,
            terminals,
            (hot_film, cold_film),
            (hot.stream.mcp(), cold.stream.mcp()),
            spec,
        )
    }

    /// Attach a utility exchanger: hot utility heating a cold stream
    /// above the pinch, cold utility cooling a hot stream below. The
    /// utility side is supplied by the caller; its mf·cp falls out of
    /// the duty and temperature span.
    pub fn add_utility_exchanger(
        &mut self,
        id: &str,
        interval: &str,
        process_id: &str,
        duty: Real,
        utility: &UtilitySide,
        spec: &ExchangerSpec,
    ) -> HenResult<ExchangerRecord> {
        self.check_admissible(id, duty)?;

        if utility.film <= 0.0 {
            return Err(HenError::invalid_input(format!(
                "utility film coefficient must be positive, got {}",
                utility.film
            )));
        }
        let util_span = (utility.t_in - utility.t_out).abs();
        if util_span == 0.0 {
            return Err(HenError::invalid_input(
                "utility inlet and outlet temperatures coincide",
            ));
        }
        let util_mcp = duty / util_span;

        match self.branch {
            Branch::Above => {
                let process = self
                    .partition
                    .find_cold(process_id)
                    .ok_or_else(|| {
                        HenError::not_found(format!(
                            "cold stream '{process_id}' not in this branch"
                        ))
                    })?
                    .clone();
                let film = Self::film_of(&process)?;
                let (cold_t, cap) = self.remaining_cold(process_id)?;
                Self::check_capacity(process_id, duty, cap)?;

                let terminals = (
                    utility.t_in,
                    utility.t_out,
                    cold_t,
                    cold_t + duty / process.stream.mcp(),
                );
                self.size_and_push(
                    id,
                    interval,
                    HOT_UTILITY,
                    process_id,
                    duty,
                    terminals,
                    (utility.film, film),
                    (util_mcp, process.stream.mcp()),
                    spec,
                )
            }
            Branch::Below => {
                let process = self
                    .partition
                    .find_hot(process_id)
                    .ok_or_else(|| {
                        HenError::not_found(format!(
                            "hot stream '{process_id}' not in this branch"
                        ))
                    })?
                    .clone();
                let film = Self::film_of(&process)?;
                let (hot_t, cap) = self.remaining_hot(process_id)?;
                Self::check_capacity(process_id, duty, cap)?;

                let terminals = (
                    hot_t,
                    hot_t - duty / process.stream.mcp(),
                    utility.t_in,
                    utility.t_out,
                );
                self.size_and_push(
                    id,
                    interval,
                    process_id,
                    COLD_UTILITY,
                    duty,
                    terminals,
                    (film, utility.film),
                    (process.stream.mcp(), util_mcp),
                    spec,
                )
            }
        }
    }

    /// Remove a record by id. Capacities are always recomputed from the
    /// surviving records, so whatever the record claimed is restored.
    pub fn delete_exchanger(&mut self, id: &str) -> HenResult<()> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Err(HenError::not_found(format!(
                "no exchanger '{id}' in this branch"
            )));
        }
        Ok(())
    }

    /// Drop every record, keeping the partition.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Adopt persisted records wholesale, e.g. when reloading a
    /// project. Sizing is trusted as stored; only id uniqueness and the
    /// branch target are re-checked, capacity bookkeeping re-derives
    /// from the adopted records on the next query.
    pub fn restore(&mut self, records: Vec<ExchangerRecord>) -> HenResult<()> {
        for (i, r) in records.iter().enumerate() {
            if records[..i].iter().any(|p| p.id == r.id) {
                return Err(HenError::conflict(format!(
                    "exchanger id '{}' appears twice",
                    r.id
                )));
            }
        }
        if records.len() > self.exchanger_target() {
            return Err(HenError::infeasible(format!(
                "{} records exceed the branch target of {}",
                records.len(),
                self.exchanger_target()
            )));
        }
        self.records = records;
        Ok(())
    }
}

/// Split one stream into identical-property sub-streams.
///
/// `flows` gives each sub-stream's mass flow; 2 to 5 splits are
/// allowed and they must sum exactly to the original flow. Sub-streams
/// take alphabetic suffixes (`H1-A`, `H1-B`, ...) in the original's
/// table position. The caller owns resetting any design ledgers built
/// on the old topology.
pub fn split_stream(streams: &mut Vec<Stream>, id: &str, flows: &[Real]) -> HenResult<()> {
    let pos = streams
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| HenError::not_found(format!("no stream '{id}' to split")))?;

    if !(2..=5).contains(&flows.len()) {
        return Err(HenError::invalid_input(format!(
            "a stream splits into 2 to 5 branches, got {}",
            flows.len()
        )));
    }
    if flows.iter().any(|&f| f <= 0.0) {
        return Err(HenError::invalid_input(
            "every split flow must be positive",
        ));
    }

    let original = streams[pos].clone();
    let total: Real = flows.iter().sum();
    if !nearly_equal(
        total,
        original.mass_flow,
        Tolerances {
            abs: 1e-9,
            rel: 1e-12,
        },
    ) {
        return Err(HenError::conflict(format!(
            "split flows sum to {total}, stream '{id}' carries {}",
            original.mass_flow
        )));
    }

    let subs: Vec<Stream> = flows
        .iter()
        .enumerate()
        .map(|(i, &f)| {
            let mut s = original.clone();
            s.id = format!("{id}-{}", (b'A' + i as u8) as char);
            s.mass_flow = f;
            s
        })
        .collect();
    streams.splice(pos..=pos, subs);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hen_analysis::partition_streams;
    use hen_core::FilmCoefficient;
    use proptest::prelude::*;

    fn spec(kind: ExchangerKind, arrangement: Arrangement) -> ExchangerSpec {
        ExchangerSpec {
            kind,
            arrangement,
            shell_material: Some(Material::CarbonSteel),
            tube_material: Some(Material::CarbonSteel),
            pressure: 2.0,
            pattern: FlowPattern::CounterCurrent,
            correction_factor: 0.8,
        }
    }

    fn above_design(dt: Real) -> BranchDesign {
        let hot = vec![
            Stream::new("H1", StreamKind::Hot, 1.0, 3.0, 170.0, 60.0).unwrap(),
            Stream::new("H2", StreamKind::Hot, 1.0, 1.5, 150.0, 30.0).unwrap(),
        ];
        let cold = vec![
            Stream::new("C1", StreamKind::Cold, 1.0, 2.0, 20.0, 135.0).unwrap(),
            Stream::new("C2", StreamKind::Cold, 1.0, 4.0, 80.0, 140.0).unwrap(),
        ];
        let hf = vec![
            FilmCoefficient::new("H1", 800.0),
            FilmCoefficient::new("H2", 800.0),
        ];
        let cf = vec![
            FilmCoefficient::new("C1", 600.0),
            FilmCoefficient::new("C2", 600.0),
        ];
        let parts = partition_streams(&hot, &cold, 10.0, Some(90.0), &hf, &cf);
        BranchDesign::new(Branch::Above, parts.above, dt)
    }

    #[test]
    fn process_exchanger_sized_and_recorded() {
        let mut design = above_design(10.0);
        let spec = spec(ExchangerKind::FloatingHead, Arrangement::ShellTube);

        let record = design
            .add_process_exchanger("E-1", "I-3", "H1", "C2", 200.0, &spec)
            .unwrap();

        assert_eq!(record.source, "H1");
        assert_eq!(record.dest, "C2");
        assert_eq!(record.hot_in, 170.0);
        assert!((record.hot_out - (170.0 - 200.0 / 3.0)).abs() < 1e-9);
        assert_eq!(record.cold_in, 80.0);
        assert_eq!(record.cold_out, 130.0);
        assert!(record.lmtd >= 10.0);
        assert!(record.area > 10.0);
        assert!(record.shells >= 1);
        assert!(record.cost > 0.0);

        // H1 carried 240 kW above the pinch; 40 remain
        let (t_in, cap) = design.remaining_hot("H1").unwrap();
        assert!((t_in - (170.0 - 200.0 / 3.0)).abs() < 1e-9);
        assert!((cap - 40.0).abs() < 1e-9);
    }

    #[test]
    fn duplicate_id_conflicts() {
        let mut design = above_design(10.0);
        let spec = spec(ExchangerKind::FloatingHead, Arrangement::ShellTube);
        design
            .add_process_exchanger("E-1", "I-3", "H1", "C2", 200.0, &spec)
            .unwrap();
        let err = design
            .add_process_exchanger("E-1", "I-3", "H2", "C1", 50.0, &spec)
            .unwrap_err();
        assert!(matches!(err, HenError::Conflict { .. }));
    }

    #[test]
    fn unknown_stream_not_found() {
        let mut design = above_design(10.0);
        let spec = spec(ExchangerKind::FloatingHead, Arrangement::ShellTube);
        let err = design
            .add_process_exchanger("E-1", "I-3", "H9", "C2", 50.0, &spec)
            .unwrap_err();
        assert!(matches!(err, HenError::NotFound { .. }));
        assert!(design.remaining_cold("C9").is_err());
    }

    #[test]
    fn overdrawn_duty_is_infeasible() {
        let mut design = above_design(10.0);
        let spec = spec(ExchangerKind::FloatingHead, Arrangement::ShellTube);
        // H1 only carries 240 kW above the pinch
        let err = design
            .add_process_exchanger("E-1", "I-3", "H1", "C2", 300.0, &spec)
            .unwrap_err();
        assert!(matches!(err, HenError::InfeasibleDesign { .. }));
    }

    #[test]
    fn approach_violation_is_infeasible() {
        // same match as the sized test, but a 35 K minimum approach
        let mut design = above_design(35.0);
        let spec = spec(ExchangerKind::FloatingHead, Arrangement::ShellTube);
        let err = design
            .add_process_exchanger("E-1", "I-3", "H1", "C2", 200.0, &spec)
            .unwrap_err();
        assert!(matches!(err, HenError::InfeasibleDesign { .. }));
    }

    #[test]
    fn deleting_restores_claimed_capacity() {
        let mut design = above_design(10.0);
        let spec = spec(ExchangerKind::FloatingHead, Arrangement::ShellTube);
        let (_, before) = design.remaining_hot("H1").unwrap();

        design
            .add_process_exchanger("E-1", "I-3", "H1", "C2", 200.0, &spec)
            .unwrap();
        let (_, during) = design.remaining_hot("H1").unwrap();
        assert!(during < before);

        design.delete_exchanger("E-1").unwrap();
        let (_, after) = design.remaining_hot("H1").unwrap();
        assert!((after - before).abs() < 1e-9);

        assert!(matches!(
            design.delete_exchanger("E-1"),
            Err(HenError::NotFound { .. })
        ));
    }

    #[test]
    fn utility_exchanger_above_uses_hot_utility_tag() {
        let mut design = above_design(10.0);
        // a steam heater this size lands in the double-pipe area range
        let spec = spec(ExchangerKind::DoublePipe, Arrangement::TubeOnly);
        let steam = UtilitySide {
            t_in: 250.0,
            t_out: 249.0,
            film: 5000.0,
        };

        let record = design
            .add_utility_exchanger("HU-1", "I-1", "C2", 200.0, &steam, &spec)
            .unwrap();
        assert_eq!(record.source, HOT_UTILITY);
        assert_eq!(record.dest, "C2");
        assert_eq!(record.hot_in, 250.0);
        assert_eq!(record.cold_in, 80.0);
        assert_eq!(record.cold_out, 130.0);

        // the utility draw still claims the process stream's capacity
        let (_, cap) = design.remaining_cold("C2").unwrap();
        assert!((cap - 40.0).abs() < 1e-9);
    }

    #[test]
    fn ledger_capped_at_branch_target() {
        // a matched pair with no pinch: everything above, target = 2
        let hot = vec![Stream::new("H1", StreamKind::Hot, 1.0, 2.0, 200.0, 100.0).unwrap()];
        let cold = vec![Stream::new("C1", StreamKind::Cold, 1.0, 2.0, 50.0, 150.0).unwrap()];
        let hf = vec![FilmCoefficient::new("H1", 300.0)];
        let cf = vec![FilmCoefficient::new("C1", 300.0)];
        let parts = partition_streams(&hot, &cold, 10.0, None, &hf, &cf);
        let mut design = BranchDesign::new(Branch::Above, parts.above, 10.0);
        assert_eq!(design.exchanger_target(), 2);

        let pipe = spec(ExchangerKind::DoublePipe, Arrangement::TubeOnly);
        design
            .add_process_exchanger("E-1", "I-1", "H1", "C1", 100.0, &pipe)
            .unwrap();
        let steam = UtilitySide {
            t_in: 250.0,
            t_out: 249.0,
            film: 5000.0,
        };
        design
            .add_utility_exchanger("HU-1", "I-1", "C1", 50.0, &steam, &pipe)
            .unwrap();

        let err = design
            .add_utility_exchanger("HU-2", "I-1", "C1", 25.0, &steam, &pipe)
            .unwrap_err();
        assert!(matches!(err, HenError::InfeasibleDesign { .. }));
    }

    #[test]
    fn split_renames_with_alphabetic_suffixes() {
        let mut streams = vec![
            Stream::new("H1", StreamKind::Hot, 2.0, 3.0, 170.0, 60.0).unwrap(),
            Stream::new("H2", StreamKind::Hot, 1.0, 1.5, 150.0, 30.0).unwrap(),
        ];
        split_stream(&mut streams, "H1", &[1.25, 0.75]).unwrap();

        assert_eq!(streams.len(), 3);
        assert_eq!(streams[0].id, "H1-A");
        assert_eq!(streams[1].id, "H1-B");
        assert_eq!(streams[2].id, "H2");
        assert_eq!(streams[0].mass_flow, 1.25);
        assert_eq!(streams[1].mass_flow, 0.75);
        // property rows are otherwise identical
        assert_eq!(streams[0].heat_capacity, 3.0);
        assert_eq!(streams[1].t_in, 170.0);
    }

    #[test]
    fn split_validation() {
        let mut streams =
            vec![Stream::new("H1", StreamKind::Hot, 2.0, 3.0, 170.0, 60.0).unwrap()];

        assert!(matches!(
            split_stream(&mut streams, "H9", &[1.0, 1.0]),
            Err(HenError::NotFound { .. })
        ));
        assert!(matches!(
            split_stream(&mut streams, "H1", &[2.0]),
            Err(HenError::InvalidInput { .. })
        ));
        assert!(matches!(
            split_stream(&mut streams, "H1", &[0.5; 6]),
            Err(HenError::InvalidInput { .. })
        ));
        assert!(matches!(
            split_stream(&mut streams, "H1", &[1.0, 0.5]),
            Err(HenError::Conflict { .. })
        ));
        // the failed attempts left the table untouched
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].id, "H1");
    }

    proptest! {
        // splitting is flow-conserving for any two-way cut
        #[test]
        fn split_conserves_flow(cut in 0.05_f64..0.95) {
            let total = 2.0;
            let mut streams =
                vec![Stream::new("H1", StreamKind::Hot, total, 3.0, 170.0, 60.0).unwrap()];
            let first = total * cut;
            split_stream(&mut streams, "H1", &[first, total - first]).unwrap();
            let sum: Real = streams.iter().map(|s| s.mass_flow).sum();
            prop_assert!((sum - total).abs() < 1e-12);
        }
    }
}
