//! Pinch-based stream partitioning and minimum-exchanger targets.

use hen_core::{FilmCoefficient, Real, Stream, round4};

/// Which side of the pinch a sub-problem lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Above,
    Below,
}

/// A stream clipped to one side of the pinch.
///
/// `index` is the row index in the original stream table; partition
/// rows are NOT renumbered, so callers must account for gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionStream {
    pub index: usize,
    pub stream: Stream,
    /// Film coefficient joined by stream id, W/(m²·K).
    pub film: Option<Real>,
}

/// One sub-problem: the hot and cold streams present on that side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub hot: Vec<PartitionStream>,
    pub cold: Vec<PartitionStream>,
}

impl Partition {
    pub fn is_empty(&self) -> bool {
        self.hot.is_empty() && self.cold.is_empty()
    }

    pub fn find_hot(&self, id: &str) -> Option<&PartitionStream> {
        self.hot.iter().find(|p| p.stream.id == id)
    }

    pub fn find_cold(&self, id: &str) -> Option<&PartitionStream> {
        self.cold.iter().find(|p| p.stream.id == id)
    }
}

/// Both sub-problems.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partitions {
    pub above: Partition,
    pub below: Partition,
}

fn film_for(films: &[FilmCoefficient], id: &str) -> Option<Real> {
    films
        .iter()
        .find(|f| f.stream_id == id)
        .and_then(|f| f.coefficient)
}

/// Split the stream tables at the pinch.
///
/// Without a pinch the whole problem is "above" and the below partition
/// is empty. With a pinch, a hot stream belongs above when its inlet is
/// at or above the pinch (outlet clamped up to the pinch) and below
/// when its outlet is under the pinch (inlet clamped down); cold
/// streams are tested against the shifted pinch `pinch − ΔTmin`.
pub fn partition_streams(
    hot: &[Stream],
    cold: &[Stream],
    dt: Real,
    pinch: Option<Real>,
    hot_films: &[FilmCoefficient],
    cold_films: &[FilmCoefficient],
) -> Partitions {
    let join = |streams: &[Stream], films: &[FilmCoefficient]| -> Vec<PartitionStream> {
        streams
            .iter()
            .enumerate()
            .map(|(index, s)| PartitionStream {
                index,
                stream: s.clone(),
                film: film_for(films, &s.id),
            })
            .collect()
    };

    let Some(pinch) = pinch else {
        return Partitions {
            above: Partition {
                hot: join(hot, hot_films),
                cold: join(cold, cold_films),
            },
            below: Partition::default(),
        };
    };

    let hot_pinch = round4(pinch);
    let cold_pinch = round4(pinch - dt);
    let mut parts = Partitions::default();

    for (index, s) in hot.iter().enumerate() {
        let film = film_for(hot_films, &s.id);
        if round4(s.t_in) >= hot_pinch {
            let mut clipped = s.clone();
            clipped.t_out = clipped.t_out.max(hot_pinch);
            parts.above.hot.push(PartitionStream {
                index,
                stream: clipped,
                film,
            });
        }
        if round4(s.t_out) < hot_pinch {
            let mut clipped = s.clone();
            clipped.t_in = clipped.t_in.min(hot_pinch);
            parts.below.hot.push(PartitionStream {
                index,
                stream: clipped,
                film,
            });
        }
    }

    for (index, s) in cold.iter().enumerate() {
        let film = film_for(cold_films, &s.id);
        if round4(s.t_out) >= cold_pinch {
            let mut clipped = s.clone();
            clipped.t_in = clipped.t_in.max(cold_pinch);
            parts.above.cold.push(PartitionStream {
                index,
                stream: clipped,
                film,
            });
        }
        if round4(s.t_in) < cold_pinch {
            let mut clipped = s.clone();
            clipped.t_out = clipped.t_out.min(cold_pinch);
            parts.below.cold.push(PartitionStream {
                index,
                stream: clipped,
                film,
            });
        }
    }

    parts
}

/// Euler-style minimum exchanger count for one branch.
///
/// Each branch carries one utility: hot utility above the pinch, cold
/// utility below.
pub fn minimum_exchangers(hot_count: usize, cold_count: usize, branch: Branch) -> usize {
    let utilities = match branch {
        Branch::Above => 1, // hot utility
        Branch::Below => 1, // cold utility
    };
    (hot_count + cold_count + utilities).saturating_sub(1)
}
