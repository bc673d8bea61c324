//! Ordered collection of split ranges over a media timeline.

use std::time::Duration;

use crate::models::{RangeId, SplitRange};

use super::types::{JoinOutcome, RangeError, RangeEvent, RangeResult, UniformSplitOutcome};

/// Margin of error absorbing floating point drift in interval arithmetic.
pub const SPLIT_EPSILON: Duration = Duration::from_millis(50);

/// An ordered sequence of split ranges covering `[0, duration]`.
///
/// Ranges are kept in ascending `start` order after every insertion or
/// boundary edit. The set is owned by a single editing session; it performs
/// no locking of its own.
#[derive(Debug, Clone, Default)]
pub struct RangeSet {
    ranges: Vec<SplitRange>,
    duration: Duration,
    next_id: u64,
}

impl RangeSet {
    /// Create an empty set over the given timeline duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            ranges: Vec::new(),
            duration,
            next_id: 0,
        }
    }

    /// Get the timeline duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Replace the timeline duration.
    ///
    /// Existing ranges are left untouched; later normalization clamps
    /// against the new value.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Get the number of ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check whether the set has no ranges.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Iterate over the ranges in their current order.
    pub fn iter(&self) -> impl Iterator<Item = &SplitRange> {
        self.ranges.iter()
    }

    /// Look up a range by id.
    pub fn get(&self, id: RangeId) -> Option<&SplitRange> {
        self.ranges.iter().find(|r| r.id() == id)
    }

    /// Get the current index of a range.
    pub fn index_of(&self, id: RangeId) -> Option<usize> {
        self.ranges.iter().position(|r| r.id() == id)
    }

    /// Split the timeline at a playback position.
    ///
    /// - Empty set: creates `[0, position]` and `[position, duration]`.
    /// - Position strictly inside an existing range: truncates it there and
    ///   creates a new range covering the cut-off tail.
    /// - Position on a boundary or in an uncovered gap: creates a range from
    ///   the nearest existing end before the position (zero if none).
    ///
    /// Never removes existing ranges except by truncation.
    pub fn split_at(&mut self, position: Duration) -> RangeResult<Vec<RangeEvent>> {
        if position > self.duration {
            return Err(RangeError::PositionOutOfBounds {
                position,
                duration: self.duration,
            });
        }

        if self.ranges.is_empty() {
            let head = self.insert(Duration::ZERO, position);
            let tail = self.insert(position, self.duration);
            tracing::debug!(?position, "split empty timeline");
            return Ok(vec![RangeEvent::Added(head), RangeEvent::Added(tail)]);
        }

        if let Some(idx) = self
            .ranges
            .iter()
            .position(|r| position > r.start && position < r.end)
        {
            let cut_end = self.ranges[idx].end;
            let truncated = self.ranges[idx].id();
            self.ranges[idx].end = position;
            let added = self.insert(position, cut_end);
            tracing::debug!(?position, ?truncated, "split inside range");
            return Ok(vec![RangeEvent::Resized(truncated), RangeEvent::Added(added)]);
        }

        // Boundary or gap: close it from the nearest end before the mark.
        let nearest_end_before = self
            .ranges
            .iter()
            .map(|r| r.end)
            .filter(|&end| end < position)
            .max()
            .unwrap_or(Duration::ZERO);
        let added = self.insert(nearest_end_before, position);
        tracing::debug!(?position, ?nearest_end_before, "split into gap");
        Ok(vec![RangeEvent::Added(added)])
    }

    /// Carve a span into uniform intervals with a closing remainder.
    ///
    /// With no target the whole timeline is cleared and refilled; with a
    /// target only that range is replaced. The final chunk absorbs whatever
    /// is left, so it may be shorter or longer than `interval`. Intervals
    /// within [`SPLIT_EPSILON`] of the span length are an observable no-op.
    pub fn split_uniform(
        &mut self,
        interval: Duration,
        target: Option<RangeId>,
    ) -> RangeResult<UniformSplitOutcome> {
        if interval.is_zero() {
            return Err(RangeError::InvalidInterval);
        }

        let (span_start, span_end) = match target {
            Some(id) => {
                let range = self.get(id).ok_or(RangeError::UnknownRange(id))?;
                (range.start, range.end)
            }
            None => (Duration::ZERO, self.duration),
        };

        let fits = span_end
            .saturating_sub(span_start)
            .checked_sub(SPLIT_EPSILON)
            .is_some_and(|limit| interval < limit);
        if !fits {
            tracing::debug!(?interval, ?span_start, ?span_end, "interval too large, skipping");
            return Ok(UniformSplitOutcome::IntervalTooLarge);
        }

        let removed = match target {
            Some(id) => {
                // The guard above proved the id resolves.
                if let Some(idx) = self.index_of(id) {
                    self.ranges.remove(idx);
                }
                vec![id]
            }
            None => self.clear(),
        };

        let mut created = Vec::new();
        let mut start = span_start;
        let mut end = start + interval;
        while end < span_end.saturating_sub(SPLIT_EPSILON) {
            created.push(self.insert(start, end));
            start = end;
            end += interval;
        }
        created.push(self.insert(start, span_end));
        tracing::debug!(
            created = created.len(),
            removed = removed.len(),
            ?interval,
            "uniform split applied"
        );

        Ok(UniformSplitOutcome::Applied { created, removed })
    }

    /// Join a selection of ranges between two anchors.
    ///
    /// The first and last elements of the selection order (not of time
    /// order) are the anchors; the elements strictly between them are
    /// removed and the first anchor's end is extended to the last anchor's
    /// end. A selection whose anchors are in reverse time order leaves the
    /// set unchanged.
    pub fn join(&mut self, selection: &[RangeId]) -> RangeResult<JoinOutcome> {
        if selection.len() < 2 {
            return Ok(JoinOutcome::TooFewRanges);
        }

        let first_id = selection[0];
        let last_id = selection[selection.len() - 1];
        let first_end = self
            .get(first_id)
            .ok_or(RangeError::UnknownRange(first_id))?
            .end;
        let last_end = self
            .get(last_id)
            .ok_or(RangeError::UnknownRange(last_id))?
            .end;
        for &id in &selection[1..selection.len() - 1] {
            if self.index_of(id).is_none() {
                return Err(RangeError::UnknownRange(id));
            }
        }

        if first_end > last_end {
            tracing::debug!(?first_id, ?last_id, "misordered join anchors, skipping");
            return Ok(JoinOutcome::MisorderedAnchors);
        }

        let mut removed = Vec::new();
        for &id in &selection[1..selection.len() - 1] {
            if id == first_id || id == last_id {
                continue;
            }
            if let Some(idx) = self.index_of(id) {
                self.ranges.remove(idx);
                removed.push(id);
            }
        }

        if let Some(idx) = self.index_of(first_id) {
            self.ranges[idx].end = last_end;
        }
        tracing::debug!(?first_id, removed = removed.len(), "joined ranges");

        Ok(JoinOutcome::Joined {
            extended: first_id,
            removed,
        })
    }

    /// Normalize a candidate span: swap inverted bounds, clamp into the
    /// timeline. Idempotent.
    pub fn normalize_span(&self, start: Duration, end: Duration) -> (Duration, Duration) {
        let (start, end) = if start > end { (end, start) } else { (start, end) };
        (start.min(self.duration), end.min(self.duration))
    }

    /// Apply new boundaries to a range, then restore ascending-start order.
    pub fn set_bounds(
        &mut self,
        id: RangeId,
        start: Duration,
        end: Duration,
    ) -> RangeResult<Vec<RangeEvent>> {
        let idx = self.index_of(id).ok_or(RangeError::UnknownRange(id))?;
        let (start, end) = self.normalize_span(start, end);
        self.ranges[idx].start = start;
        self.ranges[idx].end = end;
        let mut events = vec![RangeEvent::Resized(id)];
        if let Some(moved) = self.reorder(idx) {
            events.push(moved);
        }
        Ok(events)
    }

    /// Insert an externally supplied range, normalized and ordered.
    pub fn insert(&mut self, start: Duration, end: Duration) -> RangeId {
        let (start, end) = self.normalize_span(start, end);
        let id = RangeId::new(self.next_id);
        self.next_id += 1;
        self.ranges.push(SplitRange::new(id, start, end));
        self.reorder(self.ranges.len() - 1);
        id
    }

    /// Remove a range from the set.
    pub fn remove(&mut self, id: RangeId) -> RangeResult<SplitRange> {
        let idx = self.index_of(id).ok_or(RangeError::UnknownRange(id))?;
        Ok(self.ranges.remove(idx))
    }

    /// Remove every range, returning the removed ids.
    pub fn clear(&mut self) -> Vec<RangeId> {
        self.ranges.drain(..).map(|r| r.id()).collect()
    }

    /// Restore ascending-start order after a single element changed.
    ///
    /// Single-pass nearest-swap correction: the changed element moves to the
    /// position of the first element it is misordered against, then the scan
    /// stops. Assumes the remainder of the set was already ordered.
    pub fn reorder(&mut self, from_index: usize) -> Option<RangeEvent> {
        if from_index >= self.ranges.len() {
            return None;
        }
        let changed_start = self.ranges[from_index].start;
        for j in 0..self.ranges.len() {
            if j == from_index {
                continue;
            }
            let other_start = self.ranges[j].start;
            if (changed_start < other_start && from_index > j)
                || (changed_start > other_start && from_index < j)
            {
                let range = self.ranges.remove(from_index);
                let id = range.id();
                self.ranges.insert(j, range);
                tracing::trace!(?id, from = from_index, to = j, "reordered range");
                return Some(RangeEvent::Moved {
                    id,
                    from: from_index,
                    to: j,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn set_over(duration_secs: u64) -> RangeSet {
        RangeSet::new(secs(duration_secs))
    }

    fn bounds(set: &RangeSet) -> Vec<(Duration, Duration)> {
        set.iter().map(|r| (r.start, r.end)).collect()
    }

    fn assert_tiles(set: &RangeSet) {
        let mut sorted = bounds(set);
        sorted.sort();
        assert_eq!(sorted.first().unwrap().0, Duration::ZERO);
        assert_eq!(sorted.last().unwrap().1, set.duration());
        for pair in sorted.windows(2) {
            assert_eq!(pair[0].1, pair[1].0, "gap between {:?} and {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn split_at_on_empty_set() {
        let mut set = set_over(10);
        let events = set.split_at(secs(4)).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(bounds(&set), vec![(secs(0), secs(4)), (secs(4), secs(10))]);
    }

    #[test]
    fn split_at_interior() {
        let mut set = set_over(10);
        set.insert(secs(0), secs(10));
        set.split_at(secs(4)).unwrap();
        assert_eq!(bounds(&set), vec![(secs(0), secs(4)), (secs(4), secs(10))]);
    }

    #[test]
    fn split_at_boundary_closes_from_nearest_end() {
        let mut set = set_over(20);
        set.insert(secs(0), secs(5));
        // 12s is in the uncovered gap after 5s
        set.split_at(secs(12)).unwrap();
        assert_eq!(bounds(&set), vec![(secs(0), secs(5)), (secs(5), secs(12))]);
        // Exactly on an existing boundary closes again from the nearest
        // end strictly before it
        set.split_at(secs(12)).unwrap();
        assert_eq!(
            bounds(&set),
            vec![
                (secs(0), secs(5)),
                (secs(5), secs(12)),
                (secs(5), secs(12)),
            ]
        );
    }

    #[test]
    fn split_at_gap_with_no_earlier_end_starts_at_zero() {
        let mut set = set_over(20);
        set.insert(secs(10), secs(20));
        set.split_at(secs(4)).unwrap();
        assert_eq!(bounds(&set), vec![(secs(0), secs(4)), (secs(10), secs(20))]);
    }

    #[test]
    fn split_at_out_of_bounds_is_rejected() {
        let mut set = set_over(10);
        let err = set.split_at(secs(11)).unwrap_err();
        assert!(matches!(err, RangeError::PositionOutOfBounds { .. }));
        assert!(set.is_empty());
    }

    #[test]
    fn tiling_after_split_sequence() {
        let mut set = set_over(60);
        set.split_at(secs(42)).unwrap();
        set.split_at(secs(7)).unwrap();
        set.split_at(secs(19)).unwrap();
        set.split_at(secs(55)).unwrap();
        assert_eq!(set.len(), 5);
        assert_tiles(&set);
        // Already ascending by start without re-sorting
        let starts: Vec<_> = set.iter().map(|r| r.start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn uniform_split_remainder() {
        let mut set = set_over(10);
        let outcome = set.split_uniform(secs(3), None).unwrap();
        assert!(matches!(outcome, UniformSplitOutcome::Applied { .. }));
        assert_eq!(
            bounds(&set),
            vec![
                (secs(0), secs(3)),
                (secs(3), secs(6)),
                (secs(6), secs(9)),
                (secs(9), secs(10)),
            ]
        );
        assert_tiles(&set);
    }

    #[test]
    fn uniform_split_replaces_existing_ranges() {
        let mut set = set_over(10);
        set.split_at(secs(7)).unwrap();
        let outcome = set.split_uniform(secs(4), None).unwrap();
        let UniformSplitOutcome::Applied { created, removed } = outcome else {
            panic!("expected an applied split");
        };
        assert_eq!(removed.len(), 2);
        assert_eq!(created.len(), 3);
        assert_eq!(
            bounds(&set),
            vec![(secs(0), secs(4)), (secs(4), secs(8)), (secs(8), secs(10))]
        );
    }

    #[test]
    fn uniform_split_epsilon_guard() {
        let mut set = set_over(10);
        set.insert(secs(0), secs(10));
        // 9.96s >= 10s - 50ms: observable no-op
        let outcome = set
            .split_uniform(Duration::from_millis(9960), None)
            .unwrap();
        assert_eq!(outcome, UniformSplitOutcome::IntervalTooLarge);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn uniform_split_zero_interval_is_rejected() {
        let mut set = set_over(10);
        let err = set.split_uniform(Duration::ZERO, None).unwrap_err();
        assert!(matches!(err, RangeError::InvalidInterval));
    }

    #[test]
    fn uniform_split_targeted_replaces_only_target() {
        let mut set = set_over(30);
        set.split_at(secs(10)).unwrap();
        set.split_at(secs(20)).unwrap();
        let middle = set.iter().find(|r| r.start == secs(10)).unwrap().id();
        let outcome = set.split_uniform(secs(4), Some(middle)).unwrap();
        assert!(matches!(outcome, UniformSplitOutcome::Applied { .. }));
        assert_eq!(
            bounds(&set),
            vec![
                (secs(0), secs(10)),
                (secs(10), secs(14)),
                (secs(14), secs(18)),
                (secs(18), secs(20)),
                (secs(20), secs(30)),
            ]
        );
        assert_tiles(&set);
    }

    #[test]
    fn uniform_split_unknown_target_is_rejected() {
        let mut set = set_over(30);
        let ghost = RangeId::new(99);
        let err = set.split_uniform(secs(4), Some(ghost)).unwrap_err();
        assert!(matches!(err, RangeError::UnknownRange(_)));
    }

    #[test]
    fn join_extends_first_anchor() {
        let mut set = set_over(10);
        set.split_uniform(secs(2), None).unwrap();
        let ids: Vec<_> = set.iter().map(|r| r.id()).collect();
        let outcome = set.join(&ids[0..3]).unwrap();
        let JoinOutcome::Joined { extended, removed } = outcome else {
            panic!("expected a join");
        };
        assert_eq!(extended, ids[0]);
        assert_eq!(removed, vec![ids[1]]);
        let first = set.get(ids[0]).unwrap();
        assert_eq!((first.start, first.end), (secs(0), secs(6)));
        // Both anchors are retained
        assert!(set.get(ids[2]).is_some());
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn join_misordered_anchors_leaves_set_unchanged() {
        let mut set = set_over(10);
        set.split_uniform(secs(2), None).unwrap();
        let ids: Vec<_> = set.iter().map(|r| r.id()).collect();
        let before = bounds(&set);
        // Selection given in reverse chronological order
        let outcome = set.join(&[ids[2], ids[1], ids[0]]).unwrap();
        assert_eq!(outcome, JoinOutcome::MisorderedAnchors);
        assert_eq!(bounds(&set), before);
    }

    #[test]
    fn join_too_few_is_a_noop() {
        let mut set = set_over(10);
        set.split_at(secs(5)).unwrap();
        let id = set.iter().next().unwrap().id();
        assert_eq!(set.join(&[id]).unwrap(), JoinOutcome::TooFewRanges);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn join_unknown_id_is_rejected_without_mutation() {
        let mut set = set_over(10);
        set.split_uniform(secs(2), None).unwrap();
        let ids: Vec<_> = set.iter().map(|r| r.id()).collect();
        let before = bounds(&set);
        let err = set.join(&[ids[0], RangeId::new(99), ids[2]]).unwrap_err();
        assert!(matches!(err, RangeError::UnknownRange(_)));
        assert_eq!(bounds(&set), before);
    }

    #[test]
    fn normalize_swaps_and_clamps() {
        let set = set_over(10);
        assert_eq!(
            set.normalize_span(secs(8), secs(3)),
            (secs(3), secs(8))
        );
        assert_eq!(
            set.normalize_span(secs(2), secs(15)),
            (secs(2), secs(10))
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        let set = set_over(10);
        let cases = [
            (secs(8), secs(3)),
            (secs(12), secs(15)),
            (secs(15), secs(2)),
            (secs(0), secs(0)),
        ];
        for (start, end) in cases {
            let once = set.normalize_span(start, end);
            let twice = set.normalize_span(once.0, once.1);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn set_bounds_reorders_past_neighbor() {
        let mut set = set_over(10);
        set.split_at(secs(2)).unwrap();
        set.split_at(secs(5)).unwrap();
        // [0,2],[2,5],[5,10]; drag the first range past its neighbor
        let first = set.iter().next().unwrap().id();
        let events = set.set_bounds(first, secs(3), secs(4)).unwrap();
        assert!(events.contains(&RangeEvent::Resized(first)));
        assert!(events
            .iter()
            .any(|e| matches!(e, RangeEvent::Moved { from: 0, to: 1, .. })));
        let starts: Vec<_> = set.iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![secs(2), secs(3), secs(5)]);
    }

    #[test]
    fn set_bounds_reorders_backwards_edit() {
        let mut set = set_over(10);
        set.split_at(secs(5)).unwrap();
        set.split_at(secs(8)).unwrap();
        // [0,5],[5,8],[8,10]; pull the last range before the middle one
        let last = set.iter().last().unwrap().id();
        set.set_bounds(last, secs(1), secs(2)).unwrap();
        let starts: Vec<_> = set.iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![secs(0), secs(1), secs(5)]);
    }

    #[test]
    fn set_bounds_normalizes_inverted_drag() {
        let mut set = set_over(10);
        let id = set.insert(secs(0), secs(10));
        set.set_bounds(id, secs(7), secs(3)).unwrap();
        let range = set.get(id).unwrap();
        assert_eq!((range.start, range.end), (secs(3), secs(7)));
    }

    #[test]
    fn set_bounds_unknown_id_is_rejected() {
        let mut set = set_over(10);
        let err = set.set_bounds(RangeId::new(7), secs(0), secs(1)).unwrap_err();
        assert!(matches!(err, RangeError::UnknownRange(_)));
    }

    #[test]
    fn ids_are_stable_across_edits() {
        let mut set = set_over(10);
        set.split_at(secs(4)).unwrap();
        let ids: Vec<_> = set.iter().map(|r| r.id()).collect();
        set.split_at(secs(2)).unwrap();
        set.set_bounds(ids[0], secs(1), secs(2)).unwrap();
        for id in &ids {
            assert!(set.get(*id).is_some());
        }
        // New ids never reuse old ones
        let all: Vec<_> = set.iter().map(|r| r.id()).collect();
        let mut deduped = all.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(all.len(), deduped.len());
    }

    #[test]
    fn clear_reports_removed_ids() {
        let mut set = set_over(10);
        set.split_uniform(secs(2), None).unwrap();
        let expected: Vec<_> = set.iter().map(|r| r.id()).collect();
        let removed = set.clear();
        assert_eq!(removed, expected);
        assert!(set.is_empty());
    }
}
