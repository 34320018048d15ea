//! Gap intervals and the two-pointer merge of freeze and silence lists.
//!
//! A region is dead only when the picture is frozen *and* the audio is silent,
//! so the cut list is the pairwise intersection of the two gap lists, keeping
//! only overlaps long enough to be worth removing.

/// A `[start, end]` span of media time in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length in seconds; negative when the interval is inverted.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Overlap of two intervals, or `None` when they do not overlap.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (end > start).then_some(Self { start, end })
    }

    /// True when `self` lies within `outer`, inclusive of the bounds.
    #[must_use]
    pub fn is_within(&self, outer: &Self) -> bool {
        self.start >= outer.start && self.end <= outer.end
    }
}

/// Which pointer moves when both current intervals end at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Advance the first list's pointer.
    AdvanceFirst,
    /// Advance the second list's pointer.
    #[default]
    AdvanceSecond,
}

/// Intersects two sorted, internally non-overlapping interval lists.
///
/// Emits every overlap of length `>= min_duration`, in order. Each step
/// advances the pointer whose interval ends first; `tie` picks the pointer
/// when both end together.
#[must_use]
pub fn merge_intervals(
    first: &[Interval],
    second: &[Interval],
    min_duration: f64,
    tie: TieBreak,
) -> Vec<Interval> {
    let mut merged = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < first.len() && j < second.len() {
        let a = &first[i];
        let b = &second[j];

        if let Some(overlap) = a.intersect(b) {
            if overlap.duration() >= min_duration {
                merged.push(overlap);
            }
        }

        let advance_first = if a.end == b.end {
            tie == TieBreak::AdvanceFirst
        } else {
            a.end < b.end
        };
        if advance_first {
            i += 1;
        } else {
            j += 1;
        }
    }

    merged
}

/// Cut regions for one file: freezes intersected with silences.
#[must_use]
pub fn merge_gaps(video: &[Interval], audio: &[Interval], min_duration: f64) -> Vec<Interval> {
    let merged = merge_intervals(video, audio, min_duration, TieBreak::default());
    log::debug!(
        "Merged {} freeze and {} silence intervals into {} cut regions",
        video.len(),
        audio.len(),
        merged.len()
    );
    merged
}
