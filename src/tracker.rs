use crate::types::Dart;

/// Comparison key for a polled snapshot
///
/// Built from the `(name, multiplier)` pair of every dart in throw order.
/// Two snapshots compare equal exactly when their dart count, order, segment
/// names and multipliers all match. The segment number is intentionally not
/// part of the key: board segment names ("T20", "D16", ...) already identify
/// the face value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature(Vec<(String, u32)>);

impl Signature {
    /// Compute the signature of a snapshot
    pub fn of(throws: &[Dart]) -> Self {
        Self(
            throws
                .iter()
                .map(|dart| match &dart.segment {
                    Some(segment) => (segment.name.clone(), segment.multiplier),
                    None => (String::new(), 0),
                })
                .collect(),
        )
    }
}

/// Events derived from one non-duplicate snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrowUpdate {
    /// Score of the most recent dart
    pub score: u32,

    /// Whether the most recent dart hit a triple segment and passes the
    /// configured score threshold
    pub is_triple: bool,

    /// Total of the completed visit, set only on the poll that first sees
    /// all three darts of a visit
    pub visit_total: Option<u32>,
}

/// Throw/visit detection state machine
///
/// Fed with the `throws` snapshot of every successful state poll, the
/// tracker suppresses unchanged snapshots and reports per-dart scores plus
/// exactly one total per completed 3-dart visit. It runs indefinitely,
/// resetting naturally as the board's own throw counter cycles 0→1→2→3→0.
#[derive(Debug)]
pub struct VisitTracker {
    triple_min_score: u32,
    last_signature: Signature,
    last_throw_count: usize,
}

impl VisitTracker {
    /// Create a tracker with the given minimum score for the triple flag
    pub fn new(triple_min_score: u32) -> Self {
        Self {
            triple_min_score,
            last_signature: Signature::default(),
            last_throw_count: 0,
        }
    }

    /// Process one polled snapshot
    ///
    /// Returns `None` for an empty snapshot or a duplicate of the previous
    /// one. A duplicate short-circuits before the throw-count update:
    /// duplicates carry no transition information.
    pub fn process(&mut self, throws: &[Dart]) -> Option<ThrowUpdate> {
        let last_dart = throws.last()?;

        let signature = Signature::of(throws);
        if signature == self.last_signature {
            return None;
        }
        self.last_signature = signature;

        let score = last_dart.score();
        let is_triple = last_dart
            .segment
            .as_ref()
            .is_some_and(|segment| segment.multiplier == 3)
            && score >= self.triple_min_score;

        // Edge-triggered: fires only on the transition into a completed
        // visit, not on every poll that still sees the same three darts.
        let visit_total = if throws.len() == 3 && self.last_throw_count < 3 {
            let start = throws.len().saturating_sub(3);
            Some(
                throws[start..]
                    .iter()
                    .fold(0u32, |sum, dart| sum.saturating_add(dart.score())),
            )
        } else {
            None
        };

        self.last_throw_count = throws.len();

        Some(ThrowUpdate {
            score,
            is_triple,
            visit_total,
        })
    }

    /// Forget everything and start from an empty visit
    pub fn reset(&mut self) {
        self.last_signature = Signature::default();
        self.last_throw_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;

    fn dart(name: &str, number: u32, multiplier: u32) -> Dart {
        Dart {
            segment: Some(Segment {
                name: name.to_string(),
                number,
                multiplier,
            }),
        }
    }

    #[test]
    fn signature_equal_for_identical_sequences() {
        let a = vec![dart("S20", 20, 1), dart("T19", 19, 3)];
        let b = vec![dart("S20", 20, 1), dart("T19", 19, 3)];
        assert_eq!(Signature::of(&a), Signature::of(&b));
    }

    #[test]
    fn signature_differs_on_count_order_name_or_multiplier() {
        let base = vec![dart("S20", 20, 1), dart("T19", 19, 3)];

        let shorter = vec![dart("S20", 20, 1)];
        assert_ne!(Signature::of(&base), Signature::of(&shorter));

        let reordered = vec![dart("T19", 19, 3), dart("S20", 20, 1)];
        assert_ne!(Signature::of(&base), Signature::of(&reordered));

        let renamed = vec![dart("S20", 20, 1), dart("T18", 19, 3)];
        assert_ne!(Signature::of(&base), Signature::of(&renamed));

        let remultiplied = vec![dart("S20", 20, 1), dart("T19", 19, 2)];
        assert_ne!(Signature::of(&base), Signature::of(&remultiplied));
    }

    #[test]
    fn empty_snapshot_is_no_information() {
        let mut tracker = VisitTracker::new(1);
        assert_eq!(tracker.process(&[]), None);
    }

    #[test]
    fn duplicate_poll_emits_once() {
        let mut tracker = VisitTracker::new(1);
        let snapshot = vec![dart("S20", 20, 1)];

        let first = tracker.process(&snapshot).unwrap();
        assert_eq!(first.score, 20);
        assert_eq!(tracker.process(&snapshot), None);
    }

    #[test]
    fn visit_completes_exactly_once_on_third_dart() {
        let mut tracker = VisitTracker::new(1);
        let d1 = dart("S20", 20, 1);
        let d2 = dart("T19", 19, 3);
        let d3 = dart("D16", 16, 2);

        let first = tracker.process(std::slice::from_ref(&d1)).unwrap();
        assert_eq!(first.visit_total, None);

        let second = tracker.process(&[d1.clone(), d2.clone()]).unwrap();
        assert_eq!(second.visit_total, None);

        let third = tracker.process(&[d1, d2, d3]).unwrap();
        assert_eq!(third.score, 32);
        assert_eq!(third.visit_total, Some(20 + 57 + 32));
    }

    #[test]
    fn repeated_completed_visit_is_suppressed() {
        let mut tracker = VisitTracker::new(1);
        let visit = vec![
            dart("S20", 20, 1),
            dart("S19", 19, 1),
            dart("S18", 18, 1),
        ];

        let first = tracker.process(&visit).unwrap();
        assert_eq!(first.visit_total, Some(57));

        // Board keeps reporting the finished visit until it resets.
        assert_eq!(tracker.process(&visit), None);
    }

    #[test]
    fn new_visit_after_reset_starts_fresh() {
        let mut tracker = VisitTracker::new(1);
        let d1 = dart("S20", 20, 1);
        let d2 = dart("S19", 19, 1);
        let d3 = dart("S18", 18, 1);

        tracker.process(std::slice::from_ref(&d1));
        tracker.process(&[d1.clone(), d2.clone()]);
        tracker.process(&[d1, d2, d3]);

        // Board reset: one dart of the next visit.
        let fresh = tracker.process(&[dart("T20", 20, 3)]).unwrap();
        assert_eq!(fresh.score, 60);
        assert_eq!(fresh.visit_total, None);

        let next = tracker
            .process(&[
                dart("T20", 20, 3),
                dart("S5", 5, 1),
                dart("S1", 1, 1),
            ])
            .unwrap();
        assert_eq!(next.visit_total, Some(66));
    }

    #[test]
    fn triple_flag_honors_score_threshold() {
        let mut tracker = VisitTracker::new(1);
        let update = tracker.process(&[dart("T20", 20, 3)]).unwrap();
        assert_eq!(update.score, 60);
        assert!(update.is_triple);

        let mut strict = VisitTracker::new(100);
        let update = strict.process(&[dart("T20", 20, 3)]).unwrap();
        assert_eq!(update.score, 60);
        assert!(!update.is_triple);
    }

    #[test]
    fn triple_flag_requires_triple_ring() {
        let mut tracker = VisitTracker::new(1);
        let update = tracker.process(&[dart("D20", 20, 2)]).unwrap();
        assert!(!update.is_triple);

        let missed = tracker.process(&[Dart { segment: None }]).unwrap();
        assert!(!missed.is_triple);
        assert_eq!(missed.score, 0);
    }

    #[test]
    fn oversized_snapshot_is_tolerated() {
        // A visit never exceeds 3 darts under normal device behavior, but
        // the tracker must not misbehave when that is violated.
        let mut tracker = VisitTracker::new(1);
        let four = vec![
            dart("S1", 1, 1),
            dart("S2", 2, 1),
            dart("S3", 3, 1),
            dart("S4", 4, 1),
        ];
        let update = tracker.process(&four).unwrap();
        assert_eq!(update.score, 4);
        assert_eq!(update.visit_total, None);
    }

    #[test]
    fn visit_total_saturates_on_absurd_scores() {
        let mut tracker = VisitTracker::new(1);
        let visit = vec![
            dart("X", u32::MAX, 1),
            dart("Y", u32::MAX, 1),
            dart("Z", u32::MAX, 1),
        ];
        let update = tracker.process(&visit).unwrap();
        assert_eq!(update.score, u32::MAX);
        assert_eq!(update.visit_total, Some(u32::MAX));
    }

    #[test]
    fn reset_clears_dedup_state() {
        let mut tracker = VisitTracker::new(1);
        let snapshot = vec![dart("S20", 20, 1)];

        tracker.process(&snapshot);
        tracker.reset();
        assert!(tracker.process(&snapshot).is_some());
    }
}
