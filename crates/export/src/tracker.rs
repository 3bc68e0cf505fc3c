//! Run-scoped counters and problem sets.
//!
//! [`RunTracker`] is created once per run and shared by reference with every
//! stage. Each outcome is recorded in a single critical section, so
//! `processed == appended + skipped + errored` holds at every observable
//! point, including after an aborted run.

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use discover_core::{FriendlyId, RunId};
use serde::{Deserialize, Serialize};

/// Final classification of one unit of work.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Appended,
    Skipped,
    Errored,
}

/// Counter groups of a run summary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Categories,
    Products,
    Skus,
    ProductImages,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCounters {
    pub processed: u64,
    pub appended: u64,
    pub skipped: u64,
    pub errored: u64,
}

impl FeedCounters {
    fn record(&mut self, outcome: StepOutcome) {
        self.processed += 1;
        match outcome {
            StepOutcome::Appended => self.appended += 1,
            StepOutcome::Skipped => self.skipped += 1,
            StepOutcome::Errored => self.errored += 1,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.processed == self.appended + self.skipped + self.errored
    }
}

/// Run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedResult {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub categories: FeedCounters,
    pub products: FeedCounters,
    pub skus: FeedCounters,
    pub product_images: FeedCounters,
}

impl FeedResult {
    pub fn new(run_id: RunId, started_at: DateTime<Utc>) -> Self {
        Self {
            run_id,
            started_at,
            finished_at: None,
            categories: FeedCounters::default(),
            products: FeedCounters::default(),
            skus: FeedCounters::default(),
            product_images: FeedCounters::default(),
        }
    }

    pub fn counters(&self, kind: FeedKind) -> &FeedCounters {
        match kind {
            FeedKind::Categories => &self.categories,
            FeedKind::Products => &self.products,
            FeedKind::Skus => &self.skus,
            FeedKind::ProductImages => &self.product_images,
        }
    }

    fn counters_mut(&mut self, kind: FeedKind) -> &mut FeedCounters {
        match kind {
            FeedKind::Categories => &mut self.categories,
            FeedKind::Products => &mut self.products,
            FeedKind::Skus => &mut self.skus,
            FeedKind::ProductImages => &mut self.product_images,
        }
    }

    pub fn is_balanced(&self) -> bool {
        [
            &self.categories,
            &self.products,
            &self.skus,
            &self.product_images,
        ]
        .iter()
        .all(|c| c.is_balanced())
    }
}

/// Entities that ended Skipped or Errored, per feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemSet {
    pub categories: BTreeSet<FriendlyId>,
    pub products: BTreeSet<FriendlyId>,
}

impl ProblemSet {
    fn set_mut(&mut self, kind: FeedKind) -> Option<&mut BTreeSet<FriendlyId>> {
        match kind {
            FeedKind::Categories => Some(&mut self.categories),
            FeedKind::Products => Some(&mut self.products),
            FeedKind::Skus | FeedKind::ProductImages => None,
        }
    }

    pub fn contains(&self, kind: FeedKind, id: &FriendlyId) -> bool {
        match kind {
            FeedKind::Categories => self.categories.contains(id),
            FeedKind::Products => self.products.contains(id),
            FeedKind::Skus | FeedKind::ProductImages => false,
        }
    }
}

#[derive(Debug)]
struct TrackerState {
    result: FeedResult,
    problems: ProblemSet,
}

/// Shared, mutex-guarded run state.
#[derive(Debug)]
pub struct RunTracker {
    state: Mutex<TrackerState>,
}

impl RunTracker {
    pub fn new(run_id: RunId, started_at: DateTime<Utc>) -> Self {
        Self {
            state: Mutex::new(TrackerState {
                result: FeedResult::new(run_id, started_at),
                problems: ProblemSet::default(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TrackerState> {
        // Counters stay consistent even if a holder panicked: every update
        // completes before the guard is released.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the outcome for entity `id`; non-appended entities join the
    /// problem set of their feed.
    pub fn record(&self, kind: FeedKind, id: &FriendlyId, outcome: StepOutcome) {
        let mut state = self.lock();
        state.result.counters_mut(kind).record(outcome);
        if outcome != StepOutcome::Appended {
            if let Some(set) = state.problems.set_mut(kind) {
                set.insert(id.clone());
            }
        }
    }

    /// Record an outcome that has no entity id (SKU rows, images).
    pub fn record_anonymous(&self, kind: FeedKind, outcome: StepOutcome) {
        self.lock().result.counters_mut(kind).record(outcome);
    }

    pub fn is_problem(&self, kind: FeedKind, id: &FriendlyId) -> bool {
        self.lock().problems.contains(kind, id)
    }

    /// Stamp the finish time and return the summary.
    pub fn finish(&self, finished_at: DateTime<Utc>) -> FeedResult {
        let mut state = self.lock();
        state.result.finished_at = Some(finished_at);
        state.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn fid(name: &str) -> FriendlyId {
        FriendlyId::new("Shop", name).unwrap()
    }

    #[test]
    fn problems_are_tracked_per_feed() {
        let tracker = RunTracker::new(RunId::new(), Utc::now());
        tracker.record(FeedKind::Categories, &fid("A"), StepOutcome::Appended);
        tracker.record(FeedKind::Categories, &fid("B"), StepOutcome::Skipped);
        tracker.record(FeedKind::Products, &fid("P"), StepOutcome::Errored);

        assert!(!tracker.is_problem(FeedKind::Categories, &fid("A")));
        assert!(tracker.is_problem(FeedKind::Categories, &fid("B")));
        assert!(!tracker.is_problem(FeedKind::Categories, &fid("P")));
        assert!(tracker.is_problem(FeedKind::Products, &fid("P")));

        let result = tracker.finish(Utc::now());
        assert_eq!(result.categories.processed, 2);
        assert_eq!(result.products.errored, 1);
    }

    #[test]
    fn finish_stamps_time() {
        let started = Utc::now();
        let tracker = RunTracker::new(RunId::new(), started);
        let result = tracker.finish(started);
        assert_eq!(result.finished_at, Some(started));
    }

    #[test]
    fn concurrent_updates_are_not_lost() {
        let tracker = Arc::new(RunTracker::new(RunId::new(), Utc::now()));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || {
                    for i in 0..250 {
                        let outcome = match (t + i) % 3 {
                            0 => StepOutcome::Appended,
                            1 => StepOutcome::Skipped,
                            _ => StepOutcome::Errored,
                        };
                        tracker.record_anonymous(FeedKind::Skus, outcome);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let result = tracker.finish(Utc::now());
        assert_eq!(result.skus.processed, 2000);
        assert!(result.is_balanced());
    }

    #[test]
    fn summary_serializes_counter_groups() {
        let tracker = RunTracker::new(RunId::new(), Utc::now());
        tracker.record_anonymous(FeedKind::ProductImages, StepOutcome::Errored);
        let json = serde_json::to_value(tracker.finish(Utc::now())).unwrap();
        assert_eq!(json["product_images"]["errored"], 1);
        assert_eq!(json["categories"]["processed"], 0);
        assert!(json["run_id"].is_string());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn outcome() -> impl Strategy<Value = StepOutcome> {
            prop_oneof![
                Just(StepOutcome::Appended),
                Just(StepOutcome::Skipped),
                Just(StepOutcome::Errored),
            ]
        }

        fn kind() -> impl Strategy<Value = FeedKind> {
            prop_oneof![
                Just(FeedKind::Categories),
                Just(FeedKind::Products),
                Just(FeedKind::Skus),
                Just(FeedKind::ProductImages),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 128,
                ..ProptestConfig::default()
            })]

            /// Property: any sequence of recorded outcomes keeps every group balanced.
            #[test]
            fn counters_always_balance(events in proptest::collection::vec((kind(), outcome(), 0u8..16), 0..200)) {
                let tracker = RunTracker::new(RunId::new(), Utc::now());
                for (kind, outcome, n) in &events {
                    tracker.record(*kind, &FriendlyId::new("Shop", format!("E{n}")).unwrap(), *outcome);
                }
                let result = tracker.finish(Utc::now());
                prop_assert!(result.is_balanced());
                let total: u64 = [FeedKind::Categories, FeedKind::Products, FeedKind::Skus, FeedKind::ProductImages]
                    .iter()
                    .map(|k| result.counters(*k).processed)
                    .sum();
                prop_assert_eq!(total, events.len() as u64);
            }
        }
    }
}
