//! Property-based tests for VisitorTracker operations.
//!
//! The tracker is compared against a plain `Vec` model of the recency order:
//! for any sequence of batches, membership, counts and ordering must match.

use std::collections::HashSet;

use proptest::prelude::*;
use viewerscan::managers::visitor_tracker::{VisitorTracker, VisitorTrackerTrait};
use viewerscan::types::viewer::Viewer;

/// Small name alphabet so batches overlap often.
fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("alice".to_string()),
        Just("bob".to_string()),
        Just("carol".to_string()),
        Just("dave".to_string()),
        "[a-z]{1,6}",
    ]
}

fn arb_batches() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(arb_name(), 0..6), 0..12)
}

fn to_viewers(names: &[String]) -> Vec<Viewer> {
    names.iter().map(|n| Viewer::from(n.as_str())).collect()
}

/// Reference model: oldest-first list, each batch applied in order.
fn model_apply(model: &mut Vec<String>, batch: &[String]) {
    for name in batch {
        model.retain(|m| m != name);
        model.push(name.clone());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // The unique count always equals the number of distinct names seen.
    #[test]
    fn unique_count_matches_distinct_names(batches in arb_batches()) {
        let mut tracker = VisitorTracker::new();
        let mut seen = HashSet::new();
        let mut previous = 0;

        for batch in &batches {
            tracker.ingest_snapshot(&to_viewers(batch));
            seen.extend(batch.iter().cloned());

            let count = tracker.total_unique_count();
            prop_assert_eq!(count, seen.len());
            prop_assert!(count >= previous, "unique count must never decrease");
            previous = count;
        }
    }

    // The full recency order matches the reference model after every batch.
    #[test]
    fn recency_order_matches_model(batches in arb_batches()) {
        let mut tracker = VisitorTracker::new();
        let mut model: Vec<String> = Vec::new();

        for batch in &batches {
            tracker.ingest_snapshot(&to_viewers(batch));
            model_apply(&mut model, batch);

            let names: Vec<String> = tracker
                .most_recent_n(i64::MAX)
                .unwrap()
                .into_iter()
                .map(|r| r.viewer.to_string())
                .collect();
            prop_assert_eq!(names, model.clone());
        }
    }

    // Re-ingesting the same batch leaves the membership and order unchanged.
    #[test]
    fn repeated_batch_is_idempotent_for_membership(
        batches in arb_batches(),
        last in prop::collection::vec(arb_name(), 0..6),
    ) {
        let mut tracker = VisitorTracker::new();
        for batch in &batches {
            tracker.ingest_snapshot(&to_viewers(batch));
        }
        tracker.ingest_snapshot(&to_viewers(&last));
        let before = tracker.most_recent_n(i64::MAX).unwrap();

        tracker.ingest_snapshot(&to_viewers(&last));
        let after = tracker.most_recent_n(i64::MAX).unwrap();

        let names = |records: &[viewerscan::types::viewer::VisitRecord]| -> Vec<String> {
            records.iter().map(|r| r.viewer.to_string()).collect()
        };
        prop_assert_eq!(names(&before), names(&after));
    }

    // `most_recent_n(n)` is the last `min(n, len)` entries of the full order.
    #[test]
    fn most_recent_n_is_suffix_of_full_order(
        batches in arb_batches(),
        n in 0i64..20,
    ) {
        let mut tracker = VisitorTracker::new();
        for batch in &batches {
            tracker.ingest_snapshot(&to_viewers(batch));
        }

        let all = tracker.most_recent_n(i64::MAX).unwrap();
        let top = tracker.most_recent_n(n).unwrap();
        let expected_len = (n as usize).min(all.len());

        prop_assert_eq!(top.len(), expected_len);
        prop_assert_eq!(&top[..], &all[all.len() - expected_len..]);
    }

    // Negative counts are always rejected.
    #[test]
    fn negative_counts_are_rejected(n in i64::MIN..0) {
        let mut tracker = VisitorTracker::new();
        tracker.ingest_snapshot(&to_viewers(&["alice".to_string()]));
        prop_assert!(tracker.most_recent_n(n).is_err());
        prop_assert_eq!(tracker.total_unique_count(), 1);
    }
}
