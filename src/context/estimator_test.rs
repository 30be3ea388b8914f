// ABOUTME: Tests for token estimation - role surcharges, rounding, monotonicity.
// ABOUTME: Also checks that custom estimators plug into the trait.

use super::estimator::{HeuristicEstimator, TokenEstimator};
use crate::llm::{Message, Role};

#[test]
fn test_role_surcharges() {
    let est = HeuristicEstimator;
    assert_eq!(est.estimate_message(&Message::system("")), 10);
    assert_eq!(est.estimate_message(&Message::user("")), 5);
    assert_eq!(est.estimate_message(&Message::assistant("")), 5);
    assert_eq!(est.estimate_message(&Message::new("tool", "")), 0);
}

#[test]
fn test_content_rounds_down() {
    let est = HeuristicEstimator;
    assert_eq!(est.estimate_message(&Message::user("hi")), 5);
    assert_eq!(est.estimate_message(&Message::user("abc")), 5);
    assert_eq!(est.estimate_message(&Message::user("abcd")), 6);
    assert_eq!(est.estimate_message(&Message::user("x".repeat(40))), 15);
}

#[test]
fn test_estimate_counts_bytes() {
    let est = HeuristicEstimator;
    // Each 'é' is two bytes in UTF-8.
    assert_eq!(est.estimate_message(&Message::new(Role::Other("x".into()), "éé")), 1);
}

#[test]
fn test_monotonic_in_length() {
    let est = HeuristicEstimator;
    let mut previous = 0;
    for len in 0..64 {
        let tokens = est.estimate_message(&Message::assistant("a".repeat(len)));
        assert!(tokens >= previous, "estimate shrank at length {}", len);
        previous = tokens;
    }
}

#[test]
fn test_aggregate_is_sum() {
    let est = HeuristicEstimator;
    let messages = vec![
        Message::system("x".repeat(8)),
        Message::user("x".repeat(4)),
        Message::assistant("x".repeat(12)),
    ];
    assert_eq!(est.estimate(&messages), (10 + 2) + (5 + 1) + (5 + 3));
    assert_eq!(est.estimate(&[]), 0);
}

struct WordEstimator;

impl TokenEstimator for WordEstimator {
    fn estimate_message(&self, message: &Message) -> usize {
        message.content.split_whitespace().count()
    }
}

#[test]
fn test_custom_estimator_uses_default_sum() {
    let messages = vec![Message::user("one two"), Message::assistant("three")];
    assert_eq!(WordEstimator.estimate(&messages), 3);
}
