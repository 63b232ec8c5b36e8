//! Property tests for notation parsing, legend synthesis and rendering

use marble_core::legend::legend_entries;
use marble_core::{classify, parse_notation, render, DiagramSpec, Lane, Token};
use proptest::prelude::*;

/// Notation alphabet plus a few inert characters
fn notation() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z\\-|RCLX .#A]{0,40}").unwrap()
}

proptest! {
    #[test]
    fn delays_only_emit_nothing(n in 0usize..64) {
        prop_assert!(parse_notation(&"-".repeat(n)).is_empty());
    }

    #[test]
    fn frames_count_recognised_characters(s in notation()) {
        let events = parse_notation(&s);
        let recognised: Vec<Token> = s.chars().filter_map(classify).collect();

        let visible = recognised.iter().filter(|t| t.is_visible()).count();
        prop_assert_eq!(events.len(), visible);

        let expected: Vec<usize> = recognised
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_visible())
            .map(|(i, _)| i)
            .collect();
        let frames: Vec<usize> = events.iter().map(|e| e.frame).collect();
        prop_assert_eq!(frames, expected);
    }

    #[test]
    fn message_sequence_is_zero_based_and_dense(s in notation()) {
        let sequences: Vec<usize> = parse_notation(&s)
            .iter()
            .filter(|e| matches!(e.token, Token::Message { .. }))
            .map(|e| e.sequence)
            .collect();
        let expected: Vec<usize> = (0..sequences.len()).collect();
        prop_assert_eq!(sequences, expected);
    }

    #[test]
    fn legend_ignores_lane_order(lanes in proptest::collection::vec(notation(), 0..5)) {
        let forward: Vec<Lane> = lanes.iter().enumerate().map(|(i, n)| Lane::new(format!("l{i}"), n.as_str())).collect();
        let mut backward = forward.clone();
        backward.reverse();
        prop_assert_eq!(legend_entries(&forward), legend_entries(&backward));

        let mut letters: Vec<char> = lanes.concat().chars().filter(|c| c.is_ascii_lowercase()).collect();
        letters.sort_unstable();
        letters.dedup();
        let messages: Vec<char> = legend_entries(&forward)
            .iter()
            .map(|e| e.symbol)
            .filter(|c| c.is_ascii_lowercase())
            .collect();
        prop_assert_eq!(messages, letters);
    }

    #[test]
    fn rendering_is_idempotent(lanes in proptest::collection::vec(notation(), 0..4)) {
        let mut spec = DiagramSpec::new("prop", 900.0, 500.0);
        for (i, n) in lanes.iter().enumerate() {
            spec = spec.lane(format!("partition{i}"), n.as_str());
        }
        prop_assert_eq!(render(&spec), render(&spec.clone()));
    }
}
