//! Property tests for scanner invariants

use proptest::prelude::*;
use rxscan_core::{Condition, Machine, OverrideSet, Scanner, Span, State, Token};

const VOCABULARY: &[&str] = &[
    "0", "5", "250", ".", "-", "mg", "tablets", "%", "take", "daily", "1-2",
];

fn tokens_strategy() -> impl Strategy<Value = Vec<Token>> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..40).prop_map(|words| {
        let mut offset = 0;
        words
            .into_iter()
            .map(|word| {
                let token = Token::new(word, offset, offset + word.len()).unwrap();
                offset = token.end() + 1;
                token
            })
            .collect()
    })
}

fn decimal() -> Machine {
    let mut b = Machine::builder("decimal");
    let start = b.state(State::new("start"));
    let int = b.state(State::new("int"));
    let dot = b.state(State::new("dot"));
    let end = b.state(State::end("end"));
    b.transition(start, Condition::Number, int)
        .fallback(start, start)
        .transition(int, Condition::Punctuation('.'), dot)
        .fallback(int, start)
        .transition(dot, Condition::Number, end)
        .fallback(dot, start)
        .fallback(end, start);
    b.build(start).unwrap()
}

fn unit() -> Machine {
    let mut b = Machine::builder("unit");
    let start = b.state(State::new("start"));
    let dash = b.state(State::new("dash"));
    let end = b.state(State::end("end"));
    let indent = b.state(State::indent_start("indent"));
    b.transition(start, Condition::text("mg").or(Condition::Symbol('%')), end)
        .transition(start, Condition::Punctuation('-'), dash)
        .fallback(start, start)
        .transition(dash, Condition::text("mg"), indent)
        .fallback(dash, start)
        .fallback(end, start)
        .fallback(indent, start);
    b.build(start).unwrap()
}

fn strength() -> Machine {
    let mut b = Machine::builder("strength");
    let start = b.state(State::new("start"));
    let num = b.state(State::new("num"));
    let end = b.state(State::end("end"));
    b.transition(start, Condition::Number.or(Condition::labeled("decimal")), num)
        .transition(start, Condition::Range, num)
        .fallback(start, start)
        .transition(num, Condition::labeled("unit").or(Condition::text("mg")), end)
        .fallback(num, start)
        .fallback(end, start);
    b.build(start).unwrap()
}

fn form() -> Machine {
    let mut b = Machine::builder("form");
    let start = b.state(State::new("start"));
    let end = b.state(State::end("end"));
    b.transition(start, Condition::text("tablets"), end)
        .fallback(start, start)
        .fallback(end, start);
    b.build(start).unwrap()
}

fn scanner(machines: Vec<(Machine, u8)>) -> Scanner<u8> {
    machines
        .into_iter()
        .fold(Scanner::new(), |s, (m, tag)| s.with_machine(m, Some(tag)))
}

fn all_machines() -> Vec<(Machine, u8)> {
    vec![(decimal(), 0), (unit(), 1), (strength(), 2), (form(), 3)]
}

fn overrides_for(tokens: &[Token]) -> Vec<OverrideSet> {
    let decimals = Scanner::<()>::new()
        .with_machine(decimal(), None)
        .scan(tokens)
        .unwrap();
    let units = Scanner::<()>::new()
        .with_machine(unit(), None)
        .scan(tokens)
        .unwrap();
    vec![
        OverrideSet::from_spans(tokens, &decimals, "decimal").unwrap(),
        OverrideSet::from_spans(tokens, &units, "unit").unwrap(),
    ]
}

fn aligned(tokens: &[Token], span: &Span<u8>) -> bool {
    tokens.iter().any(|t| t.start() == span.start) && tokens.iter().any(|t| t.end() == span.end)
}

proptest! {
    #[test]
    fn scanning_never_gets_stuck(tokens in tokens_strategy()) {
        let mut scanner = scanner(all_machines());
        prop_assert!(scanner.scan(&tokens).is_ok());
    }

    #[test]
    fn scanning_is_deterministic(tokens in tokens_strategy()) {
        let mut scanner = scanner(all_machines());
        let first = scanner.scan(&tokens).unwrap();
        let second = scanner.scan(&tokens).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn machine_order_does_not_matter(tokens in tokens_strategy()) {
        let overrides = overrides_for(&tokens);
        let mut forward = scanner(all_machines());
        let mut reversed = scanner(all_machines().into_iter().rev().collect());
        prop_assert_eq!(
            forward.scan_with(&tokens, &overrides).unwrap(),
            reversed.scan_with(&tokens, &overrides).unwrap()
        );
    }

    #[test]
    fn machines_rest_at_start_after_scan(tokens in tokens_strategy()) {
        let mut scanner = scanner(all_machines());
        scanner.scan(&tokens).unwrap();
        prop_assert!(scanner.machines().all(Machine::is_at_start));
    }

    #[test]
    fn spans_align_with_original_tokens(tokens in tokens_strategy()) {
        let overrides = overrides_for(&tokens);
        let mut scanner = scanner(all_machines());
        for span in scanner.scan_with(&tokens, &overrides).unwrap() {
            prop_assert!(span.start < span.end);
            prop_assert!(aligned(&tokens, &span), "misaligned span {:?}", span);
        }
    }

    #[test]
    fn single_machine_spans_match_combined_scan(tokens in tokens_strategy()) {
        let mut combined = scanner(all_machines());
        let all = combined.scan(&tokens).unwrap();
        for (machine, tag) in all_machines() {
            let alone = scanner(vec![(machine, tag)]).scan(&tokens).unwrap();
            let from_all: Vec<_> = all.iter().filter(|s| s.category == Some(tag)).cloned().collect();
            prop_assert_eq!(alone, from_all);
        }
    }
}
