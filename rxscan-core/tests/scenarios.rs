//! End-to-end scanning scenarios over hand-built machines

use rxscan_core::{
    BoundsError, Condition, CoreError, Machine, OverrideSet, Scanner, Span, State, Token,
};

fn tok(text: &str, start: usize, end: usize) -> Token {
    Token::new(text, start, end).unwrap()
}

/// Space-separated tokens with consecutive offsets
fn words(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    for word in text.split(' ') {
        let len = word.chars().count();
        tokens.push(tok(word, offset, offset + len));
        offset += len + 1;
    }
    tokens
}

fn decimal_machine() -> Machine {
    let mut b = Machine::builder("decimal");
    let start = b.state(State::new("start"));
    let int = b.state(State::new("int"));
    let dot = b.state(State::new("dot"));
    let frac = b.state(State::new("frac"));
    let end = b.state(State::end("end"));
    b.transition(start, Condition::Number, int)
        .fallback(start, start)
        .transition(int, Condition::Punctuation('.'), dot)
        .fallback(int, start)
        .transition(dot, Condition::Number, frac)
        .fallback(dot, start)
        .transition(frac, Condition::Punctuation('-'), end)
        .fallback(frac, start)
        .fallback(end, start);
    b.build(start).unwrap()
}

/// `<count> times a day` closed by a period, reported on the token after it
fn frequency_machine() -> Machine {
    let mut b = Machine::builder("frequency");
    let start = b.state(State::new("start"));
    let count = b.state(State::new("count"));
    let times = b.state(State::new("times"));
    let article = b.state(State::new("article"));
    let unit = b.state(State::new("unit"));
    let end = b.state(State::non_terminal_end("end"));
    b.transition(start, Condition::text("three"), count)
        .fallback(start, start)
        .transition(count, Condition::text("times"), times)
        .fallback(count, start)
        .transition(times, Condition::text("a"), article)
        .fallback(times, start)
        .transition(article, Condition::text("day"), unit)
        .fallback(article, start)
        .fallback(unit, end)
        .fallback(end, start);
    b.build(start).unwrap()
}

/// Strength override followed by a dosage form
fn strength_form_machine() -> Machine {
    let mut b = Machine::builder("strength-form");
    let start = b.state(State::new("start"));
    let strength = b.state(State::new("strength"));
    let end = b.state(State::end("end"));
    b.transition(start, Condition::labeled("strength"), strength)
        .fallback(start, start)
        .transition(strength, Condition::text("tablets"), end)
        .fallback(strength, start)
        .fallback(end, start);
    b.build(start).unwrap()
}

#[test]
fn decimal_strength_spans_all_four_tokens() {
    let tokens = vec![tok("0", 0, 1), tok(".", 1, 2), tok("5", 2, 3), tok("-", 3, 4)];
    let mut scanner = Scanner::new().with_machine(decimal_machine(), Some("decimal"));
    let spans = scanner.scan(&tokens).unwrap();
    assert_eq!(spans, vec![Span::new(0, 4, Some("decimal"))]);
}

#[test]
fn frequency_excludes_trailing_period() {
    let tokens = words("three times a day .");
    let mut scanner = Scanner::<()>::new().with_machine(frequency_machine(), None);
    let spans = scanner.scan(&tokens).unwrap();
    assert_eq!(spans, vec![Span::new(0, 17, None)]);
}

#[test]
fn frequency_uses_recorded_start_and_backs_up_over_punctuation() {
    let tokens = words("take three times a day . then");
    let mut b = Machine::builder("frequency-period");
    let start = b.state(State::new("start"));
    let count = b.state(State::new("count"));
    let times = b.state(State::new("times"));
    let article = b.state(State::new("article"));
    let unit = b.state(State::new("unit"));
    let period = b.state(State::new("period"));
    let end = b.state(State::non_terminal_end("end"));
    b.transition(start, Condition::text("three"), count)
        .fallback(start, start)
        .transition(count, Condition::text("times"), times)
        .fallback(count, start)
        .transition(times, Condition::text("a"), article)
        .fallback(times, start)
        .transition(article, Condition::text("day"), unit)
        .fallback(article, start)
        .transition(unit, Condition::Punctuation('.'), period)
        .fallback(unit, start)
        .fallback(period, end)
        .fallback(end, start);
    let machine = b.build(start).unwrap();

    let mut scanner = Scanner::<()>::new().with_machine(machine, None);
    let spans = scanner.scan(&tokens).unwrap();
    // "take" is the recorded start; the match begins one token later and
    // ends on "day", skipping the period before "then"
    assert_eq!(spans, vec![Span::new(5, 22, None)]);
}

#[test]
fn override_span_reports_original_offsets() {
    let tokens = vec![
        tok("250", 0, 3),
        tok("-", 3, 4),
        tok("mg", 4, 6),
        tok("tablets", 7, 14),
    ];
    let strength = OverrideSet::from_spans(&tokens, &[Span::<()>::new(0, 6, None)], "strength")
        .unwrap();

    let mut scanner = Scanner::<()>::new().with_machine(strength_form_machine(), None);
    let spans = scanner.scan_with(&tokens, &[strength]).unwrap();
    assert_eq!(spans, vec![Span::new(0, 14, None)]);

    // without the override the form never follows a strength token
    assert!(scanner.scan(&tokens).unwrap().is_empty());
}

#[test]
fn start_recorded_on_override_skips_its_covered_tokens() {
    let tokens = words("250 - mg tablets");
    let strength = OverrideSet::from_spans(&tokens, &[Span::<()>::new(0, 8, None)], "strength")
        .unwrap();

    let mut b = Machine::builder("form");
    let start = b.state(State::new("start"));
    let end = b.state(State::end("end"));
    b.transition(start, Condition::text("tablets"), end)
        .fallback(start, start)
        .fallback(end, start);
    let machine = b.build(start).unwrap();

    let mut scanner = Scanner::<()>::new().with_machine(machine, None);
    let spans = scanner.scan_with(&tokens, &[strength]).unwrap();
    assert_eq!(spans, vec![Span::new(9, 16, None)]);
}

#[test]
fn dual_override_tie_deactivates_first_set() {
    let tokens = words("250 - mg tablets");
    let first = OverrideSet::from_tokens([Token::labeled("250 - mg", 0, 8, "first").unwrap()])
        .unwrap();
    let second =
        OverrideSet::from_tokens([Token::labeled("250 - mg", 0, 8, "second").unwrap()]).unwrap();
    let overrides = [first, second];

    let splice = rxscan_core::Splice::new(&tokens, &overrides).unwrap();
    assert_eq!(splice.steps()[0].source, Some(1));
    assert_eq!(splice.steps()[0].token.label(), Some("second"));
    assert_eq!(splice.skips().delta(0, 0), Some(0));
    assert_eq!(splice.skips().delta(1, 0), Some(2));

    let mut b = Machine::builder("after-strength");
    let start = b.state(State::new("start"));
    let end = b.state(State::end("end"));
    b.transition(start, Condition::text("tablets"), end)
        .fallback(start, start)
        .fallback(end, start);
    let mut scanner = Scanner::<()>::new().with_machine(b.build(start).unwrap(), None);

    let spans = scanner.scan_with(&tokens, &overrides).unwrap();
    assert_eq!(spans, vec![Span::new(9, 16, None)]);
}

#[test]
fn single_token_match_starts_at_token_zero() {
    let mut b = Machine::builder("number");
    let start = b.state(State::new("start"));
    let end = b.state(State::end("end"));
    b.transition(start, Condition::Number, end)
        .fallback(start, start)
        .fallback(end, start);
    let mut scanner = Scanner::<()>::new().with_machine(b.build(start).unwrap(), None);

    let spans = scanner.scan(&[tok("5", 0, 1)]).unwrap();
    assert_eq!(spans, vec![Span::new(0, 1, None)]);
}

#[test]
fn start_state_that_is_also_an_end_matches_every_token() {
    // the end resolves first, then the start is recorded on the same token
    let mut b = Machine::builder("solo");
    let solo = b.state(State::end("solo"));
    b.fallback(solo, solo);
    let mut scanner = Scanner::<()>::new().with_machine(b.build(solo).unwrap(), None);

    let spans = scanner.scan(&words("a b c")).unwrap();
    assert_eq!(
        spans,
        vec![Span::new(0, 1, None), Span::new(2, 3, None), Span::new(4, 5, None)]
    );
}

#[test]
fn match_right_after_a_match_starts_on_its_first_token() {
    // the second "5" leaves the start state at once, so no start is
    // recorded for it; the previous end position stands in
    let mut b = Machine::builder("amount");
    let start = b.state(State::new("start"));
    let amount = b.state(State::new("amount"));
    let end = b.state(State::end("end"));
    b.transition(start, Condition::Number, amount)
        .fallback(start, start)
        .transition(amount, Condition::text("mg"), end)
        .fallback(amount, start)
        .fallback(end, start);
    let mut scanner = Scanner::<()>::new().with_machine(b.build(start).unwrap(), None);

    let spans = scanner.scan(&words("5 mg 10 mg")).unwrap();
    assert_eq!(spans, vec![Span::new(0, 4, None), Span::new(5, 10, None)]);
}

#[test]
fn non_terminal_end_backing_over_leading_punctuation_is_rejected() {
    let mut b = Machine::builder("after-dash");
    let start = b.state(State::new("start"));
    let dash = b.state(State::new("dash"));
    let end = b.state(State::non_terminal_end("end"));
    b.transition(start, Condition::Punctuation('-'), dash)
        .fallback(start, start)
        .fallback(dash, end)
        .fallback(end, start);
    let mut scanner = Scanner::<()>::new().with_machine(b.build(start).unwrap(), None);

    let result = scanner.scan(&words("- daily"));
    assert!(matches!(
        result,
        Err(CoreError::Bounds(BoundsError::BeforeFirstToken { position: 1, .. }))
    ));
}

#[test]
fn inverted_boundaries_are_rejected() {
    // records a start on "x", then completes with a non-terminal end one
    // token later: the match would begin after it ends
    let mut b = Machine::builder("inverted");
    let start = b.state(State::new("start"));
    let end = b.state(State::non_terminal_end("end"));
    b.transition(start, Condition::text("stop"), end)
        .fallback(start, start)
        .fallback(end, start);
    let mut scanner = Scanner::<()>::new().with_machine(b.build(start).unwrap(), None);

    assert!(matches!(
        scanner.scan(&words("x stop")),
        Err(CoreError::Bounds(BoundsError::Inverted { first: 1, last: 0, .. }))
    ));
}

#[test]
fn machines_are_reused_across_scans() {
    let mut scanner = Scanner::new().with_machine(decimal_machine(), Some(1u8));
    let tokens = vec![tok("0", 0, 1), tok(".", 1, 2), tok("5", 2, 3), tok("-", 3, 4)];
    // abandon a scan half way through a match, then scan again
    scanner.scan(&tokens[..2]).unwrap();
    assert_eq!(scanner.scan(&tokens).unwrap().len(), 1);
}
