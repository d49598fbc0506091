//! Amount machines: fractions, ranges, strengths, forms and dosages

use super::{maybe, number, texts, words};
use crate::attribute::{Attribute, Category};
use crate::error::Result;
use crate::lexicon::{word_set, Lexicon};
use rxscan_core::{Condition, Machine, Scanner, State};

/// Fraction written as one token
const SLASH_FRACTION: &str = r"\d+/\d+";

/// `1/2`, `1 / 2`, `0 . 5`, `one half`, `two-thirds`
pub(super) fn fraction(lexicon: &Lexicon) -> Result<Scanner<Category>> {
    let numbers = &lexicon.numbers;
    let mut b = Machine::builder("fraction");
    let start = b.state(State::new("start"));
    let num = b.state(State::new("num"));
    let slash = b.state(State::new("slash"));
    let dot = b.state(State::new("dot"));
    let text_num = b.state(State::new("text-num"));
    let text_dash = b.state(State::new("text-dash"));
    let end = b.state(State::end("end"));

    b.transition(start, Condition::pattern(SLASH_FRACTION)?, end)
        .transition(start, Condition::Number, num);
    maybe(&mut b, start, words(&numbers.words), text_num);
    maybe(&mut b, start, words(&numbers.hyphenated_fractions), end);
    b.fallback(start, start)
        .transition(num, Condition::Punctuation('/'), slash)
        .transition(num, Condition::Punctuation('.'), dot)
        .fallback(num, start)
        .transition(slash, Condition::Number, end)
        .fallback(slash, start)
        .transition(dot, Condition::Integer, end)
        .fallback(dot, start);

    let fractions = words(&numbers.fractions);
    if let Some(fractions) = &fractions {
        b.transition(text_num, fractions.clone(), end);
    }
    b.transition(text_num, Condition::Punctuation('-'), text_dash)
        .fallback(text_num, start);
    maybe(&mut b, text_dash, fractions, end);
    b.fallback(text_dash, start).fallback(end, start);

    Ok(Scanner::new().with_machine(b.build(start)?, None))
}

/// `1-2`, `1 - 2`, `1 to 2`, `one to two`
pub(super) fn range(lexicon: &Lexicon) -> Result<Scanner<Category>> {
    let mut b = Machine::builder("range");
    let start = b.state(State::new("start"));
    let left = b.state(State::new("left"));
    let dash = b.state(State::new("dash"));
    let end = b.state(State::end("end"));

    let separator = Condition::Punctuation('-')
        .or(Condition::Punctuation('\u{2013}'))
        .or(Condition::text("to"));

    b.transition(start, Condition::Range, end)
        .transition(start, number(lexicon), left)
        .fallback(start, start)
        .transition(left, separator, dash)
        .fallback(left, start)
        .transition(dash, number(lexicon), end)
        .fallback(dash, start)
        .fallback(end, start);

    Ok(Scanner::new().with_machine(b.build(start)?, None))
}

/// `mg`, `%`, `10mg`; after a dash only the unit itself is reported
pub(super) fn strength_unit(lexicon: &Lexicon) -> Result<Scanner<Category>> {
    let units = word_set(&lexicon.strength.units);
    let unit = Condition::word_in(&units).or(Condition::Symbol('%'));

    let mut b = Machine::builder("strength-unit");
    let start = b.state(State::new("start"));
    let dash = b.state(State::new("dash"));
    let end = b.state(State::end("end"));
    let dashed = b.state(State::indent_start("dashed-end"));

    b.transition(start, unit.clone(), end)
        .transition(start, Condition::ContainsSetText(units), end)
        .transition(start, Condition::Punctuation('-'), dash)
        .fallback(start, start)
        .transition(dash, unit, dashed)
        .fallback(dash, start)
        .fallback(end, start)
        .fallback(dashed, start);

    Ok(Scanner::new().with_machine(b.build(start)?, None))
}

/// Amount followed by a strength unit: `250 mg`, `1/2 mg`, `250 - mg`
pub(super) fn strength(lexicon: &Lexicon) -> Result<Scanner<Category>> {
    let unit_label = Attribute::StrengthUnit.code();
    let amount = number(lexicon)
        .or(Condition::Range)
        .or(Condition::labeled(Attribute::Fraction.code()));

    let mut b = Machine::builder("strength");
    let start = b.state(State::new("start"));
    let num = b.state(State::new("num"));
    let dash = b.state(State::new("dash"));
    let end = b.state(State::end("end"));

    b.transition(start, amount, num)
        .transition(
            start,
            Condition::ContainsSetText(word_set(&lexicon.strength.units)),
            end,
        )
        .fallback(start, start)
        .transition(num, Condition::labeled(unit_label), end)
        .transition(num, Condition::Punctuation('-'), dash)
        .fallback(num, start)
        .transition(dash, Condition::labeled(unit_label), end)
        .fallback(dash, start)
        .fallback(end, start);

    Ok(Scanner::new().with_machine(b.build(start)?, None))
}

/// Dosage form words: `tablets`, `cream`
pub(super) fn form(lexicon: &Lexicon) -> Result<Scanner<Category>> {
    let mut b = Machine::builder("form");
    let start = b.state(State::new("start"));
    let end = b.state(State::end("end"));
    maybe(&mut b, start, words(&lexicon.form.words), end);
    b.fallback(start, start).fallback(end, start);

    Ok(Scanner::new().with_machine(b.build(start)?, None))
}

/// Count of forms: `2 tablets`, `1 to 2 caps`, `1 / 2 tablet`, `half-tablet`
pub(super) fn dosage(lexicon: &Lexicon) -> Result<Scanner<Category>> {
    let dosage = &lexicon.dosage;
    let form_label = Condition::labeled(Attribute::Form.code());
    let mut count = number(lexicon)
        .or(Condition::Range)
        .or(Condition::labeled(Attribute::Fraction.code()))
        .or(Condition::pattern(SLASH_FRACTION)?);
    if let Some(fractions) = words(&lexicon.numbers.hyphenated_fractions) {
        count = count.or(fractions);
    }
    if let Some(counts) = texts(&dosage.counts) {
        count = count.or(counts);
    }

    let mut b = Machine::builder("dosage");
    let start = b.state(State::new("start"));
    let num = b.state(State::new("num"));
    let alt = b.state(State::new("alt"));
    let end = b.state(State::end("end"));

    maybe(&mut b, start, texts(&dosage.solo), end);
    b.transition(start, count, num)
        .fallback(start, start)
        .transition(num, form_label, end);
    let mut alternative = Condition::Punctuation('-');
    if let Some(words) = words(&dosage.alternatives) {
        alternative = words.or(alternative);
    }
    b.transition(num, alternative, alt)
        .fallback(num, start)
        .transition(alt, number(lexicon), num)
        .fallback(alt, start)
        .fallback(end, start);

    Ok(Scanner::new().with_machine(b.build(start)?, None))
}
