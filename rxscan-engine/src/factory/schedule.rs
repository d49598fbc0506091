//! Timing machines: frequency units, counted frequencies and durations

use super::{maybe, number, phrases, texts, words};
use crate::attribute::{Attribute, Category, FrequencyUnit};
use crate::error::Result;
use crate::lexicon::{Lexicon, UnitWords};
use rxscan_core::{Condition, Machine, Scanner, State};

pub(super) fn frequency_unit(lexicon: &Lexicon) -> Result<Scanner<Category>> {
    let config = &lexicon.frequency_unit;
    let mut scanner = Scanner::new();

    for (name, unit_words) in lexicon.unit_categories() {
        if unit_words.single.is_empty()
            && unit_words.suffix.is_empty()
            && unit_words.phrases.is_empty()
        {
            continue;
        }
        let unit = unit_for(name);
        let machine = unit_machine(name, unit_words, lexicon)?;
        scanner.push(machine, Some(Category::FrequencyUnit(unit)));
    }

    for (hours, list) in lexicon.hour_intervals()? {
        let mut b = Machine::builder(format!("frequency-unit-{hours}h"));
        let start = b.state(State::new("start"));
        let prefix = b.state(State::new("prefix"));
        let count = b.state(State::new("count"));
        let end = b.state(State::end("end"));

        maybe(&mut b, start, texts(list), end);
        maybe(&mut b, start, words(&config.prefixes), prefix);
        b.fallback(start, start)
            .transition(prefix, Condition::IntegerValue(i64::from(hours)), count)
            .fallback(prefix, start);
        maybe(&mut b, count, words(&config.hour_suffixes), end);
        b.fallback(count, start).fallback(end, start);

        scanner.push(
            b.build(start)?,
            Some(Category::FrequencyUnit(FrequencyUnit::EveryHours(hours))),
        );
    }

    Ok(scanner)
}

fn unit_for(name: &str) -> FrequencyUnit {
    match name {
        "one" => FrequencyUnit::One,
        "two" => FrequencyUnit::Two,
        "three" => FrequencyUnit::Three,
        "four" => FrequencyUnit::Four,
        "five" => FrequencyUnit::Five,
        "six" => FrequencyUnit::Six,
        "every_other_day" => FrequencyUnit::EveryOtherDay,
        "weekly" => FrequencyUnit::Weekly,
        "monthly" => FrequencyUnit::Monthly,
        "yearly" => FrequencyUnit::Yearly,
        _ => FrequencyUnit::AsNeeded,
    }
}

/// `bid`, `every morning`, `in the evening`, `as needed`
fn unit_machine(name: &str, unit_words: &UnitWords, lexicon: &Lexicon) -> Result<Machine> {
    let config = &lexicon.frequency_unit;
    let mut b = Machine::builder(format!("frequency-unit-{name}"));
    let start = b.state(State::new("start"));
    let prefix = b.state(State::new("prefix"));
    let end = b.state(State::end("end"));

    maybe(&mut b, start, texts(&unit_words.single), end);
    let suffix = words(&unit_words.suffix);
    if suffix.is_some() {
        maybe(&mut b, start, words(&config.prefixes), prefix);
    }
    phrases(&mut b, name, start, &unit_words.phrases, end, start);
    b.fallback(start, start);

    maybe(&mut b, prefix, words(&config.fillers), prefix);
    maybe(&mut b, prefix, suffix, end);
    b.fallback(prefix, start).fallback(end, start);

    Ok(b.build(start)?)
}

/// Count followed by a frequency unit: `three times a day`, `twice daily`
pub(super) fn frequency(lexicon: &Lexicon) -> Result<Scanner<Category>> {
    let config = &lexicon.frequency;
    let unit = Condition::labeled(Attribute::FrequencyUnit.code());
    let mut count = Condition::Integer
        .or(Condition::Range)
        .or(Condition::labeled(Attribute::Range.code()));
    if let Some(counts) = words(&config.counts) {
        count = counts.or(count);
    }

    let mut b = Machine::builder("frequency");
    let start = b.state(State::new("start"));
    let counted = b.state(State::new("count"));
    let mid = b.state(State::new("connector"));
    let end = b.state(State::end("end"));

    b.transition(start, count, counted);
    maybe(&mut b, start, texts(&config.hyphenated), end);
    b.fallback(start, start)
        .transition(counted, unit.clone(), end);
    maybe(&mut b, counted, words(&config.connectors), mid);
    b.fallback(counted, start).transition(mid, unit, end);
    maybe(&mut b, mid, words(&config.connectors), mid);
    b.fallback(mid, start).fallback(end, start);

    Ok(Scanner::new().with_machine(b.build(start)?, None))
}

/// `for 10 days`, `x 2-3 weeks`, `for the next few days`, `for one-week`
pub(super) fn duration(lexicon: &Lexicon) -> Result<Scanner<Category>> {
    let config = &lexicon.duration;
    let mut amount = number(lexicon)
        .or(Condition::Range)
        .or(Condition::labeled(Attribute::Range.code()));
    if let Some(quantities) = words(&config.quantities) {
        amount = amount.or(quantities);
    }

    let mut b = Machine::builder("duration");
    let start = b.state(State::new("start"));
    let prefix = b.state(State::new("prefix"));
    let num = b.state(State::new("num"));
    let end = b.state(State::end("end"));

    maybe(&mut b, start, words(&config.prefixes), prefix);
    b.fallback(start, start);
    maybe(&mut b, prefix, words(&config.fillers), prefix);
    b.transition(prefix, amount, num);
    maybe(&mut b, prefix, texts(&config.combined), end);
    b.fallback(prefix, start);
    maybe(&mut b, num, words(&config.periods), end);
    maybe(&mut b, num, words(&config.fillers), num);
    b.fallback(num, start).fallback(end, start);

    Ok(Scanner::new().with_machine(b.build(start)?, None))
}
