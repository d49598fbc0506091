//! Change-of-status machines, one per status

use super::{maybe, words};
use crate::attribute::Category;
use crate::error::Result;
use crate::lexicon::{Lexicon, StatusWords};
use rxscan_core::{Machine, Scanner, State};

pub(super) fn change_status(lexicon: &Lexicon) -> Result<Scanner<Category>> {
    let lead_in = &lexicon.change_status.lead_in;
    let mut scanner = Scanner::new();

    for (status, status_words) in lexicon.status_categories() {
        if status_words.single.is_empty() && status_words.first.is_empty() {
            continue;
        }
        let machine = status_machine(status.lexicon_key(), status_words, lead_in)?;
        scanner.push(machine, Some(Category::ChangeStatus(status)));
    }
    Ok(scanner)
}

/// `stopped`, `no change`, `then increase from`
///
/// Single words win over first words, which win over lead-ins.
fn status_machine(name: &str, status_words: &StatusWords, lead_in: &[String]) -> Result<Machine> {
    let mut b = Machine::builder(format!("change-status-{name}"));
    let start = b.state(State::new("start"));
    let then = b.state(State::new("lead-in"));
    let dual = b.state(State::new("first"));
    let end = b.state(State::end("end"));

    let single = words(&status_words.single);
    let first = words(&status_words.first);

    maybe(&mut b, start, single.clone(), end);
    maybe(&mut b, start, first.clone(), dual);
    if status_words.lead_in {
        maybe(&mut b, start, words(lead_in), then);
    }
    b.fallback(start, start);

    maybe(&mut b, then, first, dual);
    maybe(&mut b, then, single, end);
    b.fallback(then, start);

    maybe(&mut b, dual, words(&status_words.second), end);
    b.fallback(dual, start).fallback(end, start);

    Ok(b.build(start)?)
}
