//! Lexicon-driven machine construction
//!
//! Each attribute maps to one [`Scanner`] whose machines are assembled from
//! the word lists of a [`Lexicon`]. Categories with no words configured get
//! no machine at all.

mod change_status;
mod measure;
mod route;
mod schedule;

use crate::attribute::{Attribute, Category};
use crate::error::Result;
use crate::lexicon::{word_set, Lexicon};
use rxscan_core::{Condition, MachineBuilder, Scanner, State, StateId};
use std::collections::HashMap;
use tracing::debug;

/// Build the scanner for one attribute
pub fn scanner_for(attribute: Attribute, lexicon: &Lexicon) -> Result<Scanner<Category>> {
    let scanner = match attribute {
        Attribute::Fraction => measure::fraction(lexicon)?,
        Attribute::Range => measure::range(lexicon)?,
        Attribute::StrengthUnit => measure::strength_unit(lexicon)?,
        Attribute::Strength => measure::strength(lexicon)?,
        Attribute::Form => measure::form(lexicon)?,
        Attribute::Dosage => measure::dosage(lexicon)?,
        Attribute::Route => route::route(lexicon)?,
        Attribute::FrequencyUnit => schedule::frequency_unit(lexicon)?,
        Attribute::Frequency => schedule::frequency(lexicon)?,
        Attribute::Duration => schedule::duration(lexicon)?,
        Attribute::ChangeStatus => change_status::change_status(lexicon)?,
    };
    debug!(attribute = %attribute, machines = scanner.len(), "scanner built");
    Ok(scanner)
}

/// Case-insensitive word-set condition, `None` for an empty list
fn words(list: &[String]) -> Option<Condition> {
    (!list.is_empty()).then(|| Condition::word_in(&word_set(list)))
}

/// Like [`words`] but accepting tokens of any kind
fn texts(list: &[String]) -> Option<Condition> {
    (!list.is_empty()).then(|| Condition::text_in(&word_set(list)))
}

/// Numeric token or spelled-out number
fn number(lexicon: &Lexicon) -> Condition {
    match words(&lexicon.numbers.words) {
        Some(spelled) => Condition::Number.or(spelled),
        None => Condition::Number,
    }
}

/// Add `condition → to` when the condition exists
fn maybe(b: &mut MachineBuilder, from: StateId, condition: Option<Condition>, to: StateId) {
    if let Some(condition) = condition {
        b.transition(from, condition, to);
    }
}

/// Add multi-word phrases as a prefix-sharing chain of states
///
/// Phrases leave `from` one word at a time and enter `to` on their last
/// word. Intermediate states fall back to `restart`. Call before the
/// fallback of `from` is added.
fn phrases(
    b: &mut MachineBuilder,
    name: &str,
    from: StateId,
    list: &[String],
    to: StateId,
    restart: StateId,
) {
    let mut nodes: HashMap<(usize, String), StateId> = HashMap::new();
    let mut created = Vec::new();

    for phrase in list {
        let parts: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
        let Some((last, leading)) = parts.split_last() else {
            continue;
        };
        let mut current = from;
        for word in leading {
            current = match nodes.get(&(current.index(), word.clone())) {
                Some(&next) => next,
                None => {
                    let next = b.state(State::new(format!("{name}:{word}")));
                    b.transition(current, Condition::text(word.as_str()), next);
                    nodes.insert((current.index(), word.clone()), next);
                    created.push(next);
                    next
                }
            };
        }
        b.transition(current, Condition::text(last.as_str()), to);
    }

    for state in created {
        b.fallback(state, restart);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxscan_core::{Machine, Token};

    fn tokens(text: &str) -> Vec<Token> {
        let mut offset = 0;
        text.split(' ')
            .map(|w| {
                let token = Token::new(w, offset, offset + w.len()).unwrap();
                offset += w.len() + 1;
                token
            })
            .collect()
    }

    #[test]
    fn test_every_attribute_builds_from_embedded_lexicon() {
        for attribute in Attribute::PIPELINE {
            let scanner = scanner_for(attribute, Lexicon::embedded()).unwrap();
            assert!(!scanner.is_empty(), "{attribute} has no machines");
        }
    }

    #[test]
    fn test_phrases_share_prefixes() {
        let mut b = Machine::builder("phrases");
        let start = b.state(State::new("start"));
        let end = b.state(State::end("end"));
        let list = vec![
            "every other day".to_string(),
            "every other night".to_string(),
        ];
        phrases(&mut b, "eod", start, &list, end, start);
        b.fallback(start, start).fallback(end, start);
        let machine = b.build(start).unwrap();
        // start, end, "every", "other"
        assert_eq!(machine.len(), 4);

        let mut scanner = Scanner::<()>::new().with_machine(machine, None);
        let spans = scanner.scan(&tokens("every other night")).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (0, 17));
    }

    #[test]
    fn test_empty_list_yields_no_condition() {
        assert!(words(&[]).is_none());
        assert!(texts(&["%".to_string()]).is_some());
    }
}
