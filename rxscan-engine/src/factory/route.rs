//! Route of administration, one machine per route

use super::{maybe, words};
use crate::attribute::{Category, Route};
use crate::error::Result;
use crate::lexicon::{Lexicon, RouteWords};
use rxscan_core::{Machine, Scanner, State};

pub(super) fn route(lexicon: &Lexicon) -> Result<Scanner<Category>> {
    let config = &lexicon.route;
    let routes: [(Route, &RouteWords); 6] = [
        (Route::Oral, &config.oral),
        (Route::Topical, &config.topical),
        (Route::Rectal, &config.rectal),
        (Route::Gastric, &config.gastric),
        (Route::Transdermal, &config.transdermal),
        (Route::Intravenous, &config.intravenous),
    ];

    let mut scanner = Scanner::new();
    for (route, route_words) in routes {
        if route_words.single.is_empty() && route_words.specified.is_empty() {
            continue;
        }
        let machine = route_machine(route, route_words, &config.connectors)?;
        scanner.push(machine, Some(Category::Route(route)));
    }
    Ok(scanner)
}

/// `po` on its own, or `by mouth` / `via the g-tube` after connectors
fn route_machine(route: Route, route_words: &RouteWords, connectors: &[String]) -> Result<Machine> {
    let mut b = Machine::builder(format!("route-{}", route.code().to_lowercase()));
    let start = b.state(State::new("start"));
    let mid = b.state(State::new("connector"));
    let end = b.state(State::end("end"));

    maybe(&mut b, start, words(&route_words.single), end);
    let specified = words(&route_words.specified);
    if specified.is_some() {
        maybe(&mut b, start, words(connectors), mid);
    }
    b.fallback(start, start);
    maybe(&mut b, mid, words(connectors), mid);
    maybe(&mut b, mid, specified, end);
    b.fallback(mid, start).fallback(end, start);

    Ok(b.build(start)?)
}
