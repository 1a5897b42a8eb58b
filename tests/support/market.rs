//! Event fixtures shared by the catalog-facing tests.

use pmctl::domain::market::{Event, Market};
use pmctl::testkit::domain::{binary_market, event};
use rust_decimal_macros::dec;

pub const BTC_SLUG: &str = "bitcoin-up-or-down";
pub const ELECTION_SLUG: &str = "presidential-election-winner-2028";

/// Two-market event whose markets agree on every parameter.
pub fn bitcoin_event() -> Event {
    let mut up = binary_market("101", "Bitcoin up today?");
    let mut down = binary_market("102", "Bitcoin down today?");
    for market in [&mut up, &mut down] {
        market.tick_size = Some(dec!(0.01));
        market.neg_risk = Some(false);
        market.min_order_size = Some(dec!(5));
        market.spread = Some(dec!(0.02));
    }
    event(BTC_SLUG, "Bitcoin Up or Down", vec![up, down])
}

/// Three-market event: two active with mixed neg-risk, one closed with a
/// different tick size.
pub fn election_event() -> Event {
    let mut first = candidate("201", "Will Alice win?");
    first.neg_risk = Some(true);

    let mut second = candidate("202", "Will Bob win?");
    second.tick_size = Some(dec!(0.010));
    second.neg_risk = Some(false);

    let mut closed = candidate("203", "Will Carol win?");
    closed.tick_size = Some(dec!(0.001));
    closed.closed = Some(true);
    closed.neg_risk = Some(true);

    let mut event = event(ELECTION_SLUG, "Presidential Election Winner 2028", vec![first, second, closed]);
    event.neg_risk = Some(true);
    event
}

fn candidate(id: &str, question: &str) -> Market {
    let mut market = binary_market(id, question);
    market.tick_size = Some(dec!(0.01));
    market.min_order_size = Some(dec!(5));
    market
}
