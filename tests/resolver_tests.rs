//! Identifier resolution against an in-memory catalog.

mod support;

use pmctl::application::params::{reconcile, reconcile_all};
use pmctl::application::resolver::{resolve, Target};
use pmctl::domain::id::{ConditionId, TokenId};
use pmctl::domain::market::MarketField;
use pmctl::error::Error;
use pmctl::testkit::fake::FakeCatalog;
use support::market::{bitcoin_event, election_event, BTC_SLUG, ELECTION_SLUG};

fn catalog() -> FakeCatalog {
    FakeCatalog::new()
        .with_event(bitcoin_event())
        .with_event(election_event())
}

fn expect_event(target: Target) -> pmctl::application::resolver::ResolvedEvent {
    match target {
        Target::Event(event) => event,
        Target::Raw(id) => panic!("expected an event, got raw id {id}"),
    }
}

#[tokio::test]
async fn raw_ids_skip_the_catalog() {
    let catalog = catalog();

    for input in [
        "0x5f65177b394277fd294cd75650044e32ba009a95022d88a0c1d565897d72f8f1",
        "71321045679252212594626385532706912750332728571942532289631379312455583992563",
        "  0xabc  ",
    ] {
        let target = resolve(&catalog, input).await.unwrap();
        assert_eq!(target, Target::Raw(input.trim().to_string()));
    }

    assert!(catalog.calls().is_empty());
}

#[tokio::test]
async fn slug_expands_to_grouped_tokens() {
    let catalog = catalog();
    let event = expect_event(resolve(&catalog, BTC_SLUG).await.unwrap());

    assert_eq!(event.slug, BTC_SLUG);
    assert_eq!(event.groups.len(), 2);
    assert_eq!(
        event.token_ids,
        vec![
            TokenId::from("101-yes"),
            TokenId::from("101-no"),
            TokenId::from("102-yes"),
            TokenId::from("102-no"),
        ]
    );
    assert_eq!(event.groups[1].condition_id, ConditionId::from("0x102"));
    assert_eq!(catalog.calls(), vec![format!("events_by_slug:{BTC_SLUG}")]);
}

#[tokio::test]
async fn url_resolves_through_its_last_segment() {
    let catalog = catalog();

    for url in [
        format!("https://polymarket.com/event/{ELECTION_SLUG}"),
        format!("https://polymarket.com/event/{ELECTION_SLUG}/"),
        format!("https://polymarket.com/event/{ELECTION_SLUG}?tid=1712345"),
    ] {
        let event = expect_event(resolve(&catalog, &url).await.unwrap());
        assert_eq!(event.slug, ELECTION_SLUG);
    }
}

#[tokio::test]
async fn closed_markets_stay_listed_but_inactive() {
    let event = expect_event(resolve(&catalog(), ELECTION_SLUG).await.unwrap());

    assert_eq!(event.groups.len(), 3);
    assert_eq!(event.active_groups().count(), 2);
    assert!(!event.groups[2].active);
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let err = resolve(&catalog(), "no-such-event").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { kind: "event", .. }));
    assert_eq!(err.kind(), "not_found");
}

#[tokio::test]
async fn empty_and_pathless_inputs_fail_without_lookup() {
    let catalog = catalog();

    for input in ["", "   ", "https://polymarket.com"] {
        let err = resolve(&catalog, input).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "{input:?} gave {err}");
    }

    assert!(catalog.calls().is_empty());
}

#[test]
fn shared_parameters_ignore_closed_markets() {
    let event = election_event();
    let params = reconcile_all(&event.markets);

    assert_eq!(params.tick_size.as_deref(), Some("0.01"));
    assert_eq!(params.min_order_size.as_deref(), Some("5"));
    assert_eq!(params.neg_risk, None);
    assert_eq!(params.spread, None);

    let divergent: Vec<MarketField> = params.divergent().collect();
    assert_eq!(divergent, vec![MarketField::NegRisk, MarketField::Spread]);
}

#[test]
fn closed_market_would_break_agreement_if_included() {
    let event = election_event();
    assert_eq!(reconcile(&event.markets, MarketField::TickSize), None);
}

#[test]
fn unanimous_event_shares_everything() {
    let params = reconcile_all(&bitcoin_event().markets);
    assert_eq!(params.tick_size.as_deref(), Some("0.01"));
    assert_eq!(params.neg_risk.as_deref(), Some("false"));
    assert_eq!(params.spread.as_deref(), Some("0.02"));
    assert_eq!(params.divergent().count(), 0);
}
