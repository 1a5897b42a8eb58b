//! Quotes, history summaries and order-book analysis over a fake feed.

use pmctl::application::{book, quote};
use pmctl::domain::id::TokenId;
use pmctl::domain::price::{HistoryQuery, HistoryWindow, PricePoint};
use pmctl::domain::ValidationError;
use pmctl::error::Error;
use pmctl::port::outbound::pricing::PriceFeed;
use pmctl::testkit::domain::make_book;
use pmctl::testkit::fake::FakePriceFeed;
use rust_decimal_macros::dec;

const TOKEN: &str = "21742633143463906290569050155826241533067272736897614950488156847949938836455";

#[tokio::test]
async fn quote_reads_all_three_prices() {
    let feed = FakePriceFeed::new().with_quote(TOKEN, dec!(0.66), dec!(0.64), dec!(0.65));

    let quote = quote::quote(&feed, &TokenId::from(TOKEN)).await.unwrap();

    assert_eq!(quote.ask, dec!(0.66));
    assert_eq!(quote.bid, dec!(0.64));
    assert_eq!(quote.midpoint, dec!(0.65));
    assert_eq!(quote.spread(), dec!(0.02));
}

#[tokio::test]
async fn quote_fails_whole_when_one_read_fails() {
    let feed = FakePriceFeed::new()
        .with_quote(TOKEN, dec!(0.66), dec!(0.64), dec!(0.65))
        .without_midpoint(TOKEN);

    let err = quote::quote(&feed, &TokenId::from(TOKEN)).await.unwrap_err();
    assert!(matches!(err, Error::Upstream { status: 404, .. }));
}

#[tokio::test]
async fn history_summarizes_a_rising_series() {
    let feed = FakePriceFeed::new().with_history(
        TOKEN,
        vec![
            PricePoint::new(1_700_000_000, dec!(0.40)),
            PricePoint::new(1_700_003_600, dec!(0.50)),
            PricePoint::new(1_700_007_200, dec!(0.60)),
        ],
    );
    let query = HistoryQuery {
        token_id: TokenId::from(TOKEN),
        window: HistoryWindow::from_parts(Some("1w".to_string()), None, None).unwrap(),
        fidelity: Some(60),
    };

    let (points, summary) = quote::history(&feed, &query).await.unwrap();
    let summary = summary.expect("non-empty series");

    assert_eq!(points.len(), 3);
    assert_eq!(summary.open, dec!(0.40));
    assert_eq!(summary.close, dec!(0.60));
    assert_eq!(summary.change, dec!(0.20));
    assert_eq!(summary.change_pct, Some(dec!(50)));
    assert_eq!(summary.first_ts, 1_700_000_000);
    assert_eq!(summary.last_ts, 1_700_007_200);
    assert_eq!(feed.history_queries(), vec![query]);
}

#[tokio::test]
async fn empty_history_has_no_summary() {
    let feed = FakePriceFeed::new();
    let query = HistoryQuery {
        token_id: TokenId::from(TOKEN),
        window: HistoryWindow::default(),
        fidelity: None,
    };

    let (points, summary) = quote::history(&feed, &query).await.unwrap();
    assert!(points.is_empty());
    assert!(summary.is_none());
}

#[test]
fn history_window_rejects_mixed_or_partial_ranges() {
    assert_eq!(
        HistoryWindow::from_parts(None, None, None).unwrap(),
        HistoryWindow::Interval("1d".to_string())
    );
    assert_eq!(
        HistoryWindow::from_parts(None, Some(100), Some(200)).unwrap(),
        HistoryWindow::Range { start: 100, end: 200 }
    );
    assert!(matches!(
        HistoryWindow::from_parts(Some("1h".to_string()), Some(100), Some(200)),
        Err(ValidationError::ConflictingArguments { .. })
    ));
    assert!(matches!(
        HistoryWindow::from_parts(None, Some(100), None),
        Err(ValidationError::MissingArgument { name: "end" })
    ));
    assert!(matches!(
        HistoryWindow::from_parts(None, Some(200), Some(200)),
        Err(ValidationError::InvalidArgument { name: "end", .. })
    ));
}

#[tokio::test]
async fn fetched_book_is_sorted_best_first() {
    let feed = FakePriceFeed::new().with_book(make_book(
        TOKEN,
        &[(dec!(0.40), dec!(10)), (dec!(0.45), dec!(5)), (dec!(0.42), dec!(1))],
        &[(dec!(0.55), dec!(3)), (dec!(0.50), dec!(2)), (dec!(0.60), dec!(1))],
    ));

    let raw = feed.order_book(&TokenId::from(TOKEN)).await.unwrap();
    let analysis = book::analyze(&raw);

    let bids: Vec<_> = analysis.sorted_bids.iter().map(|l| l.price()).collect();
    let asks: Vec<_> = analysis.sorted_asks.iter().map(|l| l.price()).collect();
    assert_eq!(bids, vec![dec!(0.45), dec!(0.42), dec!(0.40)]);
    assert_eq!(asks, vec![dec!(0.50), dec!(0.55), dec!(0.60)]);
    assert!(bids.windows(2).all(|w| w[0] >= w[1]));
    assert!(asks.windows(2).all(|w| w[0] <= w[1]));

    assert_eq!(analysis.best_bid, Some(dec!(0.45)));
    assert_eq!(analysis.best_ask, Some(dec!(0.50)));
    assert_eq!(analysis.spread, Some(dec!(0.05)));
    assert_eq!(analysis.midpoint, Some(dec!(0.475)));
    assert_eq!(analysis.bid_depth, dec!(16));
    assert_eq!(analysis.ask_depth, dec!(6));
    assert!(!analysis.is_crossed());
}

#[tokio::test]
async fn missing_book_surfaces_upstream_error() {
    let feed = FakePriceFeed::new();
    let err = feed.order_book(&TokenId::from(TOKEN)).await.unwrap_err();
    assert_eq!(err.kind(), "upstream");
}
