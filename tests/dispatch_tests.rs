//! Balance preflight, submission and cancellation through the dispatcher.

mod support;

use pmctl::application::dispatch::OrderDispatcher;
use pmctl::domain::id::{ConditionId, OrderId, TokenId};
use pmctl::domain::order::{
    BalanceAsset, DispatchOutcome, OrderPayload, Side, SubmitResponse, TimeInForce,
};
use pmctl::error::Error;
use pmctl::testkit::domain::open_order;
use pmctl::testkit::fake::{FakeTrader, FakeWallet};
use rust_decimal_macros::dec;
use support::trading::{limit, market, TOKEN};

#[tokio::test]
async fn insufficient_collateral_never_reaches_the_exchange() {
    let trader = FakeTrader::new();
    let wallet = FakeWallet::with_collateral(dec!(40));
    let dispatcher = OrderDispatcher::new(&trader, &wallet);

    let err = dispatcher
        .dispatch(&limit(Side::Buy, dec!(0.65), dec!(100)))
        .await
        .unwrap_err();

    match err {
        Error::InsufficientBalance {
            available,
            required,
            ..
        } => {
            assert_eq!(available, dec!(40));
            assert_eq!(required, dec!(65.00));
        }
        other => panic!("expected insufficient balance, got {other}"),
    }
    assert!(trader.submitted().is_empty());
}

#[tokio::test]
async fn covered_limit_buy_is_submitted_good_till_cancelled() {
    let trader = FakeTrader::new();
    let wallet = FakeWallet::with_collateral(dec!(65));
    let dispatcher = OrderDispatcher::new(&trader, &wallet);

    let outcome = dispatcher
        .dispatch(&limit(Side::Buy, dec!(0.65), dec!(100)))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::Confirmed {
            order_id: OrderId::from("0xfake-order"),
            status: Some("live".to_string()),
        }
    );

    let submitted = trader.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].time_in_force(), TimeInForce::GoodTillCancelled);
    assert_eq!(submitted[0].side(), Side::Buy);
}

#[tokio::test]
async fn market_buy_is_fill_or_kill_and_sized_in_dollars() {
    let trader = FakeTrader::new();
    let wallet = FakeWallet::with_collateral(dec!(50));
    let dispatcher = OrderDispatcher::new(&trader, &wallet);

    let request = market(Side::Buy, dec!(0.65), dec!(50));
    let (requirement, available) = dispatcher.preflight(&request).await.unwrap();
    assert_eq!(requirement.asset, BalanceAsset::Collateral);
    assert_eq!(requirement.amount, dec!(50));
    assert_eq!(available, dec!(50));

    dispatcher.dispatch(&request).await.unwrap();
    let submitted = trader.submitted();
    assert!(matches!(submitted[0], OrderPayload::Market { .. }));
    assert_eq!(submitted[0].time_in_force(), TimeInForce::FillOrKill);
}

#[tokio::test]
async fn sell_checks_the_token_position_not_collateral() {
    let trader = FakeTrader::new();
    let wallet = FakeWallet::with_collateral(dec!(1000)).with_position(TOKEN, dec!(5));
    let dispatcher = OrderDispatcher::new(&trader, &wallet);

    let err = dispatcher
        .dispatch(&limit(Side::Sell, dec!(0.40), dec!(10)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InsufficientBalance { .. }));
    assert!(trader.submitted().is_empty());

    let request = limit(Side::Sell, dec!(0.40), dec!(5));
    let (requirement, _) = dispatcher.preflight(&request).await.unwrap();
    assert_eq!(
        requirement.asset,
        BalanceAsset::Position(TokenId::from(TOKEN))
    );
    assert_eq!(requirement.amount, dec!(5));
}

#[tokio::test]
async fn market_sell_of_entire_position_passes_preflight() {
    let trader = FakeTrader::new();
    let wallet = FakeWallet::default().with_position(TOKEN, dec!(33.33));
    let dispatcher = OrderDispatcher::new(&trader, &wallet);

    let request = market(Side::Sell, dec!(0.30), dec!(10));
    let (requirement, available) = dispatcher.preflight(&request).await.unwrap();
    assert_eq!(requirement.amount, dec!(33.33));
    assert_eq!(available, dec!(33.33));

    dispatcher.dispatch(&request).await.unwrap();
    assert_eq!(trader.submitted().len(), 1);
}

#[tokio::test]
async fn market_order_keeps_the_requested_worst_price() {
    let trader = FakeTrader::new();
    let wallet = FakeWallet::with_collateral(dec!(50));
    let dispatcher = OrderDispatcher::new(&trader, &wallet);

    dispatcher
        .dispatch(&market(Side::Buy, dec!(0.40), dec!(50)))
        .await
        .unwrap();

    match &trader.submitted()[0] {
        OrderPayload::Market { price, amount, .. } => {
            assert_eq!(*price, dec!(0.40));
            assert_eq!(amount.value(), dec!(50));
        }
        other => panic!("expected a market payload, got {other:?}"),
    }
}

#[tokio::test]
async fn exchange_rejection_is_an_outcome_not_an_error() {
    let trader = FakeTrader::new().with_response(SubmitResponse {
        order_id: None,
        status: Some("unmatched".to_string()),
        error_msg: Some("not enough balance / allowance".to_string()),
    });
    let wallet = FakeWallet::with_collateral(dec!(100));
    let dispatcher = OrderDispatcher::new(&trader, &wallet);

    let outcome = dispatcher
        .dispatch(&limit(Side::Buy, dec!(0.50), dec!(10)))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::Rejected {
            reason: "not enough balance / allowance".to_string(),
            status: Some("unmatched".to_string()),
        }
    );
    assert_eq!(trader.submitted().len(), 1);
}

#[tokio::test]
async fn cancelling_an_empty_market_reports_nothing() {
    let trader = FakeTrader::new();
    let wallet = FakeWallet::default();
    let dispatcher = OrderDispatcher::new(&trader, &wallet);

    let report = dispatcher
        .cancel_all_for_market(&ConditionId::from("0xempty"))
        .await
        .unwrap();

    assert!(report.is_empty());
    assert!(!report.is_partial());
}

#[tokio::test]
async fn partial_cancellation_lists_both_sides() {
    let trader = FakeTrader::new()
        .with_orders(vec![
            open_order("o1", "101-yes", "0x101", "BUY"),
            open_order("o2", "101-no", "0x101", "SELL"),
            open_order("o3", "102-yes", "0x102", "BUY"),
        ])
        .refusing_cancel("o2");
    let wallet = FakeWallet::default();
    let dispatcher = OrderDispatcher::new(&trader, &wallet);

    let report = dispatcher
        .cancel_all_for_market(&ConditionId::from("0x101"))
        .await
        .unwrap();

    assert_eq!(report.canceled, vec![OrderId::from("o1")]);
    assert_eq!(report.not_canceled.len(), 1);
    assert_eq!(report.not_canceled[0].order_id, OrderId::from("o2"));
    assert!(report.is_partial());

    let resting: Vec<OrderId> = trader.resting().into_iter().map(|o| o.id).collect();
    assert_eq!(resting, vec![OrderId::from("o2"), OrderId::from("o3")]);
}

#[tokio::test]
async fn multi_market_cancel_merges_in_market_order() {
    let trader = FakeTrader::new().with_orders(vec![
        open_order("a", "101-yes", "0x101", "BUY"),
        open_order("b", "102-yes", "0x102", "BUY"),
        open_order("c", "101-no", "0x101", "SELL"),
    ]);
    let wallet = FakeWallet::default();
    let dispatcher = OrderDispatcher::new(&trader, &wallet);

    let markets = [ConditionId::from("0x102"), ConditionId::from("0x101")];
    let report = dispatcher.cancel_all_for_markets(markets.iter()).await.unwrap();

    assert_eq!(
        report.canceled,
        vec![OrderId::from("b"), OrderId::from("a"), OrderId::from("c")]
    );
    assert!(trader.resting().is_empty());
}

#[tokio::test]
async fn failed_market_is_recorded_and_the_rest_still_cancelled() {
    let trader = FakeTrader::new()
        .with_orders(vec![
            open_order("a", "101-yes", "0x101", "BUY"),
            open_order("b", "102-yes", "0x102", "BUY"),
            open_order("c", "103-yes", "0x103", "SELL"),
        ])
        .failing_cancel_call(2);
    let wallet = FakeWallet::default();
    let dispatcher = OrderDispatcher::new(&trader, &wallet);

    let markets = [
        ConditionId::from("0x101"),
        ConditionId::from("0x102"),
        ConditionId::from("0x103"),
    ];
    let report = dispatcher.cancel_all_for_markets(markets.iter()).await.unwrap();

    assert_eq!(trader.cancel_calls(), 3);
    assert_eq!(report.canceled, vec![OrderId::from("a"), OrderId::from("c")]);
    assert_eq!(report.failed_markets.len(), 1);
    assert_eq!(report.failed_markets[0].market, ConditionId::from("0x102"));
    assert!(report.is_partial());

    let resting: Vec<OrderId> = trader.resting().into_iter().map(|o| o.id).collect();
    assert_eq!(resting, vec![OrderId::from("b")]);
}

#[tokio::test]
async fn every_market_failing_is_an_error() {
    let trader = FakeTrader::new()
        .with_orders(vec![open_order("a", "101-yes", "0x101", "BUY")])
        .failing_cancel_call(1);
    let wallet = FakeWallet::default();
    let dispatcher = OrderDispatcher::new(&trader, &wallet);

    let markets = [ConditionId::from("0x101")];
    let err = dispatcher
        .cancel_all_for_markets(markets.iter())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Upstream { status: 503, .. }));
    assert_eq!(trader.resting().len(), 1);
}

#[tokio::test]
async fn cancelling_an_unknown_order_is_reported() {
    let trader = FakeTrader::new();
    let wallet = FakeWallet::default();
    let dispatcher = OrderDispatcher::new(&trader, &wallet);

    let report = dispatcher.cancel_one(&OrderId::from("0xmissing")).await.unwrap();

    assert!(report.canceled.is_empty());
    assert_eq!(report.not_canceled[0].reason, "order not found");
}
