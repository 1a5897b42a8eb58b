//! Open-order fan-out across an event's tokens.

use pmctl::application::orders::{open_orders_for_tokens, summarize, OrderSummary};
use pmctl::domain::id::{OrderId, TokenId};
use pmctl::testkit::domain::{make_tokens, open_order};
use pmctl::testkit::fake::FakeTrader;

fn trader() -> FakeTrader {
    FakeTrader::new().with_orders(vec![
        open_order("o1", "t0", "0xm0", "BUY"),
        open_order("o2", "t1", "0xm0", "SELL"),
        open_order("o3", "t0", "0xm0", "SELL"),
        open_order("o4", "t2", "0xm1", "BUY"),
        open_order("o5", "t9", "0xm9", "BUY"),
    ])
}

fn ids(orders: &[pmctl::domain::order::OpenOrder]) -> Vec<OrderId> {
    orders.iter().map(|o| o.id.clone()).collect()
}

#[tokio::test]
async fn results_follow_token_order() {
    let trader = trader();
    let tokens = vec![TokenId::from("t1"), TokenId::from("t0"), TokenId::from("t2")];

    let orders = open_orders_for_tokens(&trader, &tokens).await.unwrap();

    assert_eq!(
        ids(&orders),
        vec![
            OrderId::from("o2"),
            OrderId::from("o1"),
            OrderId::from("o3"),
            OrderId::from("o4"),
        ]
    );
}

#[tokio::test]
async fn tokens_without_orders_contribute_nothing() {
    let trader = trader();
    let orders = open_orders_for_tokens(&trader, &make_tokens(5)).await.unwrap();

    assert_eq!(orders.len(), 4);
    assert!(orders.iter().all(|o| o.asset_id != TokenId::from("t9")));
}

#[tokio::test]
async fn no_tokens_means_no_orders() {
    let orders = open_orders_for_tokens(&trader(), &[]).await.unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn summary_counts_sides() {
    let trader = trader();
    let orders = open_orders_for_tokens(&trader, &make_tokens(3)).await.unwrap();

    assert_eq!(
        summarize(&orders),
        OrderSummary {
            total: 4,
            buy: 2,
            sell: 2,
        }
    );
}
