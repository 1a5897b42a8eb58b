//! Order book analysis.

use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::book::{Book, BookAnalysis, PriceLevel};
use crate::domain::money::Volume;

/// Sort both sides of a book and derive best prices, spread and midpoint.
///
/// Bids end up highest first and asks lowest first. The full sorted
/// sequences are returned; truncation for display is left to the caller.
/// A crossed book is passed through unchanged and logged.
#[must_use]
pub fn analyze(book: &Book) -> BookAnalysis {
    let mut sorted_bids = book.bids().to_vec();
    sorted_bids.sort_by(|a, b| b.price().cmp(&a.price()));

    let mut sorted_asks = book.asks().to_vec();
    sorted_asks.sort_by(|a, b| a.price().cmp(&b.price()));

    let best_bid = sorted_bids.first().map(PriceLevel::price);
    let best_ask = sorted_asks.first().map(PriceLevel::price);

    let (spread, midpoint) = match (best_bid, best_ask) {
        (Some(bid), Some(ask)) => (Some(ask - bid), Some((bid + ask) / Decimal::TWO)),
        _ => (None, None),
    };

    let analysis = BookAnalysis {
        bid_depth: depth(&sorted_bids),
        ask_depth: depth(&sorted_asks),
        sorted_bids,
        sorted_asks,
        best_bid,
        best_ask,
        spread,
        midpoint,
    };

    if analysis.is_crossed() {
        warn!(
            token_id = %book.token_id(),
            best_bid = ?analysis.best_bid,
            best_ask = ?analysis.best_ask,
            "Order book is crossed"
        );
    }

    analysis
}

fn depth(levels: &[PriceLevel]) -> Volume {
    levels.iter().map(PriceLevel::size).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::TokenId;
    use rust_decimal_macros::dec;

    fn level(price: Decimal, size: Decimal) -> PriceLevel {
        PriceLevel::new(price, size)
    }

    #[test]
    fn sorts_sides_and_derives_stats() {
        let book = Book::with_levels(
            TokenId::from("t"),
            vec![level(dec!(0.40), dec!(10)), level(dec!(0.45), dec!(5))],
            vec![level(dec!(0.55), dec!(7)), level(dec!(0.50), dec!(3))],
        );

        let analysis = analyze(&book);

        assert_eq!(analysis.best_bid, Some(dec!(0.45)));
        assert_eq!(analysis.best_ask, Some(dec!(0.50)));
        assert_eq!(analysis.spread, Some(dec!(0.05)));
        assert_eq!(analysis.midpoint, Some(dec!(0.475)));
        assert_eq!(analysis.bid_depth, dec!(15));
        assert_eq!(analysis.ask_depth, dec!(10));
        assert_eq!(analysis.sorted_bids[0].price(), dec!(0.45));
        assert_eq!(analysis.sorted_asks[0].price(), dec!(0.50));
        assert!(!analysis.is_crossed());
    }

    #[test]
    fn one_sided_book_has_no_spread_or_midpoint() {
        let book = Book::with_levels(
            TokenId::from("t"),
            vec![level(dec!(0.40), dec!(10))],
            vec![],
        );

        let analysis = analyze(&book);

        assert_eq!(analysis.best_bid, Some(dec!(0.40)));
        assert_eq!(analysis.best_ask, None);
        assert_eq!(analysis.spread, None);
        assert_eq!(analysis.midpoint, None);
    }

    #[test]
    fn crossed_book_is_flagged_not_clamped() {
        let book = Book::with_levels(
            TokenId::from("t"),
            vec![level(dec!(0.60), dec!(1))],
            vec![level(dec!(0.55), dec!(1))],
        );

        let analysis = analyze(&book);

        assert!(analysis.is_crossed());
        assert_eq!(analysis.spread, Some(dec!(-0.05)));
    }
}
