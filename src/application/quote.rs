//! Price reference: point-in-time quotes and history summaries.

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{
    id::TokenId,
    order::Side,
    price::{HistoryQuery, HistorySummary, PricePoint, Quote},
};
use crate::error::Result;
use crate::port::outbound::pricing::PriceFeed;

/// Read ask, bid and midpoint for a token.
///
/// The three reads are independent and run concurrently. If any one fails
/// the whole quote fails; a partial quote is never returned.
///
/// # Errors
///
/// Returns the first price-feed error encountered.
pub async fn quote(feed: &dyn PriceFeed, token_id: &TokenId) -> Result<Quote> {
    let (ask, bid, midpoint) = tokio::try_join!(
        feed.price(token_id, Side::Sell),
        feed.price(token_id, Side::Buy),
        feed.midpoint(token_id),
    )?;

    debug!(token_id = %token_id, %ask, %bid, %midpoint, "Quote fetched");
    Ok(Quote { ask, bid, midpoint })
}

/// Fetch a price series and its summary.
///
/// The summary is `None` for an empty series.
///
/// # Errors
///
/// Returns the price-feed error unchanged.
pub async fn history(
    feed: &dyn PriceFeed,
    query: &HistoryQuery,
) -> Result<(Vec<PricePoint>, Option<HistorySummary>)> {
    let points = feed.history(query).await?;
    debug!(token_id = %query.token_id, points = points.len(), "History fetched");
    let summary = summarize(&points);
    Ok((points, summary))
}

/// Open, close, high, low and change of a series, in the order given.
///
/// `change_pct` is a percentage and is `None` when the open is zero.
#[must_use]
pub fn summarize(points: &[PricePoint]) -> Option<HistorySummary> {
    let first = points.first()?;
    let last = points.last()?;

    let (high, low) = points
        .iter()
        .fold((first.p, first.p), |(hi, lo), pt| (hi.max(pt.p), lo.min(pt.p)));

    let change = last.p - first.p;
    let change_pct = change
        .checked_div(first.p)
        .map(|ratio| ratio * Decimal::ONE_HUNDRED);

    Some(HistorySummary {
        points: points.len(),
        first_ts: first.t,
        last_ts: last.t,
        open: first.p,
        close: last.p,
        high,
        low,
        change,
        change_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn three_point_rising_series() {
        let points = [
            PricePoint::new(0, dec!(0.40)),
            PricePoint::new(1, dec!(0.50)),
            PricePoint::new(2, dec!(0.60)),
        ];

        let summary = summarize(&points).unwrap();

        assert_eq!(summary.open, dec!(0.40));
        assert_eq!(summary.close, dec!(0.60));
        assert_eq!(summary.high, dec!(0.60));
        assert_eq!(summary.low, dec!(0.40));
        assert_eq!(summary.change, dec!(0.20));
        assert_eq!(summary.change_pct, Some(dec!(50)));
        assert_eq!(summary.points, 3);
    }

    #[test]
    fn zero_open_has_no_percentage() {
        let points = [PricePoint::new(0, dec!(0)), PricePoint::new(1, dec!(0.1))];
        let summary = summarize(&points).unwrap();
        assert_eq!(summary.change, dec!(0.1));
        assert_eq!(summary.change_pct, None);
    }

    #[test]
    fn empty_series_has_no_summary() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn high_and_low_cover_interior_points() {
        let points = [
            PricePoint::new(0, dec!(0.50)),
            PricePoint::new(1, dec!(0.80)),
            PricePoint::new(2, dec!(0.20)),
            PricePoint::new(3, dec!(0.55)),
        ];
        let summary = summarize(&points).unwrap();
        assert_eq!(summary.high, dec!(0.80));
        assert_eq!(summary.low, dec!(0.20));
    }
}
