//! Market parameter reconciliation.
//!
//! Sub-markets of one event usually share a tick size, neg-risk flag and
//! minimum order size. A shared value is reported once; a divergent one
//! comes back as `None` so callers show it per market instead.

use serde::Serialize;

use crate::domain::market::{Market, MarketField};

/// Markets that can still take orders.
#[must_use]
pub fn active_markets(markets: &[Market]) -> Vec<&Market> {
    markets.iter().filter(|m| m.is_active()).collect()
}

/// Common value of `field` across `markets`, compared as normalized strings.
///
/// Returns `None` when the set is empty, when any market lacks the field,
/// or when any two markets disagree. Callers filter to active markets first.
#[must_use]
pub fn reconcile<'a, I>(markets: I, field: MarketField) -> Option<String>
where
    I: IntoIterator<Item = &'a Market>,
{
    let mut values = markets.into_iter().map(|m| m.field(field));
    let first = values.next()??;
    values
        .all(|v| v.as_deref() == Some(first.as_str()))
        .then_some(first)
}

/// All reconcilable parameters of an event's active markets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SharedParams {
    pub tick_size: Option<String>,
    pub neg_risk: Option<String>,
    pub min_order_size: Option<String>,
    pub spread: Option<String>,
}

impl SharedParams {
    /// Shared value of one field.
    #[must_use]
    pub fn get(&self, field: MarketField) -> Option<&str> {
        match field {
            MarketField::TickSize => self.tick_size.as_deref(),
            MarketField::NegRisk => self.neg_risk.as_deref(),
            MarketField::MinOrderSize => self.min_order_size.as_deref(),
            MarketField::Spread => self.spread.as_deref(),
        }
    }

    /// Fields that are not shared and must be shown per market.
    pub fn divergent(&self) -> impl Iterator<Item = MarketField> + '_ {
        MarketField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_none())
    }
}

/// Reconcile every field over the active subset of `markets`.
#[must_use]
pub fn reconcile_all(markets: &[Market]) -> SharedParams {
    let active = active_markets(markets);
    let shared = |field| reconcile(active.iter().copied(), field);

    SharedParams {
        tick_size: shared(MarketField::TickSize),
        neg_risk: shared(MarketField::NegRisk),
        min_order_size: shared(MarketField::MinOrderSize),
        spread: shared(MarketField::Spread),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn market_with_tick(id: &str, tick: Decimal) -> Market {
        let mut market = Market::new(id, format!("0x{id}"), "Q?");
        market.tick_size = Some(tick);
        market
    }

    #[test]
    fn unanimous_tick_size_is_returned() {
        let markets = vec![
            market_with_tick("1", dec!(0.01)),
            market_with_tick("2", dec!(0.01)),
            market_with_tick("3", dec!(0.010)),
        ];
        assert_eq!(
            reconcile(&markets, MarketField::TickSize).as_deref(),
            Some("0.01")
        );
    }

    #[test]
    fn one_divergent_value_yields_none() {
        let markets = vec![
            market_with_tick("1", dec!(0.01)),
            market_with_tick("2", dec!(0.01)),
            market_with_tick("3", dec!(0.001)),
        ];
        assert_eq!(reconcile(&markets, MarketField::TickSize), None);
    }

    #[test]
    fn missing_value_yields_none() {
        let markets = vec![market_with_tick("1", dec!(0.01)), Market::new("2", "0x2", "Q?")];
        assert_eq!(reconcile(&markets, MarketField::TickSize), None);
    }

    #[test]
    fn empty_set_yields_none() {
        assert_eq!(reconcile_all(&[]), SharedParams::default());
    }

    #[test]
    fn closed_markets_do_not_break_agreement() {
        let mut closed = market_with_tick("3", dec!(0.001));
        closed.closed = Some(true);
        let markets = vec![
            market_with_tick("1", dec!(0.01)),
            market_with_tick("2", dec!(0.01)),
            closed,
        ];

        let shared = reconcile_all(&markets);
        assert_eq!(shared.tick_size.as_deref(), Some("0.01"));
        assert!(shared.divergent().any(|f| f == MarketField::NegRisk));
        assert!(shared.divergent().all(|f| f != MarketField::TickSize));
    }
}
