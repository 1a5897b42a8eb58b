//! Order dispatch: balance preflight, construction, submission and
//! cancellation.
//!
//! Each order walks `Preflight -> Constructed -> Submitted` and ends as a
//! [`DispatchOutcome`]. Preflight and submission are not atomic; the
//! exchange stays the final authority on whether funds suffice.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::{
    id::{ConditionId, OrderId},
    order::{
        BalanceAsset, CancelReport, DispatchOutcome, MarketCancelFailure, OrderRequest,
        Requirement,
    },
};
use crate::error::{Error, Result};
use crate::port::outbound::{trading::TradingClient, wallet::BalanceSource};

/// Drives orders through preflight and submission.
pub struct OrderDispatcher<'a> {
    trader: &'a dyn TradingClient,
    balances: &'a dyn BalanceSource,
}

impl<'a> OrderDispatcher<'a> {
    #[must_use]
    pub fn new(trader: &'a dyn TradingClient, balances: &'a dyn BalanceSource) -> Self {
        Self { trader, balances }
    }

    /// Check that the account covers the order.
    ///
    /// Returns the requirement and the available balance it was checked
    /// against.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientBalance`] when `available < required`,
    /// or the balance source's error.
    pub async fn preflight(&self, request: &OrderRequest) -> Result<(Requirement, Decimal)> {
        let requirement = request.requirement();
        let available = match &requirement.asset {
            BalanceAsset::Collateral => self.balances.collateral().await?,
            BalanceAsset::Position(token_id) => self.balances.position(token_id).await?,
        };

        debug!(
            asset = %requirement.asset,
            %available,
            required = %requirement.amount,
            "Preflight balance check"
        );

        if available < requirement.amount {
            warn!(
                asset = %requirement.asset,
                %available,
                required = %requirement.amount,
                "Insufficient balance, order not submitted"
            );
            return Err(Error::InsufficientBalance {
                asset: requirement.asset.to_string(),
                available,
                required: requirement.amount,
            });
        }

        Ok((requirement, available))
    }

    /// Preflight, build and submit an order.
    ///
    /// Exchange rejections are returned verbatim as
    /// [`DispatchOutcome::Rejected`], not as errors.
    ///
    /// # Errors
    ///
    /// Returns preflight errors before anything reaches the trading client,
    /// and trading-client errors from submission.
    pub async fn dispatch(&self, request: &OrderRequest) -> Result<DispatchOutcome> {
        self.preflight(request).await?;

        let payload = request.payload();
        info!(
            token_id = %payload.token_id(),
            side = %payload.side(),
            price = %request.price(),
            notional = %request.notional(),
            tif = %payload.time_in_force(),
            "Submitting order"
        );

        let response = self.trader.submit(&payload).await?;
        let outcome = DispatchOutcome::from(response);

        match &outcome {
            DispatchOutcome::Confirmed { order_id, status } => {
                info!(order_id = %order_id, status = ?status, "Order accepted");
            }
            DispatchOutcome::Rejected { reason, .. } => {
                warn!(reason = %reason, "Order rejected by exchange");
            }
        }

        Ok(outcome)
    }

    /// Cancel a single order.
    ///
    /// # Errors
    ///
    /// Returns the trading-client error unchanged.
    pub async fn cancel_one(&self, order_id: &OrderId) -> Result<CancelReport> {
        let report = self.trader.cancel_order(order_id).await?;
        log_report(&report);
        Ok(report)
    }

    /// Cancel every resting order in one market.
    ///
    /// A market with no resting orders yields an empty report.
    ///
    /// # Errors
    ///
    /// Returns the trading-client error unchanged.
    pub async fn cancel_all_for_market(&self, market: &ConditionId) -> Result<CancelReport> {
        let report = self.trader.cancel_market_orders(market).await?;
        log_report(&report);
        Ok(report)
    }

    /// Cancel across several markets, merging the reports in market order.
    ///
    /// A market whose request fails is recorded in
    /// [`CancelReport::failed_markets`] and the remaining markets are still
    /// attempted.
    ///
    /// # Errors
    ///
    /// Returns the first trading-client error only when every market
    /// failed.
    pub async fn cancel_all_for_markets<'m, I>(&self, markets: I) -> Result<CancelReport>
    where
        I: IntoIterator<Item = &'m ConditionId>,
    {
        let mut merged = CancelReport::default();
        let mut first_error = None;
        let mut succeeded = 0usize;

        for market in markets {
            match self.trader.cancel_market_orders(market).await {
                Ok(report) => {
                    succeeded += 1;
                    merged.merge(report);
                }
                Err(e) => {
                    warn!(market = %market, error = %e, "Market cancel failed");
                    merged.failed_markets.push(MarketCancelFailure {
                        market: market.clone(),
                        reason: e.to_string(),
                    });
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        if let Some(e) = first_error {
            if succeeded == 0 {
                return Err(e);
            }
        }

        log_report(&merged);
        Ok(merged)
    }
}

fn log_report(report: &CancelReport) {
    if report.is_partial() {
        warn!(
            canceled = report.canceled.len(),
            not_canceled = report.not_canceled.len(),
            failed_markets = report.failed_markets.len(),
            "Cancellation partially succeeded"
        );
    } else {
        info!(canceled = report.canceled.len(), "Cancellation complete");
    }
}
