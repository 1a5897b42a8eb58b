//! Order execution for the Polymarket CLOB.
//!
//! [`PolymarketTrader`] wraps an authenticated SDK client and implements
//! [`TradingClient`]. Authentication (API credential derivation from the
//! private key) happens once in [`PolymarketTrader::connect`].

use std::str::FromStr;
use std::sync::Arc;

use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use polymarket_client_sdk::auth::state::Authenticated;
use polymarket_client_sdk::auth::{Normal, Signer};
use polymarket_client_sdk::clob::types::request::{CancelMarketOrderRequest, OrdersRequest};
use polymarket_client_sdk::clob::types::response::{CancelOrdersResponse, OpenOrderResponse};
use polymarket_client_sdk::clob::types::{
    Amount, OrderType as SdkOrderType, Side as SdkSide, SignatureType,
};
use polymarket_client_sdk::clob::{Client, Config as ClobConfig};
use polymarket_client_sdk::types::{B256, U256};
use tracing::{debug, info, warn};

use super::settings::{SignatureKind, TradingCredentials};
use crate::domain::{
    id::{ConditionId, OrderId, TokenId},
    order::{
        CancelReport, NotCanceled, OpenOrder, OrderFilter, OrderPayload, Side, SubmitResponse,
    },
};
use crate::error::{ConfigError, Error, ExecutionError, Result};
use crate::port::outbound::trading::TradingClient;

/// Type alias for the authenticated CLOB client.
type AuthenticatedClient = Client<Authenticated<Normal>>;

/// Cursor the CLOB returns with the last page (`base64("-1")`).
const END_CURSOR: &str = "LTE=";

/// Authenticated trading session on the Polymarket CLOB.
pub struct PolymarketTrader {
    client: Arc<AuthenticatedClient>,
    signer: Arc<PrivateKeySigner>,
}

/// Parse the private key into a chain-bound signer.
///
/// # Errors
///
/// Returns [`ConfigError`] when the key is missing or malformed.
pub fn signer_from_credentials(credentials: &TradingCredentials) -> Result<PrivateKeySigner> {
    if credentials.private_key.trim().is_empty() {
        return Err(ConfigError::MissingField {
            field: "PRIVATE_KEY",
        }
        .into());
    }

    Ok(PrivateKeySigner::from_str(credentials.private_key.trim())
        .map_err(|e| ConfigError::InvalidValue {
            field: "PRIVATE_KEY",
            reason: e.to_string(),
        })?
        .with_chain_id(Some(credentials.chain_id)))
}

impl PolymarketTrader {
    /// Build a signer and authenticate against the CLOB.
    ///
    /// # Errors
    ///
    /// Returns an error if the private key is missing or invalid, or if
    /// CLOB authentication fails.
    pub async fn connect(credentials: &TradingCredentials) -> Result<Self> {
        let signer = signer_from_credentials(credentials)?;

        info!(
            chain_id = credentials.chain_id,
            address = %signer.address(),
            signature_type = %credentials.signature_kind,
            "Creating CLOB client"
        );

        let signature_type = match credentials.signature_kind {
            SignatureKind::Eoa => SignatureType::Eoa,
            SignatureKind::Proxy => SignatureType::Proxy,
            SignatureKind::GnosisSafe => SignatureType::GnosisSafe,
        };

        let client = Client::new(&credentials.clob_url, ClobConfig::default())
            .map_err(|e| ExecutionError::AuthFailed(format!("Failed to create CLOB client: {e}")))?
            .authentication_builder(&signer)
            .signature_type(signature_type)
            .authenticate()
            .await
            .map_err(|e| ExecutionError::AuthFailed(e.to_string()))?;

        info!("CLOB client authenticated successfully");

        Ok(Self {
            client: Arc::new(client),
            signer: Arc::new(signer),
        })
    }

    fn token_u256(token_id: &TokenId) -> Result<U256> {
        U256::from_str(token_id.as_str()).map_err(|e| {
            ExecutionError::InvalidTokenId {
                token_id: token_id.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    const fn sdk_side(side: Side) -> SdkSide {
        match side {
            Side::Buy => SdkSide::Buy,
            Side::Sell => SdkSide::Sell,
        }
    }
}

fn condition_b256(market: &ConditionId) -> Result<B256> {
    B256::from_str(market.as_str().trim()).map_err(|e| {
        ExecutionError::InvalidConditionId {
            market: market.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Server-side filter for the order listing.
fn orders_request(filter: &OrderFilter) -> Result<OrdersRequest> {
    let market = filter.market.as_ref().map(condition_b256).transpose()?;
    let asset_id = filter
        .asset_id
        .as_ref()
        .map(PolymarketTrader::token_u256)
        .transpose()?;
    Ok(OrdersRequest::builder()
        .maybe_market(market)
        .maybe_asset_id(asset_id)
        .build())
}

/// Cursor for the following page, or `None` after the last one.
fn next_cursor(cursor: String) -> Option<String> {
    (!cursor.is_empty() && cursor != END_CURSOR).then_some(cursor)
}

fn open_order_from(o: OpenOrderResponse) -> OpenOrder {
    OpenOrder {
        id: OrderId::new(o.id),
        side: o.side.to_string(),
        order_type: Some(o.order_type.to_string()),
        price: o.price,
        original_size: o.original_size,
        size_matched: o.size_matched,
        asset_id: TokenId::new(o.asset_id.to_string()),
        market: o.market.to_string(),
        status: o.status.to_string(),
        created_at: Some(o.created_at.timestamp()),
    }
}

fn cancel_report(response: CancelOrdersResponse) -> CancelReport {
    let mut not_canceled: Vec<NotCanceled> = response
        .not_canceled
        .into_iter()
        .map(|(order_id, reason)| NotCanceled {
            order_id: OrderId::new(order_id),
            reason,
        })
        .collect();
    not_canceled.sort_by(|a, b| a.order_id.as_str().cmp(b.order_id.as_str()));

    for failed in &not_canceled {
        warn!(order_id = %failed.order_id, reason = %failed.reason, "Order not cancelled");
    }

    CancelReport {
        canceled: response.canceled.into_iter().map(OrderId::new).collect(),
        not_canceled,
        ..CancelReport::default()
    }
}

#[async_trait]
impl TradingClient for PolymarketTrader {
    async fn submit(&self, order: &OrderPayload) -> std::result::Result<SubmitResponse, Error> {
        let token = Self::token_u256(order.token_id())?;
        let side = Self::sdk_side(order.side());

        let built = match order {
            OrderPayload::Market {
                side: Side::Buy,
                amount,
                price,
                ..
            } => {
                let amount = Amount::usdc(amount.value())
                    .map_err(|e| ExecutionError::OrderBuildFailed(e.to_string()))?;
                self.client
                    .market_order()
                    .token_id(token)
                    .amount(amount)
                    .price(*price)
                    .side(side)
                    .order_type(SdkOrderType::FOK)
                    .build()
                    .await
            }
            OrderPayload::Market {
                side: Side::Sell,
                amount,
                price,
                ..
            } => {
                // Sell-side market orders are sized in shares.
                let shares = amount
                    .shares_at(*price)
                    .ok_or_else(|| ExecutionError::OrderBuildFailed("price is zero".into()))?;
                let amount = Amount::shares(shares.value())
                    .map_err(|e| ExecutionError::OrderBuildFailed(e.to_string()))?;
                self.client
                    .market_order()
                    .token_id(token)
                    .amount(amount)
                    .price(*price)
                    .side(side)
                    .order_type(SdkOrderType::FOK)
                    .build()
                    .await
            }
            OrderPayload::Limit {
                price,
                shares,
                tick_size,
                neg_risk,
                ..
            } => {
                debug!(%tick_size, neg_risk, "Building limit order");
                self.client
                    .limit_order()
                    .token_id(token)
                    .side(side)
                    .price(*price)
                    .size(shares.value())
                    .order_type(SdkOrderType::GTC)
                    .build()
                    .await
            }
        }
        .map_err(|e| ExecutionError::OrderBuildFailed(e.to_string()))?;

        let signed = self
            .client
            .sign(self.signer.as_ref(), built)
            .await
            .map_err(|e| ExecutionError::SigningFailed(e.to_string()))?;

        // A refused post is the exchange's verdict, surfaced verbatim.
        match self.client.post_order(signed).await {
            Ok(response) => {
                let order_id = response.order_id.to_string();
                info!(
                    order_id = %order_id,
                    token_id = %order.token_id(),
                    status = ?response.status,
                    "Order submitted"
                );
                Ok(SubmitResponse {
                    order_id: (!order_id.is_empty()).then(|| OrderId::new(order_id)),
                    status: Some(format!("{:?}", response.status)),
                    error_msg: None,
                })
            }
            Err(e) => {
                warn!(error = %e, token_id = %order.token_id(), "Order post refused");
                Ok(SubmitResponse {
                    order_id: None,
                    status: None,
                    error_msg: Some(e.to_string()),
                })
            }
        }
    }

    async fn open_orders(&self, filter: &OrderFilter) -> std::result::Result<Vec<OpenOrder>, Error> {
        let request = orders_request(filter)?;
        let mut orders = Vec::new();
        let mut cursor = None;

        loop {
            let page = self
                .client
                .orders(&request, cursor.take())
                .await
                .map_err(|e| ExecutionError::OrderListFailed(e.to_string()))?;

            orders.extend(
                page.data
                    .into_iter()
                    .map(open_order_from)
                    .filter(|o| filter.matches(o)),
            );

            match next_cursor(page.next_cursor) {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        debug!(count = orders.len(), "Open orders listed");
        Ok(orders)
    }

    async fn cancel_order(&self, order_id: &OrderId) -> std::result::Result<CancelReport, Error> {
        let response = self
            .client
            .cancel_order(order_id.as_str())
            .await
            .map_err(|e| ExecutionError::CancelFailed {
                order_id: order_id.to_string(),
                reason: e.to_string(),
            })?;

        let report = cancel_report(response);
        info!(order_id = %order_id, canceled = report.canceled.len(), "Cancel request done");
        Ok(report)
    }

    async fn cancel_market_orders(
        &self,
        market: &ConditionId,
    ) -> std::result::Result<CancelReport, Error> {
        let request = CancelMarketOrderRequest::builder()
            .market(condition_b256(market)?)
            .build();

        let response = self
            .client
            .cancel_market_orders(&request)
            .await
            .map_err(|e| ExecutionError::CancelMarketFailed {
                market: market.to_string(),
                reason: e.to_string(),
            })?;

        let report = cancel_report(response);
        info!(
            market = %market,
            canceled = report.canceled.len(),
            not_canceled = report.not_canceled.len(),
            "Market orders cancelled"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const CONDITION: &str = "0x000000000000000000000000000000000000000000000000000000000000006d";

    #[test]
    fn listing_filter_is_sent_to_the_server() {
        let request = orders_request(&OrderFilter::market(ConditionId::from(CONDITION))).unwrap();
        assert_eq!(request.market.map(|m| m.to_string()).as_deref(), Some(CONDITION));
        assert!(request.asset_id.is_none());

        let request = orders_request(&OrderFilter::asset(TokenId::from("1234"))).unwrap();
        assert_eq!(request.asset_id, Some(U256::from(1234u64)));
        assert!(request.market.is_none());
    }

    #[test]
    fn malformed_condition_id_is_rejected() {
        let err = orders_request(&OrderFilter::market(ConditionId::from("bitcoin"))).unwrap_err();
        assert!(matches!(
            err,
            Error::Execution(ExecutionError::InvalidConditionId { .. })
        ));
    }

    #[test]
    fn pagination_stops_at_the_end_cursor() {
        assert_eq!(next_cursor("MTAw".to_string()), Some("MTAw".to_string()));
        assert_eq!(next_cursor(END_CURSOR.to_string()), None);
        assert_eq!(next_cursor(String::new()), None);
    }

    #[test]
    fn listed_order_keeps_type_and_creation_time() {
        let response: OpenOrderResponse = serde_json::from_value(serde_json::json!({
            "id": "0xorder",
            "status": "LIVE",
            "owner": "ffffffff-ffff-ffff-ffff-ffffffffffff",
            "maker_address": "0x2222222222222222222222222222222222222222",
            "market": CONDITION,
            "asset_id": "1234",
            "side": "sell",
            "original_size": "10.0",
            "size_matched": "2.5",
            "price": "0.45",
            "associate_trades": [],
            "outcome": "YES",
            "created_at": 1_705_322_096,
            "expiration": "0",
            "order_type": "FOK"
        }))
        .unwrap();

        let order = open_order_from(response);
        assert_eq!(order.order_type.as_deref(), Some("FOK"));
        assert_eq!(order.created_at, Some(1_705_322_096));
        assert_eq!(order.side, "SELL");
        assert_eq!(order.status, "LIVE");
        assert_eq!(order.price, rust_decimal_macros::dec!(0.45));
        assert_eq!(order.size_matched, rust_decimal_macros::dec!(2.5));
        assert_eq!(order.asset_id, TokenId::from("1234"));
        assert_eq!(order.market, CONDITION);
    }

    #[test]
    fn cancel_response_keeps_both_outcomes() {
        let response = CancelOrdersResponse::builder()
            .canceled(vec!["0xa".to_string()])
            .not_canceled(HashMap::from([
                ("0xc".to_string(), "already matched".to_string()),
                ("0xb".to_string(), "not found".to_string()),
            ]))
            .build();

        let report = cancel_report(response);
        assert_eq!(report.canceled, vec![OrderId::from("0xa")]);
        let refused: Vec<&str> = report.not_canceled.iter().map(|n| n.order_id.as_str()).collect();
        assert_eq!(refused, vec!["0xb", "0xc"]);
        assert!(report.is_partial());
    }
}
