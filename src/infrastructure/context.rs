//! Composition root for command handlers.
//!
//! [`ClientContext`] owns the concrete adapters for one invocation. Public
//! read adapters are built eagerly; the authenticated trading session is
//! built on demand by [`ClientContext::trading`], so read-only commands
//! never need a private key.

use tracing::info;

use crate::adapter::outbound::polymarket::{ClobPriceFeed, GammaCatalog, RestClient};
use crate::application::dispatch::OrderDispatcher;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::{
    catalog::MarketCatalog, pricing::PriceFeed, trading::TradingClient, wallet::BalanceSource,
};

/// Adapters shared by every command.
pub struct ClientContext {
    config: Config,
    catalog: Box<dyn MarketCatalog>,
    prices: Box<dyn PriceFeed>,
}

impl ClientContext {
    /// Build the public adapters over one shared HTTP client.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let rest = RestClient::from_config(&config.http);
        let catalog = GammaCatalog::new(rest.clone(), config.network.gamma_url.clone());
        let prices = ClobPriceFeed::new(rest, config.network.clob_url.clone());

        Self::with_services(config, Box::new(catalog), Box::new(prices))
    }

    /// Assemble a context from explicit adapters.
    #[must_use]
    pub fn with_services(
        config: Config,
        catalog: Box<dyn MarketCatalog>,
        prices: Box<dyn PriceFeed>,
    ) -> Self {
        Self {
            config,
            catalog,
            prices,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &dyn MarketCatalog {
        self.catalog.as_ref()
    }

    #[must_use]
    pub fn prices(&self) -> &dyn PriceFeed {
        self.prices.as_ref()
    }

    /// Authenticate against the exchange and open the balance reader.
    ///
    /// # Errors
    ///
    /// Returns a config error when `PRIVATE_KEY` is missing or invalid, or
    /// an execution error when authentication fails.
    #[cfg(feature = "polymarket")]
    pub async fn trading(&self) -> Result<TradingSession> {
        use crate::adapter::outbound::polymarket::{ChainWallet, PolymarketTrader};

        let credentials = self.config.trading_credentials()?;
        let trader = PolymarketTrader::connect(&credentials).await?;
        let wallet = ChainWallet::new(&credentials)?;
        info!(owner = %wallet.owner(), "Trading session ready");

        Ok(TradingSession::new(Box::new(trader), Box::new(wallet)))
    }

    /// Open the on-chain balance reader without authenticating to the CLOB.
    ///
    /// # Errors
    ///
    /// Returns a config error when `PRIVATE_KEY`, the funder address or the
    /// RPC URL is missing or invalid.
    #[cfg(feature = "polymarket")]
    pub fn wallet(&self) -> Result<Box<dyn BalanceSource>> {
        use crate::adapter::outbound::polymarket::ChainWallet;

        let credentials = self.config.trading_credentials()?;
        Ok(Box::new(ChainWallet::new(&credentials)?))
    }

    /// Balances are unavailable without the `polymarket` feature.
    ///
    /// # Errors
    ///
    /// Always returns a config error.
    #[cfg(not(feature = "polymarket"))]
    pub fn wallet(&self) -> Result<Box<dyn BalanceSource>> {
        Err(crate::error::ConfigError::Other(
            "balance reads require the `polymarket` feature".to_string(),
        )
        .into())
    }

    /// Trading is unavailable without the `polymarket` feature.
    ///
    /// # Errors
    ///
    /// Always returns a config error.
    #[cfg(not(feature = "polymarket"))]
    pub async fn trading(&self) -> Result<TradingSession> {
        info!("Trading requested without exchange support compiled in");
        Err(crate::error::ConfigError::Other(
            "trading requires the `polymarket` feature".to_string(),
        )
        .into())
    }
}

/// Authenticated trading handle plus its balance source.
pub struct TradingSession {
    trader: Box<dyn TradingClient>,
    wallet: Box<dyn BalanceSource>,
}

impl TradingSession {
    #[must_use]
    pub fn new(trader: Box<dyn TradingClient>, wallet: Box<dyn BalanceSource>) -> Self {
        Self { trader, wallet }
    }

    #[must_use]
    pub fn trader(&self) -> &dyn TradingClient {
        self.trader.as_ref()
    }

    #[must_use]
    pub fn wallet(&self) -> &dyn BalanceSource {
        self.wallet.as_ref()
    }

    /// Dispatcher borrowing this session's adapters.
    #[must_use]
    pub fn dispatcher(&self) -> OrderDispatcher<'_> {
        OrderDispatcher::new(self.trader(), self.wallet())
    }
}
