use std::sync::Arc;

use aster_core::{
    aster::client::AsterClient, config::Config, market::handler::Market,
    snapshot::storage::SnapshotStore, wallet::handler::Moralis,
};
use reqwest::Client;

#[derive(Clone)]
pub struct ServerState {
    config: Config,
    market: Market,
    moralis: Moralis,
    store: Arc<dyn SnapshotStore>,
}

impl From<(Config, Market, Moralis, Arc<dyn SnapshotStore>)> for ServerState {
    fn from(states: (Config, Market, Moralis, Arc<dyn SnapshotStore>)) -> Self {
        let (config, market, moralis, store) = states;
        Self {
            config,
            market,
            moralis,
            store,
        }
    }
}

impl ServerState {
    pub fn from_config(
        config: Config,
        store: Arc<dyn SnapshotStore>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("aster-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let spot = AsterClient::new(
            client.clone(),
            &config.aster_spot_url,
            &config.aster_api_key,
            &config.aster_api_secret,
        );
        let futures = AsterClient::public(client.clone(), &config.aster_futures_url);
        let moralis = Moralis::new(
            client,
            &config.moralis_url,
            &config.moralis_api_key,
            &config.moralis_chain,
        );

        Ok(Self::from((config, Market::new(spot, futures), moralis, store)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn moralis(&self) -> &Moralis {
        &self.moralis
    }

    pub fn store(&self) -> &dyn SnapshotStore {
        self.store.as_ref()
    }
}
