use std::collections::HashMap;

use log::debug;

use super::dto::{
    FuturesExchangeInfo, PairPrice, PerpPair, PerpPairList, PriceTicker, SpotExchangeInfo,
    TRADING, Ticker24h, TokenEntry, TokenList,
};
use crate::{
    aster::{client::AsterClient, signing::QueryParams},
    error::AsterError,
};

const DEFAULT_NUMBER: &str = "0";

/// Public market-data pipelines over the spot and futures APIs.
#[derive(Clone)]
pub struct Market {
    spot: AsterClient,
    futures: AsterClient,
}

impl Market {
    pub fn new(spot: AsterClient, futures: AsterClient) -> Self {
        Self { spot, futures }
    }

    pub async fn spot_tokens(&self) -> Result<TokenList, AsterError> {
        let (info, prices) = tokio::try_join!(
            self.spot
                .public_get::<SpotExchangeInfo>("/api/v1/exchangeInfo", QueryParams::new()),
            self.spot
                .public_get::<Vec<PriceTicker>>("/api/v1/ticker/price", QueryParams::new()),
        )?;

        debug!(
            "Fetched {} spot symbols and {} prices",
            info.symbols.len(),
            prices.len()
        );

        Ok(build_token_list(info, prices))
    }

    pub async fn perp_pairs(&self) -> Result<PerpPairList, AsterError> {
        let (info, tickers) = tokio::try_join!(
            self.futures
                .public_get::<FuturesExchangeInfo>("/fapi/v1/exchangeInfo", QueryParams::new()),
            self.futures
                .public_get::<Vec<Ticker24h>>("/fapi/v1/ticker/24hr", QueryParams::new()),
        )?;

        debug!(
            "Fetched {} futures symbols and {} tickers",
            info.symbols.len(),
            tickers.len()
        );

        Ok(enrich_perp_pairs(info, tickers))
    }
}

/// One entry per asset seen on a trading symbol, in first-seen order, each
/// listing every trading pair it appears in.
pub fn build_token_list(info: SpotExchangeInfo, prices: Vec<PriceTicker>) -> TokenList {
    let price_map: HashMap<String, String> = prices
        .into_iter()
        .map(|ticker| (ticker.symbol, ticker.price))
        .collect();

    let mut tokens: Vec<TokenEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for symbol in info.symbols.iter().filter(|s| s.status == TRADING) {
        let pair = PairPrice {
            symbol: symbol.symbol.clone(),
            base_asset: symbol.base_asset.clone(),
            quote_asset: symbol.quote_asset.clone(),
            price: price_map
                .get(&symbol.symbol)
                .cloned()
                .unwrap_or_else(|| DEFAULT_NUMBER.to_string()),
        };

        let mut assets = vec![symbol.base_asset.as_str()];
        if symbol.quote_asset != symbol.base_asset {
            assets.push(symbol.quote_asset.as_str());
        }

        for asset in assets {
            let index = *positions.entry(asset.to_string()).or_insert_with(|| {
                tokens.push(TokenEntry {
                    symbol: asset.to_string(),
                    pairs: Vec::new(),
                });
                tokens.len() - 1
            });
            tokens[index].pairs.push(pair.clone());
        }
    }

    TokenList {
        tokens,
        symbols: info.symbols,
        server_time: info.server_time,
    }
}

/// Left-joins 24h tickers onto live perpetual contracts by symbol.
pub fn enrich_perp_pairs(info: FuturesExchangeInfo, tickers: Vec<Ticker24h>) -> PerpPairList {
    let ticker_map: HashMap<String, Ticker24h> = tickers
        .into_iter()
        .map(|ticker| (ticker.symbol.clone(), ticker))
        .collect();
    let missing = Ticker24h::default();

    let perp_pairs: Vec<PerpPair> = info
        .symbols
        .into_iter()
        .filter(|symbol| symbol.is_live_perpetual())
        .map(|symbol| {
            let ticker = ticker_map.get(&symbol.symbol).unwrap_or(&missing);
            let or_zero = |value: &Option<String>| {
                value.clone().unwrap_or_else(|| DEFAULT_NUMBER.to_string())
            };

            PerpPair {
                current_price: or_zero(&ticker.last_price),
                price_change: or_zero(&ticker.price_change),
                price_change_percent: or_zero(&ticker.price_change_percent),
                high_price: or_zero(&ticker.high_price),
                low_price: or_zero(&ticker.low_price),
                volume: or_zero(&ticker.volume),
                quote_volume: or_zero(&ticker.quote_volume),
                open_price: or_zero(&ticker.open_price),
                symbol: symbol.symbol,
                pair: symbol.pair,
                base_asset: symbol.base_asset,
                quote_asset: symbol.quote_asset,
                margin_asset: symbol.margin_asset,
                status: symbol.status,
                contract_type: symbol.contract_type,
            }
        })
        .collect();

    PerpPairList {
        total: perp_pairs.len(),
        perp_pairs,
        server_time: info.server_time,
    }
}
