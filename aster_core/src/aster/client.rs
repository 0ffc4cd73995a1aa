use chrono::Utc;
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{
    dto::NewOrder,
    signing::{QueryParams, signed_query},
};
use crate::error::AsterError;

const API_KEY_HEADER: &str = "X-MBX-APIKEY";
const RECV_WINDOW_MS: u64 = 5000;

/// REST client for one Aster base URL (spot or futures).
#[derive(Clone)]
pub struct AsterClient {
    client: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl AsterClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Client without credentials; only `public_get` is meaningful on it.
    pub fn public(client: Client, base_url: impl Into<String>) -> Self {
        Self::new(client, base_url, "", "")
    }

    pub async fn authenticated_get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: QueryParams,
    ) -> Result<T, AsterError> {
        let query = signed_query(&self.api_secret, params, Utc::now().timestamp_millis())?;
        let url = format!("{}{}?{}", self.base_url, endpoint, query);

        debug!("Signed GET {}", endpoint);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        read_json(response).await
    }

    pub async fn authenticated_post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: QueryParams,
    ) -> Result<T, AsterError> {
        let body = signed_query(&self.api_secret, params, Utc::now().timestamp_millis())?;

        debug!("Signed POST {}", endpoint);

        let response = self
            .client
            .post(format!("{}{}", self.base_url, endpoint))
            .header(API_KEY_HEADER, &self.api_key)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        read_json(response).await
    }

    pub async fn public_get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: QueryParams,
    ) -> Result<T, AsterError> {
        let url = if params.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, params.to_query_string())
        };

        let response = self.client.get(url).send().await?;

        read_json(response).await
    }

    pub async fn account_info(&self) -> Result<Value, AsterError> {
        self.authenticated_get(
            "/api/v1/account",
            QueryParams::new().push("recvWindow", RECV_WINDOW_MS),
        )
        .await
    }

    pub async fn open_orders(&self, symbol: Option<&str>) -> Result<Value, AsterError> {
        self.authenticated_get("/api/v1/openOrders", QueryParams::new().push_opt("symbol", symbol))
            .await
    }

    pub async fn place_order(&self, order: &NewOrder) -> Result<Value, AsterError> {
        self.authenticated_post("/api/v1/order", QueryParams::from(order))
            .await
    }

    pub async fn exchange_info(&self) -> Result<Value, AsterError> {
        self.public_get("/api/v1/exchangeInfo", QueryParams::new())
            .await
    }

    pub async fn ticker_price(&self, symbol: Option<&str>) -> Result<Value, AsterError> {
        self.public_get("/api/v1/ticker/price", QueryParams::new().push_opt("symbol", symbol))
            .await
    }

    pub async fn ticker_24hr(&self, symbol: Option<&str>) -> Result<Value, AsterError> {
        self.public_get("/api/v1/ticker/24hr", QueryParams::new().push_opt("symbol", symbol))
            .await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AsterError> {
    let status = response.status();

    if !status.is_success() {
        let reason = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string());
        return Err(AsterError::RequestFailed(reason));
    }

    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aster::{dto::OrderSide, signing::sign};
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    fn client_for(server: &MockServer) -> AsterClient {
        AsterClient::new(Client::new(), server.uri(), "test-key", "test-secret")
    }

    fn split_signature(raw: &str) -> (&str, &str) {
        raw.split_once("&signature=").unwrap()
    }

    #[tokio::test]
    async fn test_authenticated_get_signs_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/account"))
            .and(header("X-MBX-APIKEY", "test-key"))
            .and(query_param("recvWindow", "5000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "canTrade": true })))
            .expect(1)
            .mount(&server)
            .await;

        let account = client_for(&server).account_info().await.unwrap();
        assert_eq!(account["canTrade"], true);

        let requests = server.received_requests().await.unwrap();
        let raw_query = requests[0].url.query().unwrap().to_string();
        let (query, signature) = split_signature(&raw_query);

        assert!(query.starts_with("recvWindow=5000&timestamp="));
        assert_eq!(signature, sign("test-secret", query).unwrap());
    }

    #[tokio::test]
    async fn test_authenticated_post_signs_form_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/order"))
            .and(header("X-MBX-APIKEY", "test-key"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "orderId": 7 })))
            .expect(1)
            .mount(&server)
            .await;

        let order = NewOrder {
            symbol: "ASTERUSDT".to_string(),
            side: OrderSide::Buy,
            order_type: "MARKET".to_string(),
            quantity: Some("1.5".to_string()),
            price: None,
            time_in_force: None,
        };

        let placed = client_for(&server).place_order(&order).await.unwrap();
        assert_eq!(placed["orderId"], 7);

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8(requests[0].body.clone()).unwrap();
        let (payload, signature) = split_signature(&body);

        assert!(payload.starts_with("symbol=ASTERUSDT&side=BUY&type=MARKET&quantity=1.5&timestamp="));
        assert_eq!(signature, sign("test-secret", payload).unwrap());
    }

    #[tokio::test]
    async fn test_public_get_without_params_has_no_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/exchangeInfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "symbols": [] })))
            .mount(&server)
            .await;

        client_for(&server).exchange_info().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].url.query().is_none());
        assert!(requests[0].headers.get("X-MBX-APIKEY").is_none());
    }

    #[tokio::test]
    async fn test_public_get_passes_symbol() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/ticker/price"))
            .and(query_param("symbol", "ASTERUSDT"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "symbol": "ASTERUSDT", "price": "1.23" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let ticker = client_for(&server)
            .ticker_price(Some("ASTERUSDT"))
            .await
            .unwrap();
        assert_eq!(ticker["price"], "1.23");
    }

    #[tokio::test]
    async fn test_non_success_status_fails_with_status_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/openOrders"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).open_orders(None).await.unwrap_err();

        assert!(matches!(err, AsterError::RequestFailed(_)));
        assert_eq!(err.to_string(), "request failed: Unauthorized");
    }
}
