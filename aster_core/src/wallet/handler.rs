use log::debug;
use reqwest::Client;

use super::dto::WalletTokensPage;
use crate::error::WalletError;

const PAGE_LIMIT: u32 = 100;

/// Client for the Moralis wallet token endpoint.
#[derive(Clone)]
pub struct Moralis {
    client: Client,
    base_url: String,
    api_key: String,
    chain: String,
}

impl Moralis {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        chain: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            chain: chain.into(),
        }
    }

    pub async fn wallet_tokens(&self, address: &str) -> Result<WalletTokensPage, WalletError> {
        let limit = PAGE_LIMIT.to_string();

        let response = self
            .client
            .get(format!(
                "{}/wallets/{}/tokens",
                self.base_url,
                urlencoding::encode(address)
            ))
            .query(&[("chain", self.chain.as_str()), ("limit", limit.as_str())])
            .header("accept", "application/json")
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WalletError::RequestFailed(status.to_string()));
        }

        let page = response.json::<WalletTokensPage>().await?;

        debug!("Fetched {} tokens for {}", page.result.len(), address);

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    fn moralis_for(server: &MockServer) -> Moralis {
        Moralis::new(Client::new(), server.uri(), "moralis-key", "bsc")
    }

    #[tokio::test]
    async fn test_wallet_tokens_passes_result_and_cursor_through() {
        let server = MockServer::start().await;
        let token = json!({
            "token_address": "0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c",
            "symbol": "BNB",
            "balance": "1000000000000000000",
            "decimals": 18,
            "usd_value": 600.5,
            "native_token": true,
            "possible_spam": false
        });

        Mock::given(method("GET"))
            .and(path("/wallets/0xabc/tokens"))
            .and(query_param("chain", "bsc"))
            .and(query_param("limit", "100"))
            .and(header("X-API-Key", "moralis-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "result": [token.clone()], "cursor": "next-page" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let page = moralis_for(&server).wallet_tokens("0xabc").await.unwrap();

        assert_eq!(page.result, vec![token]);
        assert_eq!(page.cursor.as_deref(), Some("next-page"));
    }

    #[tokio::test]
    async fn test_missing_result_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wallets/0xabc/tokens"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cursor": null })))
            .mount(&server)
            .await;

        let page = moralis_for(&server).wallet_tokens("0xabc").await.unwrap();

        assert!(page.result.is_empty());
        assert!(page.cursor.is_none());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wallets/0xabc/tokens"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = moralis_for(&server).wallet_tokens("0xabc").await.unwrap_err();

        assert!(matches!(err, WalletError::RequestFailed(_)));
    }
}
