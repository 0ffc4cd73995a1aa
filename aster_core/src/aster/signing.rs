use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AsterError;

type HmacSha256 = Hmac<Sha256>;

/// Ordered request parameters. Serialization follows insertion order, which
/// is also the order the exchange verifies the signature against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    pub fn push_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `key=urlencoded(value)` pairs joined by `&`.
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Hex HMAC-SHA256 of `payload` under `secret`.
pub fn sign(secret: &str, payload: &str) -> Result<String, AsterError> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| AsterError::InvalidKey)?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Appends `timestamp`, then returns the query string with its signature
/// appended as the final `signature` pair.
pub fn signed_query(
    secret: &str,
    params: QueryParams,
    timestamp: i64,
) -> Result<String, AsterError> {
    let query = params.push("timestamp", timestamp).to_query_string();
    let signature = sign(secret, &query)?;
    Ok(format!("{}&signature={}", query, signature))
}
