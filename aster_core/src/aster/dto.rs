use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::signing::QueryParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub symbol: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: String,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub time_in_force: Option<String>,
}

impl From<&NewOrder> for QueryParams {
    fn from(order: &NewOrder) -> Self {
        QueryParams::new()
            .push("symbol", &order.symbol)
            .push("side", order.side)
            .push("type", &order.order_type)
            .push_opt("quantity", order.quantity.as_ref())
            .push_opt("price", order.price.as_ref())
            .push_opt("timeInForce", order.time_in_force.as_ref())
    }
}
