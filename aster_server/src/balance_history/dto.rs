use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BalanceHistoryQuery {
    /// Look-back window in hours, 24 when absent or not a number.
    pub hours: Option<String>,
}
