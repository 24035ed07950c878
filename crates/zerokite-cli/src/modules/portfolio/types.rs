use serde::Serialize;
use serde_json::{json, Value};

use crate::modules::shared::number_or_zero;

/// Column sums shown under the holdings table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct HoldingTotals {
    pub quantity: f64,
    pub pnl: f64,
    pub cost_value: f64,
    pub market_value: f64,
}

impl HoldingTotals {
    pub(crate) fn from_rows(rows: &[Value]) -> Self {
        rows.iter().fold(Self::default(), |sum, row| Self {
            quantity: sum.quantity + number_or_zero(&row["quantity"]),
            pnl: sum.pnl + number_or_zero(&row["pnl"]),
            cost_value: sum.cost_value + number_or_zero(&row["cost_value"]),
            market_value: sum.market_value + number_or_zero(&row["market_value"]),
        })
    }

    pub(crate) fn footer_row(&self) -> Value {
        json!({
            "tradingsymbol": "TOTAL",
            "quantity": self.quantity,
            "average_price": "",
            "last_price": "",
            "pnl": self.pnl,
            "cost_value": self.cost_value,
            "market_value": self.market_value,
        })
    }
}

/// Adds `cost_value` and `market_value` to one holding.
pub(crate) fn with_values(mut holding: Value) -> Value {
    let quantity = number_or_zero(&holding["quantity"]);
    let cost_value = quantity * number_or_zero(&holding["average_price"]);
    let market_value = quantity * number_or_zero(&holding["last_price"]);
    if let Value::Object(fields) = &mut holding {
        fields.insert("cost_value".to_string(), json!(cost_value));
        fields.insert("market_value".to_string(), json!(market_value));
    }
    holding
}

/// Cash, live balance and collateral from the equity segment of margins.
pub(crate) fn equity_funds(margins: &Value) -> Value {
    let available = &margins["equity"]["available"];
    let fund = |name: &str| match &available[name] {
        Value::Null => json!(0),
        value => value.clone(),
    };
    json!({
        "cash": fund("cash"),
        "live_balance": fund("live_balance"),
        "collateral": fund("collateral"),
    })
}
