use clap::{Args, Subcommand};

#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    #[command(about = "List orders for the day")]
    List,
    #[command(about = "Place an order")]
    Place(PlaceOrderArgs),
    #[command(about = "Modify an open order")]
    Modify(ModifyOrderArgs),
    #[command(about = "Cancel an open order")]
    Cancel(CancelOrderArgs),
}

#[derive(Args)]
pub struct PlaceOrderArgs {
    #[arg(long, default_value = "regular")]
    pub variety: String,
    #[command(flatten)]
    pub fields: OrderFields,
}

#[derive(Args)]
pub struct ModifyOrderArgs {
    #[command(flatten)]
    pub target: OrderTarget,
    #[command(flatten)]
    pub fields: OrderFields,
}

#[derive(Args)]
pub struct CancelOrderArgs {
    #[command(flatten)]
    pub target: OrderTarget,
    #[arg(long, alias = "parent_order_id")]
    pub parent_order_id: Option<String>,
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,
}

#[derive(Args)]
pub struct OrderTarget {
    #[arg(long, default_value = "regular")]
    pub variety: String,
    #[arg(long = "order-id", alias = "order_id", value_name = "ID")]
    pub order_id_flag: Option<String>,
    #[arg(value_name = "ORDER_ID")]
    pub order_id: Option<String>,
}

impl OrderTarget {
    pub fn order_id(&self) -> Option<&str> {
        self.order_id_flag
            .as_deref()
            .or(self.order_id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Order fields forwarded to the API as form parameters.
#[derive(Args, Default)]
pub struct OrderFields {
    #[arg(long)]
    pub exchange: Option<String>,
    #[arg(long)]
    pub tradingsymbol: Option<String>,
    #[arg(long, alias = "transaction_type")]
    pub transaction_type: Option<String>,
    #[arg(long)]
    pub quantity: Option<u32>,
    #[arg(long, alias = "order_type")]
    pub order_type: Option<String>,
    #[arg(long)]
    pub product: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long, alias = "trigger_price")]
    pub trigger_price: Option<String>,
    #[arg(long, alias = "disclosed_quantity")]
    pub disclosed_quantity: Option<u32>,
    #[arg(long)]
    pub validity: Option<String>,
    #[arg(long)]
    pub tag: Option<String>,
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,
}

impl OrderFields {
    /// Named fields first, then `--param` pairs, skipping blank values.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let named = [
            ("exchange", self.exchange.clone()),
            ("tradingsymbol", self.tradingsymbol.clone()),
            ("transaction_type", self.transaction_type.clone()),
            ("quantity", self.quantity.map(|value| value.to_string())),
            ("order_type", self.order_type.clone()),
            ("product", self.product.clone()),
            ("price", self.price.clone()),
            ("trigger_price", self.trigger_price.clone()),
            (
                "disclosed_quantity",
                self.disclosed_quantity.map(|value| value.to_string()),
            ),
            ("validity", self.validity.clone()),
            ("tag", self.tag.clone()),
        ];
        named
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key.to_string(), value)))
            .chain(self.params.iter().cloned())
            .filter(|(_, value)| !value.trim().is_empty())
            .collect()
    }
}

pub(crate) fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
