use reqwest::Method;
use serde_json::Value;
use zerokite_core::ApiBody;

use crate::errors::CliError;
use crate::modules::system::{ApiRequest, CommandContext};

pub(crate) async fn list_orders(ctx: &CommandContext<'_>) -> Result<Value, CliError> {
    let request = ApiRequest::authorized(Method::GET, "/orders", &ctx.auth);
    ctx.api.call(request).await.map(ApiBody::into_json)
}

pub(crate) async fn place_order(
    ctx: &CommandContext<'_>,
    variety: &str,
    params: Vec<(String, String)>,
) -> Result<Value, CliError> {
    let route = format!("/orders/{}", urlencoding::encode(variety));
    let request = ApiRequest::authorized(Method::POST, route, &ctx.auth).params(params);
    ctx.api.call(request).await.map(ApiBody::into_json)
}

pub(crate) async fn modify_order(
    ctx: &CommandContext<'_>,
    variety: &str,
    order_id: &str,
    params: Vec<(String, String)>,
) -> Result<Value, CliError> {
    let request =
        ApiRequest::authorized(Method::PUT, order_route(variety, order_id), &ctx.auth).params(params);
    ctx.api.call(request).await.map(ApiBody::into_json)
}

pub(crate) async fn cancel_order(
    ctx: &CommandContext<'_>,
    variety: &str,
    order_id: &str,
    parent_order_id: Option<String>,
    params: Vec<(String, String)>,
) -> Result<Value, CliError> {
    let request = ApiRequest::authorized(Method::DELETE, order_route(variety, order_id), &ctx.auth)
        .opt_param("parent_order_id", parent_order_id)
        .params(params);
    ctx.api.call(request).await.map(ApiBody::into_json)
}

fn order_route(variety: &str, order_id: &str) -> String {
    format!(
        "/orders/{}/{}",
        urlencoding::encode(variety),
        urlencoding::encode(order_id)
    )
}
