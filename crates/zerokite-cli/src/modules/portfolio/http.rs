use reqwest::Method;
use serde_json::Value;
use zerokite_core::ApiBody;

use crate::errors::CliError;
use crate::modules::system::{ApiRequest, CommandContext};

pub(crate) async fn fetch_holdings(ctx: &CommandContext<'_>) -> Result<Value, CliError> {
    let request = ApiRequest::authorized(Method::GET, "/portfolio/holdings", &ctx.auth);
    ctx.api.call(request).await.map(ApiBody::into_json)
}

pub(crate) async fn fetch_positions(ctx: &CommandContext<'_>) -> Result<Value, CliError> {
    let request = ApiRequest::authorized(Method::GET, "/portfolio/positions", &ctx.auth);
    ctx.api.call(request).await.map(ApiBody::into_json)
}
