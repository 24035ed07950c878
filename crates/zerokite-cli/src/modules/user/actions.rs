use serde_json::Value;

use super::http::fetch_profile;
use crate::errors::CliError;
use crate::modules::shared::output::value_text;
use crate::modules::shared::print_success_json;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_profile(ctx: &CommandContext<'_>) -> Result<(), CliError> {
    let profile = fetch_profile(ctx).await?;
    if ctx.json {
        print_success_json("profile", profile);
        return Ok(());
    }
    println!("User ID: {}", value_text(&profile["user_id"]));
    println!("Name: {}", value_text(&profile["user_name"]));
    println!("Email: {}", value_text(&profile["email"]));
    println!("Broker: {}", value_text(&profile["broker"]));
    println!("Products: {}", products(&profile["products"]));
    Ok(())
}

fn products(value: &Value) -> String {
    value
        .as_array()
        .map(|products| {
            products
                .iter()
                .map(value_text)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}
