use serde_json::Value;

use super::http::{cancel_order, list_orders, modify_order, place_order};
use crate::cli_args::*;
use crate::errors::CliError;
use crate::modules::shared::output::value_text;
use crate::modules::shared::{print_success_json, render_table, Column};
use crate::modules::system::CommandContext;

const REQUIRED_PLACE_FIELDS: [&str; 6] = [
    "exchange",
    "tradingsymbol",
    "transaction_type",
    "quantity",
    "order_type",
    "product",
];

pub(crate) async fn handle_orders(
    args: OrdersArgs,
    ctx: &CommandContext<'_>,
) -> Result<(), CliError> {
    match args.command {
        OrdersCommand::List => {
            let orders = match list_orders(ctx).await? {
                Value::Array(orders) => orders,
                _ => Vec::new(),
            };
            if ctx.json {
                print_success_json("orders", Value::Array(orders));
                return Ok(());
            }
            let columns = [
                Column::new("Order ID", "order_id"),
                Column::new("Status", "status"),
                Column::new("Symbol", "tradingsymbol"),
                Column::new("Txn", "transaction_type"),
                Column::new("Qty", "quantity").right(),
                Column::new("Price", "price").right(),
            ];
            println!("{}", render_table(&orders, &columns, &[]));
        }
        OrdersCommand::Place(args) => {
            let params = args.fields.to_params();
            check_place_fields(&params)?;
            let data = place_order(ctx, &args.variety, params).await?;
            report(ctx, data, "Order placed.");
        }
        OrdersCommand::Modify(args) => {
            let order_id = required_order_id(&args.target)?;
            let params = args.fields.to_params();
            if params.is_empty() {
                return Err(CliError::Usage(
                    "Provide at least one field to modify.".to_string(),
                ));
            }
            let data = modify_order(ctx, &args.target.variety, order_id, params).await?;
            report(ctx, data, "Order modified.");
        }
        OrdersCommand::Cancel(args) => {
            let order_id = required_order_id(&args.target)?;
            let data = cancel_order(
                ctx,
                &args.target.variety,
                order_id,
                args.parent_order_id,
                args.params,
            )
            .await?;
            report(ctx, data, "Order cancelled.");
        }
    }
    Ok(())
}

fn report(ctx: &CommandContext<'_>, data: Value, message: &str) {
    if ctx.json {
        print_success_json("orders", data);
    } else {
        println!("{message} Order ID: {}", value_text(&data["order_id"]));
    }
}

fn required_order_id(target: &OrderTarget) -> Result<&str, CliError> {
    target
        .order_id()
        .ok_or_else(|| CliError::Usage("Missing order ID. Use --order-id <id>.".to_string()))
}

fn check_place_fields(params: &[(String, String)]) -> Result<(), CliError> {
    for field in REQUIRED_PLACE_FIELDS {
        if !params.iter().any(|(key, _)| key == field) {
            return Err(CliError::Usage(format!(
                "Missing --{} for `orders place`.",
                field.replace('_', "-")
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter()
            .map(|key| (key.to_string(), "x".to_string()))
            .collect()
    }

    #[test]
    fn place_requires_core_fields_in_order() {
        let err = check_place_fields(&pairs(&["exchange"])).expect_err("missing fields");
        assert_eq!(err.kind(), "UsageError");
        assert_eq!(
            err.to_string(),
            "Missing --tradingsymbol for `orders place`."
        );
        assert!(check_place_fields(&pairs(&REQUIRED_PLACE_FIELDS)).is_ok());
    }

    #[test]
    fn fields_passed_as_params_count() {
        let mut params = pairs(&REQUIRED_PLACE_FIELDS[..5]);
        params.push(("product".to_string(), "CNC".to_string()));
        assert!(check_place_fields(&params).is_ok());
    }
}
