use serde_json::{json, Value};

use super::http::{fetch_holdings, fetch_positions};
use super::types::{equity_funds, with_values, HoldingTotals};
use crate::cli_args::*;
use crate::errors::CliError;
use crate::modules::shared::output::value_text;
use crate::modules::shared::{format_fixed, format_price, print_success_json, render_table, Column};
use crate::modules::system::CommandContext;
use crate::modules::user::fetch_margins;

fn into_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        _ => Vec::new(),
    }
}

pub(crate) async fn handle_holdings(ctx: &CommandContext<'_>) -> Result<(), CliError> {
    let (holdings, margins) = tokio::try_join!(fetch_holdings(ctx), fetch_margins(ctx))?;
    let holdings: Vec<Value> = into_rows(holdings).into_iter().map(with_values).collect();
    let totals = HoldingTotals::from_rows(&holdings);
    let funds = equity_funds(&margins);

    if ctx.json {
        print_success_json(
            "holdings",
            json!({
                "holdings": holdings,
                "funds": margins,
                "totals": totals,
            }),
        );
        return Ok(());
    }

    println!("Holdings: {}", holdings.len());
    let columns = [
        Column::new("Symbol", "tradingsymbol"),
        Column::new("Qty", "quantity").right(),
        Column::new("Avg", "average_price").right().format(format_price),
        Column::new("LTP", "last_price").right().format(format_price),
        Column::new("PnL", "pnl").right().format(format_fixed),
        Column::new("Cost Value", "cost_value").right().format(format_fixed),
        Column::new("Market Value", "market_value").right().format(format_fixed),
    ];
    println!(
        "{}",
        render_table(&holdings, &columns, &[totals.footer_row()])
    );
    println!();
    println!("Available Funds (Equity):");
    println!("Cash: {}", value_text(&funds["cash"]));
    println!("Live Balance: {}", value_text(&funds["live_balance"]));
    println!("Collateral: {}", value_text(&funds["collateral"]));
    Ok(())
}

pub(crate) async fn handle_positions(
    args: PositionsArgs,
    ctx: &CommandContext<'_>,
) -> Result<(), CliError> {
    let scope = args.scope();
    let mut data = fetch_positions(ctx).await?;
    let positions = into_rows(data.get_mut(scope).map(Value::take).unwrap_or_default());

    if ctx.json {
        print_success_json(
            "positions",
            json!({ "scope": scope, "positions": positions }),
        );
        return Ok(());
    }

    println!("Positions scope: {scope}");
    let columns = [
        Column::new("Symbol", "tradingsymbol"),
        Column::new("Product", "product"),
        Column::new("Qty", "quantity").right(),
        Column::new("Avg", "average_price").right(),
        Column::new("LTP", "last_price").right(),
        Column::new("PnL", "pnl").right(),
    ];
    println!("{}", render_table(&positions, &columns, &[]));
    Ok(())
}
