use clap::{Parser, Subcommand};

pub use crate::modules::auth::args::*;
pub use crate::modules::orders::args::*;
pub use crate::modules::portfolio::args::*;
pub use crate::modules::system::args::*;

#[derive(Parser)]
#[command(name = "zerokite", version)]
#[command(about = "Unofficial CLI for the Zerodha Kite API")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(visible_alias = "login", about = "Start callback server and login flow")]
    Auth(AuthArgs),
    #[command(about = "Remove the stored session")]
    Logout,
    #[command(about = "Verify stored access token")]
    Verify,
    #[command(about = "Fetch user profile")]
    Profile,
    #[command(about = "Fetch holdings and available funds")]
    Holdings,
    #[command(about = "Fetch positions (default: net)")]
    Positions(PositionsArgs),
    #[command(visible_alias = "order", about = "List, place, modify or cancel orders")]
    Orders(OrdersArgs),
    #[command(about = "Print shell completion script")]
    Completion(CompletionArgs),
}

impl Command {
    /// Name reported in JSON envelopes.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Logout => "logout",
            Self::Verify => "verify",
            Self::Profile => "profile",
            Self::Holdings => "holdings",
            Self::Positions(_) => "positions",
            Self::Orders(_) => "orders",
            Self::Completion(_) => "completion",
        }
    }
}
