use clap::Args;
use zerokite_core::DEFAULT_AUTH_PORT;

#[derive(Args)]
pub struct AuthArgs {
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_AUTH_PORT,
        value_parser = clap::value_parser!(u16).range(1..),
        help = "Port for the local callback server; must match KITE_REDIRECT_URL"
    )]
    pub port: u16,
}
