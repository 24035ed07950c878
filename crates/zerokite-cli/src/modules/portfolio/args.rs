use clap::Args;

#[derive(Args)]
pub struct PositionsArgs {
    #[arg(long, conflicts_with = "net", help = "Show intraday positions")]
    pub day: bool,
    #[arg(long, help = "Show net positions (default)")]
    pub net: bool,
}

impl PositionsArgs {
    pub fn scope(&self) -> &'static str {
        if self.day {
            "day"
        } else {
            "net"
        }
    }
}
