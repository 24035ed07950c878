use clap::{ArgAction, Args};
use clap_complete::Shell;
use zerokite_core::{API_BASE, LOGIN_BASE};

/// Options shared by every command, read from flags or the environment.
#[derive(Args)]
pub struct GlobalArgs {
    #[arg(long, global = true, env = "KITE_API_KEY")]
    pub api_key: Option<String>,
    #[arg(long, global = true, env = "KITE_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,
    #[arg(long, global = true, env = "KITE_REDIRECT_URL")]
    pub redirect_url: Option<String>,
    #[arg(long, global = true, env = "ZEROKITE_API_BASE", default_value = API_BASE, hide = true)]
    pub api_base: String,
    #[arg(long, global = true, env = "ZEROKITE_LOGIN_BASE", default_value = LOGIN_BASE, hide = true)]
    pub login_base: String,
    #[arg(long, global = true, help = "Print JSON output")]
    pub json: bool,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Args)]
pub struct CompletionArgs {
    #[arg(value_enum)]
    pub shell: Shell,
}
