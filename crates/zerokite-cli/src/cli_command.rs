use crate::cli_args::*;
use crate::errors::CliError;
use crate::modules::auth::{handle_login, handle_logout, handle_verify};
use crate::modules::orders::handle_orders;
use crate::modules::portfolio::{handle_holdings, handle_positions};
use crate::modules::system::{
    handle_completion, resolve_auth_context, ApiClient, CommandContext, SessionStore,
};
use crate::modules::user::handle_profile;

pub(crate) async fn handle_command(
    command: Command,
    global: &GlobalArgs,
    api: &ApiClient,
    store: &dyn SessionStore,
) -> Result<(), CliError> {
    let context = || {
        resolve_auth_context(global.api_key.as_deref(), store).map(|auth| CommandContext {
            api,
            auth,
            json: global.json,
        })
    };

    match command {
        Command::Auth(args) => handle_login(args, global, api, store).await,
        Command::Logout => handle_logout(store, global.json),
        Command::Verify => handle_verify(&context()?).await,
        Command::Profile => handle_profile(&context()?).await,
        Command::Holdings => handle_holdings(&context()?).await,
        Command::Positions(args) => handle_positions(args, &context()?).await,
        Command::Orders(args) => handle_orders(args, &context()?).await,
        Command::Completion(args) => {
            handle_completion(args.shell);
            Ok(())
        }
    }
}
