use serde_json::json;
use zerokite_core::{Credentials, HANDSHAKE_TIMEOUT};

use super::login::{login, ListenNotice, LoginOptions};
use crate::cli_args::*;
use crate::errors::CliError;
use crate::modules::shared::output::value_text;
use crate::modules::shared::print_success_json;
use crate::modules::system::{ApiClient, CommandContext, SessionStore};
use crate::modules::user::fetch_profile;

pub(crate) async fn handle_login(
    args: AuthArgs,
    global: &GlobalArgs,
    api: &ApiClient,
    store: &dyn SessionStore,
) -> Result<(), CliError> {
    let credentials = Credentials::new(global.api_key.as_deref(), global.api_secret.as_deref())?;
    let json = global.json;
    let options = LoginOptions {
        port: args.port,
        redirect_url: global.redirect_url.as_deref(),
        credentials,
        login_base: &global.login_base,
        timeout: HANDSHAKE_TIMEOUT,
    };

    let session = login(api, options, |notice| {
        if !json {
            print_listen_notice(notice);
        }
    })
    .await?;
    store.save(&session)?;

    let session_file = store.location().display().to_string();
    if json {
        print_success_json(
            "auth",
            json!({
                "session_file": session_file,
                "user_id": session.user_id,
                "login_time": session.login_time,
            }),
        );
        return Ok(());
    }
    println!("Login successful.");
    println!("Session saved to {session_file}");
    if let Some(user_id) = &session.user_id {
        println!("User: {user_id}");
    }
    Ok(())
}

fn print_listen_notice(notice: &ListenNotice) {
    println!("Starting callback server on {}", notice.listen_url);
    if notice.all_interfaces {
        println!("Accepting callbacks on all network interfaces for non-local redirect host.");
    }
    println!("Open this URL in your browser and complete login:");
    println!("{}", notice.login_url);
    println!();
    println!("Waiting for redirect on {} ...", notice.redirect_url);
}

pub(crate) fn handle_logout(store: &dyn SessionStore, json: bool) -> Result<(), CliError> {
    let existed = store.location().exists();
    store.clear()?;
    let session_file = store.location().display().to_string();
    if json {
        print_success_json(
            "logout",
            json!({ "session_file": session_file, "cleared": existed }),
        );
    } else if existed {
        println!("Logged out. Removed {session_file}");
    } else {
        println!("No stored session.");
    }
    Ok(())
}

pub(crate) async fn handle_verify(ctx: &CommandContext<'_>) -> Result<(), CliError> {
    let profile = fetch_profile(ctx).await?;
    if ctx.json {
        print_success_json(
            "verify",
            json!({
                "valid": true,
                "user_id": profile["user_id"],
                "user_name": profile["user_name"],
            }),
        );
        return Ok(());
    }
    println!("Access token is valid.");
    println!("User ID: {}", value_text(&profile["user_id"]));
    println!("Name: {}", value_text(&profile["user_name"]));
    Ok(())
}
