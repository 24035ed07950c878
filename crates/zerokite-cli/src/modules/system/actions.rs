use std::io;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli_args::Cli;

pub(crate) fn handle_completion(shell: Shell) {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "zerokite", &mut io::stdout());
}
