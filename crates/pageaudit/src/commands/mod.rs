pub(crate) mod audit;
pub(crate) mod completions;

use anyhow::Result;

use crate::cli::{Cli, Commands};

/// Returns the process exit code.
pub(crate) fn dispatch(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Completions(args) => completions::handle(args).map(|()| 0),
        Commands::Audit(args) => audit::handle(args, cli.profile.as_ref(), cli.config.as_deref()),
    }
}
