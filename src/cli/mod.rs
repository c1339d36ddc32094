//! CLI entrypoint module structure.
use std::io::Write;

use crate::{
    lib::{errors::CliError, telemetry::CommandSpan},
    service::ServiceGateway,
};

pub mod args;
pub mod commands;
pub mod profile;

pub use args::{
    Cli, Command, CredentialArgs, DownloadArgs, ListComplementsArgs, QueryArgs, VerifyArgs,
    ZipExportArgs,
};
pub use commands::CommandContext;
pub use profile::{
    pass_phrase_from_env, resolve_configuration, ConfigFlags, Configuration, PASS_PHRASE_ENV,
};

/// Run one command, writing its report to `out`.
pub fn execute_command<G, W>(
    command: &Command,
    context: &CommandContext<'_, G>,
    out: &mut W,
) -> Result<(), CliError>
where
    G: ServiceGateway,
    W: Write,
{
    let span = CommandSpan::start(command.name());
    let result = {
        let _entered = span.span().enter();
        match command {
            Command::Query(args) => commands::query::run(context, args, out),
            Command::Verify(args) => commands::verify::run(context, args, out),
            Command::Download(args) => commands::download::run(context, args, out),
            Command::ListComplements(args) => commands::complements::run(args, out),
            Command::ZipMetadata(args) => commands::export::metadata(args, out),
            Command::ZipXml(args) => commands::export::xml(args, out),
        }
    };
    // Output that cannot be flushed fails the command.
    let result = result.and_then(|()| out.flush().map_err(CliError::from));
    span.finish(match &result {
        Ok(()) => "success",
        Err(CliError::Input(_)) => "input_error",
        Err(CliError::Execution(_)) => "execution_error",
    });
    result
}
