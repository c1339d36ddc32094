//! Entry point for the descarga masiva CLI.
use std::{io, process::ExitCode};

use anyhow::Error;
use chrono::Local;
use clap::Parser;
use descarga_masiva::{
    cli::{execute_command, pass_phrase_from_env, Cli, CommandContext},
    lib::{
        errors::{CliError, EXECUTION_ERROR_EXIT_CODE, INPUT_ERROR_EXIT_CODE},
        telemetry,
    },
    service::UnlinkedGateway,
};

/// Bundles an error message with the exit code to report it under.
#[derive(Debug)]
struct RuntimeExit {
    message: String,
    exit_code: u8,
}

impl RuntimeExit {
    fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: EXECUTION_ERROR_EXIT_CODE,
        }
    }

    fn from_cli_error(err: CliError) -> Self {
        Self {
            message: err.to_string(),
            exit_code: err.exit_code(),
        }
    }

    fn report(self) -> ExitCode {
        if !self.message.is_empty() {
            eprintln!("{}", self.message);
        }
        ExitCode::from(self.exit_code)
    }
}

fn main() -> ExitCode {
    match bootstrap() {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

fn bootstrap() -> Result<(), RuntimeExit> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let printed = err.print();
            if !err.use_stderr() {
                // --help and --version
                return printed.map_err(RuntimeExit::from_error);
            }
            return Err(RuntimeExit {
                message: String::new(),
                exit_code: INPUT_ERROR_EXIT_CODE,
            });
        }
    };
    telemetry::init_tracing(cli.verbose).map_err(RuntimeExit::from_error)?;

    let gateway = UnlinkedGateway;
    let context = CommandContext {
        gateway: &gateway,
        env_pass_phrase: pass_phrase_from_env(),
        now: Local::now().naive_local(),
    };
    let mut out = io::stdout().lock();
    execute_command(&cli.command, &context, &mut out).map_err(RuntimeExit::from_cli_error)
}
