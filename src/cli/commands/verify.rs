use std::io::Write;

use super::{ensure_accepted, open_session, CommandContext};
use crate::{
    cli::args::VerifyArgs,
    lib::errors::{CliError, ExecutionError, InputError},
    service::{gateway::VerifyResult, ServiceGateway},
};

pub fn run<G: ServiceGateway, W: Write>(
    context: &CommandContext<'_, G>,
    args: &VerifyArgs,
    out: &mut W,
) -> Result<(), CliError> {
    let request_id = args.solicitud.trim();
    if request_id.is_empty() {
        return Err(InputError::invalid("solicitud", "The argument \"solicitud\" is not valid").into());
    }

    let (mut session, _) = open_session(context, &args.credential)?;
    writeln!(out, "Verificación:")?;
    writeln!(out, "  RFC: {}", session.rfc())?;
    writeln!(out, "  Identificador de la solicitud: {request_id}")?;

    let result = session.verify(request_id)?;
    writeln!(out, "Resultado:")?;
    writeln!(
        out,
        "  Verificación: {} - {}",
        result.status.code, result.status.message
    )?;
    writeln!(
        out,
        "  Estado de la solicitud: {} - {}",
        result.status_request.value(),
        result.status_request.message()
    )?;
    writeln!(
        out,
        "  Estado de la descarga: {} - {}",
        result.code_request.value(),
        result.code_request.message()
    )?;
    writeln!(out, "  Número de CFDI: {}", result.number_cfdis)?;
    writeln!(out, "  Paquetes: {}", result.package_ids.join(", "))?;

    check_result(&result)
}

/// Map an accepted transport response to failure when the request cannot progress.
pub fn check_result(result: &VerifyResult) -> Result<(), CliError> {
    ensure_accepted(&result.status)?;
    if result.code_request.is_unrecoverable() {
        return Err(ExecutionError::CodeRequestRejected {
            code: result.code_request.value(),
            message: result.code_request.message().to_string(),
        }
        .into());
    }
    if result.status_request.is_unrecoverable() {
        return Err(ExecutionError::StatusRequestRejected {
            code: result.status_request.value(),
            message: result.status_request.message().to_string(),
        }
        .into());
    }
    Ok(())
}
