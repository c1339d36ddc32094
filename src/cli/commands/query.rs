use std::io::Write;

use super::{ensure_accepted, open_session, CommandContext};
use crate::{
    cli::args::QueryArgs,
    lib::errors::{CliError, InputError},
    query::{labels, QueryBuilder, QueryMode, QueryParameters},
    service::{ServiceGateway, ServiceType},
};

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn run<G: ServiceGateway, W: Write>(
    context: &CommandContext<'_, G>,
    args: &QueryArgs,
    out: &mut W,
) -> Result<(), CliError> {
    let (mut session, service_type) = open_session(context, &args.credential)?;
    let parameters = QueryBuilder::new(&args.options(), service_type).build()?;

    write_summary(out, service_type, &session.rfc(), &parameters)?;

    if !args.no_prevalidar {
        let messages = parameters.validate(context.now);
        if !messages.is_empty() {
            return Err(InputError::QueryValidation { messages }.into());
        }
    }

    let result = session.query(&parameters)?;
    let request_id = if result.request_id.is_empty() {
        "(ninguno)"
    } else {
        result.request_id.as_str()
    };
    writeln!(out, "Resultado:")?;
    writeln!(
        out,
        "  Consulta: {} - {}",
        result.status.code, result.status.message
    )?;
    writeln!(out, "  Identificador de solicitud: {request_id}")?;

    ensure_accepted(&result.status)
}

fn write_summary<W: Write>(
    out: &mut W,
    service_type: ServiceType,
    rfc: &str,
    parameters: &QueryParameters,
) -> std::io::Result<()> {
    writeln!(out, "Consulta:")?;
    writeln!(out, "  Servicio: {}", labels::service_type(service_type))?;
    writeln!(
        out,
        "  Paquete: {}",
        labels::request_type(parameters.request_type)
    )?;
    writeln!(out, "  RFC: {rfc}")?;

    match &parameters.mode {
        QueryMode::Period(query) => {
            writeln!(
                out,
                "  Desde: {}",
                query.period.start().format(DATE_TIME_FORMAT)
            )?;
            writeln!(
                out,
                "  Hasta: {}",
                query.period.end().format(DATE_TIME_FORMAT)
            )?;
            writeln!(out, "  Tipo: {}", labels::download_type(query.download_type))?;
            writeln!(out, "  RFC de/para: {}", labels::rfc(query.rfc_match.as_ref()))?;
            writeln!(
                out,
                "  Documentos: {}",
                labels::document_type(query.document_type)
            )?;
            writeln!(out, "  Complemento: {}", labels::complement(&query.complement))?;
            writeln!(
                out,
                "  Estado: {}",
                labels::document_status(query.document_status)
            )?;
            writeln!(out, "  Tercero: {}", labels::rfc(query.rfc_on_behalf.as_ref()))?;
        }
        QueryMode::Uuid(uuid) => {
            writeln!(out, "  UUID: {}", labels::uuid(Some(uuid)))?;
        }
    }
    Ok(())
}
