use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tracing::info;

use super::{ensure_accepted, open_session, CommandContext};
use crate::{
    cli::args::DownloadArgs,
    lib::{
        errors::{CliError, ExecutionError, InputError},
        fs::{is_writable_dir, write_file},
    },
    service::ServiceGateway,
};

pub fn run<G: ServiceGateway, W: Write>(
    context: &CommandContext<'_, G>,
    args: &DownloadArgs,
    out: &mut W,
) -> Result<(), CliError> {
    let package_id = args.paquete.trim();
    if package_id.is_empty() {
        return Err(InputError::invalid("paquete", "The argument \"paquete\" is not valid").into());
    }
    let destination = destination_file(&args.destino, package_id)?;

    let (mut session, _) = open_session(context, &args.credential)?;
    writeln!(out, "Descarga:")?;
    writeln!(out, "  RFC: {}", session.rfc())?;
    writeln!(out, "  Identificador del paquete: {package_id}")?;
    writeln!(out, "  Destino: {}", destination.display())?;

    let result = session.download(package_id)?;
    writeln!(out, "Resultado:")?;
    writeln!(
        out,
        "  Descarga: {} - {}",
        result.status.code, result.status.message
    )?;
    writeln!(out, "  Tamaño: {}", result.package_size())?;
    ensure_accepted(&result.status)?;

    write_file(&destination, &result.package_content).map_err(|source| ExecutionError::Io {
        path: destination.clone(),
        source,
    })?;
    info!(
        target: "descarga_masiva::command",
        path = %destination.display(),
        bytes = result.package_size(),
        "Package written"
    );
    Ok(())
}

/// `<folder>/<lowercase package id>.zip`, checking the folder can receive it.
pub fn destination_file(folder: &str, package_id: &str) -> Result<PathBuf, InputError> {
    let folder = if folder.is_empty() { "." } else { folder };
    let folder = Path::new(folder);
    if !folder.is_dir() {
        return Err(InputError::invalid(
            "destino",
            format!("The option \"destino\" is not a directory: {}", folder.display()),
        ));
    }
    if !is_writable_dir(folder) {
        return Err(InputError::invalid(
            "destino",
            format!("The option \"destino\" is not writable: {}", folder.display()),
        ));
    }
    Ok(folder.join(format!("{}.zip", package_id.to_lowercase())))
}
