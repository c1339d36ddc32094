//! `zip:metadata` and `zip:xml`: local exports of downloaded packages.
use std::{
    io::{self, Write},
    path::Path,
};

use tracing::{debug, info};

use crate::{
    cli::args::ZipExportArgs,
    lib::{
        errors::{CliError, ExecutionError},
        fs::{is_writable_dir, write_file},
    },
    package::PackageReader,
};

/// Write the metadata rows of `paquete` as a JSON array into `destino`.
pub fn metadata<W: Write>(args: &ZipExportArgs, out: &mut W) -> Result<(), CliError> {
    let source = Path::new(&args.paquete);
    let destination = Path::new(&args.destino);

    let mut reader = PackageReader::open(source)?;
    let items = reader.metadata()?;
    let document = serde_json::to_vec_pretty(&items).map_err(|err| ExecutionError::Io {
        path: destination.to_path_buf(),
        source: io::Error::from(err),
    })?;
    write_file(destination, &document).map_err(|source| ExecutionError::Io {
        path: destination.to_path_buf(),
        source,
    })?;

    info!(
        target: "descarga_masiva::package",
        source = %source.display(),
        destination = %destination.display(),
        rows = items.len(),
        "Exported metadata"
    );
    writeln!(out, "Exportados {} registros", items.len())?;
    Ok(())
}

/// Write every XML document of `paquete` as `<destino>/<uuid>.xml`.
pub fn xml<W: Write>(args: &ZipExportArgs, out: &mut W) -> Result<(), CliError> {
    let source = Path::new(&args.paquete);
    let destination = Path::new(&args.destino);

    let mut reader = PackageReader::open(source)?;
    if !destination.is_dir() || !is_writable_dir(destination) {
        return Err(ExecutionError::Io {
            path: destination.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::NotFound,
                "destination is not a writable directory",
            ),
        }
        .into());
    }

    let documents = reader.cfdis()?;
    let total = documents.len();
    for (exported, document) in documents.iter().enumerate() {
        let path = destination.join(format!("{}.xml", document.uuid));
        write_file(&path, &document.content).map_err(|source| {
            ExecutionError::ExportInterrupted {
                path: path.clone(),
                exported,
                total,
                source,
            }
        })?;
        debug!(
            target: "descarga_masiva::package",
            path = %path.display(),
            "Exported XML document"
        );
    }

    writeln!(out, "Exportados {total} archivos")?;
    Ok(())
}
