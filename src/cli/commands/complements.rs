use std::io::Write;

use crate::{
    cli::args::ListComplementsArgs, lib::errors::CliError, query::complement::complements_for,
    service::ServiceType,
};

const HEADERS: (&str, &str) = ("Código", "Descripción");

pub fn run<W: Write>(args: &ListComplementsArgs, out: &mut W) -> Result<(), CliError> {
    let service_type = ServiceType::parse_option(&args.servicio)?;
    write_table(out, complements_for(service_type))?;
    Ok(())
}

/// Two-column table padded to the widest code.
fn write_table<W: Write>(out: &mut W, rows: &[(&str, &str)]) -> std::io::Result<()> {
    let width = rows
        .iter()
        .map(|(code, _)| code.chars().count())
        .chain([HEADERS.0.chars().count()])
        .max()
        .unwrap_or_default();

    writeln!(out, "{:<width$}  {}", HEADERS.0, HEADERS.1)?;
    writeln!(out, "{}  {}", "-".repeat(width), "-".repeat(HEADERS.1.chars().count()))?;
    for (code, label) in rows {
        writeln!(out, "{code:<width$}  {label}")?;
    }
    Ok(())
}
