use std::{fs, fs::File, io::Write, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;
use zip::{write::FileOptions, ZipWriter};

use crate::common::{credential_files, BINARY_NAME};

fn binary() -> Command {
    let mut command = Command::cargo_bin(BINARY_NAME).expect("binary is built");
    command.env_remove("EFIRMA_PASSPHRASE").env_remove("RUST_LOG");
    command
}

fn write_package(path: &Path, entries: &[(&str, &str)]) {
    let mut zip = ZipWriter::new(File::create(path).expect("can create package"));
    for (entry, content) in entries {
        zip.start_file(*entry, FileOptions::default())
            .expect("can start entry");
        zip.write_all(content.as_bytes()).expect("can write entry");
    }
    zip.finish().expect("can finish package");
}

#[test]
fn list_complements_prints_cfdi_table_by_default() {
    binary()
        .arg("list-complements")
        .assert()
        .success()
        .stdout(predicate::str::contains("Código"))
        .stdout(predicate::str::contains("Recepción de pagos 2.0"));
}

#[test]
fn legacy_alias_lists_retenciones() {
    binary()
        .args(["info:complementos", "--servicio", "Retenciones"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dividendos"))
        .stdout(predicate::str::contains("nomina12").not());
}

#[test]
fn invalid_service_exits_with_input_code() {
    binary()
        .args(["list-complements", "--servicio", "otro"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("servicio"));
}

#[test]
fn usage_errors_exit_with_input_code() {
    binary().arg("ws:verifica").assert().code(2);
    binary().arg("no-such-command").assert().code(2);
}

#[test]
fn query_without_certificate_names_the_option() {
    let temp = tempdir().expect("can create temporary directory");
    binary()
        .current_dir(temp.path())
        .args(["ws:consulta", "--desde", "2024-01-01", "--hasta", "2024-01-31"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("certificado"));
}

#[test]
fn malformed_uuid_is_reported_before_any_remote_call() {
    let temp = tempdir().expect("can create temporary directory");
    let (certificate, private_key) = credential_files(temp.path());
    binary()
        .args(["query", "--uuid", "not-a-uuid", "--certificado"])
        .arg(&certificate)
        .arg("--llave")
        .arg(&private_key)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("uuid"));
}

#[test]
fn remote_commands_fail_without_a_linked_backend() {
    let temp = tempdir().expect("can create temporary directory");
    let (certificate, private_key) = credential_files(temp.path());
    binary()
        .args(["verify", "4E80345D-917F-40BB-A98F-4A73939343C5", "--certificado"])
        .arg(&certificate)
        .arg("--llave")
        .arg(&private_key)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No web service backend"));
}

#[test]
fn zip_xml_exports_documents() {
    let temp = tempdir().expect("can create temporary directory");
    let package = temp.path().join("cfdi.zip");
    write_package(
        &package,
        &[
            ("11111111-2222-3333-4444-000000000001.xml", "<cfdi>1</cfdi>"),
            ("11111111-2222-3333-4444-000000000002.xml", "<cfdi>2</cfdi>"),
        ],
    );
    let destination = temp.path().join("xml");
    fs::create_dir(&destination).expect("can create destination");

    binary()
        .arg("zip:xml")
        .arg(&package)
        .arg(&destination)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exportados 2 archivos"));
    assert!(destination
        .join("11111111-2222-3333-4444-000000000001.xml")
        .exists());
}

#[test]
fn zip_metadata_reports_missing_package() {
    let temp = tempdir().expect("can create temporary directory");
    binary()
        .arg("zip:metadata")
        .arg(temp.path().join("missing.zip"))
        .arg(temp.path().join("metadata.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}
