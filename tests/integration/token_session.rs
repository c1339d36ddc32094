use std::fs;

use chrono::{Duration, TimeZone, Utc};
use descarga_masiva::{
    cli::{Command, DownloadArgs, QueryArgs, VerifyArgs},
    lib::errors::{CacheError, CliError, ExecutionError, InputError},
    service::{
        gateway::{CodeRequest, StatusCode},
        Token,
    },
};
use tempfile::tempdir;

use crate::common::{credential_args, run, token, ScriptedGateway};

fn query_command(credential: descarga_masiva::cli::CredentialArgs) -> Command {
    Command::Query(QueryArgs {
        credential,
        desde: Some("2024-01-01 00:00:00".into()),
        hasta: Some("2024-01-31 23:59:59".into()),
        ..QueryArgs::default()
    })
}

#[test]
fn first_query_persists_issued_token() {
    let temp = tempdir().expect("can create temporary directory");
    let token_file = temp.path().join("token.json");
    let gateway = ScriptedGateway::accepting();

    let (result, output) = run(
        &query_command(credential_args(temp.path(), Some(&token_file))),
        &gateway,
        None,
    );

    result.expect("query succeeds");
    assert!(output.contains("  RFC: EKU9003173C9\n"), "{output}");
    assert!(
        output.contains("  Consulta: 5000 - Solicitud Aceptada\n"),
        "{output}"
    );
    assert!(
        output.contains("  Identificador de solicitud: 4E80345D-917F-40BB-A98F-4A73939343C5\n"),
        "{output}"
    );
    let stored = fs::read_to_string(&token_file).expect("token file written");
    assert_eq!(stored, token("issued-token").serialize());
    assert_eq!(gateway.calls.borrow().opened_with, vec![None]);
    assert_eq!(gateway.calls.borrow().operations, vec!["query:issued-token"]);
}

#[test]
fn second_invocation_reuses_cached_token_without_rewriting() {
    let temp = tempdir().expect("can create temporary directory");
    let token_file = temp.path().join("token.json");
    let command = query_command(credential_args(temp.path(), Some(&token_file)));

    run(&command, &ScriptedGateway::accepting(), None)
        .0
        .expect("first query");
    let before = fs::metadata(&token_file)
        .and_then(|metadata| metadata.modified())
        .expect("mtime");

    let gateway = ScriptedGateway::accepting();
    run(&command, &gateway, None).0.expect("second query");

    let after = fs::metadata(&token_file)
        .and_then(|metadata| metadata.modified())
        .expect("mtime");
    assert_eq!(before, after);
    assert_eq!(
        gateway.calls.borrow().opened_with,
        vec![Some(token("issued-token"))]
    );
}

#[test]
fn expired_cached_token_is_replaced() {
    let temp = tempdir().expect("can create temporary directory");
    let token_file = temp.path().join("token.json");
    let created = Utc
        .with_ymd_and_hms(2024, 6, 1, 11, 0, 0)
        .single()
        .expect("valid timestamp");
    let expired = Token::new(created, created + Duration::minutes(5), "expired-token")
        .expect("non-empty token");
    fs::write(&token_file, expired.serialize()).expect("can seed cache");

    let gateway = ScriptedGateway::accepting();
    run(
        &query_command(credential_args(temp.path(), Some(&token_file))),
        &gateway,
        None,
    )
    .0
    .expect("query succeeds");

    assert_eq!(
        fs::read_to_string(&token_file).expect("token file"),
        token("issued-token").serialize()
    );
}

#[test]
fn corrupted_cache_stops_the_command() {
    let temp = tempdir().expect("can create temporary directory");
    let token_file = temp.path().join("token.json");
    fs::write(&token_file, r#"{"created":"x"}"#).expect("can seed cache");
    let gateway = ScriptedGateway::accepting();

    let (result, _) = run(
        &query_command(credential_args(temp.path(), Some(&token_file))),
        &gateway,
        None,
    );

    match result {
        Err(CliError::Execution(ExecutionError::Cache(error @ CacheError::Corrupted { .. }))) => {
            assert_eq!(error.field(), Some("created"))
        }
        other => panic!("Unexpected result: {other:?}"),
    }
    assert!(gateway.calls.borrow().operations.is_empty());
}

#[test]
fn without_token_file_the_token_lives_in_memory() {
    let temp = tempdir().expect("can create temporary directory");
    let gateway = ScriptedGateway::accepting();

    run(&query_command(credential_args(temp.path(), None)), &gateway, None)
        .0
        .expect("query succeeds");

    assert_eq!(gateway.calls.borrow().operations, vec!["query:issued-token"]);
    let files: Vec<_> = fs::read_dir(temp.path())
        .expect("can list directory")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    assert!(!files.iter().any(|name| name.ends_with(".json")), "{files:?}");
}

#[test]
fn failed_prevalidation_skips_the_service() {
    let temp = tempdir().expect("can create temporary directory");
    let gateway = ScriptedGateway::accepting();
    let command = Command::Query(QueryArgs {
        credential: credential_args(temp.path(), None),
        desde: Some("2030-01-01".into()),
        hasta: Some("2030-01-31".into()),
        ..QueryArgs::default()
    });

    let (result, output) = run(&command, &gateway, None);
    match result {
        Err(CliError::Input(InputError::QueryValidation { messages })) => {
            assert_eq!(messages.len(), 1, "{messages:?}")
        }
        other => panic!("Unexpected result: {other:?}"),
    }
    assert!(output.starts_with("Consulta:\n"), "{output}");
    assert!(gateway.calls.borrow().operations.is_empty());

    let Command::Query(mut args) = command else {
        unreachable!()
    };
    args.no_prevalidar = true;
    run(&Command::Query(args), &gateway, None)
        .0
        .expect("checks skipped");
}

#[test]
fn rejected_query_is_an_execution_error() {
    let temp = tempdir().expect("can create temporary directory");
    let mut gateway = ScriptedGateway::accepting();
    gateway.query.status = StatusCode::new(305, "Certificado Inválido");
    gateway.query.request_id.clear();

    let (result, output) = run(
        &query_command(credential_args(temp.path(), None)),
        &gateway,
        None,
    );

    assert!(output.contains("  Identificador de solicitud: (ninguno)\n"), "{output}");
    let error = result.expect_err("not accepted");
    assert_eq!(error.exit_code(), 1);
    assert!(error.to_string().contains("305 - Certificado Inválido"), "{error}");
}

#[test]
fn verify_prints_packages_and_rejects_duplicates() {
    let temp = tempdir().expect("can create temporary directory");
    let command = Command::Verify(VerifyArgs {
        credential: credential_args(temp.path(), None),
        solicitud: "4E80345D-917F-40BB-A98F-4A73939343C5".into(),
    });

    let gateway = ScriptedGateway::accepting();
    let (result, output) = run(&command, &gateway, None);
    result.expect("verify succeeds");
    assert!(output.contains("  Número de CFDI: 12\n"), "{output}");
    assert!(
        output.contains(
            "  Paquetes: 4E80345D-917F-40BB-A98F-4A73939343C5_01, 4E80345D-917F-40BB-A98F-4A73939343C5_02\n"
        ),
        "{output}"
    );

    let mut gateway = ScriptedGateway::accepting();
    gateway.verify.code_request = CodeRequest::Duplicated;
    let (result, _) = run(&command, &gateway, None);
    assert!(matches!(
        result,
        Err(CliError::Execution(ExecutionError::CodeRequestRejected { code: 5005, .. }))
    ));
}

#[test]
fn download_writes_package_into_destination() {
    let temp = tempdir().expect("can create temporary directory");
    let destination = temp.path().join("paquetes");
    fs::create_dir(&destination).expect("can create destination");
    let command = Command::Download(DownloadArgs {
        credential: credential_args(temp.path(), None),
        paquete: "4E80345D-917F-40BB-A98F-4A73939343C5_01".into(),
        destino: destination.to_string_lossy().to_string(),
    });
    let gateway = ScriptedGateway::accepting();

    let (result, output) = run(&command, &gateway, None);

    result.expect("download succeeds");
    let written = destination.join("4e80345d-917f-40bb-a98f-4a73939343c5_01.zip");
    assert_eq!(fs::read(&written).expect("package written"), b"PK-package-bytes");
    assert!(output.contains("  Tamaño: 16\n"), "{output}");
}

#[test]
fn rejected_download_writes_nothing() {
    let temp = tempdir().expect("can create temporary directory");
    let destination = temp.path().join("paquetes");
    fs::create_dir(&destination).expect("can create destination");
    let mut gateway = ScriptedGateway::accepting();
    gateway.download.status = StatusCode::new(5007, "No existe el paquete solicitado");
    gateway.download.package_content.clear();

    let (result, _) = run(
        &Command::Download(DownloadArgs {
            credential: credential_args(temp.path(), None),
            paquete: "MISSING_01".into(),
            destino: destination.to_string_lossy().to_string(),
        }),
        &gateway,
        None,
    );

    assert!(matches!(
        result,
        Err(CliError::Execution(ExecutionError::NotAccepted { code: 5007, .. }))
    ));
    assert_eq!(fs::read_dir(&destination).expect("listing").count(), 0);
}
