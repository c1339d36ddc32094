use std::fs;

use descarga_masiva::{
    cli::{Command, CredentialArgs, QueryArgs},
    lib::errors::{CliError, InputError},
};
use tempfile::tempdir;

use crate::common::{credential_files, run, token, ScriptedGateway};

fn uuid_query(credential: CredentialArgs) -> Command {
    Command::Query(QueryArgs {
        credential,
        uuid: Some("b84835d8-2c55-4194-88a1-79edd961e4e7".into()),
        ..QueryArgs::default()
    })
}

#[test]
fn efirma_file_paths_are_relative_to_the_file() {
    let temp = tempdir().expect("can create temporary directory");
    let config_dir = temp.path().join("config");
    fs::create_dir(&config_dir).expect("can create config directory");
    credential_files(&config_dir);
    let config = config_dir.join("efirma.json");
    fs::write(
        &config,
        r#"{"certificateFile":"fiel.cer","privateKeyFile":"fiel.key","passPhrase":"from-file","tokenFile":"token.json"}"#,
    )
    .expect("can write config");
    let gateway = ScriptedGateway::accepting();

    let (result, _) = run(
        &uuid_query(CredentialArgs {
            efirma: config.to_string_lossy().to_string(),
            servicio: "cfdi".into(),
            ..CredentialArgs::default()
        }),
        &gateway,
        None,
    );

    result.expect("query succeeds");
    assert_eq!(gateway.calls.borrow().pass_phrases, vec!["from-file"]);
    assert_eq!(
        fs::read_to_string(config_dir.join("token.json")).expect("token next to config"),
        token("issued-token").serialize()
    );
}

#[test]
fn environment_pass_phrase_beats_file_but_not_flag() {
    let temp = tempdir().expect("can create temporary directory");
    credential_files(temp.path());
    let config = temp.path().join("efirma.json");
    fs::write(
        &config,
        r#"{"certificateFile":"fiel.cer","privateKeyFile":"fiel.key","passPhrase":"from-file"}"#,
    )
    .expect("can write config");
    let mut credential = CredentialArgs {
        efirma: config.to_string_lossy().to_string(),
        servicio: "cfdi".into(),
        ..CredentialArgs::default()
    };

    let gateway = ScriptedGateway::accepting();
    run(&uuid_query(credential.clone()), &gateway, Some("from-env".into()))
        .0
        .expect("env pass phrase");

    credential.password = "from-flag".into();
    run(&uuid_query(credential), &gateway, Some("from-env".into()))
        .0
        .expect("flag pass phrase");

    assert_eq!(
        gateway.calls.borrow().pass_phrases,
        vec!["from-env", "from-flag"]
    );
}

#[test]
fn non_string_values_are_ignored() {
    let temp = tempdir().expect("can create temporary directory");
    let config = temp.path().join("efirma.json");
    fs::write(&config, r#"{"certificateFile":42,"privateKeyFile":"fiel.key"}"#)
        .expect("can write config");

    let (result, _) = run(
        &uuid_query(CredentialArgs {
            efirma: config.to_string_lossy().to_string(),
            servicio: "cfdi".into(),
            ..CredentialArgs::default()
        }),
        &ScriptedGateway::accepting(),
        None,
    );

    match result {
        Err(CliError::Input(InputError::MissingRequiredOption { field })) => {
            assert_eq!(field, "certificado")
        }
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[test]
fn unreadable_efirma_file_is_an_input_error() {
    let temp = tempdir().expect("can create temporary directory");
    let (result, _) = run(
        &uuid_query(CredentialArgs {
            efirma: temp.path().join("missing.json").to_string_lossy().to_string(),
            servicio: "cfdi".into(),
            ..CredentialArgs::default()
        }),
        &ScriptedGateway::accepting(),
        None,
    );

    let error = result.expect_err("missing config file");
    assert_eq!(error.exit_code(), 2);
    match error {
        CliError::Input(error) => assert_eq!(error.field(), "efirma"),
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test]
fn unknown_service_is_rejected_before_opening_a_session() {
    let temp = tempdir().expect("can create temporary directory");
    let (certificate, private_key) = credential_files(temp.path());
    let gateway = ScriptedGateway::accepting();

    let (result, _) = run(
        &uuid_query(CredentialArgs {
            certificado: certificate.to_string_lossy().to_string(),
            llave: private_key.to_string_lossy().to_string(),
            servicio: "nomina".into(),
            ..CredentialArgs::default()
        }),
        &gateway,
        None,
    );

    match result {
        Err(CliError::Input(error)) => assert_eq!(error.field(), "servicio"),
        other => panic!("Unexpected result: {other:?}"),
    }
    assert!(gateway.calls.borrow().opened_with.is_empty());
}
