use std::fs;
use std::path::{Path, PathBuf};

use docx_utility::{BackendKind, Config, Error, Settings, load_config, try_load_config};

fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn missing_file_gives_empty_mapping() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(load_config(&dir.path().join("config.yaml")), Config::new());
}

#[test]
fn malformed_file_gives_empty_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "output_directory: [unclosed\n  - : :\n");

    assert!(load_config(&path).is_empty());
    assert!(matches!(try_load_config(&path), Err(Error::ConfigParse(_))));
}

#[test]
fn empty_documents_give_empty_mapping() {
    let dir = tempfile::tempdir().unwrap();
    for contents in ["", "\n\n", "# only a comment\n", "---\n", "~\n"] {
        let path = write_config(dir.path(), contents);
        assert!(load_config(&path).is_empty(), "{contents:?}");
    }
}

#[test]
fn non_mapping_document_gives_empty_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "- one\n- two\n");

    assert!(load_config(&path).is_empty());
}

#[test]
fn parsed_values_are_returned_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "output_directory: \"./exports\"\ncustom_setting: 123\noverwrite: true\n",
    );

    let config = load_config(&path);

    assert_eq!(config.len(), 3);
    assert_eq!(config["output_directory"], serde_yaml::Value::from("./exports"));
    assert_eq!(config["custom_setting"].as_i64(), Some(123));
    assert_eq!(config["overwrite"], serde_yaml::Value::Bool(true));
    assert_eq!(
        Settings::from_config(&config).output_directory,
        PathBuf::from("./exports")
    );
}

#[test]
fn every_call_rereads_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "output_directory: first\n");
    assert_eq!(Settings::load(&path).output_directory, PathBuf::from("first"));

    write_config(dir.path(), "output_directory: second\n");
    assert_eq!(Settings::load(&path).output_directory, PathBuf::from("second"));
}

#[test]
fn settings_defaults() {
    let settings = Settings::from_config(&Config::new());

    assert_eq!(settings.output_directory, PathBuf::from("./output"));
    assert_eq!(settings.backend, BackendKind::Builtin);
    assert_eq!(settings.soffice_program, PathBuf::from("soffice"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn settings_read_alternate_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "default_output_directory: meus_pdfs\nconverter: LibreOffice\nsoffice_path: /opt/lo/soffice\nunknown: 1\n",
    );

    let settings = Settings::load(&path);

    assert_eq!(settings.output_directory, PathBuf::from("meus_pdfs"));
    assert_eq!(settings.backend, BackendKind::Soffice);
    assert_eq!(settings.soffice_program, PathBuf::from("/opt/lo/soffice"));
}

#[test]
fn output_directory_takes_precedence() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "default_output_directory: old\noutput_directory: new\n",
    );

    assert_eq!(Settings::load(&path).output_directory, PathBuf::from("new"));
}

#[test]
fn invalid_values_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "output_directory: 42\nconverter: word\n");

    let settings = Settings::load(&path);

    assert_eq!(settings.output_directory, PathBuf::from("./output"));
    assert_eq!(settings.backend, BackendKind::Builtin);
}
