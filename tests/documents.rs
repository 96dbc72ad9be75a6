//! Loading documents from disk and checking them end to end.

use std::io::Write;
use std::path::PathBuf;

use gwvalidate::cli::{check_files, render, violation_count};
use gwvalidate::config::{CheckConfig, OutputFormat};
use gwvalidate::{load_documents, validate_document, ConfigDocument, GwValidateError};
use tempfile::TempDir;
use tracing_test::traced_test;

const MIXED: &str = r#"
kind: Gateway
metadata:
  name: gw
spec:
  gatewayClassName: example
  listeners:
    - name: http
      port: 80
      protocol: HTTP
---
kind: HTTPRoute
metadata:
  name: web
spec:
  parentRefs:
    - name: gw
    - name: gw
      namespace: default
  rules:
    - backendRefs:
        - name: web
          port: 8080
---
kind: TCPRoute
metadata:
  name: db
  namespace: data
spec:
  parentRefs:
    - name: gw
      namespace: default
    - name: gw
  rules:
    - backendRefs:
        - name: db
          port: 5432
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
#[traced_test]
fn test_load_multi_document_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "mixed.yaml", MIXED);

    let documents = load_documents(&path).unwrap();
    let kinds: Vec<_> = documents.iter().map(ConfigDocument::kind).collect();
    assert_eq!(kinds, vec!["Gateway", "HTTPRoute", "TCPRoute"]);
    assert!(validate_document(&documents[0]).is_empty());
}

#[test]
#[traced_test]
fn test_default_namespace_joins_parent_refs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "mixed.yaml", MIXED);

    // The route lives in "default", so both of its refs name the same
    // Gateway; the TCPRoute lives in "data", so its refs differ.
    let reports = check_files(&[path.clone()], &CheckConfig::default()).unwrap();
    assert_eq!(violation_count(&reports), 1);
    assert_eq!(reports[1].document, "HTTPRoute/web");
    assert_eq!(reports[1].errors[0].field.to_string(), "spec.parentRefs");

    let elsewhere = CheckConfig { default_namespace: "other".into(), ..Default::default() };
    let reports = check_files(&[path], &elsewhere).unwrap();
    assert_eq!(violation_count(&reports), 0);
}

#[test]
fn test_json_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "classes.json",
        r#"[
            {"kind": "GatewayClass", "metadata": {"name": "a"}, "spec": {"controllerName": "example.com/a"}},
            {"kind": "GatewayClass", "metadata": {"name": "b"}, "spec": {"controllerName": "not a controller"}}
        ]"#,
    );
    let reports = check_files(&[path], &CheckConfig::default()).unwrap();
    assert_eq!(violation_count(&reports), 1);

    let json: serde_json::Value =
        serde_json::from_str(&render(&reports, OutputFormat::Json).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["errors"].as_array().unwrap().len(), 0);
    assert_eq!(json[1]["document"], "GatewayClass/b");
    assert_eq!(json[1]["errors"][0]["field"], "spec.controllerName");
    assert_eq!(json[1]["errors"][0]["value"], "not a controller");
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_documents(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, GwValidateError::Io { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_malformed_document_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "bad.yaml", "kind: HTTPRoute\nmetadata:\n  name: web\nspec:\n  rules: 7\n");
    let err = load_documents(&path).unwrap_err();
    assert!(matches!(err, GwValidateError::Serialization { .. }));
    assert!(err.to_string().contains("bad.yaml"));
}
