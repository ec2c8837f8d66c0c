use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

fn groupgen_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_groupgen"))
}

fn demo_input() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos/address.json")
        .canonicalize()
        .expect("canonicalize demos/address.json")
}

fn run(args: &[&str]) -> Output {
    Command::new(groupgen_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run groupgen")
}

fn generate(extra: &[&str], out: &Path) -> Output {
    let input = demo_input();
    let mut args = vec![
        "generate",
        "--input",
        input.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    run(&args)
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn method_names(interface: &Value) -> Vec<String> {
    interface["methods"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect()
}

const PKG: &str = "com.example.address";

#[test]
fn generate_rewires_the_demo_outline() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");
    let output = generate(&[], &out);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let doc = read_json(&out);
    let types = &doc["outline"]["packages"][PKG]["types"];
    assert_eq!(types["AddressGroup"]["tag"], "interface");
    assert_eq!(types["Versioned"]["tag"], "interface");
    assert_eq!(types["Customer"]["tag"], "class");
    assert_eq!(
        method_names(&types["AddressGroup"]),
        ["getStreet", "setStreet", "getCity", "setCity"]
    );

    let classes = doc["outline"]["classes"].as_object().unwrap();
    assert_eq!(classes.keys().collect::<Vec<_>>(), [&format!("{PKG}.Customer")]);
    let implements: Vec<String> = classes[&format!("{PKG}.Customer")]["implements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| format!("{}.{}", t["package"].as_str().unwrap(), t["name"].as_str().unwrap()))
        .collect();
    assert_eq!(
        implements,
        [format!("{PKG}.Versioned"), format!("{PKG}.AddressGroup")]
    );

    let factory: Vec<&str> = doc["outline"]["packages"][PKG]["object_factory"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(factory, ["createCustomer"]);

    let report = &doc["report"];
    assert_eq!(report["model_group_interfaces"].as_array().unwrap().len(), 1);
    assert_eq!(report["attribute_group_interfaces"].as_array().unwrap().len(), 1);
    assert_eq!(report["removed_classes"].as_array().unwrap().len(), 2);
    assert!(report["warnings"].as_array().unwrap().is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ok"), "stderr: {stderr}");
}

#[test]
fn declare_setters_false_keeps_getters_only() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");
    let output = generate(&["--declare-setters=false"], &out);
    assert!(output.status.success());

    let doc = read_json(&out);
    let types = &doc["outline"]["packages"][PKG]["types"];
    assert_eq!(method_names(&types["AddressGroup"]), ["getStreet", "getCity"]);
    assert_eq!(method_names(&types["Versioned"]), ["getVersion"]);
    assert_eq!(doc["report"]["settings"]["immutable"], true);
}

#[test]
fn builder_interface_flag_declares_nested_builders() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");
    let output = generate(&["--builder-interface"], &out);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let doc = read_json(&out);
    let nested = &doc["outline"]["packages"][PKG]["types"]["AddressGroup"]["nested"];
    let builder = &nested["BuildSupport"];
    assert_eq!(builder["name"], "AddressGroup.BuildSupport");
    assert_eq!(method_names(builder), ["withStreet", "withCity"]);
    assert_eq!(doc["report"]["builders"].as_array().unwrap().len(), 2);
}

#[test]
fn emitted_episode_feeds_a_downstream_run() {
    let dir = tempfile::tempdir().unwrap();
    let episode = dir.path().join("address.episode");
    let first = generate(
        &["--emit-episode", episode.to_str().unwrap()],
        &dir.path().join("first.json"),
    );
    assert!(first.status.success());
    let text = fs::read_to_string(&episode).unwrap();
    assert!(text.contains(&format!("{PKG}.AddressGroup")));
    assert!(text.contains(&format!("{PKG}.Versioned")));

    let listing = run(&["episode", episode.to_str().unwrap()]);
    assert!(listing.status.success());
    let stdout = String::from_utf8_lossy(&listing.stdout);
    assert!(stdout.contains("{urn:example:address}AddressGroup"), "{stdout}");
    assert!(stdout.contains("missing"), "{stdout}");

    // Upstream interfaces are not compiled here, so the downstream run only warns.
    let out = dir.path().join("second.json");
    let url = format!("file://{}", episode.display());
    let second = generate(&["--episode", &url], &out);
    assert!(
        second.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&second.stderr)
    );
    let doc = read_json(&out);
    assert!(doc["report"]["model_group_interfaces"].as_array().unwrap().is_empty());
    assert!(doc["report"]["attribute_group_interfaces"].as_array().unwrap().is_empty());
    assert_eq!(doc["report"]["warnings"].as_array().unwrap().len(), 2);
    assert_eq!(
        doc["outline"]["packages"][PKG]["types"]["AddressGroup"]["tag"],
        "class"
    );
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(stderr.contains("warning:"), "stderr: {stderr}");
}

#[test]
fn missing_placeholder_class_fails_with_a_located_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc: Value = serde_json::from_str(&fs::read_to_string(demo_input()).unwrap()).unwrap();
    let classes = doc["outline"]["classes"].as_object_mut().unwrap();
    classes.remove(&format!("{PKG}.AddressGroup"));
    let types = doc["outline"]["packages"][PKG]["types"].as_object_mut().unwrap();
    types.remove("AddressGroup");

    let input = dir.path().join("broken.json");
    fs::write(&input, serde_json::to_string(&doc).unwrap()).unwrap();
    let output = run(&["generate", "--input", input.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("address.xsd:12:3"), "stderr: {stderr}");
    assert!(stderr.contains("AddressGroup"), "stderr: {stderr}");
}
