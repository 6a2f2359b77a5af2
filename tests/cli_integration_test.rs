//! CLI integration tests: run the archdeps binary against a metadata file written to a temp dir.
//! Uses CARGO_BIN_EXE_archdeps when set (e.g. by `cargo test`).

mod common;

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use archdeps::domain::metadata::MetadataSet;
use common::fixtures::*;

fn bin() -> Option<PathBuf> {
    std::env::var_os("CARGO_BIN_EXE_archdeps").map(PathBuf::from)
}

fn write_metadata(dir: &Path) -> PathBuf {
    let cart = TypeBuilder::class("Shop.Cart")
        .field("_total", "System.Decimal")
        .property("Total", "System.Decimal", true, false)
        .method(getter(
            "Shop.Cart",
            "Total",
            "System.Decimal",
            vec![load_field("Shop.Cart", "_total", "System.Decimal"), ret()],
        ))
        .method(with_body(
            method("Shop.Cart", "Checkout", VOID, &[]),
            vec![call("Shop.Billing", "Charge", VOID, &[]), ret()],
        ))
        .build();
    let billing = TypeBuilder::class("Shop.Billing")
        .method(with_body(
            method("Shop.Billing", "Charge", VOID, &[]),
            vec![call("Shop.Cart", "Checkout", VOID, &[]), ret()],
        ))
        .build();
    let metadata = MetadataSet {
        assemblies: vec![assembly("Shop", vec![cart, billing])],
    };

    let path = dir.join("metadata.json");
    std::fs::write(&path, serde_json::to_string_pretty(&metadata).unwrap()).unwrap();
    path
}

fn run(bin: &Path, args: &[&str]) -> Output {
    Command::new(bin).args(args).output().expect("run archdeps")
}

#[test]
fn test_cli_help_succeeds() {
    let Some(bin) = bin() else {
        eprintln!("Skipping CLI test: CARGO_BIN_EXE not set");
        return;
    };
    let out = run(&bin, &["--help"]);
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("archdeps"));
    assert!(stdout.contains("summary") || stdout.contains("Summary"));
}

#[test]
fn test_cli_load_error_when_input_missing() {
    let Some(bin) = bin() else {
        eprintln!("Skipping CLI test: CARGO_BIN_EXE not set");
        return;
    };
    let out = run(&bin, &["nonexistent_metadata_12345.json", "summary"]);
    assert!(!out.status.success(), "expected failure when input missing");
}

#[test]
fn test_cli_summary_json() {
    let Some(bin) = bin() else {
        eprintln!("Skipping CLI test: CARGO_BIN_EXE not set");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let input = write_metadata(dir.path());

    let out = run(&bin, &[input.to_str().unwrap(), "summary", "--json"]);
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["type_count"], 4); // Cart, Billing, System.Decimal, System.Void
    assert_eq!(summary["stub_type_count"], 2);
    assert_eq!(summary["stats"]["linked_accessors"], 1);
    assert_eq!(summary["stats"]["backing_fields_linked"], 1);
}

#[test]
fn test_cli_member_shows_property_links() {
    let Some(bin) = bin() else {
        eprintln!("Skipping CLI test: CARGO_BIN_EXE not set");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let input = write_metadata(dir.path());

    let out = run(&bin, &[input.to_str().unwrap(), "member", "Shop.Cart::Total", "--json"]);
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let member: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(member["member_kind"], "property");
    assert_eq!(member["property"]["getter"], "Shop.Cart::get_Total()");
    assert_eq!(member["property"]["backing_field"], "Shop.Cart::_total");
}

#[test]
fn test_cli_member_not_found() {
    let Some(bin) = bin() else {
        eprintln!("Skipping CLI test: CARGO_BIN_EXE not set");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let input = write_metadata(dir.path());

    let out = run(&bin, &[input.to_str().unwrap(), "member", "Shop.Cart::Missing()"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not found"), "stderr: {}", stderr);
}

#[test]
fn test_cli_cycles_human_output() {
    let Some(bin) = bin() else {
        eprintln!("Skipping CLI test: CARGO_BIN_EXE not set");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let input = write_metadata(dir.path());

    let out = run(&bin, &[input.to_str().unwrap(), "cycles"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Shop.Cart <-> Shop.Billing"), "stdout: {}", stdout);

    let out = run(&bin, &[input.to_str().unwrap(), "cycles", "--no-backwards"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("No type dependency cycles"));
}
