/*!
 * Integration tests driving the flatdump binary
 */

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn flatdump(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_flatdump"))
        .args(args)
        .output()
        .expect("failed to run flatdump binary")
}

fn write_file(path: &Path, content: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_folder_run() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("shop");
    let out = temp_dir.path().join("out");
    write_file(&input.join("cart").join("Cart.java"), b"class Cart {}");
    write_file(&input.join("Shop.java"), b"class Shop {}");

    let output = flatdump(&[
        input.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Operation completed"));
    assert!(stdout.contains("cart.txt"));

    assert_eq!(
        fs::read_to_string(out.join("shop").join("cart.txt")).unwrap(),
        "File: Cart.java\n\nclass Cart {}\n\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("shop").join("shop.txt")).unwrap(),
        "File: Shop.java\n\nclass Shop {}\n\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("shop").join("folder_structure.txt")).unwrap(),
        "[File] Shop.java\n[Folder] cart\n  [File] Cart.java\n"
    );
}

#[test]
fn test_single_file_run() {
    let temp_dir = tempdir().unwrap();
    let file = temp_dir.path().join("Foo.java");
    let out = temp_dir.path().join("out");
    write_file(&file, b"class Foo {}");

    let output = flatdump(&["-q", file.to_str().unwrap(), "-o", out.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(out.join("single_java_file.txt")).unwrap(),
        "File: Foo.java\n\nclass Foo {}"
    );
}

#[test]
fn test_partial_failure_exit_code() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("proj");
    let out = temp_dir.path().join("out");
    write_file(&input.join("Good.java"), b"class Good {}");
    write_file(&input.join("Bad.java"), &[0xff, 0xfe]);

    let output = flatdump(&[input.to_str().unwrap(), "-o", out.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FAILURES"));
    assert!(stdout.contains("Operation completed"));
    assert!(out.join("proj").join("proj.txt").exists());
}

#[test]
fn test_missing_input_fails() {
    let temp_dir = tempdir().unwrap();
    let out = temp_dir.path().join("out");

    let output = flatdump(&[
        temp_dir.path().join("nope").to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Path not found"));
    assert!(!out.exists());
}

#[test]
fn test_json_report() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("lib");
    let out = temp_dir.path().join("out");
    write_file(&input.join("src").join("lib.rs"), b"pub fn f() {}");

    let output = flatdump(&[
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "-e",
        "rs",
        "--format",
        "json",
    ]);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "folder");
    assert_eq!(report["artifacts"].as_array().unwrap().len(), 2);
    assert_eq!(
        fs::read_to_string(out.join("lib").join("src.txt")).unwrap(),
        "File: lib.rs\n\npub fn f() {}\n\n"
    );
}

#[test]
fn test_generate_completions() {
    let output = flatdump(&["--generate", "bash"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("flatdump"));
}
