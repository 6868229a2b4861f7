#![cfg(feature = "cli")]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sprite-normalize"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn write_sprite(path: &Path) {
    let img = RgbaImage::from_fn(30, 20, |x, _| {
        if x < 15 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([10, 20, 30, 255])
        }
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

fn batch_dir() -> TempDir {
    let input = TempDir::new().unwrap();
    write_sprite(&input.path().join("a.png"));
    write_sprite(&input.path().join("b.png"));
    fs::write(input.path().join("c.png"), b"not a png").unwrap();
    input
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn corrupt_file_is_reported_and_exit_code_is_zero() {
    let input = batch_dir();
    let output = TempDir::new().unwrap();

    let out = run(&[
        "-i",
        path_arg(input.path()),
        "-o",
        path_arg(output.path()),
        "-s",
        "16",
    ]);

    assert_eq!(out.status.code(), Some(0));
    let lines = stdout_lines(&out);
    let processed: Vec<_> = lines.iter().filter(|l| l.starts_with("Processed: ")).collect();
    let failed: Vec<_> = lines
        .iter()
        .filter(|l| l.starts_with("Failed to process "))
        .collect();

    assert_eq!(processed.len(), 2, "{lines:?}");
    assert!(processed[0].contains("a.png -> ") && processed[0].ends_with("a.png"));
    assert!(processed[1].contains("b.png -> ") && processed[1].ends_with("b.png"));
    assert_eq!(failed.len(), 1, "{lines:?}");
    assert!(failed[0].contains("c.png: "));
    assert_eq!(
        lines.last().map(String::as_str),
        Some("[Summary] Processed: 2, Failed: 1 (Total: 3)")
    );

    assert!(output.path().join("a.png").is_file());
    assert!(output.path().join("b.png").is_file());
}

#[test]
fn missing_input_directory_exits_with_one() {
    let output = TempDir::new().unwrap();
    let missing = output.path().join("nowhere");

    let out = run(&["-i", path_arg(&missing), "-o", path_arg(output.path())]);

    assert_eq!(out.status.code(), Some(1));
    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].starts_with("Input directory does not exist: "));
    assert!(lines[0].ends_with("nowhere"));
}

#[test]
fn empty_input_reports_no_pngs() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let out_dir = output.path().join("created");

    let out = run(&["-i", path_arg(input.path()), "-o", path_arg(&out_dir)]);

    assert_eq!(out.status.code(), Some(0));
    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].starts_with("No PNG files found in "));
    assert!(out_dir.is_dir());
}

#[test]
fn subnormal_smoothing_does_not_abort_the_batch() {
    let input = batch_dir();
    let output = TempDir::new().unwrap();

    let out = run(&[
        "-i",
        path_arg(input.path()),
        "-o",
        path_arg(output.path()),
        "-s",
        "16",
        "-m",
        "1e-40",
    ]);

    assert_eq!(out.status.code(), Some(0));
    let lines = stdout_lines(&out);
    assert_eq!(
        lines.iter().filter(|l| l.starts_with("Processed: ")).count(),
        2,
        "{lines:?}"
    );
}

#[test]
fn quiet_mode_prints_only_failures() {
    let input = batch_dir();
    let output = TempDir::new().unwrap();

    let out = run(&[
        "-q",
        "-i",
        path_arg(input.path()),
        "-o",
        path_arg(output.path()),
        "-s",
        "16",
    ]);

    assert_eq!(out.status.code(), Some(0));
    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].starts_with("Failed to process "));
}

#[test]
fn non_numeric_tolerance_is_coerced_with_a_warning() {
    let input = TempDir::new().unwrap();
    write_sprite(&input.path().join("a.png"));
    let output = TempDir::new().unwrap();

    let out = run(&[
        "-i",
        path_arg(input.path()),
        "-o",
        path_arg(output.path()),
        "-s",
        "16",
        "-t",
        "abc",
    ]);

    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("not a number"));
    let written = image::open(output.path().join("a.png")).unwrap().to_rgba8();
    assert!(written.pixels().all(|p| p[3] == 0));
}
