//! Exit-status checks against the built `img-webp` binary.

use image::{Rgb, RgbImage};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn img_webp() -> Command {
    Command::new(env!("CARGO_BIN_EXE_img-webp"))
}

#[test]
fn missing_directory_exits_with_1() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("data").join("images");

    let log_dir = TempDir::new().unwrap();

    let output = img_webp()
        .arg("--dir")
        .arg(&missing)
        .env("TMPDIR", log_dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches(&missing.display().to_string()).count(),
        1,
        "stderr: {}",
        stderr
    );
    assert!(output.stdout.is_empty());
    assert!(!temp.path().join("data").exists());
    assert_eq!(fs::read_dir(log_dir.path()).unwrap().count(), 0);
}

#[test]
fn per_file_failures_still_exit_with_0() {
    let temp = TempDir::new().unwrap();
    RgbImage::from_pixel(8, 8, Rgb([1, 2, 3]))
        .save(temp.path().join("a.jpg"))
        .unwrap();
    fs::write(temp.path().join("c.jpeg"), b"garbage").unwrap();

    let log_dir = TempDir::new().unwrap();

    let output = img_webp()
        .arg("--dir")
        .arg(temp.path())
        .env("TMPDIR", log_dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("a.jpg"), "stdout: {}", stdout);
    assert!(stdout.contains("c.jpeg"), "stdout: {}", stdout);
    assert!(stdout.contains("Failed: 1"), "stdout: {}", stdout);
    assert!(temp.path().join("a.webp").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("c.jpeg"), "stderr: {}", stderr);
}
