//! Stamps the binary's startup banner with a version and commit.
//!
//! - GNOB_VERSION: overrides CARGO_PKG_VERSION
//! - GNOB_GIT_SHA: overrides the short SHA from GITHUB_SHA or `git rev-parse`

use std::env;
use std::process::Command;

fn main() {
    // Version: explicit override, else the crate version
    let version = env::var("GNOB_VERSION")
        .or_else(|_| env::var("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| "unknown".into());

    // Git SHA: explicit override, else CI's full SHA shortened, else local git
    let git_sha = env::var("GNOB_GIT_SHA")
        .or_else(|_| env::var("GITHUB_SHA").map(|sha| sha.chars().take(7).collect()))
        .unwrap_or_else(|_| local_git_sha().unwrap_or_else(|| "unknown".into()));

    println!("cargo:rustc-env=GNOB_VERSION={version}");
    println!("cargo:rustc-env=GNOB_GIT_SHA={git_sha}");

    // Rebuild if these change
    for var in ["GNOB_VERSION", "GNOB_GIT_SHA", "GITHUB_SHA"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
}

fn local_git_sha() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|sha| sha.trim().to_string())
}
