//! Stamps the binary with a short commit hash and build date for `--version`.

use std::env;
use std::process::Command;

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!hash.is_empty()).then_some(hash)
}

fn main() {
    // Packagers can pin both values; otherwise ask git and the clock
    let commit = env::var("HOPPER_BUILD_COMMIT")
        .ok()
        .or_else(git_short_hash)
        .unwrap_or_else(|| "unknown".to_string());
    let date = env::var("HOPPER_BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());

    println!("cargo:rustc-env=HOPPER_COMMIT={}", commit);
    println!("cargo:rustc-env=HOPPER_DATE={}", date);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=HOPPER_BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=HOPPER_BUILD_DATE");
}
