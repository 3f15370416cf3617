//! Compile-time build information.

/// Short commit hash, or "unknown" outside a git checkout.
pub const BUILD_COMMIT: &str = env!("HOPPER_COMMIT");
pub const BUILD_DATE: &str = env!("HOPPER_DATE");

/// One-line version string for `--version`.
pub fn version_line() -> String {
    format!(
        "hopper {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
