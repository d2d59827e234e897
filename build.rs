//! Stamps the binary with the source revision and build time shown by
//! `shellide --version` and the pane banner.
//!
//! `SOURCE_DATE_EPOCH` pins the timestamp for reproducible builds; without git
//! the revision is "unknown".

use std::env;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const REVISION_VAR: &str = "SHELLIDE_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "SHELLIDE_BUILD_TIMESTAMP";

fn main() {
    for path in [".git/HEAD", ".git/index"] {
        println!("cargo:rerun-if-changed={path}");
    }
    for var in [REVISION_VAR, TIMESTAMP_VAR, "SOURCE_DATE_EPOCH"] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let revision = env::var(REVISION_VAR).unwrap_or_else(|_| source_revision());
    let timestamp = env::var(TIMESTAMP_VAR).unwrap_or_else(|_| build_epoch());
    println!("cargo:rustc-env={REVISION_VAR}={revision}");
    println!("cargo:rustc-env={TIMESTAMP_VAR}={timestamp}");
}

/// Short commit, suffixed with `-dirty` for uncommitted edits.
fn source_revision() -> String {
    Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=12"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn build_epoch() -> String {
    let secs = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    format!("unix:{secs}")
}
