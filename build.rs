//! Embeds the build version as `ENVSETUP_VERSION`.
use std::process::Command;

fn main() {
    // ENVSETUP_VERSION wins (release builds); local builds use git describe.
    if let Ok(version) = std::env::var("ENVSETUP_VERSION") {
        println!("cargo:rustc-env=ENVSETUP_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=ENVSETUP_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=ENVSETUP_VERSION");
}
