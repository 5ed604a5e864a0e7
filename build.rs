// SPDX-License-Identifier: AGPL-3.0-only
// SPDX-FileCopyrightText: 2025 Steve Clarke <stephenlclarke@mac.com> - https://xyzzy.tools

use std::process::Command;

// Capture build metadata (rustc version, git branch and commit) at build time
// so the binary can report it in --version even outside CI.  CI-provided
// values win over whatever the local checkout says.
fn main() {
    let rustc = rustc_version::version()
        .map(|v| v.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=RUSTC_VERSION={rustc}");

    emit_git_env("REDACTOR_COMMIT", &["rev-parse", "--short", "HEAD"], "0000000");
    emit_git_env("REDACTOR_BRANCH", &["rev-parse", "--abbrev-ref", "HEAD"], "main");
}

/// Expose a git-derived value as a compile-time environment variable,
/// preferring a value already present in the build environment.
fn emit_git_env(name: &str, git_args: &[&str], fallback: &str) {
    let value = std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| git_output(git_args))
        .unwrap_or_else(|| fallback.to_string());
    println!("cargo:rustc-env={name}={value}");
}

fn git_output(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .and_then(|out| {
            if out.status.success() {
                let s = String::from_utf8_lossy(&out.stdout).trim().to_string();
                if s.is_empty() { None } else { Some(s) }
            } else {
                None
            }
        })
}
