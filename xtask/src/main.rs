//! `cargo xtask` for shimdb.
//!
//! `verify` runs everything CI runs, including the Kani proofs when
//! cargo-kani is installed and a check that the proof crate's copied
//! layout constants still match the library. `check` is the fast subset.

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

type Step = (&'static str, fn() -> Result<()>);

fn main() -> Result<()> {
    match env::args().nth(1).as_deref() {
        Some("verify") => run_steps(&[
            ("invariant markers", check_invariant_markers),
            ("tests", tests),
            ("clippy", clippy),
            ("kani proofs", kani),
            ("proof constants", verify_constants),
        ]),
        Some("check") => run_steps(&[
            ("cargo check", cargo_check),
            ("tests", tests),
            ("clippy", clippy),
        ]),
        Some("test") => cargo(&["test"]),
        Some("kani") => kani(),
        Some("bench") => cargo(&["bench"]),
        _ => {
            eprintln!("usage: cargo xtask <verify|check|test|kani|bench>");
            Ok(())
        }
    }
}

fn run_steps(steps: &[Step]) -> Result<()> {
    for (i, (label, step)) in steps.iter().enumerate() {
        println!("[{}/{}] {}", i + 1, steps.len(), label);
        step().with_context(|| format!("step failed: {}", label))?;
    }
    println!("✓ {} steps passed", steps.len());
    Ok(())
}

fn cargo_check() -> Result<()> {
    cargo(&["check"])
}

fn tests() -> Result<()> {
    cargo(&["test", "--quiet"])
}

fn clippy() -> Result<()> {
    cargo(&["clippy", "--quiet", "--", "-D", "warnings"])
}

/// Run the standalone Kani crate, skipping if cargo-kani is not installed.
fn kani() -> Result<()> {
    let installed = Command::new("cargo")
        .args(["kani", "--version"])
        .output()
        .is_ok_and(|o| o.status.success());
    if !installed {
        println!("  cargo-kani not installed, skipping");
        return Ok(());
    }

    let status = Command::new("cargo")
        .arg("kani")
        .current_dir(project_root()?.join("kani-proofs"))
        .status()
        .context("Failed to run cargo kani")?;
    if !status.success() {
        bail!("Kani proofs failed");
    }
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

fn check_invariant_markers() -> Result<()> {
    let root = project_root()?;
    let src_dir = root.join("src");

    let output = Command::new("grep")
        .args(["-r", "INVARIANT:", "--include=*.rs"])
        .current_dir(&src_dir)
        .output()
        .context("Failed to run grep")?;

    let count = output.stdout.split(|&b| b == b'\n').filter(|l| !l.is_empty()).count();

    if count < 5 {
        bail!(
            "expected at least 5 INVARIANT markers under src/, found {}",
            count
        );
    }

    Ok(())
}

/// The Kani crate copies size constants; make sure they did not drift.
fn verify_constants() -> Result<()> {
    let root = project_root()?;

    let header_rs = std::fs::read_to_string(root.join("src/binary/header.rs"))
        .context("Failed to read header.rs")?;
    let kani_rs = std::fs::read_to_string(root.join("kani-proofs/src/lib.rs"))
        .context("Failed to read kani-proofs/src/lib.rs")?;

    for name in ["HEADER_SIZE", "LIST_HEADER_SIZE"] {
        let crate_value = extract_const(&header_rs, name)
            .with_context(|| format!("{} missing from header.rs", name))?;
        let kani_value = extract_const(&kani_rs, name)
            .with_context(|| format!("{} missing from kani-proofs", name))?;
        if crate_value != kani_value {
            bail!(
                "{}: crate has {}, kani-proofs has {}",
                name,
                crate_value,
                kani_value
            );
        }
    }

    Ok(())
}

/// Value of `pub const NAME: usize = N;` in `content`.
fn extract_const(content: &str, name: &str) -> Option<usize> {
    let needle = format!("pub const {}: usize = ", name);
    let start = content.find(&needle)? + needle.len();
    let rest = &content[start..];
    let end = rest.find(';')?;
    rest[..end].trim().parse().ok()
}
