//! System diagnostics and dependency checking.
//!
//! Verifies that external tools and model files are in place before a
//! transcription job needs them.

use crate::defaults;
use crate::models::catalog::list_models;
use crate::models::download::is_model_installed;
use std::process::Command;

/// Result of a dependency check.
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Tool is installed and working
    Ok,
    /// Tool is not found
    NotFound,
    /// Tool is found but has issues
    Warning(String),
}

/// Check if a command exists and is executable.
fn check_command(command: &str) -> CheckResult {
    match Command::new(command).arg("--version").output() {
        Ok(output) if output.status.success() => CheckResult::Ok,
        Ok(_) => CheckResult::Warning(format!("'{}' found but --version failed", command)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckResult::NotFound,
        Err(e) => CheckResult::Warning(format!("Error checking '{}': {}", command, e)),
    }
}

/// Run all dependency checks and print results.
pub fn check_dependencies(download_program: &str) {
    println!("Checking dependencies...\n");

    // URL downloads need yt-dlp (or a configured replacement)
    print!("{} (URL downloads): ", download_program);
    match check_command(download_program) {
        CheckResult::Ok => println!("✓ OK"),
        CheckResult::NotFound => {
            println!("✗ NOT FOUND");
            println!("  URL inputs will fail. Install with: pip install yt-dlp");
        }
        CheckResult::Warning(msg) => println!("⚠ WARNING: {}", msg),
    }

    // Speech recognition backend
    print!("speech recognition: ");
    if cfg!(feature = "whisper") {
        println!("✓ OK (whisper, {} backend)", defaults::gpu_backend());
    } else {
        println!("✗ NOT COMPILED");
        println!("  Rebuild with the default features to enable transcription.");
    }

    // Installed models
    println!("\nInstalled models:");
    let mut any = false;
    for model in list_models() {
        if is_model_installed(model.tier) {
            println!("  ✓ {} ({}MB)", model.tier, model.size_mb);
            any = true;
        }
    }
    if !any {
        println!("  (none)");
        println!("  Install one with: clipscribe models install {}", defaults::DEFAULT_MODEL);
    }
}
