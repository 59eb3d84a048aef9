//! Build script: embeds the git hash and pre-checks GPU toolkits.
//!
//! When a GPU feature is enabled, verify the toolkit exists before
//! whisper-rs-sys starts a long compile that would fail anyway.

use std::process::Command;

fn main() {
    // Embed git short hash for version string
    if let Ok(output) = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        && output.status.success()
    {
        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=GIT_HASH={}", hash);
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");

    if cfg!(feature = "cuda") {
        check_cuda();
    }
    if cfg!(feature = "vulkan") {
        check_vulkan();
    }
}

fn check_cuda() {
    match Command::new("nvcc").arg("--version").output() {
        Ok(out) if out.status.success() => {
            let text = String::from_utf8_lossy(&out.stdout);
            match parse_cuda_version(&text) {
                Some((major, minor)) => {
                    println!("cargo::warning=CUDA toolkit {}.{} detected", major, minor)
                }
                None => println!("cargo::warning=CUDA toolkit detected (version unknown)"),
            }
        }
        _ => {
            panic!(
                "`nvcc` not found — the CUDA toolkit is not installed.\n\
                 Install it from https://developer.nvidia.com/cuda-downloads\n\
                 or build without CUDA: cargo build --release"
            );
        }
    }
}

/// Parse "release X.Y" from nvcc --version output.
fn parse_cuda_version(text: &str) -> Option<(u32, u32)> {
    // nvcc output: "Cuda compilation tools, release 12.4, V12.4.131"
    let release_pos = text.find("release ")?;
    let after = &text[release_pos + 8..];
    let comma = after.find(',')?;
    let mut parts = after[..comma].split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    Some((major, minor))
}

fn check_vulkan() {
    if Command::new("vulkaninfo")
        .arg("--summary")
        .output()
        .is_err()
    {
        panic!(
            "`vulkaninfo` not found — the Vulkan SDK is not installed.\n\
             Install it from https://vulkan.lunarg.com/\n\
             or build without Vulkan: cargo build --release"
        );
    }
    println!("cargo::warning=Vulkan SDK detected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cuda_version_standard() {
        let text = "Cuda compilation tools, release 12.4, V12.4.131";
        assert_eq!(parse_cuda_version(text), Some((12, 4)));
    }

    #[test]
    fn parse_cuda_version_no_match() {
        assert_eq!(parse_cuda_version("no version here"), None);
    }
}
