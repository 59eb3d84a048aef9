//! Compute device selection.
//!
//! The GPU backend is fixed at compile time (whisper.cpp is built with at
//! most one), so device resolution is deterministic: the same binary on
//! the same machine always picks the same device.

use crate::defaults;
use crate::error::ClipscribeError;
use std::fmt;
use std::str::FromStr;

/// Caller preference for where inference runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComputeHint {
    /// Prefer the GPU when this build has one, otherwise CPU.
    #[default]
    Auto,
    /// Force CPU.
    Cpu,
    /// Request the GPU; falls back to CPU when no GPU backend is compiled in.
    Gpu,
}

impl FromStr for ComputeHint {
    type Err = ClipscribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "automatic" => Ok(ComputeHint::Auto),
            "cpu" => Ok(ComputeHint::Cpu),
            "gpu" | "cuda" | "vulkan" => Ok(ComputeHint::Gpu),
            other => Err(ClipscribeError::InvalidConfiguration {
                key: "device".to_string(),
                message: format!("unknown device hint '{other}' (expected auto, cpu or gpu)"),
            }),
        }
    }
}

impl fmt::Display for ComputeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComputeHint::Auto => "auto",
            ComputeHint::Cpu => "cpu",
            ComputeHint::Gpu => "gpu",
        };
        f.write_str(s)
    }
}

/// The resolved compute target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Cpu,
    Gpu,
}

impl Device {
    pub fn use_gpu(&self) -> bool {
        matches!(self, Device::Gpu)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => f.write_str("CPU"),
            Device::Gpu => write!(f, "GPU ({})", defaults::gpu_backend()),
        }
    }
}

/// Resolve a hint to a device, deterministically for this build.
pub fn resolve(hint: ComputeHint) -> Device {
    match hint {
        ComputeHint::Cpu => Device::Cpu,
        ComputeHint::Auto | ComputeHint::Gpu => {
            if defaults::gpu_compiled() {
                Device::Gpu
            } else {
                Device::Cpu
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_parsing() {
        assert_eq!("auto".parse::<ComputeHint>().unwrap(), ComputeHint::Auto);
        assert_eq!("cpu".parse::<ComputeHint>().unwrap(), ComputeHint::Cpu);
        assert_eq!("gpu".parse::<ComputeHint>().unwrap(), ComputeHint::Gpu);
        assert_eq!("CUDA".parse::<ComputeHint>().unwrap(), ComputeHint::Gpu);
        assert!("npu".parse::<ComputeHint>().is_err());
    }

    #[test]
    fn test_unknown_hint_is_invalid_configuration() {
        let err = "npu".parse::<ComputeHint>().unwrap_err();
        assert!(matches!(
            err,
            ClipscribeError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn test_cpu_hint_always_resolves_to_cpu() {
        assert_eq!(resolve(ComputeHint::Cpu), Device::Cpu);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        for &hint in &[ComputeHint::Auto, ComputeHint::Cpu, ComputeHint::Gpu] {
            assert_eq!(resolve(hint), resolve(hint));
        }
    }

    #[test]
    fn test_gpu_hint_falls_back_without_gpu_build() {
        let resolved = resolve(ComputeHint::Gpu);
        if defaults::gpu_compiled() {
            assert_eq!(resolved, Device::Gpu);
        } else {
            assert_eq!(resolved, Device::Cpu);
        }
    }

    #[test]
    fn test_default_hint_is_auto() {
        assert_eq!(ComputeHint::default(), ComputeHint::Auto);
    }
}
