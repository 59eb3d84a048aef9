//! Whisper model tiers and their ggml file metadata.

use crate::error::ClipscribeError;
use std::fmt;
use std::str::FromStr;

/// Quality/speed tier of the Whisper model.
///
/// Tiers trade accuracy for speed and memory: `Tiny` is fastest and least
/// accurate, `Large` is slowest and most accurate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelTier {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelTier {
    /// All tiers, smallest first.
    pub const ALL: &[ModelTier] = &[
        ModelTier::Tiny,
        ModelTier::Base,
        ModelTier::Small,
        ModelTier::Medium,
        ModelTier::Large,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Tiny => "tiny",
            ModelTier::Base => "base",
            ModelTier::Small => "small",
            ModelTier::Medium => "medium",
            ModelTier::Large => "large",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelTier {
    type Err = ClipscribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tiny" => Ok(ModelTier::Tiny),
            "base" => Ok(ModelTier::Base),
            "small" => Ok(ModelTier::Small),
            "medium" => Ok(ModelTier::Medium),
            "large" => Ok(ModelTier::Large),
            other => Err(ClipscribeError::InvalidConfiguration {
                key: "model".to_string(),
                message: format!(
                    "unknown model tier '{other}' (expected tiny, base, small, medium or large)"
                ),
            }),
        }
    }
}

/// Metadata for one ggml Whisper model file.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub tier: ModelTier,
    /// File stem on HuggingFace ("large" resolves to the v3 weights).
    pub file_stem: &'static str,
    /// Model size in megabytes.
    pub size_mb: u32,
    /// SHA-1 checksum for integrity verification.
    pub sha1: &'static str,
}

impl ModelInfo {
    pub fn file_name(&self) -> String {
        format!("ggml-{}.bin", self.file_stem)
    }

    pub fn url(&self) -> String {
        format!(
            "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/{}",
            self.file_name()
        )
    }
}

/// Catalog of the ggml Whisper models, one per tier.
pub const MODELS: &[ModelInfo] = &[
    ModelInfo {
        tier: ModelTier::Tiny,
        file_stem: "tiny",
        size_mb: 75,
        sha1: "bd577a113a864445d4c299885e0cb97d4ba92b5f",
    },
    ModelInfo {
        tier: ModelTier::Base,
        file_stem: "base",
        size_mb: 142,
        sha1: "465707469ff3a37a2b9b8d8f89f2f99de7299dac",
    },
    ModelInfo {
        tier: ModelTier::Small,
        file_stem: "small",
        size_mb: 466,
        sha1: "55356645c2b361a969dfd0ef2c5a50d530afd8d5",
    },
    ModelInfo {
        tier: ModelTier::Medium,
        file_stem: "medium",
        size_mb: 1533,
        sha1: "fd9727b6e1217c2f614f9b698455c4ffd82463b4",
    },
    ModelInfo {
        tier: ModelTier::Large,
        file_stem: "large-v3",
        size_mb: 3094,
        sha1: "ad82bf6a9043ceed055076d0fd39f5f186ff8062",
    },
];

/// Look up the catalog entry for a tier.
pub fn get_model(tier: ModelTier) -> &'static ModelInfo {
    MODELS
        .iter()
        .find(|m| m.tier == tier)
        .unwrap_or_else(|| unreachable!("catalog covers every tier"))
}

/// All catalog entries, smallest first.
pub fn list_models() -> &'static [ModelInfo] {
    MODELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parsing_accepts_all_tiers() {
        assert_eq!("tiny".parse::<ModelTier>().unwrap(), ModelTier::Tiny);
        assert_eq!("base".parse::<ModelTier>().unwrap(), ModelTier::Base);
        assert_eq!("small".parse::<ModelTier>().unwrap(), ModelTier::Small);
        assert_eq!("medium".parse::<ModelTier>().unwrap(), ModelTier::Medium);
        assert_eq!("large".parse::<ModelTier>().unwrap(), ModelTier::Large);
    }

    #[test]
    fn test_tier_parsing_is_case_insensitive_and_trims() {
        assert_eq!("  Base ".parse::<ModelTier>().unwrap(), ModelTier::Base);
        assert_eq!("LARGE".parse::<ModelTier>().unwrap(), ModelTier::Large);
    }

    #[test]
    fn test_unknown_tier_is_invalid_configuration() {
        let err = "huge".parse::<ModelTier>().unwrap_err();
        match err {
            ClipscribeError::InvalidConfiguration { key, message } => {
                assert_eq!(key, "model");
                assert!(message.contains("huge"));
            }
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_tier_display_round_trips() {
        for &tier in ModelTier::ALL {
            assert_eq!(tier.to_string().parse::<ModelTier>().unwrap(), tier);
        }
    }

    #[test]
    fn test_catalog_covers_every_tier() {
        for &tier in ModelTier::ALL {
            assert_eq!(get_model(tier).tier, tier);
        }
        assert_eq!(MODELS.len(), ModelTier::ALL.len());
    }

    #[test]
    fn test_large_resolves_to_v3_weights() {
        let info = get_model(ModelTier::Large);
        assert_eq!(info.file_name(), "ggml-large-v3.bin");
    }

    #[test]
    fn test_model_urls_point_at_huggingface() {
        for model in list_models() {
            assert!(model.url().starts_with("https://huggingface.co/"));
            assert!(model.url().ends_with(".bin"));
        }
    }

    #[test]
    fn test_catalog_is_ordered_by_size() {
        for pair in MODELS.windows(2) {
            assert!(pair[0].size_mb < pair[1].size_mb);
        }
    }
}
