//! Whisper model tiers, catalog and download management.

pub mod catalog;
pub mod download;
