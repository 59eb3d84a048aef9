//! Command-line interface for clipscribe
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Transcribe video and audio files or URLs with Whisper
#[derive(Parser, Debug)]
#[command(
    name = "clipscribe",
    version,
    about = "Transcribe video and audio files or URLs with Whisper"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Media file path or video URL to transcribe
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Whisper model tier (tiny, base, small, medium, large)
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Compute device (auto, cpu, gpu)
    #[arg(long, value_name = "DEVICE")]
    pub device: Option<String>,

    /// Language code for transcription (default: auto-detect). Examples: auto, en, de, es, fr
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Write the transcript to this file instead of the derived name
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the transcript to stdout only, don't write a file
    #[arg(long)]
    pub stdout: bool,

    /// Print timestamped segments alongside the transcript
    #[arg(long)]
    pub timestamps: bool,

    /// Prevent automatic model download if the configured model is missing
    #[arg(long)]
    pub no_download: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage Whisper models
    Models {
        /// Action to perform
        #[command(subcommand)]
        action: ModelsAction,
    },

    /// Check system dependencies
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Model management actions
#[derive(Subcommand, Debug)]
pub enum ModelsAction {
    /// List available models
    List,
    /// Download and install a model
    Install {
        /// Model tier (tiny, base, small, medium, large)
        name: String,
    },
}
