//! Source acquisition: normalize uploads, local paths and video URLs
//! into an owned local media file.

pub mod download;
pub mod input;

pub use download::{MediaDownloader, MockDownloader, YtDlpDownloader};
pub use input::{LocalMediaHandle, MediaInput, acquire, classify_input};
