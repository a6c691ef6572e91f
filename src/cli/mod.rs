//! # CLI Module
//!
//! This module provides the command-line interface layer for songferry, the
//! cloud music courier. It implements all user-facing commands and
//! coordinates between the catalog client, the persisted caches and the
//! delivery pipeline.
//!
//! ## Overview
//!
//! The CLI module is the stand-in for a host chat runtime: it parses
//! nothing itself (the binary's clap router hands it already-parsed
//! arguments) and owns all user interaction, progress feedback and error
//! presentation. The commands cover:
//!
//! - **Searching**: merged catalog + personal-library keyword search with
//!   per-conversation result caching
//! - **Playback delivery**: resolving a stored ordinal or fresh keyword to
//!   a track and ferrying the audio to the requester
//! - **Cloud library**: listing, refreshing, clearing and uploading into
//!   the personal cloud library
//! - **Information**: region, credential and snapshot status
//!
//! ## Command Functions
//!
//! - [`search`] - merged keyword search, stores the conversation session
//! - [`play`] - resolves a selection and runs one delivery
//! - [`cloud_list`] / [`cloud_refresh`] / [`cloud_clear`] - snapshot
//!   management
//! - [`cloud_upload`] - watcher-gated upload with retry and catalog match
//! - [`info`] - various information about application state and data
//!
//! ## Architecture Design
//!
//! The CLI module follows a layered architecture approach:
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Management Layer (Caches) + Delivery Layer (Orchestration)
//!     ↓
//! Catalog Layer (HTTP Integration)
//!     ↓
//! Catalog HTTP API
//! ```
//!
//! ## Error Handling Philosophy
//!
//! Every failure is scoped to the one command that hit it: commands report
//! with `warning!` and return instead of propagating errors upward, and
//! partial results (a search that only reached one source, a library page
//! fetch that broke midway) are still shown when useful.
//!
//! ## The terminal messenger
//!
//! [`TerminalMessenger`] implements the host delivery seam for a plain
//! terminal: announcements print, structured cards and voice clips report
//! the recognized unsupported error (a terminal renders neither), and raw
//! file transfer copies the delivered audio into the working directory. The
//! delivery orchestrator's channel fallback chain therefore runs exactly as
//! it would against a limited chat host.

mod cloud;
mod info;
mod play;
mod search;

use std::path::Path;

use crate::{
    delivery::{ChannelError, Messenger},
    types::SongCard,
};

pub use cloud::{cloud_clear, cloud_list, cloud_refresh, cloud_upload};
pub use info::info;
pub use play::play;
pub use search::search;

/// Host delivery seam for a plain terminal session.
pub struct TerminalMessenger;

impl Messenger for TerminalMessenger {
    async fn send_text(&self, text: &str) -> Result<(), ChannelError> {
        crate::info!("{}", text);
        Ok(())
    }

    async fn send_card(&self, _card: &SongCard) -> Result<(), ChannelError> {
        // a terminal cannot render structured music cards
        Err(ChannelError::Unsupported)
    }

    async fn send_voice(&self, _path: &Path) -> Result<(), ChannelError> {
        Err(ChannelError::Unsupported)
    }

    async fn send_file(&self, path: &Path) -> Result<(), ChannelError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("track.mp3");
        let dest = std::env::current_dir()
            .map_err(|e| ChannelError::Failed(e.to_string()))?
            .join(name);

        async_fs::copy(path, &dest)
            .await
            .map_err(|e| ChannelError::Failed(e.to_string()))?;

        crate::info!("Saved {}", dest.display());
        Ok(())
    }
}
