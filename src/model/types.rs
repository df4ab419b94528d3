//! Core type definitions for the application

use std::time::Instant;

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    /// Index into the catalog's album list. None means the album grid is shown.
    pub selected_album: Option<usize>,
    pub album_cursor: usize,
    pub song_cursor: usize,
    /// Target of an in-progress scrub gesture. A seek is only issued on commit.
    pub pending_seek_ms: Option<u64>,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            selected_album: None,
            album_cursor: 0,
            song_cursor: 0,
            pending_seek_ms: None,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}
