//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use super::catalog::{Album, Catalog, Song};
use super::playback::{PlaybackInfo, PlaybackTiming};
use super::types::UiState;

/// Main application model containing all state
pub struct AppModel {
    catalog: Arc<Catalog>,
    current_song: Arc<Mutex<Option<Song>>>,
    timing: Arc<Mutex<PlaybackTiming>>,
    pub ui_state: Arc<Mutex<UiState>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            current_song: Arc::new(Mutex::new(None)),
            timing: Arc::new(Mutex::new(PlaybackTiming::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Select an album by catalog index. Playback is untouched.
    pub async fn select_album(&self, index: usize) {
        if index >= self.catalog.album_count() {
            tracing::warn!(index, "Ignoring out-of-range album selection");
            return;
        }
        let mut ui = self.ui_state.lock().await;
        ui.selected_album = Some(index);
        ui.song_cursor = 0;
    }

    /// Back to the album grid. Playback is untouched.
    pub async fn clear_album(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.selected_album = None;
    }

    pub async fn selected_album_index(&self) -> Option<usize> {
        self.ui_state.lock().await.selected_album
    }

    pub async fn selected_album(&self) -> Option<Album> {
        let index = self.ui_state.lock().await.selected_album?;
        self.catalog.album(index).cloned()
    }

    pub async fn move_selection_up(&self) {
        let mut ui = self.ui_state.lock().await;
        match ui.selected_album {
            None => {
                if ui.album_cursor > 0 {
                    ui.album_cursor -= 1;
                }
            }
            Some(_) => {
                if ui.song_cursor > 0 {
                    ui.song_cursor -= 1;
                }
            }
        }
    }

    pub async fn move_selection_down(&self) {
        let mut ui = self.ui_state.lock().await;
        match ui.selected_album {
            None => {
                if ui.album_cursor + 1 < self.catalog.album_count() {
                    ui.album_cursor += 1;
                }
            }
            Some(index) => {
                let songs = self.catalog.album(index).map(|a| a.songs.len()).unwrap_or(0);
                if ui.song_cursor + 1 < songs {
                    ui.song_cursor += 1;
                }
            }
        }
    }

    pub async fn album_under_cursor(&self) -> Option<usize> {
        let ui = self.ui_state.lock().await;
        if ui.album_cursor < self.catalog.album_count() {
            Some(ui.album_cursor)
        } else {
            None
        }
    }

    pub async fn song_under_cursor(&self) -> Option<Song> {
        let ui = self.ui_state.lock().await;
        let album = self.catalog.album(ui.selected_album?)?;
        album.songs.get(ui.song_cursor).cloned()
    }

    // ========================================================================
    // Playback state
    // ========================================================================

    pub async fn set_current_song(&self, song: Song) {
        *self.current_song.lock().await = Some(song);
    }

    pub async fn current_song(&self) -> Option<Song> {
        self.current_song.lock().await.clone()
    }

    /// A new load is starting: position and duration go back to zero and any
    /// in-progress scrub is abandoned.
    pub async fn begin_load(&self) {
        self.timing.lock().await.reset_for_load();
        self.ui_state.lock().await.pending_seek_ms = None;
    }

    pub async fn apply_status(&self, position_ms: u64, duration_ms: u64, is_playing: bool) {
        let mut timing = self.timing.lock().await;
        timing.apply_status(position_ms, duration_ms, is_playing);
    }

    pub async fn set_playing(&self, is_playing: bool) {
        self.timing.lock().await.set_playing(is_playing);
    }

    pub async fn is_playing(&self) -> bool {
        self.timing.lock().await.is_playing
    }

    pub async fn duration_ms(&self) -> u64 {
        self.timing.lock().await.duration_ms
    }

    pub async fn get_playback_info(&self) -> PlaybackInfo {
        let song = self.current_song.lock().await.clone();
        let timing = self.timing.lock().await;
        let pending_seek_ms = self.ui_state.lock().await.pending_seek_ms;

        PlaybackInfo {
            song,
            position_ms: timing.current_position_ms(),
            duration_ms: timing.duration_ms,
            is_playing: timing.is_playing,
            pending_seek_ms,
        }
    }

    // ========================================================================
    // Scrub gesture
    // ========================================================================

    /// Start a scrub at the current position. No-op while nothing seekable
    /// is loaded; no-op if a scrub is already in progress.
    pub async fn begin_seek(&self) {
        if self.current_song.lock().await.is_none() {
            return;
        }
        let timing = self.timing.lock().await;
        if timing.duration_ms == 0 {
            return;
        }
        let position = timing.current_position_ms();
        drop(timing);

        let mut ui = self.ui_state.lock().await;
        if ui.pending_seek_ms.is_none() {
            ui.pending_seek_ms = Some(position);
        }
    }

    pub async fn adjust_pending_seek(&self, delta_ms: i64) {
        let duration = self.timing.lock().await.duration_ms;
        let mut ui = self.ui_state.lock().await;
        if let Some(target) = ui.pending_seek_ms {
            let next = (target as i64 + delta_ms).clamp(0, duration as i64);
            ui.pending_seek_ms = Some(next as u64);
        }
    }

    pub async fn take_pending_seek(&self) -> Option<u64> {
        self.ui_state.lock().await.pending_seek_ms.take()
    }

    pub async fn cancel_pending_seek(&self) {
        self.ui_state.lock().await.pending_seek_ms = None;
    }

    pub async fn has_pending_seek(&self) -> bool {
        self.ui_state.lock().await.pending_seek_ms.is_some()
    }

    // ========================================================================
    // Errors, help, quit
    // ========================================================================

    pub async fn set_error(&self, message: String) {
        let mut ui = self.ui_state.lock().await;
        ui.error_message = Some(message);
        ui.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.error_message = None;
        ui.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut ui = self.ui_state.lock().await;
        if let Some(timestamp) = ui.error_timestamp {
            if timestamp.elapsed().as_secs() > 5 {
                ui.error_message = None;
                ui.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> AppModel {
        AppModel::new(Arc::new(Catalog::builtin()))
    }

    #[tokio::test]
    async fn selecting_an_album_resets_the_song_cursor() {
        let model = model();
        model.select_album(0).await;
        model.move_selection_down().await;
        let ui = model.get_ui_state().await;
        assert_eq!(ui.song_cursor, 1);

        model.clear_album().await;
        model.select_album(0).await;
        assert_eq!(model.get_ui_state().await.song_cursor, 0);
    }

    #[tokio::test]
    async fn out_of_range_album_selection_is_ignored() {
        let model = model();
        model.select_album(99).await;
        assert_eq!(model.selected_album_index().await, None);
    }

    #[tokio::test]
    async fn cursor_movement_clamps_at_list_ends() {
        let model = model();
        model.move_selection_up().await;
        assert_eq!(model.get_ui_state().await.album_cursor, 0);

        for _ in 0..10 {
            model.move_selection_down().await;
        }
        let last = model.catalog().album_count() - 1;
        assert_eq!(model.get_ui_state().await.album_cursor, last);
    }

    #[tokio::test]
    async fn scrub_cannot_start_before_anything_is_loaded() {
        let model = model();
        model.begin_seek().await;
        assert!(!model.has_pending_seek().await);
    }

    #[tokio::test]
    async fn scrub_target_is_clamped_to_the_song_duration() {
        let model = model();
        let song = model.catalog().song_by_id(1).unwrap().clone();
        model.set_current_song(song).await;
        model.apply_status(10_000, 30_000, true).await;

        model.begin_seek().await;
        model.adjust_pending_seek(90_000).await;
        assert_eq!(model.take_pending_seek().await, Some(30_000));
    }
}
