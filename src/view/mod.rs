//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Header bar
//! - `content`: Album and song grids
//! - `player_bar`: Bottom player bar with devotional metadata and progress
//! - `overlays`: Modal overlays (error, help)

mod content;
mod layout;
mod overlays;
mod player_bar;
mod utils;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::model::{Catalog, PlaybackInfo, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        playback: &PlaybackInfo,
        ui_state: &UiState,
        catalog: &Catalog,
    ) {
        // The player bar appears once a song has been chosen and then stays,
        // no matter which grid is visible.
        let show_player_bar = playback.song.is_some();
        let constraints = if show_player_bar {
            vec![
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Album or song grid
                Constraint::Length(6), // Player bar
            ]
        } else {
            vec![Constraint::Length(3), Constraint::Min(0)]
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(frame.area());

        layout::render_header(frame, chunks[0]);

        match ui_state.selected_album {
            None => content::render_album_grid(frame, chunks[1], ui_state, catalog),
            Some(index) => {
                content::render_song_grid(frame, chunks[1], ui_state, catalog, index, playback)
            }
        }

        if show_player_bar {
            player_bar::render_player_bar(frame, chunks[2], playback);
        }

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
