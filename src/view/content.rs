//! Album and song grid rendering

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::model::{Catalog, PlaybackInfo, UiState};
use super::utils::{render_scrollable_list, truncate_string};
use ratatui::widgets::ListItem;

pub fn render_album_grid(frame: &mut Frame, area: Rect, ui_state: &UiState, catalog: &Catalog) {
    let content_width = area.width.saturating_sub(4) as usize;
    let title_width = content_width.saturating_sub(14);

    let items: Vec<ListItem> = catalog
        .albums
        .iter()
        .enumerate()
        .map(|(i, album)| {
            let style = if i == ui_state.album_cursor {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let count = album.songs.len();
            let noun = if count == 1 { "song" } else { "songs" };
            ListItem::new(format!(
                " {}   {:>2} {}",
                truncate_string(&album.title, title_width),
                count,
                noun
            ))
            .style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Albums ")
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Green));

    render_scrollable_list(frame, area, items, ui_state.album_cursor, block);
}

pub fn render_song_grid(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    catalog: &Catalog,
    album_index: usize,
    playback: &PlaybackInfo,
) {
    let Some(album) = catalog.album(album_index) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Album header
            Constraint::Min(0),    // Songs
        ])
        .split(area);

    let count = album.songs.len();
    let noun = if count == 1 { "song" } else { "songs" };
    let header_text = format!(
        "💿 {}\n {} {} | Enter: Play | Backspace: Back to albums",
        album.title, count, noun
    );
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(header, chunks[0]);

    let content_width = chunks[1].width.saturating_sub(4) as usize;
    let title_width = (content_width.saturating_sub(6) * 55) / 100;
    let artist_width = content_width.saturating_sub(6).saturating_sub(title_width);

    let current_song_id = playback.song.as_ref().map(|s| s.id);

    let items: Vec<ListItem> = album
        .songs
        .iter()
        .enumerate()
        .map(|(i, song)| {
            let is_current = current_song_id == Some(song.id);
            let style = if i == ui_state.song_cursor {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };

            let marker = if is_current { "▶" } else { " " };
            ListItem::new(format!(
                " {} {}   {}",
                marker,
                truncate_string(&song.title, title_width),
                truncate_string(&song.artist, artist_width)
            ))
            .style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Songs ")
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Green));

    render_scrollable_list(frame, chunks[1], items, ui_state.song_cursor, block);
}
