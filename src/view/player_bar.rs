//! Player bar rendering

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::model::PlaybackInfo;
use super::utils::format_duration;

pub fn render_player_bar(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let Some(song) = &playback.song else {
        return;
    };

    let status_text = if playback.duration_ms == 0 {
        format!(" … {} | {} ", song.title, song.artist)
    } else if playback.is_playing {
        format!(" ▶ {} | {} ", song.title, song.artist)
    } else {
        format!(" ⏸ {} | {} ", song.title, song.artist)
    };

    let controls_info = " Space: Play/Pause | P/N: Prev/Next | ←/→: Scrub ";

    let block = Block::default()
        .borders(Borders::ALL)
        .title(status_text)
        .title_bottom(Line::from(controls_info).right_aligned())
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Meaning
            Constraint::Length(1), // Verse
            Constraint::Min(0),    // Progress gauge
        ])
        .split(inner);

    let meaning = Paragraph::new(format!("💡 {}", song.meaning))
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC));
    frame.render_widget(meaning, chunks[0]);

    let verse = Paragraph::new(format!("📖 {}", song.verse))
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(verse, chunks[1]);

    // While scrubbing, the gauge previews the pending target instead of the
    // live position.
    let (shown_ms, gauge_style, label) = match playback.pending_seek_ms {
        Some(target_ms) => (
            target_ms,
            Style::default().fg(Color::Yellow),
            format!(
                "Seek {} / {} (Enter to go)",
                format_duration(target_ms),
                format_duration(playback.duration_ms)
            ),
        ),
        None => (
            playback.position_ms,
            Style::default().fg(Color::Green),
            format!(
                "{} / {}",
                format_duration(playback.position_ms),
                format_duration(playback.duration_ms)
            ),
        ),
    };

    let ratio = if playback.duration_ms > 0 {
        (shown_ms as f64 / playback.duration_ms as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .gauge_style(gauge_style)
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, chunks[2]);
}
