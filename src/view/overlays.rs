//! Overlay rendering (error notification, help popup)

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::model::UiState;

/// Centered popup rect, shrunk to fit small terminals.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    let Some(message) = &ui_state.error_message else {
        return;
    };

    let width: u16 = 52;
    // One row per wrapped line of the message, plus the borders.
    let text_width = width.saturating_sub(4).max(1) as usize;
    let lines = message.chars().count().div_ceil(text_width).max(1) as u16;
    let area = popup_area(frame.area(), width, lines + 2);

    frame.render_widget(Clear, area);

    let popup = Paragraph::new(message.as_str())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error (Esc to dismiss) ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(popup, area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let keybindings = [
        ("", "── Navigation ──"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Open album / Play song"),
        ("Backspace / Esc", "Back to albums"),
        ("", ""),
        ("", "── Playback ──"),
        ("Space", "Play / Pause"),
        ("N", "Next song"),
        ("P", "Previous song"),
        ("← / →", "Scrub (Enter seeks, Esc cancels)"),
        ("", ""),
        ("", "── General ──"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let area = popup_area(frame.area(), 58, keybindings.len() as u16 + 2);
    frame.render_widget(Clear, area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or spacer row
                Line::from(Span::styled(
                    format!("{desc:^36}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{key:>18}"),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(*desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));
    frame.render_widget(popup, area);
}
