use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::theme::Theme;

fn centered(area: Rect, height: u16) -> Rect {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);
    chunks[1]
}

pub fn render_loading(frame: &mut Frame, area: Rect, theme: Theme) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Loading questions...",
            Style::default().fg(theme.accent()).bold(),
        )),
        Line::from(""),
        Line::from("q to quit".fg(theme.muted())),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.muted()),
    );
    frame.render_widget(widget, centered(area, 6));
}

pub fn render_error(frame: &mut Frame, area: Rect, theme: Theme, message: &str) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Error Loading Questions",
            Style::default().fg(theme.incorrect()).bold(),
        )),
        Line::from(""),
        Line::from(message.fg(theme.text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("r", Style::default().fg(theme.accent()).bold()),
            Span::styled(" retry  ·  ", Style::default().fg(theme.muted())),
            Span::styled("q", Style::default().fg(theme.accent()).bold()),
            Span::styled(" quit", Style::default().fg(theme.muted())),
        ]),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.incorrect()),
        );
    frame.render_widget(widget, centered(area, 9));
}
