use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::scoring::{Score, Tier};
use crate::session::SessionSnapshot;
use crate::theme::Theme;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App, snapshot: &SessionSnapshot<'_>) {
    let Some(score) = snapshot.score else {
        return;
    };
    let theme = app.theme();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], &score, theme);
    render_question_breakdown(frame, chunks[2], snapshot, app.result_scroll(), theme);
    render_controls(frame, chunks[3], theme);
}

fn get_tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Excellent => Color::Green,
        Tier::Good => Color::Blue,
        Tier::Fair => Color::Yellow,
        Tier::NeedsPractice => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, score: &Score, theme: Theme) {
    let tier = score.tier();
    let color = get_tier_color(tier);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Quiz Complete!",
            Style::default().fg(theme.accent()).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", score.percentage),
            Style::default().fg(color).bold(),
        )),
        Line::from(Span::styled(tier.message(), Style::default().fg(color))),
        Line::from(Span::styled(
            format!(
                "You got {} out of {} questions correct",
                score.correct_count, score.total_count
            ),
            Style::default().fg(theme.muted()),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme.muted()),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SessionSnapshot<'_>,
    scroll: usize,
    theme: Theme,
) {
    let lines: Vec<Line> = snapshot
        .bank
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let is_correct = snapshot
                .answers
                .get(&index)
                .is_some_and(|record| record.is_correct);
            let (symbol, color) = if is_correct {
                ("+", theme.correct())
            } else {
                ("-", theme.incorrect())
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(theme.muted()),
                ),
                Span::styled(truncate_question(&question.text), Style::default().fg(theme.text())),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect, theme: Theme) {
    let widget = Paragraph::new("j/k scroll  ·  r take quiz again  ·  q quit")
        .alignment(Alignment::Center)
        .fg(theme.muted());
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_questions_are_truncated() {
        let long = "x".repeat(60);
        assert_eq!(truncate_question(&long), format!("{}...", "x".repeat(55)));
        assert_eq!(truncate_question("short"), "short");
    }
}
