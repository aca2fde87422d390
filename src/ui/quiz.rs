use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, Feedback};
use crate::models::Question;
use crate::session::{AnsweredRecord, SessionSnapshot};
use crate::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &App, snapshot: &SessionSnapshot<'_>, now: Instant) {
    let Some(question) = snapshot.question else {
        return;
    };
    let theme = app.theme();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], snapshot, theme);
    render_question_text(frame, chunks[1], &question.text, theme);
    render_options(frame, chunks[2], question, snapshot.answer, app.cursor(), theme);

    let feedback = app.feedback(now);
    if let Some(feedback) = &feedback {
        render_feedback(frame, chunks[3], feedback, theme);
    }
    render_controls(frame, chunks[4], snapshot, feedback.is_some(), theme);
}

fn render_progress(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot<'_>, theme: Theme) {
    let progress = format!(
        "Question {} of {}",
        snapshot.current_index + 1,
        snapshot.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Center)
        .fg(theme.muted());
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str, theme: Theme) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .fg(theme.text())
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    answer: Option<&AnsweredRecord>,
    cursor: usize,
    theme: Theme,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let (marker, style) = match answer {
            None if index == cursor => (">", Style::default().fg(theme.accent()).bold()),
            None => (" ", Style::default().fg(theme.text())),
            Some(record) if record.selected_option_id == option.id => {
                let color = if option.is_correct {
                    theme.correct()
                } else {
                    theme.incorrect()
                };
                (if option.is_correct { "✓" } else { "✗" }, Style::default().fg(color).bold())
            }
            Some(_) if option.is_correct => ("✓", Style::default().fg(theme.correct())),
            Some(_) => (" ", Style::default().fg(theme.muted())),
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", option.id), style),
            Span::styled(option.text.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: &Feedback, theme: Theme) {
    let (title, color) = if feedback.is_correct {
        ("Correct!", theme.correct())
    } else {
        ("Incorrect!", theme.incorrect())
    };

    let content = vec![
        Line::from(Span::styled(title, Style::default().fg(color).bold())),
        Line::from(feedback.message.as_str().fg(theme.text())),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(color)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_controls(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SessionSnapshot<'_>,
    revealed: bool,
    theme: Theme,
) {
    let text = match (snapshot.answer, revealed) {
        (None, _) => "j/k navigate  ·  enter or 1-9 select  ·  q quit",
        (Some(_), false) => "q quit",
        (Some(_), true) if snapshot.is_last_question() => "enter show score  ·  q quit",
        (Some(_), true) => "enter next question  ·  q quit",
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(theme.muted());
    frame.render_widget(widget, area);
}
