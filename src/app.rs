use std::time::{Duration, Instant};

use crate::data::LoadError;
use crate::models::{Phase, Question, QuestionBank};
use crate::session::{AnsweredRecord, LoadTicket, QuizSession, SessionError};
use crate::theme::Theme;

const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(800);

/// Front-end settings, independent of quiz progress.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub theme: Theme,
    /// Pause between choosing an option and showing the verdict.
    pub feedback_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
        }
    }
}

/// Verdict shown under an answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub is_correct: bool,
    pub message: String,
}

impl Feedback {
    fn for_answer(question: &Question, record: &AnsweredRecord) -> Self {
        let comment = question
            .option(record.selected_option_id)
            .and_then(|option| option.comment.clone());

        let message = comment.unwrap_or_else(|| {
            if record.is_correct {
                "Well done!".to_string()
            } else {
                let correct = question
                    .correct_option()
                    .map(|option| option.text.as_str())
                    .unwrap_or_default();
                format!("The correct answer is: {}", correct)
            }
        });

        Self {
            is_correct: record.is_correct,
            message,
        }
    }
}

/// Terminal front-end state wrapped around a quiz session.
pub struct App {
    session: QuizSession,
    settings: Settings,
    cursor: usize,
    answered_at: Option<Instant>,
    result_scroll: usize,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            session: QuizSession::new(),
            settings,
            cursor: 0,
            answered_at: None,
            result_scroll: 0,
        }
    }

    pub fn with_questions(bank: QuestionBank, settings: Settings) -> Self {
        Self {
            session: QuizSession::with_bank(bank),
            ..Self::new(settings)
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.reset_question_state();
        self.result_scroll = 0;
        self.session.begin_load()
    }

    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<QuestionBank, LoadError>) {
        self.session.complete_load(ticket, result);
    }

    fn option_count(&self) -> usize {
        self.session
            .current_question()
            .map_or(0, |question| question.options.len())
    }

    fn can_move_cursor(&self) -> bool {
        self.session.phase() == Phase::InProgress && self.session.current_answer().is_none()
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if self.can_move_cursor() && count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if self.can_move_cursor() && count > 0 {
            self.cursor = (self.cursor + count - 1) % count;
        }
    }

    pub fn is_answered(&self) -> bool {
        self.session.current_answer().is_some()
    }

    /// Answer with the highlighted option.
    pub fn submit_cursor(&mut self, now: Instant) -> Result<(), SessionError> {
        self.submit(self.cursor + 1, now)
    }

    /// Answer with an explicit option id.
    pub fn submit(&mut self, option_id: usize, now: Instant) -> Result<(), SessionError> {
        self.session.select_option(option_id)?;
        self.cursor = option_id - 1;
        self.answered_at = Some(now);
        Ok(())
    }

    pub fn feedback_revealed(&self, now: Instant) -> bool {
        self.answered_at
            .is_some_and(|at| now.saturating_duration_since(at) >= self.settings.feedback_delay)
    }

    /// Verdict for the current question, once the reveal delay has passed.
    pub fn feedback(&self, now: Instant) -> Option<Feedback> {
        if !self.feedback_revealed(now) {
            return None;
        }
        let question = self.session.current_question()?;
        let record = self.session.current_answer()?;
        Some(Feedback::for_answer(question, record))
    }

    /// Go to the next question, or to the score on the last one. Does nothing
    /// until the feedback for the current answer is showing.
    pub fn proceed(&mut self, now: Instant) -> Result<(), SessionError> {
        if !self.feedback_revealed(now) {
            return Ok(());
        }

        if self.session.is_last_question() {
            self.session.finish()?;
            self.result_scroll = 0;
        } else {
            self.session.advance()?;
        }
        self.reset_question_state();
        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.session.restart()?;
        self.reset_question_state();
        self.result_scroll = 0;
        Ok(())
    }

    fn reset_question_state(&mut self) {
        self.cursor = 0;
        self.answered_at = None;
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.session.bank().len().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::data::parse_questions;

    fn app() -> App {
        let bank = parse_questions(
            r#"[
                {"question": "Largest planet?", "options": [
                    {"text": "Mars", "isCorrect": false},
                    {"text": "Jupiter", "comment": "It is a gas giant."},
                    {"text": "Venus"}
                ]},
                {"question": "Smallest planet?", "options": [
                    {"text": "Mercury"},
                    {"text": "Earth", "isCorrect": false}
                ]}
            ]"#,
        )
        .unwrap();
        App::with_questions(bank, Settings::default())
    }

    #[test]
    fn cursor_wraps_around_options() {
        let mut app = app();
        app.select_previous_option();
        assert_eq!(app.cursor(), 2);
        app.select_next_option();
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn cursor_locks_after_answering() {
        let mut app = app();
        let now = Instant::now();
        app.select_next_option();
        app.submit_cursor(now).unwrap();
        app.select_next_option();
        assert_eq!(app.cursor(), 1);
        assert!(app.is_answered());
    }

    #[test]
    fn feedback_waits_for_delay() {
        let mut app = app();
        let start = Instant::now();
        app.submit(1, start).unwrap();

        assert!(app.feedback(start).is_none());
        assert!(app.feedback(start + Duration::from_millis(799)).is_none());

        let feedback = app.feedback(start + DEFAULT_FEEDBACK_DELAY).unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(feedback.message, "The correct answer is: Jupiter");
    }

    #[test]
    fn feedback_prefers_option_comment() {
        let mut app = app();
        let start = Instant::now();
        app.submit(2, start).unwrap();

        let feedback = app.feedback(start + DEFAULT_FEEDBACK_DELAY).unwrap();
        assert!(feedback.is_correct);
        assert_eq!(feedback.message, "It is a gas giant.");
    }

    #[test]
    fn proceed_is_ignored_until_revealed() {
        let mut app = app();
        let start = Instant::now();
        app.submit(2, start).unwrap();

        app.proceed(start).unwrap();
        assert_eq!(app.session().current_index(), 0);

        app.proceed(start + DEFAULT_FEEDBACK_DELAY).unwrap();
        assert_eq!(app.session().current_index(), 1);
        assert!(!app.is_answered());
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn full_run_then_restart() {
        let mut app = app();
        let later = Instant::now() + Duration::from_secs(1);

        app.submit(2, Instant::now()).unwrap();
        app.proceed(later).unwrap();
        app.submit(1, Instant::now()).unwrap();
        app.proceed(later).unwrap();

        assert_eq!(app.session().phase(), Phase::Finished);
        assert_eq!(app.session().score().unwrap().percentage, 100);

        app.restart().unwrap();
        assert_eq!(app.session().phase(), Phase::InProgress);
        assert!(app.session().answers().is_empty());
    }

    #[test]
    fn double_submit_surfaces_session_error() {
        let mut app = app();
        app.submit(1, Instant::now()).unwrap();
        assert_matches!(
            app.submit(2, Instant::now()),
            Err(SessionError::AlreadyAnswered { .. })
        );
    }
}
