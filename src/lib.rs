//! # quizdeck
//!
//! A terminal multiple-choice quiz. Questions are read once from a JSON file
//! or URL, answered one at a time with immediate feedback, and summarised in
//! a final score card.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quizdeck::{Quiz, QuizError, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let source = "questions.json".parse().unwrap();
//!     Quiz::new(source, Settings::default()).run().await
//! }
//! ```
//!
//! The state machine can also be driven without a terminal:
//!
//! ```rust
//! use quizdeck::{parse_questions, QuizSession};
//!
//! let bank = parse_questions(r#"[{"question": "1 + 1?", "options": [{"text": "2"}, {"text": "3"}]}]"#)
//!     .unwrap();
//! let mut session = QuizSession::with_bank(bank);
//! session.select_option(1).unwrap();
//! session.finish().unwrap();
//! assert_eq!(session.score().unwrap().percentage, 100);
//! ```

mod app;
mod data;
mod models;
pub mod scoring;
mod session;
pub mod terminal;
mod theme;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::{Stream, StreamExt};
use log::info;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{self, Interval};

pub use app::{App, Feedback, Settings};
pub use data::{
    load, normalize, parse_questions, resolve_correct, CorrectAnswer, LoadError, QuestionSource,
};
pub use models::{AnswerOption, Phase, Question, QuestionBank, RawOption, RawQuestionRecord};
pub use scoring::{score, Score, Tier};
pub use session::{
    Action, AnsweredRecord, Answers, Blocker, LoadTicket, QuizSession, SessionError,
    SessionSnapshot,
};
pub use theme::Theme;

/// Redraw cadence while idle, so the delayed feedback shows up on time.
const REDRAW_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for quiz operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),
    #[error("Quiz session error: {0}")]
    Session(#[from] SessionError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

type LoadMessage = (LoadTicket, Result<QuestionBank, LoadError>);

/// A quiz bound to a question source, ready to run in the terminal.
pub struct Quiz {
    app: App,
    source: QuestionSource,
}

impl Quiz {
    pub fn new(source: QuestionSource, settings: Settings) -> Self {
        Self {
            app: App::new(settings),
            source,
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal, loads the questions in the background and
    /// returns when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let (tx, mut rx) = mpsc::unbounded_channel::<LoadMessage>();
        spawn_load(&mut self.app, &self.source, &tx);

        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self, &tx, &mut rx).await;
        terminal::restore()?;
        result
    }
}

fn spawn_load(app: &mut App, source: &QuestionSource, tx: &mpsc::UnboundedSender<LoadMessage>) {
    let ticket = app.begin_load();
    let source = source.clone();
    let tx = tx.clone();
    info!("loading questions from {}", source);

    tokio::spawn(async move {
        let result = data::load(&source).await;
        // The receiver only goes away when the quiz has exited.
        let _ = tx.send((ticket, result));
    });
}

/// What the event loop should do after a key press.
enum Flow {
    Continue,
    Reload,
    Quit,
}

/// Whatever woke the event loop up.
enum Signal {
    Loaded(LoadMessage),
    Input(Event),
    Tick,
    Closed,
}

async fn next_signal<S>(
    events: &mut S,
    rx: &mut mpsc::UnboundedReceiver<LoadMessage>,
    ticker: &mut Interval,
) -> io::Result<Signal>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    tokio::select! {
        Some(message) = rx.recv() => Ok(Signal::Loaded(message)),
        event = events.next() => match event {
            Some(Ok(event)) => Ok(Signal::Input(event)),
            Some(Err(err)) => Err(err),
            None => Ok(Signal::Closed),
        },
        _ = ticker.tick() => Ok(Signal::Tick),
    }
}

async fn run_event_loop(
    terminal: &mut terminal::QuizTerminal,
    quiz: &mut Quiz,
    tx: &mpsc::UnboundedSender<LoadMessage>,
    rx: &mut mpsc::UnboundedReceiver<LoadMessage>,
) -> Result<(), QuizError> {
    let mut events = EventStream::new();
    let mut ticker = time::interval(REDRAW_INTERVAL);

    loop {
        let now = Instant::now();
        terminal.draw(|frame| ui::render(frame, &quiz.app, now))?;

        match next_signal(&mut events, rx, &mut ticker).await? {
            Signal::Loaded((ticket, result)) => quiz.app.complete_load(ticket, result),
            Signal::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                match handle_input(&mut quiz.app, key.code, Instant::now())? {
                    Flow::Continue => {}
                    Flow::Reload => spawn_load(&mut quiz.app, &quiz.source, tx),
                    Flow::Quit => break,
                }
            }
            Signal::Input(_) | Signal::Tick => {}
            Signal::Closed => break,
        }
    }

    Ok(())
}

fn handle_input(app: &mut App, key: KeyCode, now: Instant) -> Result<Flow, SessionError> {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
        return Ok(Flow::Quit);
    }

    match app.session().phase() {
        Phase::Loading => Ok(Flow::Continue),
        Phase::Error => Ok(handle_error_input(key)),
        Phase::InProgress => handle_quiz_input(app, key, now),
        Phase::Finished => handle_result_input(app, key),
    }
}

fn handle_error_input(key: KeyCode) -> Flow {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Flow::Reload,
        _ => Flow::Continue,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode, now: Instant) -> Result<Flow, SessionError> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.is_answered() {
                app.proceed(now)?;
            } else {
                app.submit_cursor(now)?;
            }
        }
        KeyCode::Char('n') => app.proceed(now)?,
        KeyCode::Char(digit @ '1'..='9') if !app.is_answered() => {
            let option_id = digit as usize - '0' as usize;
            let option_count = app
                .session()
                .current_question()
                .map_or(0, |question| question.options.len());
            if option_id <= option_count {
                app.submit(option_id, now)?;
            }
        }
        _ => {}
    }
    Ok(Flow::Continue)
}

fn handle_result_input(app: &mut App, key: KeyCode) -> Result<Flow, SessionError> {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart()?,
        _ => {}
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crossterm::event::{KeyEvent, KeyModifiers};
    use futures_util::stream;

    use super::*;

    fn app() -> App {
        let bank = parse_questions(
            r#"[
                {"question": "Q1", "options": [{"text": "A"}, {"text": "B", "isCorrect": false}]},
                {"question": "Q2", "options": [{"text": "C", "isCorrect": false}, {"text": "D"}]}
            ]"#,
        )
        .unwrap();
        App::with_questions(bank, Settings::default())
    }

    #[test]
    fn keys_drive_a_full_session() {
        let mut app = app();
        let later = Instant::now() + Duration::from_secs(5);

        handle_input(&mut app, KeyCode::Enter, Instant::now()).unwrap();
        assert!(app.session().answers()[&0].is_correct);
        handle_input(&mut app, KeyCode::Enter, later).unwrap();
        assert_eq!(app.session().current_index(), 1);

        handle_input(&mut app, KeyCode::Char('2'), Instant::now()).unwrap();
        handle_input(&mut app, KeyCode::Char('n'), later).unwrap();
        assert_eq!(app.session().phase(), Phase::Finished);
        assert_eq!(app.session().score().unwrap().correct_count, 2);

        handle_input(&mut app, KeyCode::Char('r'), later).unwrap();
        assert_eq!(app.session().phase(), Phase::InProgress);
    }

    #[test]
    fn repeated_enter_before_reveal_keeps_first_answer() {
        let mut app = app();
        let now = Instant::now();
        handle_input(&mut app, KeyCode::Down, now).unwrap();
        handle_input(&mut app, KeyCode::Enter, now).unwrap();
        handle_input(&mut app, KeyCode::Enter, now).unwrap();
        handle_input(&mut app, KeyCode::Char('1'), now).unwrap();

        let record = app.session().current_answer().unwrap();
        assert_eq!(record.selected_option_id, 2);
        assert_eq!(app.session().current_index(), 0);
    }

    #[test]
    fn out_of_range_digit_is_ignored() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('7'), Instant::now()).unwrap();
        assert!(!app.is_answered());
    }

    #[test]
    fn quit_and_retry_keys() {
        let mut app = App::new(Settings::default());
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('q'), Instant::now()),
            Ok(Flow::Quit)
        ));

        let ticket = app.begin_load();
        app.complete_load(ticket, Err(LoadError::NoQuestions));
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('r'), Instant::now()),
            Ok(Flow::Reload)
        ));
    }

    #[tokio::test]
    async fn load_completes_while_waiting_for_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"question": "Q1", "options": [{{"text": "A"}}]}}]"#).unwrap();

        let mut app = App::new(Settings::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_load(&mut app, &QuestionSource::File(file.path().to_path_buf()), &tx);

        let mut events = stream::pending::<io::Result<Event>>();
        let mut ticker = time::interval(REDRAW_INTERVAL);
        let (ticket, result) = time::timeout(Duration::from_secs(2), async {
            loop {
                if let Signal::Loaded(message) =
                    next_signal(&mut events, &mut rx, &mut ticker).await.unwrap()
                {
                    break message;
                }
            }
        })
        .await
        .expect("load never reached the event loop");

        app.complete_load(ticket, result);
        assert_eq!(app.session().phase(), Phase::InProgress);
    }

    #[tokio::test]
    async fn key_events_and_stream_end_are_signalled() {
        let (_tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = time::interval(Duration::from_secs(60));
        ticker.tick().await;

        let key = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        let mut events = stream::iter(vec![Ok(key.clone())]);

        assert!(matches!(
            next_signal(&mut events, &mut rx, &mut ticker).await,
            Ok(Signal::Input(event)) if event == key
        ));
        assert!(matches!(
            next_signal(&mut events, &mut rx, &mut ticker).await,
            Ok(Signal::Closed)
        ));
    }
}
