//! Quiz progression: load lifecycle, answering, advancing, scoring.
//!
//! A session moves `Loading -> InProgress | Error`, then through the
//! questions in order, `InProgress -> Finished` from the last answered
//! question, and `Finished -> InProgress` on restart. Every answer is final.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info, warn};
use thiserror::Error;

use crate::data::LoadError;
use crate::models::{Phase, Question, QuestionBank};
use crate::scoring::{self, Score};

/// Answers keyed by question index.
pub type Answers = BTreeMap<usize, AnsweredRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnsweredRecord {
    pub question_index: usize,
    pub selected_option_id: usize,
    pub is_correct: bool,
}

/// User intent that drives a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectOption,
    Advance,
    Finish,
    Restart,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::SelectOption => "select an option",
            Action::Advance => "advance",
            Action::Finish => "finish",
            Action::Restart => "restart",
        };
        f.write_str(name)
    }
}

/// Why a transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    Phase(Phase),
    Unanswered,
    NotLastQuestion,
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blocker::Phase(phase) => write!(f, "session is {}", phase),
            Blocker::Unanswered => f.write_str("the current question is unanswered"),
            Blocker::NotLastQuestion => f.write_str("questions remain"),
        }
    }
}

/// Contract violations. A correct front end never triggers these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {action}: {reason}")]
    IllegalTransition { action: Action, reason: Blocker },
    #[error("question {} is already answered", .question_index + 1)]
    AlreadyAnswered { question_index: usize },
    #[error("no option with id {option_id} in the current question")]
    UnknownOption { option_id: usize },
    #[error("already on the last question")]
    NoNextQuestion,
}

/// Identifies one load attempt. Only the newest ticket can commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Read-only view of the session for rendering.
#[derive(Debug, Clone, Copy)]
pub struct SessionSnapshot<'a> {
    pub phase: Phase,
    pub bank: &'a QuestionBank,
    pub current_index: usize,
    pub question: Option<&'a Question>,
    pub answer: Option<&'a AnsweredRecord>,
    pub answers: &'a Answers,
    pub load_error: Option<&'a str>,
    pub score: Option<Score>,
}

impl SessionSnapshot<'_> {
    pub fn total_questions(&self) -> usize {
        self.bank.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.bank.len()
    }
}

#[derive(Debug)]
pub struct QuizSession {
    bank: QuestionBank,
    current_index: usize,
    answers: Answers,
    phase: Phase,
    load_error: Option<String>,
    latest_load: u64,
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            bank: QuestionBank::default(),
            current_index: 0,
            answers: Answers::new(),
            phase: Phase::Loading,
            load_error: None,
            latest_load: 0,
        }
    }

    /// Build a session that starts directly on an already loaded bank.
    pub fn with_bank(bank: QuestionBank) -> Self {
        let mut session = Self::new();
        let ticket = session.begin_load();
        session.complete_load(ticket, Ok(bank));
        session
    }

    /// Start a new load attempt, discarding any session in progress.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_load += 1;
        self.bank = QuestionBank::default();
        self.answers.clear();
        self.current_index = 0;
        self.load_error = None;
        self.phase = Phase::Loading;
        debug!("load attempt {} started", self.latest_load);
        LoadTicket(self.latest_load)
    }

    /// Commit the outcome of a load attempt. Returns `false` when the ticket
    /// has been superseded and the result was dropped.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<QuestionBank, LoadError>,
    ) -> bool {
        if ticket.0 != self.latest_load || self.phase != Phase::Loading {
            info!("discarding result of superseded load attempt {}", ticket.0);
            return false;
        }

        match result {
            Ok(bank) if !bank.is_empty() => {
                debug!("session started with {} questions", bank.len());
                self.bank = bank;
                self.phase = Phase::InProgress;
            }
            Ok(_) => self.fail_load(LoadError::NoQuestions),
            Err(err) => self.fail_load(err),
        }
        true
    }

    fn fail_load(&mut self, err: LoadError) {
        warn!("error loading questions: {}", err);
        self.load_error = Some(err.to_string());
        self.phase = Phase::Error;
    }

    /// Answer the current question. Answers cannot be changed once given.
    ///
    /// # Errors
    ///
    /// `IllegalTransition` outside `InProgress`, `AlreadyAnswered` on a
    /// second selection and `UnknownOption` for an id the question lacks.
    pub fn select_option(&mut self, option_id: usize) -> Result<AnsweredRecord, SessionError> {
        self.require_phase(Action::SelectOption, Phase::InProgress)?;

        let question_index = self.current_index;
        if self.answers.contains_key(&question_index) {
            return Err(SessionError::AlreadyAnswered { question_index });
        }

        let is_correct = self
            .current_question()
            .and_then(|question| question.option(option_id))
            .map(|option| option.is_correct)
            .ok_or(SessionError::UnknownOption { option_id })?;

        let record = AnsweredRecord {
            question_index,
            selected_option_id: option_id,
            is_correct,
        };
        self.answers.insert(question_index, record);
        debug!(
            "question {} answered with option {} ({})",
            question_index + 1,
            option_id,
            if is_correct { "correct" } else { "incorrect" }
        );
        Ok(record)
    }

    /// Move to the next question.
    ///
    /// # Errors
    ///
    /// `IllegalTransition` if not in progress or unanswered, `NoNextQuestion`
    /// on the last question.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        self.require_phase(Action::Advance, Phase::InProgress)?;
        self.require_answered(Action::Advance)?;
        if self.is_last_question() {
            return Err(SessionError::NoNextQuestion);
        }

        self.current_index += 1;
        debug!("advanced to question {}", self.current_index + 1);
        Ok(())
    }

    /// Show the summary once the last question has been answered.
    ///
    /// # Errors
    ///
    /// `IllegalTransition` unless the last question is current and answered.
    pub fn finish(&mut self) -> Result<(), SessionError> {
        self.require_phase(Action::Finish, Phase::InProgress)?;
        if !self.is_last_question() {
            return Err(SessionError::IllegalTransition {
                action: Action::Finish,
                reason: Blocker::NotLastQuestion,
            });
        }
        self.require_answered(Action::Finish)?;

        self.phase = Phase::Finished;
        debug!("session finished");
        Ok(())
    }

    /// Take the same question bank again from the start.
    ///
    /// # Errors
    ///
    /// `IllegalTransition` unless the session is finished.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.require_phase(Action::Restart, Phase::Finished)?;

        self.answers.clear();
        self.current_index = 0;
        self.phase = Phase::InProgress;
        debug!("session restarted");
        Ok(())
    }

    fn require_phase(&self, action: Action, expected: Phase) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::IllegalTransition {
                action,
                reason: Blocker::Phase(self.phase),
            })
        }
    }

    fn require_answered(&self, action: Action) -> Result<(), SessionError> {
        if self.current_answer().is_some() {
            Ok(())
        } else {
            Err(SessionError::IllegalTransition {
                action,
                reason: Blocker::Unanswered,
            })
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.bank.get(self.current_index)
    }

    pub fn current_answer(&self) -> Option<&AnsweredRecord> {
        self.answers.get(&self.current_index)
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.bank.len()
    }

    /// The final score, available once the session is finished.
    pub fn score(&self) -> Option<Score> {
        (self.phase == Phase::Finished).then(|| scoring::score(&self.bank, &self.answers))
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            phase: self.phase,
            bank: &self.bank,
            current_index: self.current_index,
            question: self.current_question(),
            answer: self.current_answer(),
            answers: &self.answers,
            load_error: self.load_error(),
            score: self.score(),
        }
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}
