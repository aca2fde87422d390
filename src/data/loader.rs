use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use log::{info, warn};
use serde_json::Value;
use thiserror::Error;

use crate::models::{AnswerOption, Question, QuestionBank, RawOption, RawQuestionRecord};

const DEFAULT_QUESTIONS_PATH: &str = "questions.json";

/// Errors raised while loading a question bank. Every variant ends the
/// attempt; callers retry by loading again.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("failed to load questions from {location}: {reason}")]
    SourceUnavailable { location: String, reason: String },
    #[error("invalid question format at index {0}")]
    MalformedQuestion(usize),
    #[error("question source is not a JSON list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("question source contains no questions")]
    NoQuestions,
}

impl LoadError {
    fn unavailable(source: &QuestionSource, reason: impl fmt::Display) -> Self {
        Self::SourceUnavailable {
            location: source.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Where the question list is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    File(PathBuf),
    Url(String),
}

impl Default for QuestionSource {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_QUESTIONS_PATH))
    }
}

impl FromStr for QuestionSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// How the correct option of a question was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectAnswer {
    /// First option not explicitly marked `isCorrect: false`.
    Marked(usize),
    /// Every option was marked incorrect; the first one is used.
    Fallback,
}

impl CorrectAnswer {
    pub fn position(self) -> usize {
        match self {
            Self::Marked(position) => position,
            Self::Fallback => 0,
        }
    }
}

pub fn resolve_correct(options: &[RawOption]) -> CorrectAnswer {
    options
        .iter()
        .position(|option| option.is_correct != Some(false))
        .map_or(CorrectAnswer::Fallback, CorrectAnswer::Marked)
}

/// Read and normalize the question bank from `source`.
///
/// # Errors
///
/// Returns `LoadError::SourceUnavailable` when the source cannot be read and
/// the parse/validation errors of [`parse_questions`] otherwise.
pub async fn load(source: &QuestionSource) -> Result<QuestionBank, LoadError> {
    let body = read_source(source).await?;
    let bank = parse_questions(&body)?;
    info!("loaded {} questions from {}", bank.len(), source);
    Ok(bank)
}

async fn read_source(source: &QuestionSource) -> Result<String, LoadError> {
    match source {
        QuestionSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|err| LoadError::unavailable(source, err)),
        QuestionSource::Url(url) => {
            let response = reqwest::get(url)
                .await
                .map_err(|err| LoadError::unavailable(source, err))?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::unavailable(source, status));
            }
            response
                .text()
                .await
                .map_err(|err| LoadError::unavailable(source, err))
        }
    }
}

/// Parse a JSON list of question records into a validated bank.
///
/// Records are checked in order and the first bad one is reported by index;
/// nothing is returned for a partially valid list.
pub fn parse_questions(json: &str) -> Result<QuestionBank, LoadError> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    if values.is_empty() {
        return Err(LoadError::NoQuestions);
    }

    let questions = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let record: RawQuestionRecord =
                serde_json::from_value(value).map_err(|_| LoadError::MalformedQuestion(index))?;
            normalize_record(index, record)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuestionBank::new(questions))
}

/// Normalize already-decoded records.
pub fn normalize(records: Vec<RawQuestionRecord>) -> Result<QuestionBank, LoadError> {
    if records.is_empty() {
        return Err(LoadError::NoQuestions);
    }

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| normalize_record(index, record))
        .collect::<Result<Vec<_>, _>>()
        .map(QuestionBank::new)
}

fn normalize_record(index: usize, record: RawQuestionRecord) -> Result<Question, LoadError> {
    let valid = !is_blank(&record.question)
        && !record.options.is_empty()
        && record.options.iter().all(|option| !is_blank(&option.text));
    if !valid {
        return Err(LoadError::MalformedQuestion(index));
    }

    let correct = resolve_correct(&record.options);
    if correct == CorrectAnswer::Fallback {
        warn!(
            "question {} marks every option incorrect, treating the first option as correct",
            index
        );
    }
    let correct = correct.position();

    let options = record
        .options
        .into_iter()
        .enumerate()
        .map(|(position, raw)| AnswerOption {
            id: position + 1,
            text: raw.text,
            comment: raw.comment.filter(|comment| !is_blank(comment)),
            is_correct: position == correct,
        })
        .collect();

    Ok(Question {
        text: record.question,
        options,
    })
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
