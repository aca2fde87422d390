mod loader;

pub use loader::{
    load, normalize, parse_questions, resolve_correct, CorrectAnswer, LoadError, QuestionSource,
};
