mod question;
mod state;

pub use question::{AnswerOption, Question, QuestionBank, RawOption, RawQuestionRecord};
pub use state::Phase;
