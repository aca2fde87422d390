use serde::Deserialize;

/// A question exactly as it appears in the question source.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestionRecord {
    pub question: String,
    pub options: Vec<RawOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOption {
    pub text: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, rename = "isCorrect")]
    pub is_correct: Option<bool>,
}

/// A normalized answer option. Ids are 1-based positions within the question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub id: usize,
    pub text: String,
    pub comment: Option<String>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn option(&self, id: usize) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.id == id)
    }

    /// The single option marked correct during normalization.
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.is_correct)
    }
}

/// Ordered, immutable set of questions for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub(crate) fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }
}
