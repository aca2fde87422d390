use std::io::Write;

use assert_matches::assert_matches;
use quizdeck::{
    load, score, Answers, LoadError, Phase, QuestionSource, QuizSession, SessionError, Tier,
};

fn write_questions(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

const FIVE_QUESTIONS: &str = r#"[
    {"question": "What is the capital of Japan?", "options": [
        {"text": "Kyoto", "isCorrect": false, "comment": "Kyoto was the capital until 1868."},
        {"text": "Tokyo"},
        {"text": "Osaka", "isCorrect": false}
    ]},
    {"question": "Which planet is known as the red planet?", "options": [
        {"text": "Mars", "isCorrect": true},
        {"text": "Venus", "isCorrect": false}
    ]},
    {"question": "How many continents are there?", "options": [
        {"text": "5", "isCorrect": false},
        {"text": "7", "isCorrect": true}
    ]},
    {"question": "What is H2O?", "options": [
        {"text": "Water"},
        {"text": "Salt", "isCorrect": false}
    ]},
    {"question": "Which ocean is the largest?", "options": [
        {"text": "Atlantic", "isCorrect": false},
        {"text": "Pacific"}
    ]}
]"#;

#[tokio::test]
async fn file_backed_session_runs_to_score() {
    let file = write_questions(FIVE_QUESTIONS);
    let source = QuestionSource::File(file.path().to_path_buf());

    let mut session = QuizSession::new();
    let ticket = session.begin_load();
    assert!(session.complete_load(ticket, load(&source).await));
    assert_eq!(session.phase(), Phase::InProgress);
    assert_eq!(session.bank().len(), 5);

    // Right, right, wrong, right, wrong.
    for (index, option_id) in [2, 1, 1, 1, 1].into_iter().enumerate() {
        assert_eq!(session.current_index(), index);
        session.select_option(option_id).unwrap();
        if index < 4 {
            session.advance().unwrap();
        }
    }
    assert_eq!(session.advance(), Err(SessionError::NoNextQuestion));
    session.finish().unwrap();

    let result = session.score().unwrap();
    assert_eq!(result.correct_count, 3);
    assert_eq!(result.total_count, 5);
    assert_eq!(result.percentage, 60);
    assert_eq!(result.tier(), Tier::Good);
    assert_eq!(result, score(session.bank(), session.answers()));
}

#[tokio::test]
async fn malformed_record_commits_nothing() {
    let file = write_questions(
        r#"[
            {"question": "a", "options": [{"text": "1"}]},
            {"question": "b", "options": [{"text": "1"}]},
            {"question": "", "options": []},
            {"question": "d", "options": [{"text": "1"}]},
            {"question": "e", "options": [{"text": "1"}]}
        ]"#,
    );
    let source = QuestionSource::File(file.path().to_path_buf());

    let result = load(&source).await;
    assert_matches!(result, Err(LoadError::MalformedQuestion(2)));

    let mut session = QuizSession::new();
    let ticket = session.begin_load();
    session.complete_load(ticket, result);
    assert_eq!(session.phase(), Phase::Error);
    assert!(session.bank().is_empty());
    assert_eq!(
        session.load_error(),
        Some("invalid question format at index 2")
    );
}

#[tokio::test]
async fn retry_after_missing_source_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.json");
    let source = QuestionSource::File(path.clone());

    let mut session = QuizSession::new();
    let first = session.begin_load();
    session.complete_load(first, load(&source).await);
    assert_eq!(session.phase(), Phase::Error);

    std::fs::write(&path, FIVE_QUESTIONS).unwrap();
    let retry = session.begin_load();
    session.complete_load(retry, load(&source).await);
    assert_eq!(session.phase(), Phase::InProgress);
    assert!(session.answers().is_empty());
}

#[test]
fn unanswered_bank_scores_zero() {
    let bank = quizdeck::parse_questions(FIVE_QUESTIONS).unwrap();
    let result = score(&bank, &Answers::new());
    assert_eq!(result.percentage, 0);
    assert_eq!(result.total_count, 5);
}
