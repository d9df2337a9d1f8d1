//! Quiz Session Integration Tests
//!
//! Scoring, first-answer-wins, and the advance guard.

use skoolify::domain::{QuizDefinition, QuizQuestion};
use skoolify::quiz::{Advance, AnswerOutcome, QuizError, QuizSession};

fn question(prompt: &str, options: &[&str], correct: &str) -> QuizQuestion {
    QuizQuestion {
        prompt: prompt.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_option: correct.to_string(),
        explanation: format!("Because {}", correct),
    }
}

fn capitals() -> QuizDefinition {
    QuizDefinition::new(
        "Capitals",
        vec![
            question("France?", &["Paris", "Lyon", "Nice"], "Paris"),
            question("Japan?", &["Osaka", "Tokyo", "Kyoto"], "Tokyo"),
            question("Kenya?", &["Nairobi", "Mombasa"], "Nairobi"),
        ],
    )
}

#[test]
fn test_correct_incorrect_correct_scores_two_of_three() {
    let mut session = QuizSession::new(capitals()).unwrap();

    assert_eq!(
        session.answer("Paris").unwrap(),
        AnswerOutcome::Recorded { correct: true }
    );
    assert_eq!(session.advance().unwrap(), Advance::Next(1));

    assert_eq!(
        session.answer("Osaka").unwrap(),
        AnswerOutcome::Recorded { correct: false }
    );
    assert_eq!(session.advance().unwrap(), Advance::Next(2));

    assert_eq!(
        session.answer("Nairobi").unwrap(),
        AnswerOutcome::Recorded { correct: true }
    );

    match session.advance().unwrap() {
        Advance::Finished(result) => {
            assert_eq!(result.score, 2);
            assert_eq!(result.total_questions, 3);
            assert_eq!(result.percentage(), 67);
            assert_eq!(result.quiz, capitals());
        }
        other => panic!("expected the quiz to finish, got {:?}", other),
    }
    assert!(session.is_finished());
}

#[test]
fn test_second_answer_is_ignored() {
    let mut session = QuizSession::new(capitals()).unwrap();

    session.answer("Lyon").unwrap();
    assert_eq!(
        session.answer("Paris").unwrap(),
        AnswerOutcome::AlreadyAnswered
    );
    assert_eq!(session.selected_option(), Some("Lyon"));

    session.advance().unwrap();
    assert_eq!(session.running_score(), 0);
}

#[test]
fn test_advance_before_answer_is_rejected() {
    let mut session = QuizSession::new(capitals()).unwrap();

    assert_eq!(
        session.advance().unwrap_err(),
        QuizError::NotAnswered { index: 0 }
    );
    assert_eq!(session.current_index(), 0);

    session.answer("Paris").unwrap();
    session.advance().unwrap();

    assert_eq!(
        session.advance().unwrap_err(),
        QuizError::NotAnswered { index: 1 }
    );
    assert_eq!(session.current_index(), 1);
}

#[test]
fn test_result_is_emitted_once() {
    let quiz = QuizDefinition::new("One", vec![question("Only?", &["yes", "no"], "yes")]);
    let mut session = QuizSession::new(quiz).unwrap();

    assert!(session.is_last_question());
    session.answer("yes").unwrap();
    assert!(matches!(session.advance().unwrap(), Advance::Finished(_)));

    assert_eq!(session.advance().unwrap_err(), QuizError::Finished);
    assert_eq!(session.answer("no").unwrap_err(), QuizError::Finished);
}

#[test]
fn test_correctness_is_exact_match() {
    let quiz = QuizDefinition::new("Case", vec![question("Capital?", &["Paris", "paris"], "Paris")]);
    let mut session = QuizSession::new(quiz).unwrap();

    assert_eq!(
        session.answer("paris").unwrap(),
        AnswerOutcome::Recorded { correct: false }
    );
}
