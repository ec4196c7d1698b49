use std::fmt::Write;

use crate::services::attempt_service::{AttemptPhase, QuizAttempt};

pub fn render_attempt(attempt: &QuizAttempt) -> String {
    match attempt.phase() {
        AttemptPhase::Answering(_) => render_question(attempt),
        AttemptPhase::Reviewing => render_review(attempt),
        AttemptPhase::Submitted => "Quiz submitted.".to_string(),
    }
}

fn render_question(attempt: &QuizAttempt) -> String {
    let quiz = attempt.quiz();
    let mut out = String::new();
    let _ = writeln!(out, "{}", quiz.title);
    if !quiz.description.is_empty() {
        let _ = writeln!(out, "{}", quiz.description);
    }

    let (Some(index), Some(question)) = (attempt.current_index(), attempt.current_question())
    else {
        return out;
    };
    let _ = writeln!(
        out,
        "Question {} of {} [{}]",
        index + 1,
        attempt.question_count(),
        quiz.difficulty
    );
    let _ = writeln!(out, "{}", question.text);

    let selected = attempt.selected_option(question.id);
    for (i, option) in question.options.iter().enumerate() {
        let mark = if selected == Some(i) { "(x)" } else { "( )" };
        let _ = writeln!(out, "  {} {}. {}", mark, i + 1, option);
    }

    let next = if index + 1 == attempt.question_count() {
        "finish"
    } else {
        "next"
    };
    let _ = write!(out, "[1-{}] choose  [n] {}", question.options.len(), next);
    if index > 0 {
        let _ = write!(out, "  [p] previous");
    }
    let _ = write!(out, "  [q] quit");
    out
}

fn render_review(attempt: &QuizAttempt) -> String {
    format!(
        "Summary\nYou answered {} of {} questions.\n[b] review answers  [s] submit  [q] quit",
        attempt.answered_count(),
        attempt.question_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::{Difficulty, Question, Quiz};
    use crate::models::user::Author;

    fn attempt() -> QuizAttempt {
        QuizAttempt::new(Quiz {
            id: 5,
            title: "Planets".into(),
            description: "Solar system".into(),
            category: "Science".into(),
            difficulty: Difficulty::Hard,
            questions: vec![
                Question {
                    id: 1,
                    text: "Largest planet?".into(),
                    options: vec!["Mars".into(), "Jupiter".into()],
                },
                Question {
                    id: 2,
                    text: "Closest to the sun?".into(),
                    options: vec!["Mercury".into(), "Venus".into()],
                },
            ],
            author: Author {
                id: 2,
                username: "bo".into(),
            },
        })
        .unwrap()
    }

    #[test]
    fn marks_the_selected_option() {
        let mut attempt = attempt();
        attempt.select_option(1).unwrap();
        let view = render_attempt(&attempt);

        assert!(view.contains("Question 1 of 2 [HARD]"));
        assert!(view.contains("( ) 1. Mars"));
        assert!(view.contains("(x) 2. Jupiter"));
        assert!(!view.contains("[p] previous"));
    }

    #[test]
    fn review_counts_answers() {
        let mut attempt = attempt();
        attempt.select_option(0).unwrap();
        attempt.next().unwrap();
        assert!(render_attempt(&attempt).contains("[n] finish"));
        attempt.next().unwrap();

        assert!(render_attempt(&attempt).contains("You answered 1 of 2 questions."));
    }
}
