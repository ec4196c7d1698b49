use std::fmt::Write;

use crate::models::quiz::QuizSummary;
use crate::router::Route;

pub fn render_quiz_list(quizzes: &[QuizSummary]) -> String {
    if quizzes.is_empty() {
        return format!("No quizzes yet. Create one at {}", Route::CreateQuiz);
    }

    let mut out = String::new();
    for quiz in quizzes {
        let _ = writeln!(out, "#{} {} [{}]", quiz.id, quiz.title, quiz.difficulty);
        if !quiz.description.is_empty() {
            let _ = writeln!(out, "    {}", quiz.description);
        }
        let _ = writeln!(
            out,
            "    {} | {} questions | by {} | start: {}",
            quiz.category,
            quiz.question_count,
            quiz.author.username,
            Route::QuizDetail(quiz.id)
        );
    }
    out.trim_end().to_string()
}
