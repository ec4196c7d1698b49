use std::fmt::Write;

use crate::models::answer::SubmissionResult;
use crate::models::user::User;

pub fn render_dashboard(user: &User, last_result: Option<&SubmissionResult>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome back, {} <{}>", user.username, user.email);
    if let Some(result) = last_result {
        let _ = writeln!(out, "Last attempt: {}", describe_result(result));
    }
    let _ = write!(out, "Run `quizzes` to browse or `create` to write a quiz.");
    out
}

pub fn describe_result(result: &SubmissionResult) -> String {
    match (result.score, result.total, result.percentage()) {
        (Some(score), Some(total), Some(pct)) => {
            format!("{} / {} ({:.0}%)", score, total, pct)
        }
        (Some(score), _, _) => format!("score {}", score),
        (_, _, Some(pct)) => format!("{:.0}%", pct),
        _ => "submitted".to_string(),
    }
}
