use std::fmt::Write as _;

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::error::{Error, Result};
use crate::models::quiz::{Difficulty, Quiz};
use crate::models::user::Credential;
use crate::services::authoring_service::QuizDraft;
use crate::services::quiz_service::QuizService;
use crate::views::console::Console;
use crate::views::notice::Notice;

pub const AUTHORING_HELP: &str = "\
Commands (numbers start at 1):
  title <text> | description <text> | category <text> | difficulty <easy|medium|hard>
  question <q> <text> | add-question | remove-question <q>
  option <q> <o> <text> | add-option <q> | remove-option <q> <o> | correct <q> <o>
  show | help | submit | cancel";

#[derive(Debug)]
pub enum AuthoringOutcome {
    Created(Quiz),
    Cancelled,
}

pub fn render_draft(draft: &QuizDraft) -> String {
    let payload = draft.payload();
    let mut out = String::new();
    let _ = writeln!(out, "Title: {}", payload.title);
    let _ = writeln!(out, "Description: {}", payload.description);
    let _ = writeln!(out, "Category: {}", payload.category);
    let _ = writeln!(out, "Difficulty: {}", payload.difficulty);
    for (qi, question) in payload.questions.iter().enumerate() {
        let _ = writeln!(out, "Question {}: {}", qi + 1, question.text);
        for (oi, option) in question.options.iter().enumerate() {
            let mark = if oi == question.correct_option_index { "*" } else { " " };
            let _ = writeln!(out, "  {} {}. {}", mark, oi + 1, option);
        }
    }
    out.trim_end().to_string()
}

/// Interactive quiz authoring view.
pub async fn create_quiz<R, W>(
    console: &mut Console<R, W>,
    quizzes: &QuizService,
    credential: &Credential,
) -> Result<AuthoringOutcome>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut draft = QuizDraft::new();
    console.say(AUTHORING_HELP).await?;

    loop {
        let Some(line) = console.ask("create>").await? else {
            return Ok(AuthoringOutcome::Cancelled);
        };
        if line.is_empty() {
            continue;
        }

        match line.as_str() {
            "cancel" => return Ok(AuthoringOutcome::Cancelled),
            "help" => console.say(AUTHORING_HELP).await?,
            "show" => console.say(&render_draft(&draft)).await?,
            "submit" => match quizzes.create_quiz(credential, draft.payload()).await {
                Ok(quiz) => return Ok(AuthoringOutcome::Created(quiz)),
                Err(err) if err.is_auth() => return Err(err),
                Err(err) => {
                    console
                        .say(&Notice::failure("Could not create the quiz", &err).to_string())
                        .await?
                }
            },
            _ => {
                if let Err(err) = apply_command(&mut draft, &line) {
                    console.say(&Notice::error(err.to_string()).to_string()).await?;
                }
            }
        }
    }
}

/// Applies one editing command to the draft.
pub fn apply_command(draft: &mut QuizDraft, line: &str) -> Result<()> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match command {
        "title" => draft.set_title(rest),
        "description" => draft.set_description(rest),
        "category" => draft.set_category(rest),
        "difficulty" => draft.set_difficulty(rest.parse::<Difficulty>().map_err(Error::InvalidInput)?),
        "add-question" => {
            draft.add_question();
        }
        "remove-question" => draft.remove_question(position(rest)?)?,
        "question" => {
            let (q, text) = split_position(rest)?;
            draft.set_question_text(q, text)?;
        }
        "add-option" => {
            draft.add_option(position(rest)?)?;
        }
        "option" => {
            let (q, rest) = split_position(rest)?;
            let (o, text) = split_position(rest)?;
            draft.set_option_text(q, o, text)?;
        }
        "remove-option" => {
            let (q, rest) = split_position(rest)?;
            draft.remove_option(q, position(rest)?)?;
        }
        "correct" => {
            let (q, rest) = split_position(rest)?;
            draft.set_correct_option(q, position(rest)?)?;
        }
        other => return Err(Error::InvalidInput(format!("Unknown command: {}", other))),
    }
    Ok(())
}

/// Parses a 1-based position into a 0-based index.
fn position(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(Error::InvalidInput(format!("Expected a number from 1, got '{}'", raw))),
    }
}

fn split_position(raw: &str) -> Result<(usize, &str)> {
    let (head, tail) = raw.split_once(' ').unwrap_or((raw, ""));
    Ok((position(head)?, tail.trim()))
}
