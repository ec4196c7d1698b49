use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::error::{Error, Result};
use crate::models::answer::SubmissionResult;
use crate::models::user::Credential;
use crate::services::attempt_service::{AttemptPhase, QuizAttempt};
use crate::services::quiz_service::QuizService;
use crate::views::console::Console;
use crate::views::notice::Notice;
use crate::views::quiz_detail::render_attempt;

#[derive(Debug)]
pub enum AttemptOutcome {
    Submitted(SubmissionResult),
    Abandoned,
}

/// Interactive quiz detail view. The attempt lives exactly as long as this
/// call; leaving the view discards it.
pub async fn take_quiz<R, W>(
    console: &mut Console<R, W>,
    quizzes: &QuizService,
    credential: &Credential,
    quiz_id: i64,
) -> Result<AttemptOutcome>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let quiz = quizzes.get_quiz(credential, quiz_id).await?;
    let mut attempt = QuizAttempt::new(quiz)?;
    let cancel = console.cancel_token().clone();

    loop {
        console.say(&render_attempt(&attempt)).await?;
        let Some(input) = console.ask(">").await? else {
            return Ok(AttemptOutcome::Abandoned);
        };

        let step = match (attempt.phase(), input.as_str()) {
            (_, "q") => return Ok(AttemptOutcome::Abandoned),
            (AttemptPhase::Answering(_), "n") => attempt.next().map(|_| ()),
            (AttemptPhase::Answering(_), "p") => attempt.previous().map(|_| ()),
            (AttemptPhase::Answering(_), choice) => match choice.parse::<usize>() {
                Ok(n) if n >= 1 => attempt.select_option(n - 1),
                _ => Err(Error::InvalidInput(format!("Unknown command: {}", choice))),
            },
            (AttemptPhase::Reviewing, "b") => attempt.back_to_answering(),
            (AttemptPhase::Reviewing, "s") => {
                match attempt.submit(quizzes, credential, &cancel).await {
                    Ok(result) => return Ok(AttemptOutcome::Submitted(result)),
                    Err(err) if err.is_auth() || matches!(err, Error::Cancelled) => {
                        return Err(err)
                    }
                    Err(err) => {
                        console
                            .say(&Notice::failure("Could not submit the quiz", &err).to_string())
                            .await?;
                        continue;
                    }
                }
            }
            (AttemptPhase::Reviewing, other) => {
                Err(Error::InvalidInput(format!("Unknown command: {}", other)))
            }
            (AttemptPhase::Submitted, _) => return Ok(AttemptOutcome::Abandoned),
        };

        if let Err(err) = step {
            console.say(&Notice::error(err.to_string()).to_string()).await?;
        }
    }
}
