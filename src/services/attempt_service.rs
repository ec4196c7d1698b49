use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::answer::{Answer, SubmissionResult};
use crate::models::quiz::{Question, Quiz};
use crate::models::user::Credential;
use crate::services::quiz_service::QuizService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    Answering(usize),
    Reviewing,
    Submitted,
}

/// One pass through a quiz, one question at a time, ending in a submission.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    quiz: Quiz,
    phase: AttemptPhase,
    answers: Vec<Answer>,
}

impl QuizAttempt {
    pub fn new(quiz: Quiz) -> Result<Self> {
        if quiz.questions.is_empty() {
            return Err(Error::InvalidState(format!(
                "Quiz {} has no questions",
                quiz.id
            )));
        }
        Ok(Self {
            quiz,
            phase: AttemptPhase::Answering(0),
            answers: Vec::new(),
        })
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn phase(&self) -> AttemptPhase {
        self.phase
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn question_count(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.question_count()
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            AttemptPhase::Answering(index) => Some(index),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|i| self.quiz.questions.get(i))
    }

    pub fn selected_option(&self, question_id: i64) -> Option<usize> {
        self.answers
            .iter()
            .find(|a| a.question_id == question_id)
            .map(|a| a.selected_option_index)
    }

    fn last_index(&self) -> usize {
        self.question_count() - 1
    }

    fn answering_index(&self, action: &str) -> Result<usize> {
        self.current_index().ok_or_else(|| {
            Error::InvalidState(format!("Cannot {} while {:?}", action, self.phase))
        })
    }

    /// Records the answer for the current question, replacing any earlier
    /// choice for the same question.
    pub fn select_option(&mut self, option_index: usize) -> Result<()> {
        let index = self.answering_index("select an option")?;
        let question = &self.quiz.questions[index];
        if option_index >= question.options.len() {
            return Err(Error::InvalidInput(format!(
                "Question {} has no option {}",
                index + 1,
                option_index + 1
            )));
        }

        let answer = Answer {
            question_id: question.id,
            selected_option_index: option_index,
        };
        match self
            .answers
            .iter_mut()
            .find(|a| a.question_id == answer.question_id)
        {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }
        Ok(())
    }

    pub fn next(&mut self) -> Result<AttemptPhase> {
        let index = self.answering_index("move forward")?;
        self.phase = if index < self.last_index() {
            AttemptPhase::Answering(index + 1)
        } else {
            AttemptPhase::Reviewing
        };
        Ok(self.phase)
    }

    pub fn previous(&mut self) -> Result<AttemptPhase> {
        let index = self.answering_index("move back")?;
        if index > 0 {
            self.phase = AttemptPhase::Answering(index - 1);
        }
        Ok(self.phase)
    }

    /// Leaves the review screen. Navigation resumes at the last question.
    pub fn back_to_answering(&mut self) -> Result<()> {
        if self.phase != AttemptPhase::Reviewing {
            return Err(Error::InvalidState(format!(
                "Cannot return to the questions while {:?}",
                self.phase
            )));
        }
        self.phase = AttemptPhase::Answering(self.last_index());
        Ok(())
    }

    pub fn ensure_submittable(&self) -> Result<()> {
        if self.phase != AttemptPhase::Reviewing {
            return Err(Error::InvalidState(format!(
                "Cannot submit while {:?}",
                self.phase
            )));
        }
        if !self.is_complete() {
            return Err(Error::IncompleteAnswers {
                answered: self.answered_count(),
                expected: self.question_count(),
            });
        }
        Ok(())
    }

    /// Sends the answers. The request is abandoned when `cancel` fires, in
    /// which case the attempt stays in review.
    pub async fn submit(
        &mut self,
        quizzes: &QuizService,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> Result<SubmissionResult> {
        self.ensure_submittable()?;

        let request = quizzes.submit_answers(credential, self.quiz.id, &self.answers);
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            res = request => res,
        };

        match outcome {
            Ok(result) => {
                self.phase = AttemptPhase::Submitted;
                info!(quiz_id = self.quiz.id, "Attempt submitted");
                Ok(result)
            }
            Err(err) => {
                warn!(quiz_id = self.quiz.id, "Submission failed: {}", err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::Difficulty;
    use crate::models::user::{Author, User};
    use crate::services::api_client::ApiClient;
    use url::Url;

    fn quiz_with(n: i64) -> Quiz {
        Quiz {
            id: 10,
            title: "Capitals".into(),
            description: "Europe".into(),
            category: "Geography".into(),
            difficulty: Difficulty::Easy,
            questions: (1..=n)
                .map(|id| Question {
                    id,
                    text: format!("Q{}", id),
                    options: vec!["a".into(), "b".into(), "c".into()],
                })
                .collect(),
            author: Author {
                id: 1,
                username: "ana".into(),
            },
        }
    }

    fn offline() -> (QuizService, Credential) {
        let api = ApiClient::new(Url::parse("http://127.0.0.1:9").unwrap());
        let credential = Credential {
            token: "t".into(),
            user: User {
                id: 1,
                username: "ana".into(),
                email: "ana@example.com".into(),
            },
        };
        (QuizService::new(api), credential)
    }

    #[test]
    fn later_selection_replaces_earlier() {
        let mut attempt = QuizAttempt::new(quiz_with(2)).unwrap();
        attempt.select_option(0).unwrap();
        attempt.select_option(2).unwrap();
        attempt.select_option(1).unwrap();

        assert_eq!(attempt.answered_count(), 1);
        assert_eq!(attempt.selected_option(1), Some(1));
    }

    #[test]
    fn next_stops_at_review() {
        let mut attempt = QuizAttempt::new(quiz_with(2)).unwrap();
        assert_eq!(attempt.next().unwrap(), AttemptPhase::Answering(1));
        assert_eq!(attempt.next().unwrap(), AttemptPhase::Reviewing);
        assert!(matches!(attempt.next(), Err(Error::InvalidState(_))));
        assert_eq!(attempt.phase(), AttemptPhase::Reviewing);
    }

    #[test]
    fn previous_at_first_question_is_noop() {
        let mut attempt = QuizAttempt::new(quiz_with(3)).unwrap();
        assert_eq!(attempt.previous().unwrap(), AttemptPhase::Answering(0));

        attempt.next().unwrap();
        attempt.next().unwrap();
        assert_eq!(attempt.previous().unwrap(), AttemptPhase::Answering(1));
    }

    #[test]
    fn back_from_review_lands_on_last_question() {
        let mut attempt = QuizAttempt::new(quiz_with(3)).unwrap();
        assert!(attempt.back_to_answering().is_err());
        for _ in 0..3 {
            attempt.next().unwrap();
        }
        attempt.back_to_answering().unwrap();
        assert_eq!(attempt.phase(), AttemptPhase::Answering(2));
    }

    #[test]
    fn rejects_unknown_option_and_empty_quiz() {
        let mut attempt = QuizAttempt::new(quiz_with(1)).unwrap();
        assert!(matches!(attempt.select_option(3), Err(Error::InvalidInput(_))));
        assert!(attempt.answers().is_empty());

        assert!(matches!(
            QuizAttempt::new(quiz_with(0)),
            Err(Error::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn incomplete_submission_is_refused() {
        let (quizzes, credential) = offline();
        let mut attempt = QuizAttempt::new(quiz_with(2)).unwrap();
        attempt.select_option(0).unwrap();
        attempt.next().unwrap();
        attempt.next().unwrap();

        let err = attempt
            .submit(&quizzes, &credential, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::IncompleteAnswers {
                answered: 1,
                expected: 2
            }
        ));
        assert_eq!(attempt.phase(), AttemptPhase::Reviewing);
        assert_eq!(attempt.answered_count(), 1);
    }

    #[tokio::test]
    async fn cancelled_submission_stays_in_review() {
        let (quizzes, credential) = offline();
        let mut attempt = QuizAttempt::new(quiz_with(1)).unwrap();
        attempt.select_option(2).unwrap();
        attempt.next().unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = attempt.submit(&quizzes, &credential, &cancel).await.unwrap_err();

        assert!(matches!(err, Error::Cancelled));
        assert_eq!(attempt.phase(), AttemptPhase::Reviewing);
    }
}
