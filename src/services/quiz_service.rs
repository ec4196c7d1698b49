use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::dto::quiz_dto::CreateQuizPayload;
use crate::error::Result;
use crate::models::answer::{Answer, SubmissionResult, SubmitAnswersRequest};
use crate::models::quiz::{Quiz, QuizSummary};
use crate::models::user::Credential;
use crate::services::api_client::ApiClient;
use crate::services::query_cache::{QueryCache, QueryKey};

#[derive(Clone)]
pub struct QuizService {
    api: ApiClient,
    cache: Arc<QueryCache>,
}

impl QuizService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: Arc::new(QueryCache::new()),
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub async fn list_quizzes(&self, credential: &Credential) -> Result<Vec<QuizSummary>> {
        if let Some(list) = self.cache.quizzes() {
            return Ok(list);
        }
        let list: Vec<QuizSummary> = self
            .api
            .get("api/quizzes", Some(credential.bearer()))
            .await?;
        self.cache.put_quizzes(list.clone());
        Ok(list)
    }

    pub async fn get_quiz(&self, credential: &Credential, quiz_id: i64) -> Result<Quiz> {
        if let Some(quiz) = self.cache.quiz(quiz_id) {
            return Ok(quiz);
        }
        let quiz: Quiz = self
            .api
            .get(&format!("api/quizzes/{}", quiz_id), Some(credential.bearer()))
            .await?;
        self.cache.put_quiz(quiz.clone());
        Ok(quiz)
    }

    /// Posts an authoring draft as-is once its required fields are filled.
    pub async fn create_quiz(
        &self,
        credential: &Credential,
        payload: &CreateQuizPayload,
    ) -> Result<Quiz> {
        payload.validate()?;

        let quiz: Quiz = self
            .api
            .post("api/quizzes", payload, Some(credential.bearer()))
            .await?;
        self.cache.invalidate(QueryKey::Quizzes);
        info!(quiz_id = quiz.id, "Created quiz {}", quiz.title);
        Ok(quiz)
    }

    pub async fn submit_answers(
        &self,
        credential: &Credential,
        quiz_id: i64,
        answers: &[Answer],
    ) -> Result<SubmissionResult> {
        let body = SubmitAnswersRequest {
            answers: answers.to_vec(),
        };
        let result: SubmissionResult = self
            .api
            .post(
                &format!("api/quizzes/{}/submit", quiz_id),
                &body,
                Some(credential.bearer()),
            )
            .await?;
        self.cache.invalidate(QueryKey::Quiz(quiz_id));
        self.cache.invalidate(QueryKey::Quizzes);
        info!(quiz_id, answers = answers.len(), "Submitted quiz attempt");
        Ok(result)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
