use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::models::quiz::{Quiz, QuizSummary};

/// Logical resources the views fetch. Entries never expire on their own;
/// mutations invalidate the keys they affect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Quizzes,
    Quiz(i64),
}

#[derive(Debug, Clone)]
enum Entry {
    Quizzes(Vec<QuizSummary>),
    Quiz(Quiz),
}

#[derive(Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Entry>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quizzes(&self) -> Option<Vec<QuizSummary>> {
        match self.lock().get(&QueryKey::Quizzes) {
            Some(Entry::Quizzes(list)) => Some(list.clone()),
            _ => None,
        }
    }

    pub fn quiz(&self, id: i64) -> Option<Quiz> {
        match self.lock().get(&QueryKey::Quiz(id)) {
            Some(Entry::Quiz(quiz)) => Some(quiz.clone()),
            _ => None,
        }
    }

    pub fn put_quizzes(&self, list: Vec<QuizSummary>) {
        self.lock().insert(QueryKey::Quizzes, Entry::Quizzes(list));
    }

    pub fn put_quiz(&self, quiz: Quiz) {
        self.lock().insert(QueryKey::Quiz(quiz.id), Entry::Quiz(quiz));
    }

    pub fn contains(&self, key: QueryKey) -> bool {
        self.lock().contains_key(&key)
    }

    pub fn invalidate(&self, key: QueryKey) {
        if self.lock().remove(&key).is_some() {
            tracing::debug!(?key, "Invalidated cached query");
        }
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
