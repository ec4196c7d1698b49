use crate::dto::quiz_dto::{CreateQuizPayload, QuestionPayload};
use crate::error::{Error, Result};
use crate::models::quiz::Difficulty;

/// Editable quiz draft. Always holds at least one question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizDraft {
    payload: CreateQuizPayload,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self {
            payload: CreateQuizPayload {
                title: String::new(),
                description: String::new(),
                category: String::new(),
                difficulty: Difficulty::Medium,
                questions: vec![QuestionPayload::blank()],
            },
        }
    }
}

impl QuizDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payload(&self) -> &CreateQuizPayload {
        &self.payload
    }

    pub fn into_payload(self) -> CreateQuizPayload {
        self.payload
    }

    pub fn questions(&self) -> &[QuestionPayload] {
        &self.payload.questions
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.payload.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.payload.description = description.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.payload.category = category.into();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.payload.difficulty = difficulty;
    }

    /// Appends a blank question with four empty options and returns its index.
    pub fn add_question(&mut self) -> usize {
        self.payload.questions.push(QuestionPayload::blank());
        self.payload.questions.len() - 1
    }

    pub fn remove_question(&mut self, index: usize) -> Result<()> {
        self.question(index)?;
        if self.payload.questions.len() <= 1 {
            return Err(Error::InvalidInput(
                "A quiz needs at least one question".to_string(),
            ));
        }
        self.payload.questions.remove(index);
        Ok(())
    }

    pub fn set_question_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.question_mut(index)?.text = text.into();
        Ok(())
    }

    pub fn add_option(&mut self, question: usize) -> Result<usize> {
        let q = self.question_mut(question)?;
        q.options.push(String::new());
        Ok(q.options.len() - 1)
    }

    pub fn set_option_text(
        &mut self,
        question: usize,
        option: usize,
        text: impl Into<String>,
    ) -> Result<()> {
        let q = self.question_mut(question)?;
        let slot = q
            .options
            .get_mut(option)
            .ok_or_else(|| no_option(question, option))?;
        *slot = text.into();
        Ok(())
    }

    /// Removes an option. The correct-option pointer keeps naming the same
    /// option when an earlier one is removed, and resets to the first
    /// option when the correct one itself is removed.
    pub fn remove_option(&mut self, question: usize, option: usize) -> Result<()> {
        let q = self.question_mut(question)?;
        if option >= q.options.len() {
            return Err(no_option(question, option));
        }
        if q.options.len() == 1 {
            return Err(Error::InvalidInput(format!(
                "Question {} needs at least one option",
                question + 1
            )));
        }

        q.options.remove(option);
        if option == q.correct_option_index {
            q.correct_option_index = 0;
        } else if option < q.correct_option_index {
            q.correct_option_index -= 1;
        }
        Ok(())
    }

    pub fn set_correct_option(&mut self, question: usize, option: usize) -> Result<()> {
        let q = self.question_mut(question)?;
        if option >= q.options.len() {
            return Err(no_option(question, option));
        }
        q.correct_option_index = option;
        Ok(())
    }

    fn question(&self, index: usize) -> Result<&QuestionPayload> {
        self.payload
            .questions
            .get(index)
            .ok_or_else(|| no_question(index))
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut QuestionPayload> {
        self.payload
            .questions
            .get_mut(index)
            .ok_or_else(|| no_question(index))
    }
}

fn no_question(index: usize) -> Error {
    Error::InvalidInput(format!("There is no question {}", index + 1))
}

fn no_option(question: usize, option: usize) -> Error {
    Error::InvalidInput(format!(
        "Question {} has no option {}",
        question + 1,
        option + 1
    ))
}
