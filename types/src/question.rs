//! Quiz round domain type and its wire shape.

use serde::Deserialize;
use thiserror::Error;

/// One quiz round: a site base name, its category, and candidate TLDs.
///
/// Constructed only through [`Question::new`], which checks the service
/// contract at the trust boundary. A `Question` in hand always has at least
/// two distinct options and an answer that is one of them, and is never
/// mutated after construction — each round replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    domain: String,
    category: String,
    options: Vec<String>,
    answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("question needs at least two options, got {0}")]
    TooFewOptions(usize),
    #[error("duplicate option '{0}'")]
    DuplicateOption(String),
    #[error("answer '{0}' is not among the options")]
    AnswerNotInOptions(String),
}

impl Question {
    pub fn new(
        domain: impl Into<String>,
        category: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let answer = answer.into();
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions(options.len()));
        }
        for (i, option) in options.iter().enumerate() {
            if options[..i].contains(option) {
                return Err(QuestionError::DuplicateOption(option.clone()));
            }
        }
        if !options.contains(&answer) {
            return Err(QuestionError::AnswerNotInOptions(answer));
        }
        Ok(Self {
            domain: domain.into(),
            category: category.into(),
            options,
            answer,
        })
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Candidate TLDs in the order the service presented them.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn is_option(&self, tld: &str) -> bool {
        self.options.iter().any(|o| o == tld)
    }

    /// Exact string equality against the answer.
    #[must_use]
    pub fn is_correct(&self, tld: &str) -> bool {
        self.answer == tld
    }
}

/// Wire shape of the question endpoint, validated into [`Question`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    pub domain: String,
    pub category: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl TryFrom<RawQuestion> for Question {
    type Error = QuestionError;

    fn try_from(raw: RawQuestion) -> Result<Self, QuestionError> {
        Question::new(raw.domain, raw.category, raw.options, raw.answer)
    }
}
