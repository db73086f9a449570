//! Interactive prompt abstraction.
//!
//! The release pipeline only ever asks three kinds of questions: pick one of
//! a list, type a value, or confirm. Each answer is awaited, and a `None`
//! (or `false`) answer means the operator cancelled.
use async_trait::async_trait;

use crate::Result;

/// Terminal implementation reading from stdin.
pub mod terminal;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single entry in a select prompt.
pub struct SelectOption {
    /// Text shown to the operator
    pub label: String,
    /// Value returned when chosen
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Option whose label is its value
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectPrompt {
    pub message: String,
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPrompt {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub message: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Returns the chosen option's value
    async fn select(&self, prompt: SelectPrompt) -> Result<Option<String>>;
    /// Returns the entered text, `None` when nothing was entered
    async fn input(&self, prompt: InputPrompt) -> Result<Option<String>>;
    async fn confirm(&self, prompt: ConfirmPrompt) -> Result<bool>;
}
