//! List filters.
//!
//! # Design
//! A filter is the conjunction of every recognized parameter the client sent.
//! There is no precedence between single-field and combined filters: `status`,
//! `priority` and `category` may appear in any combination, optionally together
//! with a `search_q` substring match on the todo text.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{Category, Priority, Status};

/// Raw query string of `GET /todos/`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_q: Option<String>,
}

/// A validated filter, ready to be turned into a `WHERE` clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoQuery {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub search: Option<String>,
}

impl TodoQuery {
    /// True when no condition applies and every row matches.
    pub fn is_unfiltered(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.search.is_none()
    }
}

impl TodoFilter {
    /// Checks every supplied enum parameter. When several are invalid the
    /// error names status first, then category, then priority.
    pub fn validate(self) -> Result<TodoQuery, ValidationError> {
        let status = self.status.as_deref().map(str::parse::<Status>).transpose()?;
        let category = self.category.as_deref().map(str::parse::<Category>).transpose()?;
        let priority = self.priority.as_deref().map(str::parse::<Priority>).transpose()?;

        Ok(TodoQuery {
            status,
            priority,
            category,
            search: self.search_q,
        })
    }
}
