//! Domain types for the todo API.
//!
//! # Design
//! The three enum fields serialize to the exact strings stored in the `todo`
//! table and accepted on the wire (`"TO DO"`, `"HIGH"`, `"WORK"`, ...).
//! Their `FromStr` impls fail with the `ValidationError` variant that names the
//! field, so `"nope".parse::<Status>()` already carries the client-facing
//! message.
//!
//! Request bodies keep the enum and date fields as raw `Option<String>`:
//! a missing or misspelled value must reach the validation pipeline and come
//! back as "Invalid Todo Status" rather than a generic JSON rejection.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "LOW")]
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            _ => Err(ValidationError::InvalidPriority),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "TO DO")]
    ToDo,
    #[serde(rename = "IN PROGRESS")]
    InProgress,
    #[serde(rename = "DONE")]
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::ToDo, Status::InProgress, Status::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::ToDo => "TO DO",
            Status::InProgress => "IN PROGRESS",
            Status::Done => "DONE",
        }
    }
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TO DO" => Ok(Status::ToDo),
            "IN PROGRESS" => Ok(Status::InProgress),
            "DONE" => Ok(Status::Done),
            _ => Err(ValidationError::InvalidStatus),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "WORK")]
    Work,
    #[serde(rename = "HOME")]
    Home,
    #[serde(rename = "LEARNING")]
    Learning,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Home, Category::Learning];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "WORK",
            Category::Home => "HOME",
            Category::Learning => "LEARNING",
        }
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WORK" => Ok(Category::Work),
            "HOME" => Ok(Category::Home),
            "LEARNING" => Ok(Category::Learning),
            _ => Err(ValidationError::InvalidCategory),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single todo as returned by the API.
///
/// Field order matches the public JSON shape
/// `{id, todo, category, priority, status, dueDate}`; `dueDate` is always the
/// canonical `yyyy-MM-dd` form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub todo: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,
}

/// Request payload for creating a todo. The caller picks the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub id: i64,
    pub todo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Request payload for updating a todo. Only the fields present in the JSON
/// are applied; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}
