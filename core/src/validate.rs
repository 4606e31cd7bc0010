//! Validation pipelines for create and update bodies.
//!
//! # Design
//! Create stops at the first bad field, checked in the order status, priority,
//! category, due date. Update checks every field the client supplied and
//! reports all violations together; a single violation yields exactly one
//! message, the same text create would produce.

use std::fmt;

use crate::date::parse_due_date;
use crate::error::{ValidationError, ValidationErrors};
use crate::types::{Category, CreateTodo, Priority, Status, Todo, UpdateTodo};

/// The column an update reply names, e.g. `"Status Updated"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatedField {
    Status,
    Priority,
    Category,
    DueDate,
    Todo,
}

impl UpdatedField {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdatedField::Status => "Status",
            UpdatedField::Priority => "Priority",
            UpdatedField::Category => "Category",
            UpdatedField::DueDate => "Due Date",
            UpdatedField::Todo => "Todo",
        }
    }
}

impl fmt::Display for UpdatedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CreateTodo {
    /// Turns a create body into a storable todo, or names the first bad field.
    pub fn validate(self) -> Result<Todo, ValidationError> {
        let status: Status =
            required(self.status.as_deref(), ValidationError::InvalidStatus)?.parse()?;
        let priority: Priority =
            required(self.priority.as_deref(), ValidationError::InvalidPriority)?.parse()?;
        let category: Category =
            required(self.category.as_deref(), ValidationError::InvalidCategory)?.parse()?;
        let due_date =
            parse_due_date(required(self.due_date.as_deref(), ValidationError::InvalidDueDate)?)?;

        Ok(Todo {
            id: self.id,
            todo: self.todo,
            category,
            priority,
            status,
            due_date,
        })
    }
}

impl UpdateTodo {
    /// The field named in the success reply: the first one supplied in the
    /// order status, priority, category, due date, todo.
    pub fn headline(&self) -> Option<UpdatedField> {
        if self.status.is_some() {
            Some(UpdatedField::Status)
        } else if self.priority.is_some() {
            Some(UpdatedField::Priority)
        } else if self.category.is_some() {
            Some(UpdatedField::Category)
        } else if self.due_date.is_some() {
            Some(UpdatedField::DueDate)
        } else if self.todo.is_some() {
            Some(UpdatedField::Todo)
        } else {
            None
        }
    }

    /// Merges this patch over `current`. Unsupplied fields keep their current
    /// values; the returned todo always carries all five columns.
    pub fn apply(self, current: &Todo) -> Result<(Todo, UpdatedField), ValidationErrors> {
        let headline = self.headline().ok_or(ValidationError::NoFields)?;
        let mut errors = Vec::new();

        let status = resolve(
            self.status.as_deref(),
            current.status,
            str::parse::<Status>,
            &mut errors,
        );
        let priority = resolve(
            self.priority.as_deref(),
            current.priority,
            str::parse::<Priority>,
            &mut errors,
        );
        let category = resolve(
            self.category.as_deref(),
            current.category,
            str::parse::<Category>,
            &mut errors,
        );
        let due_date = resolve(
            self.due_date.as_deref(),
            current.due_date,
            parse_due_date,
            &mut errors,
        );

        if let Some(errors) = ValidationErrors::from_vec(errors) {
            return Err(errors);
        }

        let todo = Todo {
            id: current.id,
            todo: self.todo.unwrap_or_else(|| current.todo.clone()),
            category,
            priority,
            status,
            due_date,
        };
        Ok((todo, headline))
    }
}

fn required(value: Option<&str>, missing: ValidationError) -> Result<&str, ValidationError> {
    value.ok_or(missing)
}

fn resolve<T>(
    supplied: Option<&str>,
    current: T,
    parse: impl Fn(&str) -> Result<T, ValidationError>,
    errors: &mut Vec<ValidationError>,
) -> T {
    match supplied.map(parse) {
        Some(Ok(value)) => value,
        Some(Err(error)) => {
            errors.push(error);
            current
        }
        None => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_body() -> CreateTodo {
        CreateTodo {
            id: 1,
            todo: "buy milk".to_string(),
            priority: Some("HIGH".to_string()),
            status: Some("TO DO".to_string()),
            category: Some("HOME".to_string()),
            due_date: Some("2024-03-05".to_string()),
        }
    }

    fn stored() -> Todo {
        create_body().validate().unwrap()
    }

    #[test]
    fn create_accepts_valid_body() {
        let todo = stored();
        assert_eq!(todo.status, Status::ToDo);
        assert_eq!(todo.priority, Priority::High);
        assert_eq!(todo.category, Category::Home);
        assert_eq!(todo.due_date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn create_normalizes_date() {
        let body = CreateTodo {
            due_date: Some("2024/3/5".to_string()),
            ..create_body()
        };
        assert_eq!(body.validate().unwrap().due_date, stored().due_date);
    }

    #[test]
    fn create_checks_status_before_priority() {
        let body = CreateTodo {
            status: Some("LATER".to_string()),
            priority: Some("URGENT".to_string()),
            ..create_body()
        };
        assert_eq!(body.validate().unwrap_err(), ValidationError::InvalidStatus);
    }

    #[test]
    fn create_missing_category_is_invalid_category() {
        let body = CreateTodo {
            category: None,
            ..create_body()
        };
        assert_eq!(body.validate().unwrap_err(), ValidationError::InvalidCategory);
    }

    #[test]
    fn create_rejects_bad_date() {
        let body = CreateTodo {
            due_date: Some("2024-13-40".to_string()),
            ..create_body()
        };
        assert_eq!(body.validate().unwrap_err(), ValidationError::InvalidDueDate);
    }

    #[test]
    fn update_keeps_unsupplied_fields() {
        let patch = UpdateTodo {
            status: Some("DONE".to_string()),
            ..UpdateTodo::default()
        };
        let (todo, field) = patch.apply(&stored()).unwrap();
        assert_eq!(field, UpdatedField::Status);
        assert_eq!(todo.status, Status::Done);
        assert_eq!(todo.priority, Priority::High);
        assert_eq!(todo.todo, "buy milk");
        assert_eq!(todo.due_date, stored().due_date);
    }

    #[test]
    fn update_headline_follows_field_order() {
        let patch = UpdateTodo {
            todo: Some("walk dog".to_string()),
            category: Some("WORK".to_string()),
            ..UpdateTodo::default()
        };
        let (todo, field) = patch.apply(&stored()).unwrap();
        assert_eq!(field, UpdatedField::Category);
        assert_eq!(todo.todo, "walk dog");
        assert_eq!(todo.category, Category::Work);
    }

    #[test]
    fn update_text_only() {
        let patch = UpdateTodo {
            todo: Some("walk dog".to_string()),
            ..UpdateTodo::default()
        };
        let (_, field) = patch.apply(&stored()).unwrap();
        assert_eq!(field.to_string(), "Todo");
    }

    #[test]
    fn update_reports_every_violation() {
        let patch = UpdateTodo {
            status: Some("DONE".to_string()),
            priority: Some("URGENT".to_string()),
            due_date: Some("someday".to_string()),
            ..UpdateTodo::default()
        };
        let errors = patch.apply(&stored()).unwrap_err();
        assert_eq!(
            errors.as_slice(),
            &[ValidationError::InvalidPriority, ValidationError::InvalidDueDate]
        );
    }

    #[test]
    fn update_with_no_fields_is_rejected() {
        let errors = UpdateTodo::default().apply(&stored()).unwrap_err();
        assert_eq!(errors.as_slice(), &[ValidationError::NoFields]);
    }

    #[test]
    fn due_date_headline_text() {
        assert_eq!(UpdatedField::DueDate.to_string(), "Due Date");
    }
}
