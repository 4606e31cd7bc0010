//! Verify the validation pipelines against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Each vector file lists raw inputs and either the expected typed result or
//! the exact error text a client would see. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use todo_core::{CreateTodo, Todo, TodoFilter, UpdateTodo};

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: CreateTodo = serde_json::from_value(case["input"].clone()).unwrap();
        let expected = &case["expected"];

        match input.validate() {
            Ok(todo) => {
                let actual = serde_json::to_value(&todo).unwrap();
                assert_eq!(actual, expected["ok"], "{name}: created todo");
            }
            Err(err) => {
                assert_eq!(err.to_string(), expected["err"].as_str().unwrap(), "{name}: error");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let raw = include_str!("../../test-vectors/update.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    let stored: Todo = serde_json::from_value(vectors["stored"].clone()).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: UpdateTodo = serde_json::from_value(case["input"].clone()).unwrap();
        let expected = &case["expected"];

        match input.apply(&stored) {
            Ok((todo, field)) => {
                assert_eq!(
                    format!("{field} Updated"),
                    expected["ok"]["reply"].as_str().unwrap(),
                    "{name}: reply"
                );
                let actual = serde_json::to_value(&todo).unwrap();
                assert_eq!(actual, expected["ok"]["todo"], "{name}: merged todo");
            }
            Err(errors) => {
                assert_eq!(errors.to_string(), expected["err"].as_str().unwrap(), "{name}: errors");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

#[test]
fn filter_test_vectors() {
    let raw = include_str!("../../test-vectors/filter.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: TodoFilter = serde_json::from_value(case["input"].clone()).unwrap();
        let expected = &case["expected"];

        match input.validate() {
            Ok(query) => {
                let mut actual = serde_json::Map::new();
                if let Some(status) = query.status {
                    actual.insert("status".into(), status.as_str().into());
                }
                if let Some(priority) = query.priority {
                    actual.insert("priority".into(), priority.as_str().into());
                }
                if let Some(category) = query.category {
                    actual.insert("category".into(), category.as_str().into());
                }
                if let Some(search) = query.search {
                    actual.insert("search".into(), search.into());
                }
                assert_eq!(serde_json::Value::Object(actual), expected["ok"], "{name}: query");
            }
            Err(err) => {
                assert_eq!(err.to_string(), expected["err"].as_str().unwrap(), "{name}: error");
            }
        }
    }
}
