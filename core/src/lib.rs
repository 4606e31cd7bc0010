//! Domain core for the todo service.
//!
//! # Overview
//! Holds the todo model and every rule the service enforces on input: enum
//! parsing, due-date normalization, and the validation pipelines for list
//! filters, create bodies and update bodies. Nothing here touches the network
//! or the database, so the rules are tested without a running server.
//!
//! # Design
//! - Request DTOs keep untrusted fields as raw strings; validation turns them
//!   into typed values or a `ValidationError` whose text is the reply body.
//! - `Todo` is the only storable shape; the server never writes anything that
//!   did not come out of `CreateTodo::validate` or `UpdateTodo::apply`.

pub mod date;
pub mod error;
pub mod filter;
pub mod types;
pub mod validate;

pub use error::{ValidationError, ValidationErrors};
pub use filter::{TodoFilter, TodoQuery};
pub use types::{Category, CreateTodo, Priority, Status, Todo, UpdateTodo};
pub use validate::UpdatedField;
