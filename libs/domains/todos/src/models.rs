use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A single task-list item.
///
/// `id` is assigned once by the service on Add and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub complete: bool,
}

impl Todo {
    /// Create a Todo with a freshly generated ObjectId.
    pub fn new(input: NewTodo) -> Self {
        Self {
            id: ObjectId::new().to_hex(),
            title: input.title,
            complete: input.complete,
        }
    }
}

/// Payload of an Add request.
///
/// Clients send a full Todo shape; any `id` they include is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub complete: bool,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            complete: false,
        }
    }
}

/// A single-field mutation applied in place by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate {
    Complete(bool),
}
