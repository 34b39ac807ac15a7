//! MongoDB implementation of TodoRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc, oid::ObjectId},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{TodoError, TodoResult};
use crate::models::{FieldUpdate, Todo};
use crate::repository::TodoRepository;

pub const DEFAULT_COLLECTION: &str = "todos";

/// Stored shape of a Todo: `{ _id: ObjectId, title, complete }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub complete: bool,
}

impl From<TodoDocument> for Todo {
    fn from(doc: TodoDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            title: doc.title,
            complete: doc.complete,
        }
    }
}

impl TryFrom<&Todo> for TodoDocument {
    type Error = TodoError;

    fn try_from(todo: &Todo) -> TodoResult<Self> {
        let id = ObjectId::parse_str(&todo.id)
            .map_err(|_| TodoError::Validation(format!("invalid todo id: {}", todo.id)))?;

        Ok(Self {
            id,
            title: todo.title.clone(),
            complete: todo.complete,
        })
    }
}

/// An id that is not valid hex cannot name any stored document.
fn object_id(id: &str) -> TodoResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| TodoError::NotFound(id.to_string()))
}

fn update_document(update: FieldUpdate) -> Document {
    match update {
        FieldUpdate::Complete(complete) => doc! { "$set": { "complete": complete } },
    }
}

/// MongoDB implementation of the TodoRepository
///
/// Holds the `Database` handle created at startup; the underlying client
/// owns the connection pool.
#[derive(Clone)]
pub struct MongoTodoRepository {
    db: Database,
    collection_name: String,
}

impl MongoTodoRepository {
    /// Repository over the `todos` collection of `db`
    ///
    /// ```ignore
    /// let client = database::mongodb::connect("mongodb://localhost:27017").await?;
    /// let repo = MongoTodoRepository::new(client.database("todo_app"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        Self {
            db,
            collection_name: collection_name.to_string(),
        }
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Collection handle scoped to one operation. Dropping it on any exit path
    /// hands the checked-out connection back to the pool.
    fn session(&self) -> Collection<TodoDocument> {
        self.db.collection::<TodoDocument>(&self.collection_name)
    }
}

#[async_trait]
impl TodoRepository for MongoTodoRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> TodoResult<Vec<Todo>> {
        let collection = self.session();

        let cursor = collection.find(doc! {}).await?;
        let documents: Vec<TodoDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Todo::from).collect())
    }

    #[instrument(skip(self, todo), fields(todo_id = %todo.id))]
    async fn insert(&self, todo: &Todo) -> TodoResult<()> {
        let document = TodoDocument::try_from(todo)?;
        let collection = self.session();

        collection.insert_one(&document).await?;

        tracing::debug!("Todo inserted");
        Ok(())
    }

    #[instrument(skip(self), fields(todo_id = %id))]
    async fn update_field(&self, id: &str, update: FieldUpdate) -> TodoResult<()> {
        let oid = object_id(id)?;
        let collection = self.session();

        let result = collection
            .update_one(doc! { "_id": oid }, update_document(update))
            .await?;

        if result.matched_count == 0 {
            return Err(TodoError::NotFound(id.to_string()));
        }

        tracing::debug!(modified = result.modified_count, "Todo updated");
        Ok(())
    }

    #[instrument(skip(self), fields(todo_id = %id))]
    async fn remove(&self, id: &str) -> TodoResult<()> {
        let oid = object_id(id)?;
        let collection = self.session();

        let result = collection.delete_one(doc! { "_id": oid }).await?;

        if result.deleted_count == 0 {
            return Err(TodoError::NotFound(id.to_string()));
        }

        tracing::debug!("Todo deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_round_trips_hex_id() {
        let todo = Todo {
            id: "65f0c0ffee0000000000beef".into(),
            title: "water plants".into(),
            complete: true,
        };

        let document = TodoDocument::try_from(&todo).unwrap();
        assert_eq!(document.id.to_hex(), todo.id);
        assert_eq!(Todo::from(document), todo);
    }

    #[test]
    fn test_document_rejects_non_object_id() {
        let todo = Todo {
            id: "not-hex".into(),
            title: "x".into(),
            complete: false,
        };
        assert!(matches!(
            TodoDocument::try_from(&todo),
            Err(TodoError::Validation(_))
        ));
    }

    #[test]
    fn test_object_id_parse_failure_is_not_found() {
        assert_eq!(
            object_id("not-a-real-id"),
            Err(TodoError::NotFound("not-a-real-id".into()))
        );
    }

    #[test]
    fn test_update_document_sets_complete() {
        assert_eq!(
            update_document(FieldUpdate::Complete(false)),
            doc! { "$set": { "complete": false } }
        );
    }

    #[test]
    fn test_stored_shape_uses_underscore_id() {
        let document = TodoDocument {
            id: ObjectId::new(),
            title: "t".into(),
            complete: false,
        };
        let bson = mongodb::bson::to_document(&document).unwrap();
        assert!(bson.get_object_id("_id").is_ok());
        assert_eq!(bson.get_str("title").unwrap(), "t");
        assert!(!bson.get_bool("complete").unwrap());
    }
}
