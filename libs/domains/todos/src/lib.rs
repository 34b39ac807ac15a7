//! Todos Domain
//!
//! A flat task list persisted in MongoDB and served over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP decode/encode, CORS, status mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Endpoints  │  ← (context, request) -> Outcome<response>
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Middleware  │  ← logging, metrics (dyn TodoService wrappers)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← the five operations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + MongoDB and in-memory implementations
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_todos::{
//!     Endpoints, MongoTodoRepository, TransportOptions, handlers,
//!     middleware::{logging_middleware, metrics_middleware},
//!     service,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = mongodb::Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoTodoRepository::new(client.database("todo_app"));
//!
//! let service = service::new(repository, vec![logging_middleware(), metrics_middleware()]);
//! let router = handlers::router(Endpoints::new(service), TransportOptions::default());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod context;
pub mod endpoints;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod middleware;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use client::HttpTodoClient;
pub use context::RequestContext;
pub use endpoints::{Endpoint, EndpointError, Endpoints, Outcome};
pub use error::{TodoError, TodoResult};
pub use handlers::TransportOptions;
pub use memory::InMemoryTodoRepository;
pub use middleware::MiddlewareKind;
pub use models::{FieldUpdate, NewTodo, Todo};
pub use mongodb::MongoTodoRepository;
pub use repository::TodoRepository;
pub use service::{BasicTodoService, Middleware, TodoService};
