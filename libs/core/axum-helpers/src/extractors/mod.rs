//! Extractors that reject with [`AppError`](crate::AppError) so every
//! decode failure renders the same `{"error": ...}` envelope.

pub mod id_path;
pub mod json_body;

pub use id_path::IdPath;
pub use json_body::JsonBody;
