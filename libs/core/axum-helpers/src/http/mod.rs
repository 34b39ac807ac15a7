//! HTTP layers shared by the service routers.

pub mod cors;

pub use cors::route_cors;
